/**
 * The catalog of artworks that quizzes draw from.
 *
 * `Catalog` is implemented by `MemoryCatalog` below and by `persistence::SqliteCatalog`.
 * A session owns its catalog, so separate sessions (and tests) never share one.
 *
 * Version: October 2026
 */
use std::cmp::Ordering;
use std::collections::HashSet;

use log::info;
use rand::seq::SliceRandom;
use rand::thread_rng;

use super::artwork::{Artwork, YearRange};
use super::common::{QuizError, Result};


/// The group that the built-in artworks belong to.
pub const SEED_GROUP: &str = "starter";


/// What happened when a batch of artworks was merged into a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    /// Artworks whose id was already in the catalog.
    pub skipped: usize,
    /// Group labels that the catalog had not seen before, in order of appearance.
    pub new_groups: Vec<String>,
}


pub trait Catalog {
    /// Total number of stored artworks, active or not.
    fn count(&self) -> Result<usize>;

    /// Pick one active artwork uniformly at random from the enabled groups, skipping
    /// `exclude_ids`. Returns `None` when nothing is eligible.
    fn query_random_active(
        &self, enabled_groups: &HashSet<String>, exclude_ids: &HashSet<String>
    ) -> Result<Option<Artwork>>;

    /// Active artworks of the enabled groups, oldest first, then by title.
    fn query_all_active(&self, enabled_groups: &HashSet<String>) -> Result<Vec<Artwork>>;

    fn query_by_group(&self, group: &str) -> Result<Vec<Artwork>>;

    /// Every group label in the catalog, sorted.
    fn groups(&self) -> Result<Vec<String>>;

    fn set_active(&mut self, id: &str, active: bool) -> Result<()>;

    /// Set the active flag of every artwork in `group`.
    fn set_group_active(&mut self, group: &str, active: bool) -> Result<()>;

    /// Store `artwork` unless its id is taken. Returns `true` if it was added.
    fn insert(&mut self, artwork: &Artwork) -> Result<bool>;

    /// Merge `artworks` into the catalog. Existing ids are left untouched, so importing
    /// the same batch twice adds nothing the second time.
    fn import(&mut self, artworks: Vec<Artwork>) -> Result<ImportSummary> {
        let known: HashSet<String> = self.groups()?.into_iter().collect();
        let mut summary = ImportSummary::default();
        for artwork in artworks.iter() {
            if self.insert(artwork)? {
                summary.added += 1;
                note_new_group(&mut summary, &known, &artwork.group);
            } else {
                summary.skipped += 1;
            }
        }
        Ok(summary)
    }

    /// Load the built-in artworks into an empty catalog. Returns `true` if it did.
    fn seed_if_empty(&mut self) -> Result<bool> {
        if self.count()? > 0 {
            return Ok(false);
        }
        let summary = self.import(seed_artworks())?;
        info!("Seeded empty catalog with {} artworks", summary.added);
        Ok(true)
    }
}


pub fn note_new_group(summary: &mut ImportSummary, known: &HashSet<String>, group: &str) {
    if !known.contains(group) && !summary.new_groups.iter().any(|g| g == group) {
        summary.new_groups.push(String::from(group));
    }
}


/// The artworks that a fresh installation starts with.
pub fn seed_artworks() -> Vec<Artwork> {
    let mut mona_lisa = Artwork::new(
        "1",
        "Mona Lisa",
        "Leonardo da Vinci",
        YearRange::spanning(1503, 1506),
        SEED_GROUP,
    );
    mona_lisa.picture = String::from(
        "https://github.com/user-attachments/assets/e8b028bf-1e4f-4629-a11c-524069d38858"
    );
    mona_lisa.title_en = Some(String::from("Mona Lisa"));

    let mut starry_night = Artwork::new(
        "2", "Hvězdná noc", "Vincent van Gogh", YearRange::exact(1889), SEED_GROUP
    );
    starry_night.picture = String::from(
        "https://github.com/user-attachments/assets/08aa840d-b8fc-49a4-a660-fc3fb0dd6e61"
    );
    starry_night.title_en = Some(String::from("The Starry Night"));

    let mut scream = Artwork::new(
        "3", "Výkřik", "Edvard Munch", YearRange::exact(1893), SEED_GROUP
    );
    scream.picture = String::from(
        "https://github.com/user-attachments/assets/e23d7952-7c0f-45ff-add4-6e1a6e352a0e"
    );
    scream.title_en = Some(String::from("The Scream"));

    vec![mona_lisa, starry_night, scream]
}


/// Choose one of `candidates` uniformly at random.
pub fn choose_random(candidates: Vec<Artwork>) -> Option<Artwork> {
    let mut rng = thread_rng();
    candidates.choose(&mut rng).cloned()
}


/// Comparison function for the browse order: by starting year, then by title.
pub fn cmp_artworks_by_year(a: &Artwork, b: &Artwork) -> Ordering {
    a.years.start().cmp(&b.years.start()).then_with(|| a.title.cmp(&b.title))
}


/// A catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    artworks: Vec<Artwork>,
}


impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog { artworks: Vec::new() }
    }

    pub fn with_artworks(artworks: Vec<Artwork>) -> Self {
        let mut catalog = MemoryCatalog::new();
        for artwork in artworks.into_iter() {
            if !catalog.contains(&artwork.id) {
                catalog.artworks.push(artwork);
            }
        }
        catalog
    }

    fn contains(&self, id: &str) -> bool {
        self.artworks.iter().any(|a| a.id == id)
    }

    fn eligible<'a>(
        &'a self, enabled_groups: &'a HashSet<String>
    ) -> impl Iterator<Item = &'a Artwork> + 'a {
        self.artworks
            .iter()
            .filter(move |a| a.active && enabled_groups.contains(&a.group))
    }
}


impl Catalog for MemoryCatalog {
    fn count(&self) -> Result<usize> {
        Ok(self.artworks.len())
    }

    fn query_random_active(
        &self, enabled_groups: &HashSet<String>, exclude_ids: &HashSet<String>
    ) -> Result<Option<Artwork>> {
        let candidates: Vec<Artwork> = self
            .eligible(enabled_groups)
            .filter(|a| !exclude_ids.contains(&a.id))
            .cloned()
            .collect();
        Ok(choose_random(candidates))
    }

    fn query_all_active(&self, enabled_groups: &HashSet<String>) -> Result<Vec<Artwork>> {
        let mut artworks: Vec<Artwork> = self.eligible(enabled_groups).cloned().collect();
        artworks.sort_by(cmp_artworks_by_year);
        Ok(artworks)
    }

    fn query_by_group(&self, group: &str) -> Result<Vec<Artwork>> {
        Ok(self.artworks.iter().filter(|a| a.group == group).cloned().collect())
    }

    fn groups(&self) -> Result<Vec<String>> {
        let mut groups: Vec<String> = self.artworks.iter().map(|a| a.group.clone()).collect();
        groups.sort();
        groups.dedup();
        Ok(groups)
    }

    fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        match self.artworks.iter_mut().find(|a| a.id == id) {
            Some(artwork) => {
                artwork.active = active;
                Ok(())
            }
            None => Err(QuizError::NotFound(String::from(id))),
        }
    }

    fn set_group_active(&mut self, group: &str, active: bool) -> Result<()> {
        let mut found = false;
        for artwork in self.artworks.iter_mut().filter(|a| a.group == group) {
            artwork.active = active;
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(QuizError::NotFound(String::from(group)))
        }
    }

    fn insert(&mut self, artwork: &Artwork) -> Result<bool> {
        if self.contains(&artwork.id) {
            return Ok(false);
        }
        self.artworks.push(artwork.clone());
        Ok(true)
    }
}

/**
 * Quiz settings and the store they are persisted in.
 *
 * A session reads its settings once, when it starts; editing them while a quiz is
 * running only affects the next quiz.
 *
 * Version: October 2026
 */
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::artwork::Language;
use super::catalog::SEED_GROUP;
use super::common::{QuizError, Result};
use super::matcher::Strictness;


/// The numbers of rounds a player can choose from.
pub const ROUND_OPTIONS: [usize; 3] = [1, 3, 7];


/// Which of the three categories are asked and scored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categories {
    pub title: bool,
    pub author: bool,
    pub year: bool,
}


impl Categories {
    pub fn all() -> Self {
        Categories { title: true, author: true, year: true }
    }

    pub fn any(&self) -> bool {
        self.title || self.author || self.year
    }
}


impl Default for Categories {
    fn default() -> Self {
        Categories::all()
    }
}


impl FromStr for Categories {
    type Err = QuizError;

    /// Parse a comma-separated list such as `title,year`.
    fn from_str(s: &str) -> Result<Self> {
        let mut categories = Categories { title: false, author: false, year: false };
        for name in s.split(',').map(|name| name.trim().to_lowercase()) {
            match name.as_str() {
                "title" => categories.title = true,
                "author" => categories.author = true,
                "year" => categories.year = true,
                "" => {}
                other => {
                    return Err(QuizError::BadArgument(format!(
                        "unknown category '{}' (expected title, author or year)", other
                    )));
                }
            }
        }
        Ok(categories)
    }
}


#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub rounds: usize,
    pub categories: Categories,
    /// Every known group label and whether it is included in quizzes.
    pub groups: BTreeMap<String, bool>,
    pub language: Language,
    pub strictness: Strictness,
}


impl Default for Settings {
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(String::from(SEED_GROUP), true);
        Settings {
            rounds: ROUND_OPTIONS[0],
            categories: Categories::default(),
            groups,
            language: Language::default(),
            strictness: Strictness::default(),
        }
    }
}


impl Settings {
    pub fn set_rounds(&mut self, rounds: usize) -> Result<()> {
        check_rounds(rounds)?;
        self.rounds = rounds;
        Ok(())
    }

    pub fn enabled_groups(&self) -> HashSet<String> {
        self.groups
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(group, _)| group.clone())
            .collect()
    }

    /// Enable or disable a group, adding it if it is not known yet.
    pub fn set_group(&mut self, group: &str, enabled: bool) {
        self.groups.insert(String::from(group), enabled);
    }

    /// Add groups that were seen for the first time. New groups start disabled; groups
    /// that are already known keep their current state.
    pub fn register_groups(&mut self, groups: &[String]) -> usize {
        let mut added = 0;
        for group in groups.iter() {
            if !self.groups.contains_key(group) {
                self.groups.insert(group.clone(), false);
                added += 1;
            }
        }
        added
    }
}


pub fn check_rounds(rounds: usize) -> Result<()> {
    if ROUND_OPTIONS.contains(&rounds) {
        Ok(())
    } else {
        Err(QuizError::InvalidRounds(rounds))
    }
}


/// Where settings are kept between runs of the application.
pub trait SettingsStore {
    /// Load the saved settings, or the defaults if nothing has been saved.
    fn load(&self) -> Result<Settings>;
    fn save(&mut self, settings: &Settings) -> Result<()>;
}


/// A settings store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Option<Settings>,
}


impl MemorySettingsStore {
    pub fn new() -> Self {
        MemorySettingsStore { settings: None }
    }
}


impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.clone().unwrap_or_default())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        self.settings = Some(settings.clone());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fixed_round_counts_are_allowed() {
        let mut settings = Settings::default();
        assert!(settings.set_rounds(3).is_ok());
        assert_eq!(settings.rounds, 3);
        assert!(settings.set_rounds(4).is_err());
        assert_eq!(settings.rounds, 3);
    }

    #[test]
    fn new_groups_are_registered_disabled() {
        let mut settings = Settings::default();
        settings.set_group("baroque", true);

        let added = settings.register_groups(&[s("baroque"), s("cubism")]);
        assert_eq!(added, 1);
        assert_eq!(settings.groups.get("baroque"), Some(&true));
        assert_eq!(settings.groups.get("cubism"), Some(&false));
        assert!(!settings.enabled_groups().contains("cubism"));
    }

    #[test]
    fn can_parse_categories() {
        let categories: Categories = "title, year".parse().unwrap();
        assert_eq!(categories, Categories { title: true, author: false, year: true });
        assert!(!"".parse::<Categories>().unwrap().any());
        assert!("colour".parse::<Categories>().is_err());
    }

    #[test]
    fn memory_store_returns_defaults_until_saved() {
        let mut store = MemorySettingsStore::new();
        assert_eq!(store.load().unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.rounds = 7;
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap().rounds, 7);
    }

    fn s(mystr: &str) -> String {
        String::from(mystr)
    }
}

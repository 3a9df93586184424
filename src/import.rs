/**
 * Merging a JSON catalog document into a catalog.
 *
 * The document is a JSON array of `ArtworkRecord`s. Artworks whose id is already known
 * are skipped, and groups that appear for the first time are added to the settings
 * disabled, so a new batch never changes what the next quiz asks about until the
 * player enables it.
 *
 * Version: October 2026
 */
use std::fs;
use std::path::Path;

use log::info;

use super::artwork::{Artwork, ArtworkRecord};
use super::catalog::{Catalog, ImportSummary};
use super::common::{QuizError, Result};
use super::settings::SettingsStore;


/// Parse a catalog document. Fails as a whole if any record is malformed.
pub fn parse_catalog(data: &str) -> Result<Vec<Artwork>> {
    let records: Vec<ArtworkRecord> = serde_json::from_str(data).map_err(QuizError::Json)?;
    records.into_iter().map(ArtworkRecord::into_artwork).collect()
}


pub fn read_catalog_file(path: &Path) -> Result<Vec<Artwork>> {
    let data = fs::read_to_string(path).map_err(QuizError::Io)?;
    parse_catalog(&data)
}


/// Merge `artworks` into `catalog` and register any new groups in `store`.
pub fn import_artworks<C: Catalog, S: SettingsStore>(
    catalog: &mut C, store: &mut S, artworks: Vec<Artwork>
) -> Result<ImportSummary> {
    let summary = catalog.import(artworks)?;
    if !summary.new_groups.is_empty() {
        let mut settings = store.load()?;
        let added = settings.register_groups(&summary.new_groups);
        store.save(&settings)?;
        info!("Registered {} new groups as disabled: {:?}", added, summary.new_groups);
    }
    Ok(summary)
}

/**
 * Storing the catalog and the settings in an SQLite database in the application's
 * data directory.
 *
 * Version: October 2026
 */
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{params, Connection, Row};

use super::artwork::{Artwork, YearRange};
use super::catalog::{choose_random, cmp_artworks_by_year, note_new_group, Catalog, ImportSummary};
use super::common::{QuizError, Result};
use super::settings::{Settings, SettingsStore};


const CREATE_ARTWORKS: &str = "
    CREATE TABLE IF NOT EXISTS artworks(
      id TEXT NOT NULL PRIMARY KEY CHECK(id != ''),
      title TEXT NOT NULL,
      author TEXT NOT NULL,
      year_start INTEGER NOT NULL,
      year_end INTEGER NOT NULL CHECK(year_end >= year_start),
      picture TEXT NOT NULL,
      textbook TEXT NOT NULL,
      active BOOLEAN NOT NULL DEFAULT 1,
      title_en TEXT,
      author_en TEXT,
      note TEXT,
      note_en TEXT
    )
";

const CREATE_SETTINGS: &str = "
    CREATE TABLE IF NOT EXISTS settings(
      key TEXT NOT NULL PRIMARY KEY,
      value TEXT NOT NULL
    )
";

const SELECT_ARTWORKS: &str = "
    SELECT
      id, title, author, year_start, year_end, picture, textbook, active,
      title_en, author_en, note, note_en
    FROM
      artworks
";


pub fn get_app_dir_path() -> PathBuf {
    let mut dirpath = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dirpath.push("artquiz");
    dirpath
}


/// Create the application directory if it does not exist yet.
pub fn require_app_dir_path() -> Result<PathBuf> {
    let dirpath = get_app_dir_path();
    if !dirpath.exists() {
        fs::create_dir_all(&dirpath).or(Err(QuizError::CannotMakeAppDir(dirpath.clone())))?;
    }
    Ok(dirpath)
}


pub fn default_db_path() -> Result<PathBuf> {
    let mut path = require_app_dir_path()?;
    path.push("artquiz.db");
    Ok(path)
}


fn open_connection(path: &Path) -> Result<Connection> {
    debug!("Opening database at {}", path.to_string_lossy());
    Connection::open(path).map_err(QuizError::Sql)
}


/// A catalog kept in the `artworks` table.
pub struct SqliteCatalog {
    connection: Connection,
}


impl SqliteCatalog {
    pub fn open(path: &Path) -> Result<Self> {
        SqliteCatalog::from_connection(open_connection(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        SqliteCatalog::from_connection(Connection::open_in_memory().map_err(QuizError::Sql)?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(CREATE_ARTWORKS).map_err(QuizError::Sql)?;
        Ok(SqliteCatalog { connection })
    }

    fn select(&self, filter: &str, group: Option<&str>) -> Result<Vec<Artwork>> {
        let sql = format!("{} {}", SELECT_ARTWORKS, filter);
        let mut stmt = self.connection.prepare(&sql).map_err(QuizError::Sql)?;
        let rows = match group {
            Some(group) => stmt.query_map(params![group], row_to_artwork),
            None => stmt.query_map([], row_to_artwork),
        }
        .map_err(QuizError::Sql)?;

        let mut artworks = Vec::new();
        for row in rows {
            artworks.push(row.map_err(QuizError::Sql)?);
        }
        Ok(artworks)
    }

    fn select_active(&self, enabled_groups: &HashSet<String>) -> Result<Vec<Artwork>> {
        let mut artworks = self.select("WHERE active = 1", None)?;
        artworks.retain(|a| enabled_groups.contains(&a.group));
        Ok(artworks)
    }
}


fn row_to_artwork(row: &Row) -> rusqlite::Result<Artwork> {
    // The CHECK constraint on the table keeps the years in order.
    let year_start: i32 = row.get(3)?;
    let year_end: i32 = row.get(4)?;
    Ok(Artwork {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        years: YearRange::spanning(year_start, year_end),
        picture: row.get(5)?,
        group: row.get(6)?,
        active: row.get(7)?,
        title_en: row.get(8)?,
        author_en: row.get(9)?,
        note: row.get(10)?,
        note_en: row.get(11)?,
    })
}


fn insert_artwork(connection: &Connection, artwork: &Artwork) -> Result<bool> {
    let changed = connection
        .execute(
            "
            INSERT OR IGNORE INTO
              artworks(
                id, title, author, year_start, year_end, picture, textbook, active,
                title_en, author_en, note, note_en
              )
            VALUES
              (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ",
            params![
                artwork.id,
                artwork.title,
                artwork.author,
                artwork.years.start(),
                artwork.years.end(),
                artwork.picture,
                artwork.group,
                artwork.active,
                artwork.title_en,
                artwork.author_en,
                artwork.note,
                artwork.note_en,
            ],
        )
        .map_err(QuizError::Sql)?;
    Ok(changed > 0)
}


fn select_groups(connection: &Connection) -> Result<Vec<String>> {
    let mut stmt = connection
        .prepare("SELECT DISTINCT textbook FROM artworks ORDER BY textbook")
        .map_err(QuizError::Sql)?;
    let rows = stmt.query_map([], |row| row.get(0)).map_err(QuizError::Sql)?;

    let mut groups = Vec::new();
    for row in rows {
        groups.push(row.map_err(QuizError::Sql)?);
    }
    Ok(groups)
}


impl Catalog for SqliteCatalog {
    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM artworks", [], |row| row.get(0))
            .map_err(QuizError::Sql)?;
        Ok(count as usize)
    }

    fn query_random_active(
        &self, enabled_groups: &HashSet<String>, exclude_ids: &HashSet<String>
    ) -> Result<Option<Artwork>> {
        let mut candidates = self.select_active(enabled_groups)?;
        candidates.retain(|a| !exclude_ids.contains(&a.id));
        Ok(choose_random(candidates))
    }

    fn query_all_active(&self, enabled_groups: &HashSet<String>) -> Result<Vec<Artwork>> {
        let mut artworks = self.select_active(enabled_groups)?;
        artworks.sort_by(cmp_artworks_by_year);
        Ok(artworks)
    }

    fn query_by_group(&self, group: &str) -> Result<Vec<Artwork>> {
        self.select("WHERE textbook = ?1 ORDER BY year_start, title", Some(group))
    }

    fn groups(&self) -> Result<Vec<String>> {
        select_groups(&self.connection)
    }

    fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        let changed = self
            .connection
            .execute("UPDATE artworks SET active = ?1 WHERE id = ?2", params![active, id])
            .map_err(QuizError::Sql)?;
        if changed == 0 {
            return Err(QuizError::NotFound(String::from(id)));
        }
        Ok(())
    }

    fn set_group_active(&mut self, group: &str, active: bool) -> Result<()> {
        let changed = self
            .connection
            .execute(
                "UPDATE artworks SET active = ?1 WHERE textbook = ?2",
                params![active, group],
            )
            .map_err(QuizError::Sql)?;
        if changed == 0 {
            return Err(QuizError::NotFound(String::from(group)));
        }
        Ok(())
    }

    fn insert(&mut self, artwork: &Artwork) -> Result<bool> {
        insert_artwork(&self.connection, artwork)
    }

    /// Same as the default, but all-or-nothing.
    fn import(&mut self, artworks: Vec<Artwork>) -> Result<ImportSummary> {
        let transaction = self.connection.transaction().map_err(QuizError::Sql)?;
        let known: HashSet<String> = select_groups(&transaction)?.into_iter().collect();

        let mut summary = ImportSummary::default();
        for artwork in artworks.iter() {
            if insert_artwork(&transaction, artwork)? {
                summary.added += 1;
                note_new_group(&mut summary, &known, &artwork.group);
            } else {
                summary.skipped += 1;
            }
        }
        transaction.commit().map_err(QuizError::Sql)?;
        info!(
            "Imported {} artworks ({} already present)",
            summary.added, summary.skipped
        );
        Ok(summary)
    }
}


/// Settings kept as JSON values in the `settings` key-value table.
pub struct SqliteSettingsStore {
    connection: Connection,
}


impl SqliteSettingsStore {
    pub fn open(path: &Path) -> Result<Self> {
        SqliteSettingsStore::from_connection(open_connection(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        SqliteSettingsStore::from_connection(
            Connection::open_in_memory().map_err(QuizError::Sql)?
        )
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(CREATE_SETTINGS).map_err(QuizError::Sql)?;
        Ok(SqliteSettingsStore { connection })
    }
}


impl SettingsStore for SqliteSettingsStore {
    fn load(&self) -> Result<Settings> {
        let mut stmt = self
            .connection
            .prepare("SELECT key, value FROM settings")
            .map_err(QuizError::Sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(QuizError::Sql)?;

        // Keys that were never saved keep their default values.
        let mut settings = Settings::default();
        for row in rows {
            let (key, value) = row.map_err(QuizError::Sql)?;
            match key.as_str() {
                "rounds" => {
                    settings.rounds = serde_json::from_str(&value).map_err(QuizError::Json)?;
                }
                "categories" => {
                    settings.categories = serde_json::from_str(&value).map_err(QuizError::Json)?;
                }
                "groups" => {
                    settings.groups = serde_json::from_str(&value).map_err(QuizError::Json)?;
                }
                "language" => {
                    settings.language = serde_json::from_str(&value).map_err(QuizError::Json)?;
                }
                "strictness" => {
                    settings.strictness = serde_json::from_str(&value).map_err(QuizError::Json)?;
                }
                _ => {
                    debug!("Ignoring unknown setting '{}'", key);
                }
            }
        }
        Ok(settings)
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        let values = vec![
            ("rounds", serde_json::to_string(&settings.rounds)),
            ("categories", serde_json::to_string(&settings.categories)),
            ("groups", serde_json::to_string(&settings.groups)),
            ("language", serde_json::to_string(&settings.language)),
            ("strictness", serde_json::to_string(&settings.strictness)),
        ];

        let transaction = self.connection.transaction().map_err(QuizError::Sql)?;
        for (key, value) in values.into_iter() {
            let value = value.map_err(QuizError::Json)?;
            transaction
                .execute(
                    "INSERT OR REPLACE INTO settings(key, value) VALUES (?1, ?2)",
                    params![key, value],
                )
                .map_err(QuizError::Sql)?;
        }
        transaction.commit().map_err(QuizError::Sql)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::Language;
    use crate::catalog::{seed_artworks, SEED_GROUP};
    use crate::matcher::Strictness;

    fn enabled(groups: &[&str]) -> HashSet<String> {
        groups.iter().map(|g| String::from(*g)).collect()
    }

    #[test]
    fn artworks_survive_a_round_trip() {
        let mut catalog = SqliteCatalog::open_in_memory().unwrap();
        assert!(catalog.seed_if_empty().unwrap());
        assert_eq!(catalog.count().unwrap(), 3);

        let artworks = catalog.query_by_group(SEED_GROUP).unwrap();
        assert_eq!(artworks, seed_artworks());
    }

    #[test]
    fn duplicate_ids_are_skipped() {
        let mut catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.seed_if_empty().unwrap();

        let mut guernica = Artwork::new(
            "4", "Guernica", "Pablo Picasso", YearRange::exact(1937), "modern"
        );
        guernica.note = Some(String::from("Painted after the bombing of Guernica."));
        let batch = vec![
            guernica,
            Artwork::new("1", "Not Mona Lisa", "Nobody", YearRange::exact(1900), "other"),
        ];

        let summary = catalog.import(batch).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.new_groups, vec![String::from("modern")]);
        assert_eq!(catalog.groups().unwrap(), vec![s("modern"), s(SEED_GROUP)]);

        let mona_lisa = catalog.query_by_group(SEED_GROUP).unwrap();
        assert_eq!(mona_lisa[0].title, "Mona Lisa");
    }

    #[test]
    fn draws_only_active_artworks_from_enabled_groups() {
        let mut catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.seed_if_empty().unwrap();
        catalog.set_active("1", false).unwrap();
        catalog.set_active("2", false).unwrap();

        for _ in 0..10 {
            let artwork = catalog
                .query_random_active(&enabled(&[SEED_GROUP]), &HashSet::new())
                .unwrap()
                .unwrap();
            assert_eq!(artwork.id, "3");
        }

        let mut exclude = HashSet::new();
        exclude.insert(s("3"));
        let draw = catalog.query_random_active(&enabled(&[SEED_GROUP]), &exclude).unwrap();
        assert!(draw.is_none());
        let draw = catalog.query_random_active(&enabled(&["modern"]), &HashSet::new()).unwrap();
        assert!(draw.is_none());
    }

    #[test]
    fn group_activation_flips_every_artwork() {
        let mut catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.seed_if_empty().unwrap();
        catalog.set_group_active(SEED_GROUP, false).unwrap();
        assert!(catalog.query_all_active(&enabled(&[SEED_GROUP])).unwrap().is_empty());

        catalog.set_group_active(SEED_GROUP, true).unwrap();
        let all = catalog.query_all_active(&enabled(&[SEED_GROUP])).unwrap();
        let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        assert!(catalog.set_group_active("nope", true).is_err());
        assert!(catalog.set_active("nope", true).is_err());
    }

    #[test]
    fn settings_survive_a_round_trip() {
        let mut store = SqliteSettingsStore::open_in_memory().unwrap();
        assert_eq!(store.load().unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.set_rounds(7).unwrap();
        settings.categories.author = false;
        settings.set_group("modern", true);
        settings.language = Language::Alternate;
        settings.strictness = Strictness::Exact;
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);

        settings.set_rounds(3).unwrap();
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap().rounds, 3);
    }

    fn s(mystr: &str) -> String {
        String::from(mystr)
    }
}

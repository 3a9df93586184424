/**
 * An art quiz: guess the title, author and year of artworks drawn from a catalog.
 *
 * `session::Session` runs a quiz against any `catalog::Catalog`; `matcher` and `year`
 * score the guesses and `grade` turns the totals into a final percentage.
 *
 * Version: October 2026
 */
#[macro_use]
pub mod iohelper;
pub mod artwork;
pub mod catalog;
pub mod common;
pub mod grade;
pub mod import;
pub mod matcher;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod shell;
pub mod year;

pub use artwork::{Artwork, Language, YearRange};
pub use catalog::{Catalog, MemoryCatalog};
pub use common::{QuizError, Result};
pub use session::{Guess, Phase, Progress, Session};
pub use settings::{Categories, Settings, SettingsStore};

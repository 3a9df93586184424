/**
 * Artworks, the items that a quiz asks about, and the JSON record shape that catalog
 * files use to describe them.
 *
 * Version: October 2026
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::common::{QuizError, Result};


/// An inclusive range of years. Precisely dated works have `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}


impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(QuizError::InvalidYearRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    /// The smallest range that covers both years, in whichever order they are given.
    pub fn spanning(a: i32, b: i32) -> Self {
        YearRange { start: a.min(b), end: a.max(b) }
    }

    pub fn exact(year: i32) -> Self {
        YearRange { start: year, end: year }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}


impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}


/// Which set of localized fields is asked about and matched against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Primary,
    Alternate,
}


impl Default for Language {
    fn default() -> Self {
        Language::Primary
    }
}


impl FromStr for Language {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Language::Primary),
            "alternate" | "en" | "english" => Ok(Language::Alternate),
            other => Err(QuizError::BadArgument(
                format!("unknown language '{}' (expected primary or alternate)", other)
            )),
        }
    }
}


impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::Primary => write!(f, "primary"),
            Language::Alternate => write!(f, "alternate"),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub author: String,
    pub years: YearRange,
    /// URL or path of the image that is shown to the player.
    pub picture: String,
    /// The "textbook" or unit the artwork belongs to.
    pub group: String,
    pub active: bool,
    pub title_en: Option<String>,
    pub author_en: Option<String>,
    /// An explanatory note shown after the answer is revealed.
    pub note: Option<String>,
    pub note_en: Option<String>,
}


impl Artwork {
    /// Return a new active artwork with no localized fields.
    pub fn new(
        id: &str, title: &str, author: &str, years: YearRange, group: &str
    ) -> Self {
        Artwork {
            id: String::from(id),
            title: String::from(title),
            author: String::from(author),
            years,
            picture: String::new(),
            group: String::from(group),
            active: true,
            title_en: None,
            author_en: None,
            note: None,
            note_en: None,
        }
    }

    /// The title that guesses are matched against in `language`.
    pub fn title_in(&self, language: Language) -> &str {
        localized(&self.title, &self.title_en, language)
    }

    /// The author that guesses are matched against in `language`.
    pub fn author_in(&self, language: Language) -> &str {
        localized(&self.author, &self.author_en, language)
    }

    pub fn note_in(&self, language: Language) -> Option<&str> {
        match language {
            Language::Alternate if self.note_en.is_some() => self.note_en.as_deref(),
            _ => self.note.as_deref(),
        }
    }
}


fn localized<'a>(primary: &'a str, alternate: &'a Option<String>, language: Language) -> &'a str {
    match (language, alternate) {
        (Language::Alternate, Some(alternate)) if !alternate.trim().is_empty() => alternate,
        _ => primary,
    }
}


/// One entry of a JSON catalog document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArtworkRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub year_start: i32,
    pub year_end: i32,
    #[serde(default)]
    pub picture: String,
    #[serde(rename = "textbook")]
    pub group: String,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub author_en: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub note_en: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}


fn default_active() -> bool {
    true
}


/// Catalog files written by hand tend to use numeric ids, generated ones use strings.
fn string_or_number<'de, D>(deserializer: D) -> ::std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(n) => Ok(n.to_string()),
        Id::Text(s) => Ok(s),
    }
}


impl ArtworkRecord {
    pub fn into_artwork(self) -> Result<Artwork> {
        Ok(Artwork {
            years: YearRange::new(self.year_start, self.year_end)?,
            id: self.id,
            title: self.title,
            author: self.author,
            picture: self.picture,
            group: self.group,
            active: self.active,
            title_en: self.title_en,
            author_en: self.author_en,
            note: self.note,
            note_en: self.note_en,
        })
    }
}

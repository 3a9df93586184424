/**
 * Definitions of data structures used by several modules, such as `QuizError` and the
 * various structs that hold command-line arguments.
 *
 * Version: October 2026
 */
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use structopt::StructOpt;


pub type Result<T> = ::std::result::Result<T, QuizError>;


#[derive(Debug)]
pub enum QuizError {
    /// Every category (title, author, year) was switched off.
    NoCategories,
    /// No group of artworks is enabled.
    NoGroups,
    /// Nothing is left to draw on the first round of a session.
    EmptyPool,
    /// The rounds setting is not one of `settings::ROUND_OPTIONS`.
    InvalidRounds(usize),
    InvalidYearRange { start: i32, end: i32 },
    /// A transition was requested in a phase that does not support it.
    WrongPhase { expected: &'static str, found: &'static str },
    /// The current round has already been submitted.
    AlreadyAnswered,
    /// Advancing before the current round was submitted.
    NotAnswered,
    /// An artwork or group that the catalog does not know about.
    NotFound(String),
    /// For when the application directory cannot be created.
    CannotMakeAppDir(PathBuf),
    /// A value on the command line could not be understood.
    BadArgument(String),
    Sql(rusqlite::Error),
    Json(serde_json::Error),
    Io(io::Error),
    ReadlineInterrupted,
}


impl QuizError {
    /// Configuration errors send the player back home without recording a score.
    pub fn is_configuration(&self) -> bool {
        match self {
            QuizError::NoCategories
            | QuizError::NoGroups
            | QuizError::EmptyPool
            | QuizError::InvalidRounds(_) => true,
            _ => false,
        }
    }

    /// Storage errors can be retried; the session is left as it was.
    pub fn is_storage(&self) -> bool {
        match self {
            QuizError::Sql(_) | QuizError::Json(_) | QuizError::Io(_) => true,
            _ => false,
        }
    }
}


impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QuizError::NoCategories => {
                write!(f, "no categories are enabled (title, author or year)")
            }
            QuizError::NoGroups => {
                write!(f, "no groups are enabled")
            }
            QuizError::EmptyPool => {
                write!(f, "no artworks are available in the enabled groups")
            }
            QuizError::InvalidRounds(n) => {
                write!(f, "{} is not a valid number of rounds", n)
            }
            QuizError::InvalidYearRange { start, end } => {
                write!(f, "year range {}-{} ends before it starts", start, end)
            }
            QuizError::WrongPhase { expected, found } => {
                write!(f, "expected the session to be in {}, but it is in {}", expected, found)
            }
            QuizError::AlreadyAnswered => {
                write!(f, "this round has already been answered")
            }
            QuizError::NotAnswered => {
                write!(f, "this round has not been answered yet")
            }
            QuizError::NotFound(ref what) => {
                write!(f, "could not find '{}'", what)
            }
            QuizError::CannotMakeAppDir(ref path) => {
                write!(
                    f,
                    "unable to create application directory at {}",
                    path.to_string_lossy()
                )
            }
            QuizError::BadArgument(ref message) => {
                write!(f, "{}", message)
            }
            QuizError::Sql(ref err) => {
                write!(f, "database error ({})", err)
            }
            QuizError::Json(ref err) => {
                write!(f, "could not parse JSON ({})", err)
            }
            QuizError::Io(ref err) => {
                write!(f, "IO error ({})", err)
            }
            QuizError::ReadlineInterrupted => Ok(()),
        }
    }
}


impl error::Error for QuizError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            QuizError::Sql(ref err) => Some(err),
            QuizError::Json(ref err) => Some(err),
            QuizError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}


pub fn is_broken_pipe(e: &QuizError) -> bool {
    if let QuizError::Io(e) = e {
        if let io::ErrorKind::BrokenPipe = e.kind() {
            return true;
        }
    }
    false
}


/// Holds the command-line configuration for the application.
#[derive(StructOpt)]
#[structopt(name = "artquiz", about = "Guess the title, author and year of artworks.")]
pub struct Options {
    /// Use a particular database file instead of the one in the data directory.
    #[structopt(long = "db", parse(from_os_str))]
    pub db: Option<PathBuf>,
    /// Do not emit colorized output.
    #[structopt(long = "no-color")]
    pub no_color: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Take a quiz.
    #[structopt(name = "take")]
    Take(TakeOptions),
    /// Browse the artworks of the enabled groups without scoring.
    #[structopt(name = "learn")]
    Learn,
    /// Merge a JSON catalog file into the database.
    #[structopt(name = "import")]
    Import(ImportOptions),
    /// Show or change the quiz settings.
    #[structopt(name = "config")]
    Config(ConfigOptions),
    /// List groups and whether they are enabled.
    #[structopt(name = "groups")]
    Groups,
    /// Include a group in future quizzes.
    #[structopt(name = "enable")]
    Enable(GroupOptions),
    /// Leave a group out of future quizzes.
    #[structopt(name = "disable")]
    Disable(GroupOptions),
    /// List the artworks of a group.
    #[structopt(name = "ls")]
    Ls(LsOptions),
    /// Mark a single artwork as active or inactive.
    #[structopt(name = "mark")]
    Mark(MarkOptions),
}

#[derive(StructOpt)]
pub struct TakeOptions {
    /// Override the number of rounds for this quiz only.
    #[structopt(short = "n")]
    pub rounds: Option<usize>,
    /// Require the whole answer to match instead of a single word.
    #[structopt(long = "exact")]
    pub exact: bool,
}

#[derive(StructOpt)]
pub struct ImportOptions {
    /// Path to a JSON array of artwork records.
    #[structopt(parse(from_os_str))]
    pub path: PathBuf,
}

#[derive(StructOpt)]
pub struct ConfigOptions {
    /// Number of rounds per quiz (1, 3 or 7).
    #[structopt(long = "rounds")]
    pub rounds: Option<usize>,
    /// Comma-separated categories to ask, e.g. `title,year`.
    #[structopt(long = "categories")]
    pub categories: Option<String>,
    /// Either `primary` or `alternate`.
    #[structopt(long = "language")]
    pub language: Option<String>,
    /// Either `lenient` or `exact`.
    #[structopt(long = "strictness")]
    pub strictness: Option<String>,
}

#[derive(StructOpt)]
pub struct GroupOptions {
    /// The group label.
    pub group: String,
    /// Also flip the active flag of every artwork in the group.
    #[structopt(long = "artworks")]
    pub artworks: bool,
}

#[derive(StructOpt)]
pub struct LsOptions {
    /// The group label.
    pub group: String,
}

#[derive(StructOpt)]
pub struct MarkOptions {
    /// Identifier of the artwork.
    pub id: String,
    /// Mark the artwork inactive instead of active.
    #[structopt(long = "off")]
    pub off: bool,
}


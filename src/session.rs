/**
 * The quiz session: drawing artworks round by round, scoring the player's guesses and
 * producing the final grade.
 *
 *   Home --start--> Quiz(round 1) --submit--> Quiz(revealed) --advance--> Quiz(round 2)
 *   ...  --advance on the last round, or when nothing is left to draw--> Results
 *
 * `reset` goes back to Home from anywhere. Every transition either completes or
 * returns an error and leaves the session exactly as it was, except for configuration
 * errors, which send the session back Home.
 *
 * Version: October 2026
 */
use std::collections::HashSet;
use std::mem;

use log::{debug, warn};

use super::artwork::{Artwork, Language};
use super::catalog::Catalog;
use super::common::{QuizError, Result};
use super::grade::{grade, Grade, Scores};
use super::matcher::{self, Strictness};
use super::settings::{check_rounds, Categories, Settings};
use super::year::{score_year, YearScore};


/// The parts of `Settings` that a session uses, captured when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub total_rounds: usize,
    pub categories: Categories,
    pub enabled_groups: HashSet<String>,
    pub language: Language,
    pub strictness: Strictness,
}


impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        check_rounds(settings.rounds)?;
        if !settings.categories.any() {
            return Err(QuizError::NoCategories);
        }
        let enabled_groups = settings.enabled_groups();
        if enabled_groups.is_empty() {
            return Err(QuizError::NoGroups);
        }
        Ok(SessionConfig {
            total_rounds: settings.rounds,
            categories: settings.categories,
            enabled_groups,
            language: settings.language,
            strictness: settings.strictness,
        })
    }
}


/// The player's raw answers for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guess {
    pub title: String,
    pub author: String,
    pub year: String,
}


impl Guess {
    pub fn new(title: &str, author: &str, year: &str) -> Self {
        Guess {
            title: String::from(title),
            author: String::from(author),
            year: String::from(year),
        }
    }
}


/// How one round went. Categories that were not asked are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub guess: Guess,
    pub title_correct: Option<bool>,
    pub author_correct: Option<bool>,
    pub year: Option<YearScore>,
}


#[derive(Debug, Clone)]
pub struct QuizState {
    config: SessionConfig,
    round: usize,
    /// Ids of the artworks presented so far, in order. The current artwork is added
    /// when the round is advanced.
    presented: Vec<String>,
    used_ids: HashSet<String>,
    artwork: Artwork,
    scores: Scores,
    outcome: Option<RoundOutcome>,
}


impl QuizState {
    /// The current round, starting at 1.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn total_rounds(&self) -> usize {
        self.config.total_rounds
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn used_ids(&self) -> &HashSet<String> {
        &self.used_ids
    }

    /// The outcome of the current round once it has been submitted.
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.outcome.is_some()
    }
}


/// The read-only summary of a finished session.
#[derive(Debug, Clone)]
pub struct SessionResults {
    pub categories: Categories,
    pub total_rounds: usize,
    /// Fewer than `total_rounds` if the enabled groups ran out of artworks.
    pub rounds_played: usize,
    pub scores: Scores,
    pub grade: Grade,
    pub presented: Vec<String>,
    pub time_finished: chrono::DateTime<chrono::Utc>,
}


#[derive(Debug)]
pub enum Phase {
    Home,
    Quiz(QuizState),
    Results(SessionResults),
}


impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::Quiz(_) => "a quiz",
            Phase::Results(_) => "results",
        }
    }
}


/// What `Session::advance` led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    NextRound,
    Finished,
}


pub struct Session<C: Catalog> {
    catalog: C,
    phase: Phase,
}


impl<C: Catalog> Session<C> {
    pub fn new(catalog: C) -> Self {
        Session { catalog, phase: Phase::Home }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        match &self.phase {
            Phase::Quiz(state) => Some(state),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&SessionResults> {
        match &self.phase {
            Phase::Results(results) => Some(results),
            _ => None,
        }
    }

    /// Start a new quiz from Home or from the results of the previous one.
    pub fn start(&mut self, settings: &Settings) -> Result<()> {
        if let Phase::Quiz(_) = self.phase {
            return Err(self.wrong_phase("home or results"));
        }

        let config = match SessionConfig::from_settings(settings) {
            Ok(config) => config,
            Err(e) => {
                self.set_phase(Phase::Home);
                return Err(e);
            }
        };

        let draw = self.catalog.query_random_active(&config.enabled_groups, &HashSet::new());
        match draw {
            Ok(Some(artwork)) => {
                self.set_phase(Phase::Quiz(QuizState {
                    config,
                    round: 1,
                    presented: Vec::new(),
                    used_ids: HashSet::new(),
                    artwork,
                    scores: Scores::default(),
                    outcome: None,
                }));
                Ok(())
            }
            Ok(None) => {
                warn!("No artworks to draw from groups {:?}", config.enabled_groups);
                self.set_phase(Phase::Home);
                Err(QuizError::EmptyPool)
            }
            Err(e) => {
                warn!("Could not draw the first artwork: {}", e);
                Err(e)
            }
        }
    }

    /// Score `guess` against the current artwork and reveal the answer. Each round
    /// can be submitted only once.
    pub fn submit(&mut self, guess: Guess) -> Result<RoundOutcome> {
        let state = match &mut self.phase {
            Phase::Quiz(state) => state,
            other => {
                return Err(QuizError::WrongPhase { expected: "a quiz", found: other.name() });
            }
        };
        if state.outcome.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        let outcome = score_round(&state.config, &state.artwork, guess);
        if outcome.title_correct == Some(true) {
            state.scores.titles_correct += 1;
        }
        if outcome.author_correct == Some(true) {
            state.scores.authors_correct += 1;
        }
        if let Some(year) = &outcome.year {
            state.scores.years_penalty += u64::from(year.penalty);
        }
        debug!(
            "Round {} ({}) scored: {:?}, totals now {:?}",
            state.round, state.artwork.id, outcome, state.scores
        );

        state.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Move on from a submitted round: draw the next artwork, or finish the session
    /// after the last round or when the enabled groups have nothing left.
    pub fn advance(&mut self) -> Result<Progress> {
        let next = match &self.phase {
            Phase::Quiz(state) => {
                if state.outcome.is_none() {
                    return Err(QuizError::NotAnswered);
                }

                let mut used_ids = state.used_ids.clone();
                used_ids.insert(state.artwork.id.clone());
                if state.round < state.config.total_rounds {
                    let draw = self
                        .catalog
                        .query_random_active(&state.config.enabled_groups, &used_ids);
                    match draw {
                        Ok(artwork) => artwork,
                        Err(e) => {
                            warn!("Could not draw the next artwork: {}", e);
                            return Err(e);
                        }
                    }
                } else {
                    None
                }
            }
            other => {
                return Err(QuizError::WrongPhase { expected: "a quiz", found: other.name() });
            }
        };

        match next {
            Some(artwork) => {
                if let Phase::Quiz(state) = &mut self.phase {
                    let previous = mem::replace(&mut state.artwork, artwork);
                    state.used_ids.insert(previous.id.clone());
                    state.presented.push(previous.id);
                    state.round += 1;
                    state.outcome = None;
                    debug!("Round {} of {}", state.round, state.config.total_rounds);
                }
                Ok(Progress::NextRound)
            }
            None => {
                self.finish();
                Ok(Progress::Finished)
            }
        }
    }

    /// Abandon whatever is going on and go back Home.
    pub fn reset(&mut self) {
        self.set_phase(Phase::Home);
    }

    /// The artworks that would be asked about with `settings`, for browsing without
    /// scoring.
    pub fn browse(&self, settings: &Settings) -> Result<Vec<Artwork>> {
        self.catalog.query_all_active(&settings.enabled_groups())
    }

    fn finish(&mut self) {
        if let Phase::Quiz(mut state) = mem::replace(&mut self.phase, Phase::Home) {
            state.used_ids.insert(state.artwork.id.clone());
            state.presented.push(state.artwork.id.clone());

            let rounds_played = state.presented.len();
            let grade = grade(&state.scores, rounds_played, &state.config.categories);
            self.set_phase(Phase::Results(SessionResults {
                categories: state.config.categories,
                total_rounds: state.config.total_rounds,
                rounds_played,
                scores: state.scores,
                grade,
                presented: state.presented,
                time_finished: chrono::Utc::now(),
            }));
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("Entering session phase: {}", phase.name());
        self.phase = phase;
    }

    fn wrong_phase(&self, expected: &'static str) -> QuizError {
        QuizError::WrongPhase { expected, found: self.phase.name() }
    }
}


/// Score one round without touching any session state.
pub fn score_round(config: &SessionConfig, artwork: &Artwork, guess: Guess) -> RoundOutcome {
    let title_correct = if config.categories.title {
        let title = artwork.title_in(config.language);
        Some(matcher::check(config.strictness, &guess.title, title))
    } else {
        None
    };
    let author_correct = if config.categories.author {
        let author = artwork.author_in(config.language);
        Some(matcher::check(config.strictness, &guess.author, author))
    } else {
        None
    };
    let year = if config.categories.year {
        Some(score_year(&guess.year, &artwork.years))
    } else {
        None
    };
    RoundOutcome { guess, title_correct, author_correct, year }
}

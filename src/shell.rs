/**
 * The command-line user interface for taking quizzes.
 *
 * Version: October 2026
 */
use std::io::Write;

use colored::*;
use log::warn;

use super::artwork::{Artwork, Language};
use super::catalog::Catalog;
use super::common::{QuizError, Result};
use super::iohelper::{prettyprint, prettyprint_colored, read_line};
use super::session::{Guess, Progress, QuizState, RoundOutcome, Session, SessionResults};
use super::settings::Settings;


pub struct CmdUI {
    /// Have we finished printing out the prologue?
    finished_prologue: bool,
}


impl CmdUI {
    pub fn new() -> Self {
        Self { finished_prologue: false }
    }

    pub fn artwork(&mut self, state: &QuizState) -> Result<()> {
        if !self.finished_prologue {
            my_print!("\n")?;
            self.finished_prologue = true;
        }

        let prefix = format!("  ({}/{}) ", state.round(), state.total_rounds());
        let artwork = state.artwork();
        let text = if artwork.picture.is_empty() {
            format!("[no picture] from {}", artwork.group)
        } else {
            artwork.picture.clone()
        };
        prettyprint_colored(&text, &prefix, None, Some(Color::Cyan))?;
        my_print!("\n")
    }

    /// Prompt for every category the session asks about. Returns `None` if the player
    /// closed standard input.
    pub fn ask(&mut self, state: &QuizState) -> Result<Option<Guess>> {
        let categories = state.config().categories;
        let mut guess = Guess::default();
        if categories.title {
            match read_line("Title> ")? {
                Some(title) => guess.title = title,
                None => return Ok(None),
            }
        }
        if categories.author {
            match read_line("Author> ")? {
                Some(author) => guess.author = author,
                None => return Ok(None),
            }
        }
        if categories.year {
            match read_line("Year> ")? {
                Some(year) => guess.year = year,
                None => return Ok(None),
            }
        }
        Ok(Some(guess))
    }

    pub fn reveal(
        &mut self, artwork: &Artwork, outcome: &RoundOutcome, language: Language
    ) -> Result<()> {
        my_print!("\n")?;
        if let Some(correct) = outcome.title_correct {
            self.verdict("Title", correct)?;
        }
        if let Some(correct) = outcome.author_correct {
            self.verdict("Author", correct)?;
        }
        if let Some(year) = &outcome.year {
            match year.deviation_label() {
                Some(label) => my_println!("  {} {}", "Year:".white(), label.red())?,
                None => my_println!("  {} {}", "Year:".white(), "in range".green())?,
            }
        }

        let answer = format!(
            "{} ({}), {}",
            artwork.title_in(language),
            artwork.years,
            artwork.author_in(language)
        );
        my_print!("\n")?;
        prettyprint_colored(&answer, "  ", Some(Color::Green), None)?;
        if let Some(note) = artwork.note_in(language) {
            prettyprint(note, "  ")?;
        }
        Ok(())
    }

    fn verdict(&mut self, label: &str, correct: bool) -> Result<()> {
        if correct {
            my_println!("  {} {}", format!("{}:", label).white(), "Correct!".green())
        } else {
            my_println!("  {} {}", format!("{}:", label).white(), "Incorrect.".red())
        }
    }

    pub fn status(&mut self, text: &str) -> Result<()> {
        my_println!("{}", text)
    }

    pub fn warning(&mut self, text: &str) -> Result<()> {
        my_print!("\n")?;
        prettyprint_colored(&format!("Warning: {}", text), "  ", Some(Color::Red), None)?;
        my_print!("\n")
    }

    pub fn results(&mut self, results: &SessionResults) -> Result<()> {
        let grade = &results.grade;

        my_print!("\n\n")?;
        my_print!("Score: ")?;
        my_print!("{}", format!("{}%", grade.overall).cyan())?;
        my_print!(" over ")?;
        my_print!("{}", format!("{}", results.rounds_played).cyan())?;
        if results.rounds_played == 1 {
            my_println!(" round")?;
        } else {
            my_println!(" rounds")?;
        }
        if results.rounds_played < results.total_rounds {
            my_println!("  (ran out of artworks after {} rounds)", results.rounds_played)?;
        }

        if let Some(title) = grade.title {
            my_print!("  {}", format!("{}%", title).green())?;
            my_print!(" titles ({} correct)\n", results.scores.titles_correct)?;
        }
        if let Some(author) = grade.author {
            my_print!("  {}", format!("{}%", author).green())?;
            my_print!(" authors ({} correct)\n", results.scores.authors_correct)?;
        }
        if let Some(year) = grade.year {
            my_print!("  {}", format!("{}%", year).green())?;
            my_print!(" years ({} years off in total)\n", results.scores.years_penalty)?;
        }
        my_print!("\n")?;
        prettyprint_colored(grade.tier.caption, "  ", Some(Color::BrightBlue), None)
    }

    pub fn browse(&mut self, artworks: &[Artwork], language: Language) -> Result<()> {
        if artworks.is_empty() {
            return my_println!("No artworks in the enabled groups.");
        }
        for artwork in artworks.iter() {
            let prefix = format!("  {:>9}  ", artwork.years.to_string());
            let text = format!(
                "{}, {} [{}]",
                artwork.title_in(language),
                artwork.author_in(language),
                artwork.group
            );
            prettyprint_colored(&text, &prefix, None, Some(Color::Cyan))?;
        }
        Ok(())
    }
}


/// Play one quiz in the terminal. Returns `None` if the player quit before the end.
pub fn take_quiz<C: Catalog>(
    session: &mut Session<C>, settings: &Settings
) -> Result<Option<SessionResults>> {
    match run_quiz(session, settings) {
        Err(QuizError::ReadlineInterrupted) => {
            session.reset();
            Ok(None)
        }
        other => other,
    }
}


fn run_quiz<C: Catalog>(
    session: &mut Session<C>, settings: &Settings
) -> Result<Option<SessionResults>> {
    let mut ui = CmdUI::new();
    session.start(settings)?;

    loop {
        let guess = match session.quiz() {
            Some(state) => {
                ui.artwork(state)?;
                ui.ask(state)?
            }
            None => return Ok(None),
        };
        let guess = match guess {
            Some(guess) => guess,
            None => {
                session.reset();
                return Ok(None);
            }
        };

        let outcome = session.submit(guess)?;
        if let Some(state) = session.quiz() {
            ui.reveal(state.artwork(), &outcome, state.config().language)?;
        }

        loop {
            match session.advance() {
                Ok(Progress::NextRound) => break,
                Ok(Progress::Finished) => {
                    return match session.results() {
                        Some(results) => {
                            ui.results(results)?;
                            Ok(Some(results.clone()))
                        }
                        None => Ok(None),
                    };
                }
                Err(e) if e.is_storage() => {
                    warn!("Retrying after storage error: {}", e);
                    ui.warning(&format!("{}. Press Enter to try again.", e))?;
                    if read_line("")?.is_none() {
                        session.reset();
                        return Ok(None);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        ui.status("")?;
    }
}

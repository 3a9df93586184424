use std::cell::Cell;
use std::collections::HashSet;
use std::io;

use artquiz::catalog::seed_artworks;
use artquiz::persistence::SqliteCatalog;
use artquiz::{
    Artwork, Catalog, Guess, MemoryCatalog, Phase, Progress, QuizError, Result, Session,
    Settings,
};


#[test]
fn three_round_session_reaches_results() {
    let mut session = Session::new(MemoryCatalog::with_artworks(seed_artworks()));
    let settings = settings_with_rounds(3);

    session.start(&settings).unwrap();
    let mut seen = HashSet::new();
    for round in 1..=3 {
        let state = session.quiz().unwrap();
        assert_eq!(state.round(), round);
        assert!(seen.insert(state.artwork().id.clone()));

        let artwork = state.artwork().clone();
        let outcome = session.submit(perfect_guess(&artwork)).unwrap();
        assert_eq!(outcome.title_correct, Some(true));
        assert_eq!(outcome.author_correct, Some(true));

        let progress = session.advance().unwrap();
        if round < 3 {
            assert_eq!(progress, Progress::NextRound);
        } else {
            assert_eq!(progress, Progress::Finished);
        }
    }

    let results = session.results().unwrap();
    assert_eq!(results.rounds_played, 3);
    assert_eq!(results.presented.len(), 3);
    assert_eq!(results.grade.overall, 100);
    assert_eq!(results.scores.titles_correct, 3);
    assert_eq!(results.scores.years_penalty, 0);
}


#[test]
fn blank_session_gets_lowest_tier() {
    let mut session = Session::new(MemoryCatalog::with_artworks(seed_artworks()));
    session.start(&settings_with_rounds(1)).unwrap();

    let outcome = session.submit(Guess::default()).unwrap();
    assert_eq!(outcome.title_correct, Some(false));
    assert_eq!(outcome.year.as_ref().map(|y| y.penalty), Some(500));
    assert_eq!(session.advance().unwrap(), Progress::Finished);

    let grade = &session.results().unwrap().grade;
    assert_eq!(grade.title, Some(0));
    assert_eq!(grade.author, Some(0));
    assert_eq!(grade.year, Some(0));
    assert_eq!(grade.overall, 0);
    assert_eq!(grade.tier.threshold, 0);
}


#[test]
fn reset_then_start_gives_fresh_state() {
    let mut session = Session::new(MemoryCatalog::with_artworks(seed_artworks()));
    let settings = settings_with_rounds(3);

    session.start(&settings).unwrap();
    session.submit(Guess::new("Mona Lisa", "", "")).unwrap();
    session.advance().unwrap();
    session.reset();
    assert_eq!(session.phase().name(), "home");
    assert!(session.quiz().is_none());

    session.start(&settings).unwrap();
    let state = session.quiz().unwrap();
    assert_eq!(state.round(), 1);
    assert!(state.used_ids().is_empty());
    assert_eq!(state.scores().titles_correct, 0);
    assert!(state.outcome().is_none());
}


#[test]
fn results_can_start_another_session() {
    let mut session = Session::new(MemoryCatalog::with_artworks(seed_artworks()));
    let settings = settings_with_rounds(1);

    session.start(&settings).unwrap();
    session.submit(Guess::default()).unwrap();
    session.advance().unwrap();
    assert!(session.results().is_some());

    session.start(&settings).unwrap();
    assert_eq!(session.quiz().unwrap().round(), 1);
}


#[test]
fn exhausted_pool_ends_session_early() {
    let mut session = Session::new(MemoryCatalog::with_artworks(seed_artworks()));
    session.start(&settings_with_rounds(7)).unwrap();

    let mut rounds = 0;
    loop {
        session.submit(Guess::default()).unwrap();
        rounds += 1;
        if session.advance().unwrap() == Progress::Finished {
            break;
        }
    }

    let results = session.results().unwrap();
    assert_eq!(rounds, 3);
    assert_eq!(results.total_rounds, 7);
    assert_eq!(results.rounds_played, 3);
    let distinct: HashSet<_> = results.presented.iter().collect();
    assert_eq!(distinct.len(), 3);
}


#[test]
fn empty_pool_stays_home() {
    let mut session = Session::new(MemoryCatalog::new());
    match session.start(&settings_with_rounds(1)) {
        Err(QuizError::EmptyPool) => {}
        other => panic!("expected EmptyPool, got {:?}", other),
    }
    assert_eq!(session.phase().name(), "home");
}


#[test]
fn failed_draw_leaves_round_untouched() {
    let mut session = Session::new(FlakyCatalog::new(seed_artworks()));
    session.start(&settings_with_rounds(3)).unwrap();
    session.submit(Guess::new("", "", "1500")).unwrap();
    let before = session.quiz().unwrap().clone();

    session.catalog().failing.set(true);
    match session.advance() {
        Err(QuizError::Io(_)) => {}
        other => panic!("expected an I/O error, got {:?}", other),
    }
    let after = session.quiz().unwrap();
    assert_eq!(after.round(), before.round());
    assert_eq!(after.artwork().id, before.artwork().id);
    assert_eq!(after.scores(), before.scores());
    assert!(after.is_revealed());

    // Retrying once storage recovers picks up where the session left off.
    session.catalog().failing.set(false);
    assert_eq!(session.advance().unwrap(), Progress::NextRound);
    assert_eq!(session.quiz().unwrap().round(), 2);
}


#[test]
fn failed_start_keeps_previous_phase() {
    let mut session = Session::new(FlakyCatalog::new(seed_artworks()));
    let settings = settings_with_rounds(1);
    session.start(&settings).unwrap();
    session.submit(Guess::default()).unwrap();
    session.advance().unwrap();

    session.catalog().failing.set(true);
    assert!(session.start(&settings).is_err());
    match session.phase() {
        Phase::Results(results) => assert_eq!(results.rounds_played, 1),
        other => panic!("expected results, got {}", other.name()),
    }
}


#[test]
fn can_play_against_sqlite_catalog() {
    let mut catalog = SqliteCatalog::open_in_memory().unwrap();
    assert!(catalog.seed_if_empty().unwrap());
    assert!(!catalog.seed_if_empty().unwrap());

    let mut session = Session::new(catalog);
    session.start(&settings_with_rounds(3)).unwrap();
    loop {
        let artwork = session.quiz().unwrap().artwork().clone();
        session.submit(perfect_guess(&artwork)).unwrap();
        if session.advance().unwrap() == Progress::Finished {
            break;
        }
    }

    let results = session.results().unwrap();
    assert_eq!(results.rounds_played, 3);
    assert_eq!(results.grade.overall, 100);
}


fn settings_with_rounds(rounds: usize) -> Settings {
    let mut settings = Settings::default();
    settings.set_rounds(rounds).unwrap();
    settings
}


fn perfect_guess(artwork: &Artwork) -> Guess {
    Guess::new(&artwork.title, &artwork.author, &artwork.years.start().to_string())
}


/// A catalog whose reads fail while `failing` is set.
struct FlakyCatalog {
    inner: MemoryCatalog,
    failing: Cell<bool>,
}


impl FlakyCatalog {
    fn new(artworks: Vec<Artwork>) -> Self {
        FlakyCatalog { inner: MemoryCatalog::with_artworks(artworks), failing: Cell::new(false) }
    }

    fn check(&self) -> Result<()> {
        if self.failing.get() {
            Err(QuizError::Io(io::Error::new(io::ErrorKind::Other, "storage unavailable")))
        } else {
            Ok(())
        }
    }
}


impl Catalog for FlakyCatalog {
    fn count(&self) -> Result<usize> {
        self.check()?;
        self.inner.count()
    }

    fn query_random_active(
        &self, enabled_groups: &HashSet<String>, exclude_ids: &HashSet<String>
    ) -> Result<Option<Artwork>> {
        self.check()?;
        self.inner.query_random_active(enabled_groups, exclude_ids)
    }

    fn query_all_active(&self, enabled_groups: &HashSet<String>) -> Result<Vec<Artwork>> {
        self.check()?;
        self.inner.query_all_active(enabled_groups)
    }

    fn query_by_group(&self, group: &str) -> Result<Vec<Artwork>> {
        self.check()?;
        self.inner.query_by_group(group)
    }

    fn groups(&self) -> Result<Vec<String>> {
        self.check()?;
        self.inner.groups()
    }

    fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        self.check()?;
        self.inner.set_active(id, active)
    }

    fn set_group_active(&mut self, group: &str, active: bool) -> Result<()> {
        self.check()?;
        self.inner.set_group_active(group, active)
    }

    fn insert(&mut self, artwork: &Artwork) -> Result<bool> {
        self.check()?;
        self.inner.insert(artwork)
    }
}

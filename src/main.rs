/**
 * Take an art quiz from the command line.
 *
 * Version: October 2026
 */
use std::io::Write;

use colored::*;
use log::debug;
use structopt::StructOpt;

use artquiz::common::{
    is_broken_pipe, Command, ConfigOptions, GroupOptions, ImportOptions, LsOptions,
    MarkOptions, Options, QuizError, Result, TakeOptions,
};
use artquiz::import::{import_artworks, read_catalog_file};
use artquiz::matcher::Strictness;
use artquiz::persistence::{default_db_path, SqliteCatalog, SqliteSettingsStore};
use artquiz::shell::{take_quiz, CmdUI};
use artquiz::{my_println, Catalog, Session, SettingsStore};


fn main() {
    pretty_env_logger::init();
    let options = Options::from_args();

    if options.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(options) {
        if let QuizError::ReadlineInterrupted = e {
            ::std::process::exit(2);
        }
        if !is_broken_pipe(&e) {
            eprintln!("{}: {}", "Error".red(), e);
            ::std::process::exit(2);
        }
    }
}


fn run(options: Options) -> Result<()> {
    let path = match options.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    let mut catalog = SqliteCatalog::open(&path)?;
    let mut store = SqliteSettingsStore::open(&path)?;
    catalog.seed_if_empty()?;

    match options.cmd {
        Command::Take(options) => main_take(catalog, &store, options),
        Command::Learn => main_learn(catalog, &store),
        Command::Import(options) => main_import(&mut catalog, &mut store, options),
        Command::Config(options) => main_config(&mut store, options),
        Command::Groups => main_groups(&catalog, &store),
        Command::Enable(options) => main_toggle_group(&mut catalog, &mut store, options, true),
        Command::Disable(options) => main_toggle_group(&mut catalog, &mut store, options, false),
        Command::Ls(options) => main_ls(&catalog, options),
        Command::Mark(options) => main_mark(&mut catalog, options),
    }
}


/// The main function for the `take` subcommand.
fn main_take(
    catalog: SqliteCatalog, store: &SqliteSettingsStore, options: TakeOptions
) -> Result<()> {
    let mut settings = store.load()?;
    if let Some(rounds) = options.rounds {
        settings.set_rounds(rounds)?;
    }
    if options.exact {
        settings.strictness = Strictness::Exact;
    }

    let mut session = Session::new(catalog);
    match take_quiz(&mut session, &settings) {
        Ok(Some(results)) => {
            debug!("Finished at {} with {:?}", results.time_finished, results.scores);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) if e.is_configuration() => {
            CmdUI::new().warning(&format!("{}. Check `artquiz config` and `artquiz groups`.", e))
        }
        Err(e) => Err(e),
    }
}


/// The main function for the `learn` subcommand.
fn main_learn(catalog: SqliteCatalog, store: &SqliteSettingsStore) -> Result<()> {
    let settings = store.load()?;
    let session = Session::new(catalog);
    let artworks = session.browse(&settings)?;
    CmdUI::new().browse(&artworks, settings.language)
}


fn main_import(
    catalog: &mut SqliteCatalog, store: &mut SqliteSettingsStore, options: ImportOptions
) -> Result<()> {
    let artworks = read_catalog_file(&options.path)?;
    let summary = import_artworks(catalog, store, artworks)?;
    my_println!("Added {} artworks ({} already present).", summary.added, summary.skipped)?;
    if !summary.new_groups.is_empty() {
        my_println!("New groups (disabled until enabled):")?;
        for group in summary.new_groups.iter() {
            my_println!("  {}", group)?;
        }
    }
    Ok(())
}


fn main_config(store: &mut SqliteSettingsStore, options: ConfigOptions) -> Result<()> {
    let mut settings = store.load()?;
    let mut changed = false;
    if let Some(rounds) = options.rounds {
        settings.set_rounds(rounds)?;
        changed = true;
    }
    if let Some(categories) = options.categories {
        settings.categories = categories.parse()?;
        changed = true;
    }
    if let Some(language) = options.language {
        settings.language = language.parse()?;
        changed = true;
    }
    if let Some(strictness) = options.strictness {
        settings.strictness = strictness.parse()?;
        changed = true;
    }
    if changed {
        store.save(&settings)?;
    }

    let categories = &settings.categories;
    let mut asked = Vec::new();
    if categories.title {
        asked.push("title");
    }
    if categories.author {
        asked.push("author");
    }
    if categories.year {
        asked.push("year");
    }
    my_println!("rounds:      {}", settings.rounds)?;
    my_println!("categories:  {}", asked.join(","))?;
    my_println!("language:    {}", settings.language)?;
    my_println!("strictness:  {}", settings.strictness)
}


fn main_groups(catalog: &SqliteCatalog, store: &SqliteSettingsStore) -> Result<()> {
    let mut settings = store.load()?;
    settings.register_groups(&catalog.groups()?);

    if settings.groups.is_empty() {
        return my_println!("No groups found.");
    }
    my_println!("Groups:")?;
    for (group, enabled) in settings.groups.iter() {
        let count = catalog.query_by_group(group)?.len();
        if *enabled {
            my_println!("  {} {} ({})", "[x]".green(), group, count)?;
        } else {
            my_println!("  [ ] {} ({})", group, count)?;
        }
    }
    Ok(())
}


fn main_toggle_group(
    catalog: &mut SqliteCatalog,
    store: &mut SqliteSettingsStore,
    options: GroupOptions,
    enabled: bool,
) -> Result<()> {
    if !catalog.groups()?.contains(&options.group) {
        return Err(QuizError::NotFound(options.group));
    }
    if options.artworks {
        catalog.set_group_active(&options.group, enabled)?;
    }
    let mut settings = store.load()?;
    settings.set_group(&options.group, enabled);
    store.save(&settings)
}


fn main_ls(catalog: &SqliteCatalog, options: LsOptions) -> Result<()> {
    let artworks = catalog.query_by_group(&options.group)?;
    if artworks.is_empty() {
        return Err(QuizError::NotFound(options.group));
    }
    for artwork in artworks.iter() {
        let marker = if artwork.active { " " } else { "-" };
        my_println!(
            "{} {:>6}  {:>9}  {}, {}",
            marker,
            artwork.id,
            artwork.years.to_string(),
            artwork.title,
            artwork.author
        )?;
    }
    Ok(())
}


fn main_mark(catalog: &mut SqliteCatalog, options: MarkOptions) -> Result<()> {
    catalog.set_active(&options.id, !options.off)
}


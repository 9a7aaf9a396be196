use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dl_cli::commands::{import, review, rule, show, status, summary};
use dl_cli::{Cli, Commands, Config, RuleAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(dl_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = dl_db::Database::open(&config.database_path).with_context(|| {
        format!("failed to open {}", config.database_path.display())
    })?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db, &config.database_path)?;
        }
        Some(Commands::Import { date, file }) => {
            let text = import::read_source(file.as_deref(), io::stdin().lock())?;
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            import::run(&mut stdout, &mut db, *date, &text)?;
        }
        Some(Commands::Show {
            date,
            json,
            columns,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            show::run(
                &mut stdout,
                &db,
                *date,
                show::Format::from_flags(*json, *columns),
            )?;
        }
        Some(Commands::Summary { date, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            summary::run(&mut stdout, &db, *date, *json)?;
        }
        Some(Commands::Review { date }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            review::run(&mut stdout, &db, *date)?;
        }
        Some(Commands::Rule(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                RuleAction::Add { task, label, date } => {
                    rule::add(&mut stdout, &mut db, task, label, *date)?;
                }
                RuleAction::List => rule::list(&mut stdout, &db)?,
                RuleAction::Remove { task } => rule::remove(&mut stdout, &mut db, task)?,
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

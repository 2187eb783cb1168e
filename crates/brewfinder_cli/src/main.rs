//! Read-only lookup entry point.
//!
//! # Responsibility
//! - Own the connection lifecycle: open, borrow to repositories, drop.
//! - Print each matching entity as one JSON line.

use brewfinder_core::db::{open_db, DEFAULT_DB_FILE};
use brewfinder_core::{
    core_version, default_log_level, init_logging, BeerImageRepository, BreweryRepository,
    SqliteBeerImageRepository, SqliteBreweryRepository,
};
use clap::{Parser, Subcommand};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;

/// Look up breweries and their images in a Brewfinder store.
#[derive(Parser, Debug)]
#[command(name = "brewfinder", version)]
struct Cli {
    /// SQLite store path; created and migrated when missing.
    #[arg(long, env = "BREWFINDER_DB", default_value = DEFAULT_DB_FILE)]
    db: String,

    /// Absolute directory for rotated log files; logging is off when unset.
    #[arg(long, env = "BREWFINDER_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "BREWFINDER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Lookup,
}

#[derive(Subcommand, Debug)]
enum Lookup {
    /// Breweries whose city contains the text
    City { query: String },
    /// Breweries whose name contains the text
    Name { query: String },
    /// Breweries whose state code contains the text
    State { query: String },
    /// One brewery by id
    Brewery { id: i64 },
    /// Images linked to a brewery
    Images { brewery_id: i64 },
    /// Print the core version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(message) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {message}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_lookup module=cli status=error error={err}");
            eprintln!("brewfinder: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Lookup::Version = cli.command {
        println!("brewfinder_core version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    let breweries = SqliteBreweryRepository::new(&conn);

    match &cli.command {
        Lookup::City { query } => print_lines(&breweries.get_breweries_by_city(query)?),
        Lookup::Name { query } => print_lines(&breweries.get_breweries_by_name(query)?),
        Lookup::State { query } => print_lines(&breweries.get_breweries_by_state(query)?),
        Lookup::Brewery { id } => match breweries.get_brewery_by_id(*id)? {
            Some(brewery) => print_lines(&[brewery]),
            None => Err(format!("brewery {id} not found").into()),
        },
        Lookup::Images { brewery_id } => {
            let images = SqliteBeerImageRepository::new(&conn);
            print_lines(&images.get_beer_images_by_brewery_id(*brewery_id)?)
        }
        Lookup::Version => Ok(()),
    }
}

fn print_lines<T: Serialize>(items: &[T]) -> Result<(), Box<dyn Error>> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

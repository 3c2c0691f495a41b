//! Resets the `teams` table and loads the authored club list.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! cargo run -p seed-data --bin seed -- --migrate --data path/to/teams.json
//! cargo run -p seed-data --bin seed -- list
//! ```
//!
//! Connection settings come from `DATABASE_URL` or the `DB_*` variables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use league::database::Database;
use seed_data::prelude::*;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "seed",
    about = "Premier league teams seeder",
    long_about = "Truncates the teams table (restart identity, cascade) and reloads the \
                  authored club list. Any edits made to the table since the last run are lost."
)]
struct Cli {
    /// Full connection URL; overrides the DB_* variables
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    reset: ResetArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Truncate and reseed the teams table (default)
    Reset(ResetArgs),
    /// Print the teams currently stored
    List,
}

#[derive(clap::Args)]
struct ResetArgs {
    /// JSON file with the team records
    #[arg(long, env = "TEAMS_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Apply schema migrations before seeding
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => reset(cli.database_url.as_deref(), cli.reset).await,
        Some(Command::Reset(args)) => reset(cli.database_url.as_deref(), args).await,
        Some(Command::List) => list(cli.database_url.as_deref()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Seeder errors are logged where they happen.
            if e.downcast_ref::<SeedError>().is_none() {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn connect_options(database_url: Option<&str>) -> anyhow::Result<PgConnectOptions> {
    let options = match database_url {
        Some(url) => connect_options_from_url(url)?,
        None => DbConfig::from_env()?.connect_options(),
    };
    Ok(options)
}

async fn reset(database_url: Option<&str>, args: ResetArgs) -> anyhow::Result<()> {
    let options = connect_options(database_url)?;

    let teams = match load_teams(&args.data) {
        Ok(teams) => teams,
        Err(e) => {
            let err = SeedError::from(e);
            err.report();
            return Err(err.into());
        }
    };
    tracing::info!("Loaded {} teams from {}", teams.len(), args.data.display());

    if args.migrate {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        Database::new(pool.clone()).migrate().await?;
        pool.close().await;
        tracing::info!("Schema migrations applied");
    }

    let report = Seeder::new(options).run(&teams).await?;
    tracing::info!("Seed completed: {} teams", report.inserted);

    Ok(())
}

async fn list(database_url: Option<&str>) -> anyhow::Result<()> {
    let options = connect_options(database_url)?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    let db = Database::new(pool.clone());

    let teams = db.list_teams().await?;
    for team in &teams {
        println!(
            "{:<4} {:<28} {}",
            team.short_code.as_deref().unwrap_or("-"),
            team.name,
            team.last_premier_league_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    tracing::info!("{} teams", db.count_teams().await?);

    pool.close().await;
    Ok(())
}

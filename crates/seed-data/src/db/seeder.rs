//! Team table reset and reseed.

use league::models::NewTeam;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, QueryBuilder};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::DbConfig;
use crate::dataset::DatasetError;

pub(crate) const TRUNCATE_TEAMS: &str = "TRUNCATE TABLE teams RESTART IDENTITY CASCADE;";

pub(crate) const ENSURE_LAST_YEAR_COLUMN: &str =
    "ALTER TABLE teams ADD COLUMN IF NOT EXISTS last_premier_league_year INTEGER;";

pub(crate) const INSERT_TEAMS_PREFIX: &str = "INSERT INTO teams (name, short_code, city, stadium, \
     manager_name, founding_year, logo_url, usual_formation, last_premier_league_year) ";

/// Bound parameters per team row.
const COLUMNS_PER_ROW: usize = 9;

/// Postgres caps a single statement at `u16::MAX` bind parameters.
pub const MAX_BATCH_ROWS: usize = u16::MAX as usize / COLUMNS_PER_ROW;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Batch of {rows} teams exceeds the single-statement limit of {max_rows} rows")]
    BatchTooLarge { rows: usize, max_rows: usize },
}

/// Coarse classification used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Database,
    Unexpected,
}

impl SeedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeedError::Connect(_) => ErrorKind::Connection,
            SeedError::Database(_) => ErrorKind::Database,
            SeedError::Dataset(_) | SeedError::BatchTooLarge { .. } => ErrorKind::Unexpected,
        }
    }

    /// Logs the error under its kind.
    pub fn report(&self) {
        match self.kind() {
            ErrorKind::Connection | ErrorKind::Database => error!("{self}"),
            ErrorKind::Unexpected => error!("An unexpected error occurred: {self}"),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows reported by the bulk insert.
    pub inserted: u64,
}

/// Resets the `teams` table and repopulates it from a fixed batch.
pub struct Seeder {
    options: PgConnectOptions,
}

impl Seeder {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(config.connect_options())
    }

    /// Runs connect, truncate, schema ensure, bulk insert and commit.
    ///
    /// Steps after connecting share one transaction: on any error nothing
    /// they did is kept. The connection is closed on every path once opened.
    /// Errors are logged here, before rollback and disconnect, and returned.
    pub async fn run(&self, teams: &[NewTeam]) -> Result<SeedReport, SeedError> {
        if teams.len() > MAX_BATCH_ROWS {
            let err = SeedError::BatchTooLarge {
                rows: teams.len(),
                max_rows: MAX_BATCH_ROWS,
            };
            err.report();
            return Err(err);
        }

        info!(
            "Connecting to database {} on {}:{}...",
            self.options.get_database().unwrap_or("<default>"),
            self.options.get_host(),
            self.options.get_port()
        );

        let mut conn = match PgConnection::connect_with(&self.options).await {
            Ok(conn) => conn,
            Err(e) => {
                let err = SeedError::Connect(e);
                err.report();
                return Err(err);
            }
        };
        info!("Database connection established.");

        let outcome = reseed(&mut conn, teams).await;

        if let Err(e) = conn.close().await {
            warn!("Database connection did not close cleanly: {e}");
        }
        info!("Database connection closed.");

        outcome
    }
}

/// Applies the seed steps in a transaction, committing or rolling back.
async fn reseed(conn: &mut PgConnection, teams: &[NewTeam]) -> Result<SeedReport, SeedError> {
    let mut tx = match conn.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            let err = SeedError::Database(e);
            err.report();
            return Err(err);
        }
    };

    let applied = match apply(&mut tx, teams).await {
        Ok(inserted) => tx.commit().await.map(|()| inserted).map_err(SeedError::from),
        Err(err) => {
            err.report();
            warn!("Rolling back transaction...");
            if let Err(e) = tx.rollback().await {
                warn!("Rollback failed: {e}");
            }
            return Err(err);
        }
    };

    match applied {
        Ok(inserted) => {
            info!("All operations completed and changes committed successfully.");
            Ok(SeedReport { inserted })
        }
        Err(err) => {
            err.report();
            Err(err)
        }
    }
}

/// Truncate, ensure the column, insert. Returns the inserted row count.
async fn apply(conn: &mut PgConnection, teams: &[NewTeam]) -> Result<u64, SeedError> {
    info!("Step 1: Truncating table 'teams'...");
    sqlx::query(TRUNCATE_TEAMS).execute(&mut *conn).await?;
    info!("Table 'teams' truncated and identity restarted.");

    info!("Step 2: Adding 'last_premier_league_year' column if it doesn't exist...");
    sqlx::query(ENSURE_LAST_YEAR_COLUMN)
        .execute(&mut *conn)
        .await?;
    info!("Column 'last_premier_league_year' checked/added.");

    info!("Step 3: Inserting {} teams...", teams.len());
    let inserted = match insert_query(teams) {
        Some(mut query) => query.build().execute(&mut *conn).await?.rows_affected(),
        None => 0,
    };
    info!("Successfully inserted {} records into 'teams'.", inserted);

    Ok(inserted)
}

/// Builds the multi-row insert, or `None` for an empty batch.
fn insert_query(teams: &[NewTeam]) -> Option<QueryBuilder<'_, Postgres>> {
    if teams.is_empty() {
        return None;
    }

    let mut query = QueryBuilder::new(INSERT_TEAMS_PREFIX);
    query.push_values(teams, |mut row, team| {
        row.push_bind(team.name.as_str())
            .push_bind(team.short_code.as_str())
            .push_bind(team.city.as_str())
            .push_bind(team.stadium.as_str())
            .push_bind(team.manager_name.as_str())
            .push_bind(team.founding_year)
            .push_bind(team.logo_url.as_str())
            .push_bind(team.usual_formation.as_str())
            .push_bind(team.last_premier_league_year);
    });

    Some(query)
}

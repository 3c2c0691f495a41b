use crate::errors::LeagueError;
use crate::models::Team;
use sqlx::PgPool;
use tracing::debug;

const TEAM_COLUMNS: &str = "team_id, name, short_code, city, stadium, manager_name, \
     founding_year, logo_url, usual_formation, last_premier_league_year";

/// Read-side access to the league tables.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), LeagueError> {
        crate::MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub async fn count_teams(&self) -> Result<i64, LeagueError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get_team_by_short_code(&self, code: &str) -> Result<Option<Team>, LeagueError> {
        let team = sqlx::query_as(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Lists every team ordered by name.
    ///
    /// Requires the `last_premier_league_year` column, which the seeder adds.
    pub async fn list_teams(&self) -> Result<Vec<Team>, LeagueError> {
        let teams: Vec<Team> = sqlx::query_as(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} teams", teams.len());
        Ok(teams)
    }

    /// Checks whether `table` has `column` in the connection's current schema.
    pub async fn has_column(&self, table: &str, column: &str) -> Result<bool, LeagueError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.columns
                WHERE table_schema = current_schema()
                  AND table_name = $1
                  AND column_name = $2
            )
            "#,
        )
        .bind(table)
        .bind(column)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

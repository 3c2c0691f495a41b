//! Seed data for the premier league backend.
//!
//! Resets the `teams` table and repopulates it from an authored JSON list.
//! Every run discards whatever the table held before, so this is a fixture /
//! reset tool, not an incremental import.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = DbConfig::from_env()?;
//! let teams = default_teams()?;
//! let report = Seeder::from_config(&config).run(&teams).await?;
//! assert_eq!(report.inserted, 38);
//! ```

pub mod config;
pub mod dataset;
pub mod db;

pub use league::models::{NewTeam, Team};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, DbConfig, connect_options_from_url};
    pub use crate::dataset::{DEFAULT_DATA_FILE, DatasetError, default_teams, load_teams};
    pub use crate::db::{ErrorKind, SeedError, SeedReport, Seeder};
    pub use crate::{NewTeam, Team};
}

//! Domain types and database access for the premier league backend.
//!
//! The `teams` table is created by [`MIGRATOR`]; its contents are owned by the
//! `seed-data` crate, which resets and repopulates it.

pub mod database;
pub mod errors;
pub mod models;

use sqlx::migrate::Migrator;

/// Embedded schema migrations (`crates/league/migrations`).
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

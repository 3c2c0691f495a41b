//! Database side of seeding.
//!
//! The [`Seeder`] owns one connection for the length of a run and applies the
//! reset, schema ensure and bulk insert inside a single transaction.

mod seeder;

pub use seeder::{ErrorKind, SeedError, SeedReport, Seeder, MAX_BATCH_ROWS};

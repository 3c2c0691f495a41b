//! Loading the authored team list from disk.

use std::fs;
use std::path::{Path, PathBuf};

use league::models::NewTeam;
use thiserror::Error;
use tracing::debug;

/// Team list bundled with this crate.
pub const DEFAULT_DATA_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/teams.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read data file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse data file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a JSON array of team records.
pub fn load_teams(path: impl AsRef<Path>) -> Result<Vec<NewTeam>, DatasetError> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let teams: Vec<NewTeam> = serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} team records from {}", teams.len(), path.display());
    Ok(teams)
}

/// Loads the bundled team list.
pub fn default_teams() -> Result<Vec<NewTeam>, DatasetError> {
    load_teams(DEFAULT_DATA_FILE)
}

//! Error types for grid construction and on-disk storage.

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the grid boundary.
///
/// Each variant indicates a broken generation invariant or bad tuning rather
/// than a gameplay condition; a missing path is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("tile ({column}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        column: i32,
        row: i32,
        width: usize,
        height: usize,
    },

    #[error("no free border cell is available for the door")]
    NoDoorCandidate,

    #[error("no plain tile is left for the player to spawn on")]
    NoSpawnCandidate,

    #[error("trap chance must lie within 0 and 1")]
    InvalidTrapChance,
}

/// Failures reading or writing the wallet and config files.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wallet file '{path}' does not hold a gold amount: {contents:?}")]
    InvalidWallet { path: PathBuf, contents: String },

    #[error("config file '{path}' is malformed: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file '{path}' has an invalid value: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

//! Error type for the fallible edges (tuning and best-time files)
//!
//! The simulation itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for the bout simulator
//!
//! The simulation loop itself never fails; these errors cover the surfaces
//! around it (record loading, configuration, serialization).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FightError {
    #[error("Invalid fighter record: {0}")]
    InvalidRecord(String),

    #[error("Fighter not found: {0}")]
    FighterNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FightError>;

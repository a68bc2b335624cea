//! Cage Sim - probabilistic bout simulation engine
//!
//! Simulates a multi-round combat bout between two fighters as a turn-based
//! state machine and produces a structured result plus a replayable event
//! timeline.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tables;
pub mod tournament;

pub use config::{BoutConfig, TieBreak};
pub use error::{FightError, Result};

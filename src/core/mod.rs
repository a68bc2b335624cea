//! Core fight types and entities

pub mod entity;
pub mod fighter;
pub mod health;
pub mod position;
pub mod rating;
pub mod stats;
pub mod types;

pub use entity::{Corner, FighterId};
pub use fighter::{Fighter, MAX_STAMINA};
pub use health::Health;
pub use position::{LegalActions, Position, Transition};
pub use rating::{Rating, Tendency};
pub use stats::FightStats;
pub use types::{
    Action, ActionKind, AttemptOutcome, BodyRegion, StrikeFamily, StrikeOutcome, StrikeType,
    SubmissionKind,
};

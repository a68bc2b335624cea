//! Fighter record loaders
//!
//! Reads host fighter records (JSON) and normalizes them into bout-ready
//! [`crate::core::Fighter`]s.

pub mod record;
pub mod roster;

pub use record::{FighterRecord, RecordLoader};
pub use roster::Roster;

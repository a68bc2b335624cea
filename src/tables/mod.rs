//! Immutable reference data consulted by the engine
//!
//! Tables are built once and handed to each [`crate::game::FightLoop`];
//! concurrent bouts share one [`ReferenceTables`] through an `Arc`.

pub mod strikes;
pub mod styles;
pub mod submissions;

pub use strikes::{StrikeProfile, StrikeTable};
pub use styles::{ClinchBias, FightingStyle, GroundBias, StandingBias, StyleProfile, StyleTable};
pub use submissions::{SubmissionCatalogue, SubmissionEntry};

use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub strikes: StrikeTable,
    pub styles: StyleTable,
    pub submissions: SubmissionCatalogue,
}

impl ReferenceTables {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::standard())
    }

    pub fn with_strikes(mut self, strikes: StrikeTable) -> Self {
        self.strikes = strikes;
        self
    }

    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_submissions(mut self, submissions: SubmissionCatalogue) -> Self {
        self.submissions = submissions;
        self
    }
}

//! Per-fighter reporting counters
//!
//! Stats never feed back into the simulation except for the optional
//! strike-differential round tie-break.

use crate::core::{ActionKind, AttemptOutcome, StrikeOutcome, StrikeType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open-ended counter map keyed by `"<action>_<tally>"`
///
/// Uses BTreeMap so serialized output has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FightStats {
    counters: BTreeMap<String, u32>,
}

impl FightStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        *self.counters.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> u32 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Record a thrown strike and how it ended
    pub fn record_strike(&mut self, strike: StrikeType, outcome: StrikeOutcome) {
        let name = strike.as_str();
        self.increment(&format!("{name}_thrown"));
        self.increment(&format!("{name}_{}", outcome.as_str()));
        self.increment("strikes_thrown");
        if outcome == StrikeOutcome::Hit {
            self.increment("strikes_landed");
        }
    }

    /// Record a non-strike attempt
    pub fn record_attempt(&mut self, kind: ActionKind, outcome: AttemptOutcome) {
        let name = kind.as_str();
        self.increment(&format!("{name}_attempted"));
        self.increment(&format!("{name}_{}", outcome.as_str()));
    }

    pub fn strikes_landed(&self) -> u32 {
        self.get("strikes_landed")
    }
}

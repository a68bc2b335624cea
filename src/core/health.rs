//! Per-region health counters

use crate::core::BodyRegion;
use serde::{Deserialize, Serialize};

/// Health for each tracked body region
///
/// Used both for current health and for the per-fighter maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub head: f64,
    pub body: f64,
    pub legs: f64,
}

impl Health {
    pub fn uniform(value: f64) -> Self {
        Health {
            head: value,
            body: value,
            legs: value,
        }
    }

    pub fn get(&self, region: BodyRegion) -> f64 {
        match region {
            BodyRegion::Head => self.head,
            BodyRegion::Body => self.body,
            BodyRegion::Legs => self.legs,
        }
    }

    pub fn get_mut(&mut self, region: BodyRegion) -> &mut f64 {
        match region {
            BodyRegion::Head => &mut self.head,
            BodyRegion::Body => &mut self.body,
            BodyRegion::Legs => &mut self.legs,
        }
    }

    pub fn total(&self) -> f64 {
        self.head + self.body + self.legs
    }

    /// Any region at or below zero means the fighter cannot continue
    pub fn is_depleted(&self) -> bool {
        BodyRegion::ALL.iter().any(|r| self.get(*r) <= 0.0)
    }

    /// Subtract damage from a region, clamping at zero
    ///
    /// Returns the amount actually removed.
    pub fn damage(&mut self, region: BodyRegion, amount: f64) -> f64 {
        let slot = self.get_mut(region);
        let before = *slot;
        *slot = (before - amount.max(0.0)).max(0.0);
        before - *slot
    }

    /// Add health to every region without exceeding `max`
    pub fn recover(&mut self, amount: f64, max: &Health) {
        for region in BodyRegion::ALL {
            let cap = max.get(region);
            let slot = self.get_mut(region);
            *slot = (*slot + amount.max(0.0)).min(cap);
        }
    }

    /// Fraction of the region's maximum still remaining, in `[0, 1]`
    pub fn fraction(&self, region: BodyRegion, max: &Health) -> f64 {
        let cap = max.get(region);
        if cap <= 0.0 {
            0.0
        } else {
            (self.get(region) / cap).clamp(0.0, 1.0)
        }
    }
}

//! Fighter representation

use crate::core::{FightStats, FighterId, Health, Position, Rating, Tendency};
use crate::tables::FightingStyle;
use serde::{Deserialize, Serialize};

pub const MAX_STAMINA: f64 = 100.0;

/// A fighter for the duration of one bout
///
/// Created from a normalized record at bout start and discarded afterwards;
/// the engine never writes back to the host's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub style: FightingStyle,
    pub rating: Rating,
    pub tendency: Tendency,

    pub health: Health,
    pub max_health: Health,

    /// Always within `[0, MAX_STAMINA]`
    pub stamina: f64,

    pub position: Position,

    /// Set by a head strike that stuns; halves the next defence
    pub stunned: bool,

    pub stats: FightStats,
    pub rounds_won: u32,
    pub submission_tapped: bool,
}

impl Fighter {
    pub fn new(id: FighterId, name: impl Into<String>, max_health: f64, stamina: f64) -> Self {
        let max = Health::uniform(max_health.max(1.0));
        Fighter {
            id,
            name: name.into(),
            style: FightingStyle::default(),
            rating: Rating::default(),
            tendency: Tendency::default(),
            health: max,
            max_health: max,
            stamina: stamina.clamp(0.0, MAX_STAMINA),
            position: Position::Standing,
            stunned: false,
            stats: FightStats::new(),
            rounds_won: 0,
            submission_tapped: false,
        }
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating.normalized();
        self
    }

    pub fn with_tendency(mut self, tendency: Tendency) -> Self {
        self.tendency = tendency.normalized();
        self
    }

    pub fn with_style(mut self, style: FightingStyle) -> Self {
        self.style = style;
        self
    }

    /// Knocked out or tapped
    pub fn is_finished(&self) -> bool {
        self.health.is_depleted() || self.submission_tapped
    }

    pub fn spend_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina - amount.max(0.0)).clamp(0.0, MAX_STAMINA);
    }

    pub fn restore_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount.max(0.0)).clamp(0.0, MAX_STAMINA);
    }

    /// Multiplier in `[0.6, 1.0]` applied to effectiveness as stamina drops
    pub fn fatigue_factor(&self) -> f64 {
        0.6 + 0.4 * (self.stamina / MAX_STAMINA)
    }
}

//! Strike damage table and combo follow-up table

use crate::core::StrikeType;
use smallvec::SmallVec;

/// Static numbers for one strike type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeProfile {
    pub strike: StrikeType,
    /// Damage before power, variability, critical and mitigation
    pub base_damage: f64,
    pub stamina_cost: f64,
    /// Unnormalized hit/block/evade/miss weights before ratings apply
    pub base_odds: [f64; 4],
    /// Inclusive range of seconds the strike takes off the clock
    pub seconds: (u32, u32),
    /// Scales knockout and stun chances for head strikes; 0 for non-head strikes
    pub knockout_power: f64,
}

pub type FollowUps = SmallVec<[StrikeType; 8]>;

/// Per-strike numbers plus the follow-up lists used by the combo engine
#[derive(Debug, Clone)]
pub struct StrikeTable {
    profiles: Vec<StrikeProfile>,
    follow_ups: Vec<FollowUps>,
}

impl StrikeTable {
    pub fn standard() -> Self {
        StrikeTable {
            profiles: StrikeType::ALL.iter().map(|s| standard_profile(*s)).collect(),
            follow_ups: StrikeType::ALL
                .iter()
                .map(|s| standard_follow_ups(*s).iter().copied().collect())
                .collect(),
        }
    }

    pub fn profile(&self, strike: StrikeType) -> &StrikeProfile {
        &self.profiles[strike as usize]
    }

    pub fn follow_ups(&self, strike: StrikeType) -> &[StrikeType] {
        &self.follow_ups[strike as usize]
    }

    /// Replace one strike's numbers
    pub fn with_profile(mut self, profile: StrikeProfile) -> Self {
        self.profiles[profile.strike as usize] = profile;
        self
    }

    /// Replace one strike's follow-up list
    pub fn with_follow_ups(mut self, strike: StrikeType, follow_ups: &[StrikeType]) -> Self {
        self.follow_ups[strike as usize] = follow_ups.iter().copied().collect();
        self
    }
}

impl Default for StrikeTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_profile(strike: StrikeType) -> StrikeProfile {
    let (base_damage, stamina_cost, base_odds, seconds, knockout_power) = match strike {
        StrikeType::Jab => (3.0, 1.0, [0.50, 0.20, 0.15, 0.15], (2, 4), 0.4),
        StrikeType::Cross => (5.0, 1.8, [0.42, 0.22, 0.18, 0.18], (2, 5), 1.0),
        StrikeType::Hook => (6.0, 2.2, [0.38, 0.22, 0.20, 0.20], (3, 5), 1.2),
        StrikeType::Uppercut => (6.0, 2.2, [0.36, 0.20, 0.22, 0.22], (3, 5), 1.2),
        StrikeType::Overhand => (7.5, 2.8, [0.32, 0.20, 0.24, 0.24], (3, 6), 1.4),
        StrikeType::BodyPunch => (4.5, 1.8, [0.45, 0.25, 0.15, 0.15], (2, 5), 0.0),
        StrikeType::LegKick => (5.0, 2.5, [0.50, 0.25, 0.10, 0.15], (3, 6), 0.0),
        StrikeType::BodyKick => (7.0, 3.5, [0.40, 0.30, 0.15, 0.15], (3, 7), 0.0),
        StrikeType::HeadKick => (11.0, 4.5, [0.25, 0.25, 0.25, 0.25], (4, 8), 2.0),
        StrikeType::ClinchKnee => (6.0, 2.5, [0.45, 0.30, 0.10, 0.15], (3, 6), 0.0),
        StrikeType::ClinchElbow => (6.5, 2.5, [0.40, 0.25, 0.15, 0.20], (3, 6), 1.1),
        StrikeType::GroundPunch => (5.0, 2.0, [0.50, 0.30, 0.05, 0.15], (3, 7), 0.8),
        StrikeType::GroundElbow => (6.5, 2.5, [0.45, 0.30, 0.05, 0.20], (3, 7), 1.0),
    };
    StrikeProfile {
        strike,
        base_damage,
        stamina_cost,
        base_odds,
        seconds,
        knockout_power,
    }
}

fn standard_follow_ups(strike: StrikeType) -> &'static [StrikeType] {
    use StrikeType::*;
    match strike {
        Jab => &[Jab, Cross, Hook, Overhand, BodyPunch, LegKick, BodyKick],
        Cross => &[Hook, Uppercut, BodyPunch, LegKick, HeadKick],
        Hook => &[Cross, Uppercut, BodyPunch, LegKick],
        Uppercut => &[Hook, Cross, HeadKick],
        Overhand => &[Hook, Uppercut, LegKick],
        BodyPunch => &[Hook, Uppercut, HeadKick],
        LegKick => &[Cross, Hook],
        BodyKick => &[Cross, Overhand],
        HeadKick => &[],
        ClinchKnee => &[ClinchKnee, ClinchElbow],
        ClinchElbow => &[ClinchKnee],
        GroundPunch => &[GroundPunch, GroundElbow],
        GroundElbow => &[GroundPunch],
    }
}

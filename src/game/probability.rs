//! Probability and damage model
//!
//! Pure functions of fighter ratings and reference numbers. Nothing here draws
//! randomness; the resolver rolls against the values computed here.

use crate::core::{ActionKind, BodyRegion, Fighter, Position, StrikeFamily};
use crate::tables::{StrikeProfile, SubmissionEntry};

pub const CRITICAL_CHANCE: f64 = 0.05;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
pub const VARIABILITY: (f64, f64) = (0.85, 1.15);

pub const KNOCKOUT_MAX: f64 = 0.35;
pub const STUN_MAX: f64 = 0.60;

pub const CONTEST_MIN: f64 = 0.05;
pub const CONTEST_MAX: f64 = 0.90;

pub const SUBMISSION_MIN: f64 = 0.01;
pub const SUBMISSION_MAX: f64 = 0.90;
/// Exponent scale for the stamina differential in submission attempts
pub const SUBMISSION_STAMINA_K: f64 = 0.8;
pub const LOW_STAMINA_THRESHOLD: f64 = 20.0;
pub const LOW_STAMINA_MULTIPLIER: f64 = 1.25;

/// Each chained strike keeps this fraction of the previous hit chance
pub const COMBO_HIT_DECAY: f64 = 0.85;

/// Index order of strike outcome tuples
pub const HIT: usize = 0;
pub const BLOCK: usize = 1;
pub const EVADE: usize = 2;
pub const MISS: usize = 3;

fn unit(value: f64) -> f64 {
    (value / 100.0).clamp(0.0, 1.0)
}

/// Attacker's accuracy for a strike family, in `[0, 1]` before fatigue
fn strike_accuracy(attacker: &Fighter, family: StrikeFamily) -> f64 {
    let r = &attacker.rating;
    let raw = match family {
        StrikeFamily::Punch => r.punch_accuracy * 0.6 + r.hand_speed * 0.4,
        StrikeFamily::Kick => r.kick_accuracy * 0.7 + r.speed * 0.3,
        StrikeFamily::Clinch => r.clinch_striking * 0.7 + r.speed * 0.3,
        StrikeFamily::Ground => r.ground_striking * 0.7 + r.ground_offence * 0.3,
    };
    unit(raw)
}

/// Defender's evasion against a strike family, in `[0, 1]` before fatigue
fn strike_evasion(defender: &Fighter, family: StrikeFamily) -> f64 {
    let r = &defender.rating;
    let raw = match family {
        StrikeFamily::Punch => r.head_movement * 0.6 + r.footwork * 0.4,
        StrikeFamily::Kick => r.kick_defence * 0.6 + r.footwork * 0.4,
        StrikeFamily::Clinch => r.clinch_defence,
        StrikeFamily::Ground => r.ground_defence,
    };
    unit(raw)
}

fn family_power(attacker: &Fighter, family: StrikeFamily) -> f64 {
    let r = &attacker.rating;
    match family {
        StrikeFamily::Punch => r.punch_power,
        StrikeFamily::Kick => r.kick_power,
        StrikeFamily::Clinch => r.clinch_striking,
        StrikeFamily::Ground => r.ground_striking,
    }
}

/// Normalize four weights to sum to one; all-zero input becomes a certain miss
pub fn normalize_odds(weights: [f64; 4]) -> [f64; 4] {
    let clean = weights.map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 });
    let total: f64 = clean.iter().sum();
    if total <= 0.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    clean.map(|w| w / total)
}

/// Outcome probabilities `(hit, block, evade, miss)` for one strike
///
/// `chain_index` is the strike's position within a combo (0 for the opening
/// strike). Each step multiplies the hit chance by [`COMBO_HIT_DECAY`] and
/// spreads the removed mass over the other outcomes in proportion.
pub fn strike_odds(
    attacker: &Fighter,
    defender: &Fighter,
    profile: &StrikeProfile,
    chain_index: u32,
) -> [f64; 4] {
    let family = profile.strike.family();
    let accuracy = strike_accuracy(attacker, family) * attacker.fatigue_factor();

    let stun_factor = if defender.stunned { 0.5 } else { 1.0 };
    let defence_fatigue = defender.fatigue_factor() * stun_factor;
    let blocking = unit(defender.rating.blocking) * defence_fatigue;
    let evasion = strike_evasion(defender, family) * defence_fatigue;

    let base = profile.base_odds;
    let odds = normalize_odds([
        base[HIT] * (0.5 + accuracy),
        base[BLOCK] * (0.5 + blocking),
        base[EVADE] * (0.5 + evasion),
        base[MISS] * (1.5 - accuracy),
    ]);

    apply_chain_decay(odds, chain_index)
}

/// Scale the hit chance by `COMBO_HIT_DECAY^chain_index`, keeping the sum at one
pub fn apply_chain_decay(odds: [f64; 4], chain_index: u32) -> [f64; 4] {
    if chain_index == 0 {
        return odds;
    }
    let hit = odds[HIT] * COMBO_HIT_DECAY.powi(chain_index as i32);
    let removed = odds[HIT] - hit;
    let rest = odds[BLOCK] + odds[EVADE] + odds[MISS];
    if rest <= 0.0 {
        return [hit, 0.0, 0.0, 1.0 - hit];
    }
    let scale = (rest + removed) / rest;
    [hit, odds[BLOCK] * scale, odds[EVADE] * scale, odds[MISS] * scale]
}

/// Damage multiplier from attacker power, in `[0.5, 1.5]`
pub fn power_factor(attacker: &Fighter, family: StrikeFamily) -> f64 {
    0.5 + unit(attacker.rating.power * 0.5 + family_power(attacker, family) * 0.5)
}

/// Fraction of damage the defender absorbs for a region, in `[0.5, 1.0]`
pub fn mitigation(defender: &Fighter, region: BodyRegion) -> f64 {
    let r = &defender.rating;
    let resistance = match region {
        BodyRegion::Head => r.chin,
        BodyRegion::Body => r.toughness,
        BodyRegion::Legs => r.leg_durability,
    };
    1.0 - 0.5 * unit(resistance)
}

/// Damage of a landed strike before it is applied to health
///
/// `variability` should be drawn from [`VARIABILITY`].
pub fn landed_damage(
    attacker: &Fighter,
    defender: &Fighter,
    profile: &StrikeProfile,
    variability: f64,
    critical: bool,
) -> f64 {
    let family = profile.strike.family();
    let crit = if critical { CRITICAL_MULTIPLIER } else { 1.0 };
    let raw = profile.base_damage * power_factor(attacker, family) * variability * crit;
    (raw * mitigation(defender, profile.strike.target())).max(0.0)
}

/// Shared shape of knockout and stun chances
fn head_trauma(profile: &StrikeProfile, defender: &Fighter, damage: f64) -> f64 {
    if profile.strike.target() != BodyRegion::Head || profile.knockout_power <= 0.0 {
        return 0.0;
    }
    let chin_weakness = 1.0 - unit(defender.rating.chin);
    let missing = 1.0 - defender.health.fraction(BodyRegion::Head, &defender.max_health);
    profile.knockout_power * (0.5 + chin_weakness) * (1.0 + 2.0 * missing) * (damage.max(0.0) / 10.0)
}

/// Chance a landed head strike ends the fight
///
/// `defender` should already carry the strike's damage.
pub fn knockout_chance(profile: &StrikeProfile, defender: &Fighter, damage: f64) -> f64 {
    (0.04 * head_trauma(profile, defender, damage)).clamp(0.0, KNOCKOUT_MAX)
}

/// Chance a landed head strike that did not knock out stuns the defender
pub fn stun_chance(profile: &StrikeProfile, defender: &Fighter, damage: f64) -> f64 {
    (0.12 * head_trauma(profile, defender, damage)).clamp(0.0, STUN_MAX)
}

/// Offence-vs-defence ratio model used by every positional contest
pub fn contest_chance(base: f64, offence: f64, defence: f64) -> f64 {
    let ratio = (offence.max(0.0) + 10.0) / (defence.max(0.0) + 10.0);
    (base * ratio).clamp(CONTEST_MIN, CONTEST_MAX)
}

/// Success chance of a positional action (everything except strikes and
/// submissions, which return 0)
pub fn attempt_chance(kind: ActionKind, attacker: &Fighter, defender: &Fighter) -> f64 {
    let a = &attacker.rating;
    let d = &defender.rating;
    let (base, offence, defence) = match kind {
        ActionKind::Clinch => (0.5, a.clinch_offence, d.clinch_defence * 0.7 + d.footwork * 0.3),
        ActionKind::Takedown => (
            0.35,
            a.takedown_offence * 0.8 + a.power * 0.2,
            d.takedown_defence * 0.8 + d.footwork * 0.2,
        ),
        ActionKind::ClinchTakedown => (
            0.4,
            a.takedown_offence * 0.5 + a.clinch_offence * 0.5,
            d.takedown_defence * 0.5 + d.clinch_defence * 0.5,
        ),
        ActionKind::BreakClinch => (0.45, a.clinch_defence, d.clinch_offence),
        ActionKind::Advance => (0.4, a.ground_offence, d.ground_defence),
        ActionKind::Sweep => (0.25, a.ground_offence * 0.5 + a.ground_defence * 0.5, d.ground_offence),
        ActionKind::Escape => (0.3, a.ground_defence, d.ground_offence),
        ActionKind::Punch
        | ActionKind::Kick
        | ActionKind::ClinchStrike
        | ActionKind::GroundStrike
        | ActionKind::Submission => return 0.0,
    };
    contest_chance(
        base,
        offence * attacker.fatigue_factor(),
        defence * defender.fatigue_factor(),
    )
}

/// Flat bonus for attempting a submission from a dominant position
pub fn position_bonus(position: Position) -> f64 {
    match position {
        Position::BackControlOffence => 0.15,
        Position::MountTop => 0.10,
        Position::SideControlTop => 0.05,
        Position::HalfGuardTop => 0.02,
        _ => 0.0,
    }
}

/// Success chance of a submission attempt from the attacker's current position
pub fn submission_chance(attacker: &Fighter, defender: &Fighter, entry: &SubmissionEntry) -> f64 {
    let offence = attacker.rating.submission_offence * attacker.fatigue_factor();
    let defence = defender.rating.submission_defence * defender.fatigue_factor();
    let ratio = (offence + 10.0) / (defence + 10.0);

    let mut p = (0.2 * ratio + position_bonus(attacker.position)) / entry.difficulty.max(f64::EPSILON);
    p *= (SUBMISSION_STAMINA_K * (attacker.stamina - defender.stamina) / 100.0).exp();
    if defender.stamina < LOW_STAMINA_THRESHOLD {
        p *= LOW_STAMINA_MULTIPLIER;
    }
    p.clamp(SUBMISSION_MIN, SUBMISSION_MAX)
}

/// Scale on stamina costs from the cardio attribute, in `[0.75, 1.25]`
pub fn stamina_cost_scale(fighter: &Fighter) -> f64 {
    1.25 - 0.5 * unit(fighter.rating.cardio)
}

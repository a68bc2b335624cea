//! Combo chaining
//!
//! After a landed strike the attacker may continue with a follow-up drawn
//! from the strike table. The resolver drives the chain; this module decides
//! whether it continues and with what.

use crate::core::{Fighter, StrikeType};
use crate::game::Dice;
use crate::tables::ReferenceTables;
use smallvec::SmallVec;

pub const CONTINUATION_BASE: f64 = 0.55;
pub const CONTINUATION_DECAY: f64 = 0.6;
/// Extra stamina every chained strike costs on top of its own
pub const COMBO_STAMINA_SURCHARGE: f64 = 0.75;

/// Chance that a chain already `depth` strikes past the opener continues
pub fn continuation_chance(depth: u32, fatigue_factor: f64) -> f64 {
    (CONTINUATION_BASE * CONTINUATION_DECAY.powi(depth as i32) * fatigue_factor).clamp(0.0, 1.0)
}

/// Follow-up candidates for `last` with the attacker's style weights
pub fn follow_up_weights(
    tables: &ReferenceTables,
    attacker: &Fighter,
    last: StrikeType,
) -> SmallVec<[(StrikeType, f64); 8]> {
    let style = tables.styles.profile(attacker.style);
    tables
        .strikes
        .follow_ups(last)
        .iter()
        .map(|s| (*s, style.strike_weight(*s)))
        .collect()
}

/// Decide whether the chain continues after a landed strike and pick the next
/// strike
///
/// `thrown` counts strikes already in the chain, the opener included. Returns
/// `None` once the chain is at `max_combo`, the continuation roll fails or the
/// follow-up table is empty.
pub fn next_strike(
    tables: &ReferenceTables,
    attacker: &Fighter,
    last: StrikeType,
    thrown: u32,
    max_combo: u32,
    dice: &mut Dice,
) -> Option<StrikeType> {
    if thrown >= max_combo {
        return None;
    }
    let candidates = follow_up_weights(tables, attacker, last);
    if candidates.is_empty() {
        return None;
    }
    let depth = thrown.saturating_sub(1);
    if !dice.chance(continuation_chance(depth, attacker.fatigue_factor())) {
        return None;
    }
    let weights: SmallVec<[f64; 8]> = candidates.iter().map(|(_, w)| *w).collect();
    dice.weighted_index(&weights).map(|i| candidates[i].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FighterId;
    use crate::game::ConstantRng;

    fn attacker() -> Fighter {
        Fighter::new(FighterId::new(1), "A", 100.0, 100.0)
    }

    #[test]
    fn test_continuation_decays() {
        assert!((continuation_chance(0, 1.0) - 0.55).abs() < 1e-12);
        assert!((continuation_chance(1, 1.0) - 0.33).abs() < 1e-12);
        assert!(continuation_chance(2, 0.6) < continuation_chance(2, 1.0));
    }

    #[test]
    fn test_low_roll_continues_with_first_follow_up() {
        let tables = ReferenceTables::standard();
        let mut dice = Dice::from_rng(ConstantRng::lowest());
        let next = next_strike(&tables, &attacker(), StrikeType::Jab, 1, 4, &mut dice);
        assert_eq!(next, Some(StrikeType::Jab));
    }

    #[test]
    fn test_chain_stops_at_max() {
        let tables = ReferenceTables::standard();
        let mut dice = Dice::from_rng(ConstantRng::lowest());
        assert_eq!(next_strike(&tables, &attacker(), StrikeType::Jab, 4, 4, &mut dice), None);
    }

    #[test]
    fn test_head_kick_ends_chain() {
        let tables = ReferenceTables::standard();
        let mut dice = Dice::from_rng(ConstantRng::lowest());
        assert_eq!(
            next_strike(&tables, &attacker(), StrikeType::HeadKick, 1, 4, &mut dice),
            None
        );
    }

    #[test]
    fn test_high_roll_breaks_chain() {
        let tables = ReferenceTables::standard();
        let mut dice = Dice::from_rng(ConstantRng::highest());
        assert_eq!(next_strike(&tables, &attacker(), StrikeType::Cross, 1, 4, &mut dice), None);
    }

    #[test]
    fn test_follow_ups_use_style_weights() {
        let tables = ReferenceTables::standard();
        let boxer = attacker().with_style(crate::tables::FightingStyle::Boxing);
        let weights = follow_up_weights(&tables, &boxer, StrikeType::Jab);
        let cross = weights.iter().find(|(s, _)| *s == StrikeType::Cross).map(|(_, w)| *w);
        assert_eq!(cross, Some(1.3));
    }
}

//! Property tests for the probability model

use cage_sim::core::{ActionKind, Fighter, FighterId, Position, Rating, StrikeType, SubmissionKind};
use cage_sim::game::probability::{
    self, CONTEST_MAX, CONTEST_MIN, KNOCKOUT_MAX, STUN_MAX, SUBMISSION_MAX, SUBMISSION_MIN,
};
use cage_sim::game::Dice;
use cage_sim::tables::ReferenceTables;
use proptest::prelude::*;

fn fighter(skill: f64, chin: f64, stamina: f64) -> Fighter {
    let mut rating = Rating::uniform(skill);
    rating.chin = chin;
    let mut f = Fighter::new(FighterId::new(1), "P", 100.0, 100.0).with_rating(rating);
    f.stamina = stamina;
    f
}

fn sums_to_one(odds: [f64; 4]) -> bool {
    (odds.iter().sum::<f64>() - 1.0).abs() < 1e-9 && odds.iter().all(|p| *p >= 0.0)
}

fn weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1e6f64..0.0,
        0.0f64..1e6,
    ]
}

proptest! {
    /// Strike odds are a distribution for any ratings, fatigue, stun and chain depth
    #[test]
    fn prop_strike_odds_are_a_distribution(
        att in -20.0f64..130.0,
        def in -20.0f64..130.0,
        stamina in 0.0f64..100.0,
        stunned in any::<bool>(),
        strike in 0usize..StrikeType::ALL.len(),
        chain in 0u32..8,
    ) {
        let tables = ReferenceTables::standard();
        let attacker = fighter(att, 50.0, stamina);
        let mut defender = fighter(def, 50.0, 100.0);
        defender.stunned = stunned;
        let profile = tables.strikes.profile(StrikeType::ALL[strike]);
        let odds = probability::strike_odds(&attacker, &defender, profile, chain);
        prop_assert!(sums_to_one(odds), "{odds:?}");
    }

    /// Deeper chain positions never raise the hit chance
    #[test]
    fn prop_chain_decay_monotonic(
        a in 0.0f64..1.0, b in 0.0f64..1.0, c in 0.0f64..1.0, d in 0.0f64..1.0,
        chain in 0u32..6,
    ) {
        let odds = probability::normalize_odds([a, b, c, d]);
        let now = probability::apply_chain_decay(odds, chain);
        let next = probability::apply_chain_decay(odds, chain + 1);
        prop_assert!(sums_to_one(now));
        prop_assert!(next[probability::HIT] <= now[probability::HIT] + 1e-12);
    }

    /// Normalizing garbage weights still yields a distribution
    #[test]
    fn prop_normalize_handles_bad_weights(
        a in weight(), b in weight(), c in weight(), d in weight(),
    ) {
        prop_assert!(sums_to_one(probability::normalize_odds([a, b, c, d])));
    }

    #[test]
    fn prop_contest_is_clamped(base in 0.0f64..2.0, off in -50.0f64..500.0, def in -50.0f64..500.0) {
        let p = probability::contest_chance(base, off, def);
        prop_assert!((CONTEST_MIN..=CONTEST_MAX).contains(&p));
    }

    #[test]
    fn prop_positional_attempts_are_clamped(att in 0.0f64..100.0, def in 0.0f64..100.0) {
        let a = fighter(att, 50.0, 100.0);
        let d = fighter(def, 50.0, 100.0);
        for kind in [
            ActionKind::Clinch,
            ActionKind::Takedown,
            ActionKind::ClinchTakedown,
            ActionKind::BreakClinch,
            ActionKind::Advance,
            ActionKind::Sweep,
            ActionKind::Escape,
        ] {
            let p = probability::attempt_chance(kind, &a, &d);
            prop_assert!((CONTEST_MIN..=CONTEST_MAX).contains(&p), "{kind:?}: {p}");
        }
    }

    #[test]
    fn prop_submission_is_clamped(
        att in 0.0f64..100.0,
        def in 0.0f64..100.0,
        att_stamina in 0.0f64..100.0,
        def_stamina in 0.0f64..100.0,
        position in 0usize..Position::ALL.len(),
    ) {
        let tables = ReferenceTables::standard();
        let mut a = fighter(att, 50.0, att_stamina);
        a.position = Position::ALL[position];
        let d = fighter(def, 50.0, def_stamina);
        for entry in tables.submissions.entries() {
            let p = probability::submission_chance(&a, &d, entry);
            prop_assert!((SUBMISSION_MIN..=SUBMISSION_MAX).contains(&p), "{:?}: {p}", entry.kind);
        }
    }

    /// Landed damage is never negative and knockout/stun chances stay under their caps
    #[test]
    fn prop_damage_and_trauma_bounded(
        att in 0.0f64..100.0,
        chin in 0.0f64..100.0,
        head in 0.0f64..100.0,
        variability in 0.85f64..1.15,
        critical in any::<bool>(),
        strike in 0usize..StrikeType::ALL.len(),
    ) {
        let tables = ReferenceTables::standard();
        let attacker = fighter(att, 50.0, 100.0);
        let mut defender = fighter(50.0, chin, 100.0);
        defender.health.head = head;
        let profile = tables.strikes.profile(StrikeType::ALL[strike]);

        let damage = probability::landed_damage(&attacker, &defender, profile, variability, critical);
        prop_assert!(damage >= 0.0);
        let ko = probability::knockout_chance(profile, &defender, damage);
        let stun = probability::stun_chance(profile, &defender, damage);
        prop_assert!((0.0..=KNOCKOUT_MAX).contains(&ko));
        prop_assert!((0.0..=STUN_MAX).contains(&stun));
    }

    /// Weighted draws land on a positive weight
    #[test]
    fn prop_weighted_index_picks_positive(
        seed in any::<u64>(),
        weights in prop::collection::vec(-1.0f64..5.0, 1..10),
    ) {
        let mut dice = Dice::seeded(seed);
        match dice.weighted_index(&weights) {
            Some(i) => prop_assert!(weights[i] > 0.0),
            None => prop_assert!(weights.iter().all(|w| *w <= 0.0)),
        }
    }
}

#[test]
fn test_easier_holds_are_likelier() {
    let tables = ReferenceTables::standard();
    let mut a = fighter(60.0, 50.0, 80.0);
    a.position = Position::MountTop;
    let d = fighter(60.0, 50.0, 80.0);
    let americana = tables.submissions.get(SubmissionKind::Americana).unwrap();
    let armbar = tables.submissions.get(SubmissionKind::Armbar).unwrap();
    let p_americana = probability::submission_chance(&a, &d, americana);
    let p_armbar = probability::submission_chance(&a, &d, armbar);
    assert!(americana.difficulty > armbar.difficulty);
    assert!(p_americana < p_armbar, "americana {p_americana} armbar {p_armbar}");
}

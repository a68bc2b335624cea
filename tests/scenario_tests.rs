//! Whole-bout scenarios with pinned dice
//!
//! A constant RNG makes every draw an extreme: the lowest roll picks the
//! first option and passes every chance, the highest picks the last option
//! and fails every capped chance.

use cage_sim::core::{
    Action, ActionKind, AttemptOutcome, BodyRegion, Corner, Fighter, FighterId, Position, Rating, StrikeType,
    SubmissionKind,
};
use cage_sim::game::{
    fight_loop::describe_result, ConstantRng, Dice, EventKind, FightLoop, Method, ScriptedController,
    TendencyController, VerbosityLevel,
};
use cage_sim::tables::{FightingStyle, ReferenceTables, StrikeTable, StyleTable, SubmissionCatalogue};
use cage_sim::{BoutConfig, TieBreak};
use std::sync::Arc;

fn fighter(id: u32, name: &str) -> Fighter {
    Fighter::new(FighterId::new(id), name, 100.0, 100.0).with_rating(Rating::uniform(50.0))
}

fn bout(dice: Dice, config: BoutConfig) -> FightLoop {
    FightLoop::new(fighter(1, "Red"), fighter(2, "Blue"), config, ReferenceTables::shared(), dice)
        .with_verbosity(VerbosityLevel::Silent)
}

fn bout_with_tables(dice: Dice, tables: ReferenceTables) -> FightLoop {
    FightLoop::new(fighter(1, "Red"), fighter(2, "Blue"), BoutConfig::default(), Arc::new(tables), dice)
        .with_verbosity(VerbosityLevel::Silent)
}

fn run_ai(fight: &mut FightLoop) -> cage_sim::game::BoutResult {
    let mut red = TendencyController::new(Corner::Red);
    let mut blue = TendencyController::new(Corner::Blue);
    fight.run_fight(&mut red, &mut blue).unwrap()
}

#[test]
fn test_highest_roll_goes_the_distance() {
    let mut fight = bout(Dice::from_rng(ConstantRng::highest()), BoutConfig::default());
    let result = run_ai(&mut fight);

    // Blue always acts and every takedown fails, so no damage is done and
    // each round falls to the coin, which the high roll gives to blue
    assert_eq!(result.method, Method::Decision);
    assert_eq!(result.winner, Some(Corner::Blue));
    assert_eq!(result.round, 3);
    assert_eq!(result.stop_clock, 0);
    assert_eq!(result.scorecards.len(), 3);
    for card in &result.scorecards {
        assert!(card.tie_break);
        assert_eq!(card.winner, Corner::Blue);
        assert_eq!(card.health_lost, [0.0, 0.0]);
    }

    let attempts = fight
        .events()
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Attempt { actor: Corner::Blue, .. }))
        .count();
    assert_eq!(attempts, 90);
    assert_eq!(fight.fighter(Corner::Blue).stats.get("takedown_failed"), 90);
}

#[test]
fn test_lowest_roll_knocks_out_with_first_jab() {
    let mut fight = bout(Dice::from_rng(ConstantRng::lowest()), BoutConfig::default());
    let result = run_ai(&mut fight);

    assert_eq!(result.method, Method::Knockout);
    assert_eq!(result.winner, Some(Corner::Red));
    assert_eq!(result.round, 1);
    assert_eq!(result.stop_clock, 298);
    assert_eq!(fight.fighter(Corner::Blue).health.head, 0.0);

    let kinds: Vec<_> = fight.events().iter().map(|e| &e.kind).collect();
    assert!(matches!(
        kinds[1],
        EventKind::Strike {
            strike: StrikeType::Jab,
            critical: true,
            ..
        }
    ));
    assert!(matches!(kinds[2], EventKind::Knockout { .. }));
    assert!(matches!(kinds[3], EventKind::FightEnd { method: Method::Knockout, .. }));
}

#[test]
fn test_stop_clock_matches_causing_event() {
    for seed in 0..40 {
        let mut fight = bout(Dice::seeded(seed), BoutConfig::default());
        let result = run_ai(&mut fight);
        if !result.method.is_stoppage() {
            continue;
        }
        let events = fight.events().as_slice();
        let end = &events[events.len() - 1];
        let cause = &events[events.len() - 2];
        assert_eq!(end.clock, result.stop_clock);
        assert_eq!(cause.clock, result.stop_clock);
        assert!(matches!(
            cause.kind,
            EventKind::Knockout { .. } | EventKind::Submission { .. }
        ));
    }
}

#[test]
fn test_choke_from_back_is_a_six_second_submission() {
    let mut fight = bout(Dice::from_rng(ConstantRng::lowest()), BoutConfig::default());
    fight.start_round();
    fight.set_position(Corner::Red, Position::BackControlOffence);

    let result = fight
        .play_turn(Corner::Red, Action::Submission(SubmissionKind::RearNakedChoke))
        .unwrap();

    assert_eq!(result.method, Method::Submission);
    assert_eq!(result.stop_clock, 294);
    assert!(fight.fighter(Corner::Blue).submission_tapped);
    assert_eq!(
        describe_result(&result, 300),
        "Red def. Blue by submission in round 1 (0:06)"
    );
}

#[test]
fn test_scripted_ground_game() {
    let mut fight = bout(Dice::from_rng(ConstantRng::lowest()), BoutConfig::default());
    let mut red = ScriptedController::new(
        Corner::Red,
        vec![
            Action::Takedown,
            Action::Advance,
            Action::Advance,
            Action::Advance,
            Action::Advance,
            Action::Submission(SubmissionKind::RearNakedChoke),
        ],
    );
    let mut blue = ScriptedController::new(Corner::Blue, vec![]);
    let result = fight.run_fight(&mut red, &mut blue).unwrap();

    assert_eq!(result.method, Method::Submission);
    assert_eq!(result.submission.as_deref(), Some("Rear-Naked Choke"));
    let transitions: Vec<Position> = fight
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Attempt { to: Some(to), .. } => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(transitions.first(), Some(&Position::FullGuardTop));
    assert_eq!(transitions.last(), Some(&Position::BackControlOffence));
}

#[test]
fn test_single_round_config() {
    let config = BoutConfig::default().with_rounds(1).with_tie_break(TieBreak::StrikeDifferential);
    let mut fight = bout(Dice::from_rng(ConstantRng::highest()), config);
    let result = run_ai(&mut fight);
    assert_eq!(result.round, 1);
    assert_eq!(result.scorecards.len(), 1);
    // Nothing landed either way, so the coin still decides
    assert_eq!(result.winner, Some(Corner::Blue));
}

#[test]
fn test_style_without_takedowns_never_shoots() {
    let mut mma = StyleTable::standard().profile(FightingStyle::MixedMartialArts).clone();
    mma.standing.takedown = 0.0;
    mma.clinch.takedown = 0.0;
    let tables = ReferenceTables::standard().with_styles(StyleTable::standard().with_profile(mma));

    let dice = (0..20).map(Dice::seeded).chain([Dice::from_rng(ConstantRng::highest())]);
    for (i, dice) in dice.enumerate() {
        let mut fight = bout_with_tables(dice, tables.clone());
        run_ai(&mut fight);
        let shots = fight
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    EventKind::Attempt {
                        action: ActionKind::Takedown | ActionKind::ClinchTakedown,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(shots, 0, "run {i}: takedown attempted");
    }
}

#[test]
fn test_catalogue_without_choke_refuses_it() {
    let entries = ReferenceTables::standard()
        .submissions
        .entries()
        .iter()
        .filter(|e| e.kind != SubmissionKind::RearNakedChoke)
        .cloned()
        .collect();
    let tables = ReferenceTables::standard().with_submissions(SubmissionCatalogue::from_entries(entries));
    let mut fight = bout_with_tables(Dice::from_rng(ConstantRng::lowest()), tables);
    fight.start_round();
    fight.set_position(Corner::Red, Position::BackControlOffence);

    let result = fight.play_turn(Corner::Red, Action::Submission(SubmissionKind::RearNakedChoke));

    assert!(result.is_none());
    assert!(!fight.fighter(Corner::Blue).submission_tapped);
    assert_eq!(fight.clock(), 298);
    assert!(matches!(
        fight.events().as_slice().last().map(|e| &e.kind),
        Some(EventKind::Attempt {
            outcome: AttemptOutcome::Invalid,
            ..
        })
    ));
}

#[test]
fn test_leg_kicks_stop_the_bout() {
    let strikes = StrikeTable::standard().with_follow_ups(StrikeType::LegKick, &[]);
    let mut fight = bout_with_tables(
        Dice::from_rng(ConstantRng::lowest()),
        ReferenceTables::standard().with_strikes(strikes),
    );

    let mut result = None;
    for _ in 0..100 {
        result = fight.play_turn(Corner::Red, Action::Strike(StrikeType::LegKick));
        if result.is_some() {
            break;
        }
    }
    let result = result.expect("leg kicks should finish the bout in round 1");

    assert_eq!(result.method, Method::Knockout);
    assert_eq!(result.winner, Some(Corner::Red));
    assert_eq!(result.round, 1);
    let blue = fight.fighter(Corner::Blue);
    assert_eq!(blue.health.legs, 0.0);
    assert_eq!(blue.health.head, 100.0);

    let events = fight.events().as_slice();
    let cause = &events[events.len() - 2];
    assert_eq!(cause.clock, result.stop_clock);
    assert!(matches!(
        cause.kind,
        EventKind::Knockout {
            strike: StrikeType::LegKick,
            target: BodyRegion::Legs,
            ..
        }
    ));
}

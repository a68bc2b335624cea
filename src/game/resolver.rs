//! Turn resolution
//!
//! [`resolve_turn`] takes the fighters by shared reference and returns the
//! fighters as they stand after the action, the events it produced and the
//! seconds it used. The fight loop commits the result.

use crate::core::position::{apply_transition, transition};
use crate::core::{
    Action, ActionKind, AttemptOutcome, BodyRegion, Corner, Fighter, Position, StrikeOutcome, StrikeType,
    SubmissionKind, Transition,
};
use crate::game::events::{EventKind, FightEvent};
use crate::game::probability::{self, MISS};
use crate::game::{combo, Dice};
use crate::tables::ReferenceTables;

/// Seconds an invalid request takes off the clock
pub const INVALID_ACTION_SECONDS: u32 = 2;
/// Floor on the seconds any resolved action takes, whatever its table range
pub const MIN_ACTION_SECONDS: u32 = 1;
pub const SUBMISSION_STAMINA_COST: f64 = 4.0;
pub const SUBMISSION_SECONDS: (u32, u32) = (6, 15);
/// Stamina a defender spends fending off a grappling attempt
pub const DEFENCE_STAMINA_COST: f64 = 1.0;

const OUTCOMES: [StrikeOutcome; 4] = [
    StrikeOutcome::Hit,
    StrikeOutcome::Blocked,
    StrikeOutcome::Evaded,
    StrikeOutcome::Missed,
];

/// Stamina cost and clock range of a positional action
pub fn attempt_cost(kind: ActionKind) -> (f64, (u32, u32)) {
    match kind {
        ActionKind::Clinch => (2.0, (3, 6)),
        ActionKind::Takedown => (4.0, (4, 10)),
        ActionKind::ClinchTakedown => (3.5, (4, 8)),
        ActionKind::BreakClinch => (2.0, (2, 5)),
        ActionKind::Advance => (3.0, (5, 12)),
        ActionKind::Sweep => (3.5, (4, 10)),
        ActionKind::Escape => (3.0, (4, 10)),
        ActionKind::Submission => (SUBMISSION_STAMINA_COST, SUBMISSION_SECONDS),
        ActionKind::Punch | ActionKind::Kick | ActionKind::ClinchStrike | ActionKind::GroundStrike => {
            (0.0, (INVALID_ACTION_SECONDS, INVALID_ACTION_SECONDS))
        }
    }
}

/// Where in the bout a turn happens and who acts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub round: u32,
    /// Round clock before the action
    pub clock: u32,
    pub actor: Corner,
    pub max_combo: u32,
}

/// Outcome of one turn, not yet committed
#[derive(Debug, Clone)]
pub struct Resolution {
    pub fighters: [Fighter; 2],
    pub events: Vec<FightEvent>,
    pub elapsed: u32,
}

impl Resolution {
    /// A fighter was knocked out or tapped during the turn
    pub fn is_stoppage(&self) -> bool {
        self.fighters.iter().any(|f| f.is_finished())
    }
}

pub fn resolve_turn(
    fighters: &[Fighter; 2],
    ctx: &TurnContext,
    action: Action,
    tables: &ReferenceTables,
    dice: &mut Dice,
) -> Resolution {
    let mut turn = Turn {
        fighters: fighters.clone(),
        events: Vec::new(),
        elapsed: 0,
        ctx,
        tables,
    };

    let from = turn.fighters[ctx.actor.index()].position;
    let kind = action.kind();

    match action {
        Action::Strike(strike) if from.allows(kind) => {
            turn.recover_from_stun();
            turn.strike_chain(strike, dice);
        }
        Action::Submission(hold) if from.allows(kind) => {
            match tables.submissions.get(hold).filter(|e| e.applies_from(from)) {
                Some(entry) => {
                    let chance = probability::submission_chance(
                        &turn.fighters[ctx.actor.index()],
                        &turn.fighters[ctx.actor.opponent().index()],
                        entry,
                    );
                    turn.recover_from_stun();
                    turn.submission(hold, chance, dice);
                }
                None => turn.invalid(kind, from),
            }
        }
        Action::Strike(_) | Action::Submission(_) => turn.invalid(kind, from),
        _ => match transition(from, kind) {
            Transition::To(target) => {
                turn.recover_from_stun();
                turn.contest(kind, from, target, dice);
            }
            Transition::Stay | Transition::Invalid => turn.invalid(kind, from),
        },
    }

    Resolution {
        fighters: turn.fighters,
        events: turn.events,
        elapsed: turn.elapsed,
    }
}

struct Turn<'a> {
    fighters: [Fighter; 2],
    events: Vec<FightEvent>,
    elapsed: u32,
    ctx: &'a TurnContext,
    tables: &'a ReferenceTables,
}

impl<'a> Turn<'a> {
    fn actor(&self) -> usize {
        self.ctx.actor.index()
    }

    fn defender(&self) -> usize {
        self.ctx.actor.opponent().index()
    }

    fn tick(&mut self, dice: &mut Dice, range: (u32, u32)) -> u32 {
        self.elapsed += dice.between(range.0, range.1).max(MIN_ACTION_SECONDS);
        self.ctx.clock.saturating_sub(self.elapsed)
    }

    fn emit(&mut self, clock: u32, kind: EventKind) {
        self.events.push(FightEvent::new(self.ctx.round, clock, kind));
    }

    fn spend(&mut self, index: usize, base_cost: f64) {
        let scale = probability::stamina_cost_scale(&self.fighters[index]);
        self.fighters[index].spend_stamina(base_cost * scale);
    }

    /// A stunned fighter who gets to act has recovered
    fn recover_from_stun(&mut self) {
        let actor = self.actor();
        self.fighters[actor].stunned = false;
    }

    fn invalid(&mut self, kind: ActionKind, from: Position) {
        self.elapsed += INVALID_ACTION_SECONDS;
        let clock = self.ctx.clock.saturating_sub(self.elapsed);
        self.emit(
            clock,
            EventKind::Attempt {
                actor: self.ctx.actor,
                action: kind,
                outcome: AttemptOutcome::Invalid,
                from,
                to: None,
            },
        );
    }

    fn strike_chain(&mut self, opener: StrikeType, dice: &mut Dice) {
        let (a, d) = (self.actor(), self.defender());
        let attacker = self.ctx.actor;
        let defender = attacker.opponent();
        let mut strike = opener;
        let mut thrown: u32 = 0;

        loop {
            let profile = *self.tables.strikes.profile(strike);
            let odds = probability::strike_odds(&self.fighters[a], &self.fighters[d], &profile, thrown);
            let outcome = OUTCOMES[dice.weighted_index(&odds).unwrap_or(MISS)];
            // A stun only weakens the next defence
            self.fighters[d].stunned = false;

            let surcharge = if thrown > 0 { combo::COMBO_STAMINA_SURCHARGE } else { 0.0 };
            self.spend(a, profile.stamina_cost + surcharge);
            let clock = self.tick(dice, profile.seconds);

            let target = strike.target();
            let mut damage = 0.0;
            let mut critical = false;
            let mut aftermath = None;

            if outcome == StrikeOutcome::Hit {
                let (low, high) = probability::VARIABILITY;
                let variability = dice.uniform(low, high);
                critical = dice.chance(probability::CRITICAL_CHANCE);
                let raw = probability::landed_damage(&self.fighters[a], &self.fighters[d], &profile, variability, critical);
                damage = self.fighters[d].health.damage(target, raw);

                let head = target == BodyRegion::Head;
                let ko_roll =
                    head && dice.chance(probability::knockout_chance(&profile, &self.fighters[d], damage));
                if ko_roll {
                    *self.fighters[d].health.get_mut(BodyRegion::Head) = 0.0;
                }
                // Any emptied region finishes the bout, not only a knockout roll
                if ko_roll || self.fighters[d].is_finished() {
                    self.fighters[a].stats.increment("knockouts");
                    aftermath = Some(EventKind::Knockout {
                        attacker,
                        defender,
                        strike,
                        target,
                    });
                } else if head && dice.chance(probability::stun_chance(&profile, &self.fighters[d], damage)) {
                    self.fighters[d].stunned = true;
                    self.fighters[a].stats.increment("stuns");
                    aftermath = Some(EventKind::Stun { attacker, defender });
                }
            }

            self.fighters[a].stats.record_strike(strike, outcome);
            if critical {
                self.fighters[a].stats.increment("critical_strikes");
            }
            self.emit(
                clock,
                EventKind::Strike {
                    attacker,
                    defender,
                    strike,
                    target,
                    outcome,
                    damage,
                    critical,
                    combo_index: thrown,
                },
            );
            if let Some(kind) = aftermath {
                self.emit(clock, kind);
            }

            thrown += 1;
            if outcome != StrikeOutcome::Hit || self.fighters[d].is_finished() {
                break;
            }
            match combo::next_strike(self.tables, &self.fighters[a], strike, thrown, self.ctx.max_combo, dice) {
                Some(next) => {
                    self.fighters[a].stats.increment("combo_strikes");
                    strike = next;
                }
                None => break,
            }
        }
    }

    fn submission(&mut self, hold: SubmissionKind, chance: f64, dice: &mut Dice) {
        let (a, d) = (self.actor(), self.defender());
        let success = dice.chance(chance);

        self.spend(a, SUBMISSION_STAMINA_COST);
        let clock = self.tick(dice, SUBMISSION_SECONDS);

        let outcome = if success {
            self.fighters[d].submission_tapped = true;
            AttemptOutcome::Success
        } else {
            self.spend(d, DEFENCE_STAMINA_COST);
            AttemptOutcome::Failed
        };
        self.fighters[a].stats.record_attempt(ActionKind::Submission, outcome);
        self.emit(
            clock,
            EventKind::Submission {
                attacker: self.ctx.actor,
                defender: self.ctx.actor.opponent(),
                submission: hold,
                outcome,
            },
        );
    }

    fn contest(&mut self, kind: ActionKind, from: Position, target: Position, dice: &mut Dice) {
        let (a, d) = (self.actor(), self.defender());
        let chance = probability::attempt_chance(kind, &self.fighters[a], &self.fighters[d]);
        let success = dice.chance(chance);

        let (cost, seconds) = attempt_cost(kind);
        self.spend(a, cost);
        let clock = self.tick(dice, seconds);

        let outcome = if success {
            apply_transition(&mut self.fighters, self.ctx.actor, target);
            AttemptOutcome::Success
        } else {
            self.spend(d, DEFENCE_STAMINA_COST);
            AttemptOutcome::Failed
        };
        self.fighters[a].stats.record_attempt(kind, outcome);
        self.emit(
            clock,
            EventKind::Attempt {
                actor: self.ctx.actor,
                action: kind,
                outcome,
                from,
                to: success.then_some(target),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FighterId, Rating};
    use crate::game::ConstantRng;
    use crate::tables::StrikeTable;

    fn pair(red: Rating, blue: Rating) -> [Fighter; 2] {
        [
            Fighter::new(FighterId::new(1), "Red", 100.0, 100.0).with_rating(red),
            Fighter::new(FighterId::new(2), "Blue", 100.0, 100.0).with_rating(blue),
        ]
    }

    fn ctx(actor: Corner) -> TurnContext {
        TurnContext {
            round: 1,
            clock: 300,
            actor,
            max_combo: 4,
        }
    }

    #[test]
    fn test_invalid_action_mutates_nothing() {
        let tables = ReferenceTables::standard();
        let fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        let mut dice = Dice::seeded(1);

        let resolution = resolve_turn(&fighters, &ctx(Corner::Red), Action::Advance, &tables, &mut dice);

        assert_eq!(resolution.fighters, fighters);
        assert_eq!(resolution.elapsed, INVALID_ACTION_SECONDS);
        assert_eq!(resolution.events.len(), 1);
        assert!(matches!(
            resolution.events[0].kind,
            EventKind::Attempt {
                outcome: AttemptOutcome::Invalid,
                ..
            }
        ));
    }

    #[test]
    fn test_submission_not_applicable_is_invalid() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        fighters[0].position = Position::MountTop;
        fighters[1].position = Position::MountBottom;
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Submission(SubmissionKind::Triangle),
            &tables,
            &mut dice,
        );
        assert_eq!(resolution.fighters, fighters);
        assert!(!resolution.is_stoppage());
    }

    #[test]
    fn test_low_roll_jab_knocks_out_glass_chin() {
        let tables = ReferenceTables::standard();
        let fighters = pair(Rating::uniform(100.0), Rating::uniform(0.0));
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Strike(StrikeType::Jab),
            &tables,
            &mut dice,
        );

        assert!(resolution.is_stoppage());
        assert_eq!(resolution.fighters[1].health.head, 0.0);
        let last = resolution.events.last().unwrap();
        assert!(matches!(last.kind, EventKind::Knockout { .. }));
        assert!(last.clock < 300);
        assert_eq!(resolution.fighters[0].stats.get("knockouts"), 1);
    }

    #[test]
    fn test_emptied_body_is_a_knockout() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair(Rating::uniform(100.0), Rating::uniform(0.0));
        fighters[1].health.body = 1.0;
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Strike(StrikeType::BodyKick),
            &tables,
            &mut dice,
        );

        assert!(resolution.is_stoppage());
        assert_eq!(resolution.fighters[1].health.body, 0.0);
        assert_eq!(resolution.fighters[1].health.head, 100.0);
        assert_eq!(resolution.events.len(), 2);
        assert!(matches!(
            resolution.events[1].kind,
            EventKind::Knockout {
                attacker: Corner::Red,
                defender: Corner::Blue,
                strike: StrikeType::BodyKick,
                target: BodyRegion::Body,
            }
        ));
        assert!(resolution.events[1].is_stoppage());
        assert_eq!(resolution.fighters[0].stats.get("knockouts"), 1);
    }

    #[test]
    fn test_zero_second_strike_still_runs_the_clock() {
        let mut jab = *ReferenceTables::standard().strikes.profile(StrikeType::Jab);
        jab.seconds = (0, 0);
        let tables = ReferenceTables::standard().with_strikes(StrikeTable::standard().with_profile(jab));
        let fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        let mut dice = Dice::from_rng(ConstantRng::highest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Strike(StrikeType::Jab),
            &tables,
            &mut dice,
        );

        assert_eq!(resolution.elapsed, MIN_ACTION_SECONDS);
        assert_eq!(resolution.events[0].clock, 300 - MIN_ACTION_SECONDS);
    }

    #[test]
    fn test_empty_follow_up_list_ends_chain() {
        let strikes = StrikeTable::standard().with_follow_ups(StrikeType::ClinchKnee, &[]);
        let tables = ReferenceTables::standard().with_strikes(strikes);
        let mut fighters = pair(Rating::uniform(60.0), Rating::uniform(60.0));
        fighters[0].position = Position::ClinchOffence;
        fighters[1].position = Position::ClinchDefence;
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Strike(StrikeType::ClinchKnee),
            &tables,
            &mut dice,
        );

        let strikes = resolution
            .events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Strike { .. }))
            .count();
        assert_eq!(strikes, 1);
        assert_eq!(resolution.fighters[0].stats.get("combo_strikes"), 0);
    }

    #[test]
    fn test_high_roll_misses() {
        let tables = ReferenceTables::standard();
        let fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        let mut dice = Dice::from_rng(ConstantRng::highest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Blue),
            Action::Strike(StrikeType::Hook),
            &tables,
            &mut dice,
        );

        assert_eq!(resolution.events.len(), 1);
        assert!(matches!(
            resolution.events[0].kind,
            EventKind::Strike {
                outcome: StrikeOutcome::Missed,
                ..
            }
        ));
        assert_eq!(resolution.fighters[0].health, fighters[0].health);
        assert!(resolution.fighters[1].stamina < 100.0);
        assert_eq!(resolution.elapsed, 5);
    }

    #[test]
    fn test_clinch_knees_chain_to_max() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair(Rating::uniform(60.0), Rating::uniform(60.0));
        fighters[0].position = Position::ClinchOffence;
        fighters[1].position = Position::ClinchDefence;
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Strike(StrikeType::ClinchKnee),
            &tables,
            &mut dice,
        );

        let indices: Vec<u32> = resolution
            .events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Strike { combo_index, .. } => Some(combo_index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(resolution.fighters[0].stats.get("clinch_knee_thrown"), 4);
        // Clock never runs backwards within the chain
        let clocks: Vec<u32> = resolution.events.iter().map(|e| e.clock).collect();
        assert!(clocks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_takedown_moves_both_fighters() {
        let tables = ReferenceTables::standard();
        let fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(&fighters, &ctx(Corner::Blue), Action::Takedown, &tables, &mut dice);

        assert_eq!(resolution.fighters[1].position, Position::FullGuardTop);
        assert_eq!(resolution.fighters[0].position, Position::FullGuardBottom);
    }

    #[test]
    fn test_failed_takedown_keeps_position() {
        let tables = ReferenceTables::standard();
        let fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        let mut dice = Dice::from_rng(ConstantRng::highest());

        let resolution = resolve_turn(&fighters, &ctx(Corner::Red), Action::Takedown, &tables, &mut dice);

        assert_eq!(resolution.fighters[0].position, Position::Standing);
        assert_eq!(resolution.fighters[0].stats.get("takedown_failed"), 1);
        assert!(resolution.fighters[1].stamina < 100.0);
    }

    #[test]
    fn test_rear_naked_choke_taps() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        fighters[0].position = Position::BackControlOffence;
        fighters[1].position = Position::BackControlDefence;
        let mut dice = Dice::from_rng(ConstantRng::lowest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Red),
            Action::Submission(SubmissionKind::RearNakedChoke),
            &tables,
            &mut dice,
        );

        assert!(resolution.fighters[1].submission_tapped);
        assert!(resolution.events[0].is_stoppage());
        assert_eq!(resolution.elapsed, SUBMISSION_SECONDS.0);
    }

    #[test]
    fn test_stun_clears_when_stunned_fighter_acts() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair(Rating::uniform(50.0), Rating::uniform(50.0));
        fighters[1].stunned = true;
        let mut dice = Dice::from_rng(ConstantRng::highest());

        let resolution = resolve_turn(
            &fighters,
            &ctx(Corner::Blue),
            Action::Strike(StrikeType::Jab),
            &tables,
            &mut dice,
        );
        assert!(!resolution.fighters[1].stunned);
    }
}

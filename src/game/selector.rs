//! Action selection
//!
//! Picks who acts next and, for the default AI, what they do. Selection is
//! weighted by ratings, tendencies and the fighter's style tables, and every
//! draw comes from the bout's dice.

use crate::core::{Action, ActionKind, Corner, Fighter, StrikeType};
use crate::game::controller::{BoutView, FightController};
use crate::game::Dice;
use crate::tables::StyleProfile;
use smallvec::SmallVec;

/// Initiative penalty for the fighter who acted last
pub const REPEAT_ACTOR_PENALTY: f64 = 0.9;

/// Initiative weight of one fighter
pub fn initiative(fighter: &Fighter, acted_last: bool) -> f64 {
    let penalty = if acted_last { REPEAT_ACTOR_PENALTY } else { 1.0 };
    fighter.rating.output.max(1.0) * fighter.fatigue_factor() * penalty
}

/// Draw the corner that acts next
pub fn choose_actor(fighters: &[Fighter; 2], last_actor: Option<Corner>, dice: &mut Dice) -> Corner {
    let weights = Corner::BOTH.map(|c| initiative(&fighters[c.index()], last_actor == Some(c)));
    dice.weighted_index(&weights)
        .and_then(Corner::from_index)
        .unwrap_or(Corner::Red)
}

/// Weight of an action kind for a fighter with the given style
pub fn kind_weight(fighter: &Fighter, style: &StyleProfile, kind: ActionKind) -> f64 {
    let t = &fighter.tendency;
    match kind {
        ActionKind::Punch => t.punching * style.standing.punch,
        ActionKind::Kick => t.kicking * style.standing.kick,
        ActionKind::Clinch => t.clinching * style.standing.clinch,
        ActionKind::Takedown => t.takedowns * style.standing.takedown,
        ActionKind::ClinchStrike => style.clinch.strike,
        ActionKind::ClinchTakedown => style.clinch.takedown,
        ActionKind::BreakClinch => style.clinch.break_away,
        ActionKind::GroundStrike => style.ground.strike,
        ActionKind::Advance => style.ground.advance,
        ActionKind::Submission => style.ground.submission,
        ActionKind::Sweep => style.ground.sweep,
        ActionKind::Escape => style.ground.escape,
    }
}

fn pick_strike(options: &[StrikeType], style: &StyleProfile, dice: &mut Dice) -> StrikeType {
    let weights: SmallVec<[f64; 8]> = options.iter().map(|s| style.strike_weight(*s)).collect();
    dice.weighted_index(&weights)
        .and_then(|i| options.get(i).copied())
        .unwrap_or(options[0])
}

/// Turn a chosen kind into a concrete action
///
/// Strikes are refined through the style's strike weights; submissions are
/// drawn from the holds applicable in the current position, easier holds
/// weighted higher. Returns `None` for a submission with nothing applicable.
pub fn refine(kind: ActionKind, view: &BoutView, dice: &mut Dice) -> Option<Action> {
    let style = view.style();
    let action = match kind {
        ActionKind::Punch => Action::Strike(pick_strike(&StrikeType::PUNCHES, style, dice)),
        ActionKind::Kick => Action::Strike(pick_strike(&StrikeType::KICKS, style, dice)),
        ActionKind::ClinchStrike => Action::Strike(pick_strike(&StrikeType::CLINCH, style, dice)),
        ActionKind::GroundStrike => Action::Strike(pick_strike(&StrikeType::GROUND, style, dice)),
        ActionKind::Submission => {
            let holds: SmallVec<[_; 8]> = view
                .tables()
                .submissions
                .applicable(view.position())
                .map(|e| (e.kind, 1.0 / e.difficulty.max(f64::EPSILON)))
                .collect();
            let weights: SmallVec<[f64; 8]> = holds.iter().map(|(_, w)| *w).collect();
            let index = dice.weighted_index(&weights)?;
            Action::Submission(holds[index].0)
        }
        ActionKind::Clinch => Action::Clinch,
        ActionKind::Takedown => Action::Takedown,
        ActionKind::ClinchTakedown => Action::ClinchTakedown,
        ActionKind::BreakClinch => Action::BreakClinch,
        ActionKind::Advance => Action::Advance,
        ActionKind::Sweep => Action::Sweep,
        ActionKind::Escape => Action::Escape,
    };
    Some(action)
}

/// Default AI: weighted by tendencies and style, drawn from the bout dice
#[derive(Debug, Clone)]
pub struct TendencyController {
    corner: Corner,
}

impl TendencyController {
    pub fn new(corner: Corner) -> Self {
        TendencyController { corner }
    }
}

impl FightController for TendencyController {
    fn corner(&self) -> Corner {
        self.corner
    }

    fn choose_action(&mut self, view: &BoutView, dice: &mut Dice) -> Action {
        let kinds = view.available_actions();
        let weights: SmallVec<[f64; 4]> = kinds
            .iter()
            .map(|k| kind_weight(view.me(), view.style(), *k))
            .collect();

        let kind = dice
            .weighted_index(&weights)
            .and_then(|i| kinds.get(i).copied())
            .or_else(|| kinds.first().copied());

        kind.and_then(|k| refine(k, view, dice))
            .unwrap_or_else(|| fallback_action(view))
    }
}

/// Deterministic action used when weighting leaves nothing to choose
pub fn fallback_action(view: &BoutView) -> Action {
    let position = view.position();
    if position.is_standing() {
        Action::Strike(StrikeType::Jab)
    } else if position.is_clinch() {
        Action::Strike(StrikeType::ClinchKnee)
    } else if position.is_ground_top() {
        Action::Strike(StrikeType::GroundPunch)
    } else {
        Action::Escape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FighterId, Position, Rating, SubmissionKind, Tendency};
    use crate::game::ConstantRng;
    use crate::tables::ReferenceTables;

    fn pair() -> [Fighter; 2] {
        [
            Fighter::new(FighterId::new(1), "Red", 100.0, 100.0).with_rating(Rating::uniform(50.0)),
            Fighter::new(FighterId::new(2), "Blue", 100.0, 100.0).with_rating(Rating::uniform(50.0)),
        ]
    }

    #[test]
    fn test_repeat_actor_penalty() {
        let fighters = pair();
        assert!(initiative(&fighters[0], true) < initiative(&fighters[0], false));
        let zero_output = Fighter::new(FighterId::new(3), "Idle", 100.0, 100.0);
        assert_eq!(initiative(&zero_output, false), 1.0);
    }

    #[test]
    fn test_choose_actor_extremes() {
        let fighters = pair();
        let mut low = Dice::from_rng(ConstantRng::lowest());
        let mut high = Dice::from_rng(ConstantRng::highest());
        assert_eq!(choose_actor(&fighters, None, &mut low), Corner::Red);
        assert_eq!(choose_actor(&fighters, None, &mut high), Corner::Blue);
    }

    #[test]
    fn test_choose_actor_favours_output() {
        let mut fighters = pair();
        fighters[1].rating.output = 100.0;
        fighters[0].rating.output = 1.0;
        let mut dice = Dice::seeded(11);
        let blue = (0..1000)
            .filter(|_| choose_actor(&fighters, None, &mut dice) == Corner::Blue)
            .count();
        assert!(blue > 900, "blue acted {blue} times");
    }

    #[test]
    fn test_tendency_drives_standing_choice() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair();
        fighters[0] = fighters[0].clone().with_tendency(Tendency {
            punching: 0.0,
            kicking: 0.0,
            clinching: 0.0,
            takedowns: 10.0,
        });
        let view = BoutView::new(&fighters, Corner::Red, 1, 300, &tables);
        let mut controller = TendencyController::new(Corner::Red);
        let mut dice = Dice::seeded(3);
        for _ in 0..20 {
            assert_eq!(controller.choose_action(&view, &mut dice), Action::Takedown);
        }
    }

    #[test]
    fn test_choices_are_always_legal() {
        let tables = ReferenceTables::standard();
        let mut controller = TendencyController::new(Corner::Red);
        let mut dice = Dice::seeded(5);
        for position in Position::ALL {
            let mut fighters = pair();
            fighters[0].position = position;
            fighters[1].position = position.mirror();
            let view = BoutView::new(&fighters, Corner::Red, 1, 300, &tables);
            for _ in 0..50 {
                let action = controller.choose_action(&view, &mut dice);
                assert!(position.allows(action.kind()), "{action} from {position}");
            }
        }
    }

    #[test]
    fn test_low_roll_picks_rear_naked_choke_from_back() {
        let tables = ReferenceTables::standard();
        let mut fighters = pair();
        fighters[0].position = Position::BackControlOffence;
        fighters[1].position = Position::BackControlDefence;
        let view = BoutView::new(&fighters, Corner::Red, 1, 300, &tables);
        let mut dice = Dice::from_rng(ConstantRng::lowest());
        assert_eq!(
            refine(ActionKind::Submission, &view, &mut dice),
            Some(Action::Submission(SubmissionKind::RearNakedChoke))
        );
    }
}

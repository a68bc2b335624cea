//! Tactical position state machine
//!
//! Positions are relational: whenever the acting fighter moves into a
//! position, the opponent moves into its mirror. [`apply_transition`] is the
//! only place positions change during a bout, which keeps the pair
//! consistent.

use crate::core::{ActionKind, Corner, Fighter};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Every position a fighter can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Standing,
    ClinchOffence,
    ClinchDefence,
    FullGuardTop,
    FullGuardBottom,
    HalfGuardTop,
    HalfGuardBottom,
    SideControlTop,
    SideControlBottom,
    MountTop,
    MountBottom,
    BackControlOffence,
    BackControlDefence,
}

/// Result of looking up a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Actor moves here, opponent to the mirror
    To(Position),
    /// The action keeps both fighters where they are
    Stay,
    /// No legal target; the request must not mutate state
    Invalid,
}

/// Legal action list; never more than four entries
pub type LegalActions = SmallVec<[ActionKind; 4]>;

impl Position {
    pub const ALL: [Position; 13] = [
        Position::Standing,
        Position::ClinchOffence,
        Position::ClinchDefence,
        Position::FullGuardTop,
        Position::FullGuardBottom,
        Position::HalfGuardTop,
        Position::HalfGuardBottom,
        Position::SideControlTop,
        Position::SideControlBottom,
        Position::MountTop,
        Position::MountBottom,
        Position::BackControlOffence,
        Position::BackControlDefence,
    ];

    /// The position the opponent must hold while this one is held
    pub fn mirror(self) -> Position {
        match self {
            Position::Standing => Position::Standing,
            Position::ClinchOffence => Position::ClinchDefence,
            Position::ClinchDefence => Position::ClinchOffence,
            Position::FullGuardTop => Position::FullGuardBottom,
            Position::FullGuardBottom => Position::FullGuardTop,
            Position::HalfGuardTop => Position::HalfGuardBottom,
            Position::HalfGuardBottom => Position::HalfGuardTop,
            Position::SideControlTop => Position::SideControlBottom,
            Position::SideControlBottom => Position::SideControlTop,
            Position::MountTop => Position::MountBottom,
            Position::MountBottom => Position::MountTop,
            Position::BackControlOffence => Position::BackControlDefence,
            Position::BackControlDefence => Position::BackControlOffence,
        }
    }

    pub fn is_standing(self) -> bool {
        self == Position::Standing
    }

    pub fn is_clinch(self) -> bool {
        matches!(self, Position::ClinchOffence | Position::ClinchDefence)
    }

    pub fn is_ground(self) -> bool {
        !self.is_standing() && !self.is_clinch()
    }

    pub fn is_ground_top(self) -> bool {
        matches!(
            self,
            Position::FullGuardTop
                | Position::HalfGuardTop
                | Position::SideControlTop
                | Position::MountTop
                | Position::BackControlOffence
        )
    }

    pub fn is_ground_bottom(self) -> bool {
        self.is_ground() && !self.is_ground_top()
    }

    /// Action kinds the occupant of this position may attempt
    pub fn legal_actions(self) -> LegalActions {
        let actions: &[ActionKind] = match self {
            Position::Standing => &[
                ActionKind::Punch,
                ActionKind::Kick,
                ActionKind::Clinch,
                ActionKind::Takedown,
            ],
            Position::ClinchOffence => &[ActionKind::ClinchStrike, ActionKind::ClinchTakedown],
            Position::ClinchDefence => &[ActionKind::ClinchStrike, ActionKind::BreakClinch],
            p if p.is_ground_top() => &[
                ActionKind::Advance,
                ActionKind::GroundStrike,
                ActionKind::Submission,
            ],
            _ => &[ActionKind::Sweep, ActionKind::Submission, ActionKind::Escape],
        };
        actions.iter().copied().collect()
    }

    pub fn allows(self, kind: ActionKind) -> bool {
        self.legal_actions().contains(&kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Standing => "standing",
            Position::ClinchOffence => "clinch_offence",
            Position::ClinchDefence => "clinch_defence",
            Position::FullGuardTop => "full_guard_top",
            Position::FullGuardBottom => "full_guard_bottom",
            Position::HalfGuardTop => "half_guard_top",
            Position::HalfGuardBottom => "half_guard_bottom",
            Position::SideControlTop => "side_control_top",
            Position::SideControlBottom => "side_control_bottom",
            Position::MountTop => "mount_top",
            Position::MountBottom => "mount_bottom",
            Position::BackControlOffence => "back_control_offence",
            Position::BackControlDefence => "back_control_defence",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a *successful* action of `kind` takes the actor from `current`
pub fn transition(current: Position, kind: ActionKind) -> Transition {
    use Position::*;

    if !current.allows(kind) {
        return Transition::Invalid;
    }

    match kind {
        ActionKind::Punch
        | ActionKind::Kick
        | ActionKind::ClinchStrike
        | ActionKind::GroundStrike
        | ActionKind::Submission => Transition::Stay,
        ActionKind::Clinch => Transition::To(ClinchOffence),
        ActionKind::Takedown => Transition::To(FullGuardTop),
        ActionKind::ClinchTakedown => Transition::To(HalfGuardTop),
        ActionKind::BreakClinch | ActionKind::Escape => Transition::To(Standing),
        ActionKind::Advance => match current {
            FullGuardTop => Transition::To(HalfGuardTop),
            HalfGuardTop => Transition::To(SideControlTop),
            SideControlTop => Transition::To(MountTop),
            MountTop => Transition::To(BackControlOffence),
            _ => Transition::Invalid,
        },
        ActionKind::Sweep => match current {
            FullGuardBottom | MountBottom => Transition::To(FullGuardTop),
            HalfGuardBottom | SideControlBottom => Transition::To(HalfGuardTop),
            _ => Transition::Invalid,
        },
    }
}

/// Whether a successful `kind` from `current` has somewhere to go
pub fn has_target(current: Position, kind: ActionKind) -> bool {
    transition(current, kind) != Transition::Invalid
}

/// Move `actor` to `target` and the opponent to its mirror
pub fn apply_transition(fighters: &mut [Fighter; 2], actor: Corner, target: Position) {
    fighters[actor.index()].position = target;
    fighters[actor.opponent().index()].position = target.mirror();
}

/// Force both fighters back to standing (used at every round start)
pub fn reset_to_standing(fighters: &mut [Fighter; 2]) {
    for fighter in fighters.iter_mut() {
        fighter.position = Position::Standing;
    }
}

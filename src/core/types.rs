//! Closed action, strike and outcome vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body region targeted by a strike and tracked by [`crate::core::Health`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Head,
    Body,
    Legs,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 3] = [BodyRegion::Head, BodyRegion::Body, BodyRegion::Legs];

    pub fn as_str(self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Body => "body",
            BodyRegion::Legs => "legs",
        }
    }
}

/// Strike families share accuracy, power and defence attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeFamily {
    Punch,
    Kick,
    Clinch,
    Ground,
}

/// Every strike the engine can throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeType {
    Jab,
    Cross,
    Hook,
    Uppercut,
    Overhand,
    BodyPunch,
    LegKick,
    BodyKick,
    HeadKick,
    ClinchKnee,
    ClinchElbow,
    GroundPunch,
    GroundElbow,
}

impl StrikeType {
    pub const ALL: [StrikeType; 13] = [
        StrikeType::Jab,
        StrikeType::Cross,
        StrikeType::Hook,
        StrikeType::Uppercut,
        StrikeType::Overhand,
        StrikeType::BodyPunch,
        StrikeType::LegKick,
        StrikeType::BodyKick,
        StrikeType::HeadKick,
        StrikeType::ClinchKnee,
        StrikeType::ClinchElbow,
        StrikeType::GroundPunch,
        StrikeType::GroundElbow,
    ];

    /// Punches in the order used by style punch weight vectors
    pub const PUNCHES: [StrikeType; 6] = [
        StrikeType::Jab,
        StrikeType::Cross,
        StrikeType::Hook,
        StrikeType::Uppercut,
        StrikeType::Overhand,
        StrikeType::BodyPunch,
    ];

    /// Kicks in the order used by style kick weight vectors
    pub const KICKS: [StrikeType; 3] = [StrikeType::LegKick, StrikeType::BodyKick, StrikeType::HeadKick];

    pub const CLINCH: [StrikeType; 2] = [StrikeType::ClinchKnee, StrikeType::ClinchElbow];

    pub const GROUND: [StrikeType; 2] = [StrikeType::GroundPunch, StrikeType::GroundElbow];

    pub fn family(self) -> StrikeFamily {
        match self {
            StrikeType::Jab
            | StrikeType::Cross
            | StrikeType::Hook
            | StrikeType::Uppercut
            | StrikeType::Overhand
            | StrikeType::BodyPunch => StrikeFamily::Punch,
            StrikeType::LegKick | StrikeType::BodyKick | StrikeType::HeadKick => StrikeFamily::Kick,
            StrikeType::ClinchKnee | StrikeType::ClinchElbow => StrikeFamily::Clinch,
            StrikeType::GroundPunch | StrikeType::GroundElbow => StrikeFamily::Ground,
        }
    }

    pub fn target(self) -> BodyRegion {
        match self {
            StrikeType::BodyPunch | StrikeType::BodyKick | StrikeType::ClinchKnee => BodyRegion::Body,
            StrikeType::LegKick => BodyRegion::Legs,
            _ => BodyRegion::Head,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrikeType::Jab => "jab",
            StrikeType::Cross => "cross",
            StrikeType::Hook => "hook",
            StrikeType::Uppercut => "uppercut",
            StrikeType::Overhand => "overhand",
            StrikeType::BodyPunch => "body_punch",
            StrikeType::LegKick => "leg_kick",
            StrikeType::BodyKick => "body_kick",
            StrikeType::HeadKick => "head_kick",
            StrikeType::ClinchKnee => "clinch_knee",
            StrikeType::ClinchElbow => "clinch_elbow",
            StrikeType::GroundPunch => "ground_punch",
            StrikeType::GroundElbow => "ground_elbow",
        }
    }
}

impl fmt::Display for StrikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries of the submission catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    RearNakedChoke,
    Armbar,
    Triangle,
    Guillotine,
    Kimura,
    ArmTriangle,
    Americana,
    HeelHook,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::RearNakedChoke => "rear_naked_choke",
            SubmissionKind::Armbar => "armbar",
            SubmissionKind::Triangle => "triangle",
            SubmissionKind::Guillotine => "guillotine",
            SubmissionKind::Kimura => "kimura",
            SubmissionKind::ArmTriangle => "arm_triangle",
            SubmissionKind::Americana => "americana",
            SubmissionKind::HeelHook => "heel_hook",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse action categories, the unit of position legality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Punch,
    Kick,
    Clinch,
    Takedown,
    ClinchStrike,
    ClinchTakedown,
    BreakClinch,
    Advance,
    GroundStrike,
    Submission,
    Sweep,
    Escape,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Punch => "punch",
            ActionKind::Kick => "kick",
            ActionKind::Clinch => "clinch",
            ActionKind::Takedown => "takedown",
            ActionKind::ClinchStrike => "clinch_strike",
            ActionKind::ClinchTakedown => "clinch_takedown",
            ActionKind::BreakClinch => "break_clinch",
            ActionKind::Advance => "advance",
            ActionKind::GroundStrike => "ground_strike",
            ActionKind::Submission => "submission",
            ActionKind::Sweep => "sweep",
            ActionKind::Escape => "escape",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified action, as attempted by the acting fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "detail", rename_all = "snake_case")]
pub enum Action {
    Strike(StrikeType),
    Clinch,
    Takedown,
    ClinchTakedown,
    BreakClinch,
    Advance,
    Submission(SubmissionKind),
    Sweep,
    Escape,
}

impl Action {
    /// The legality category this action belongs to
    pub fn kind(self) -> ActionKind {
        match self {
            Action::Strike(strike) => match strike.family() {
                StrikeFamily::Punch => ActionKind::Punch,
                StrikeFamily::Kick => ActionKind::Kick,
                StrikeFamily::Clinch => ActionKind::ClinchStrike,
                StrikeFamily::Ground => ActionKind::GroundStrike,
            },
            Action::Clinch => ActionKind::Clinch,
            Action::Takedown => ActionKind::Takedown,
            Action::ClinchTakedown => ActionKind::ClinchTakedown,
            Action::BreakClinch => ActionKind::BreakClinch,
            Action::Advance => ActionKind::Advance,
            Action::Submission(_) => ActionKind::Submission,
            Action::Sweep => ActionKind::Sweep,
            Action::Escape => ActionKind::Escape,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Strike(strike) => write!(f, "{strike}"),
            Action::Submission(kind) => write!(f, "submission ({kind})"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Outcome of a single strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeOutcome {
    Hit,
    Blocked,
    Evaded,
    Missed,
}

impl StrikeOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            StrikeOutcome::Hit => "landed",
            StrikeOutcome::Blocked => "blocked",
            StrikeOutcome::Evaded => "evaded",
            StrikeOutcome::Missed => "missed",
        }
    }
}

/// Outcome of a non-strike attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    Failed,
    /// The action was not legal from the actor's position; nothing changed
    Invalid,
}

impl AttemptOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptOutcome::Success => "succeeded",
            AttemptOutcome::Failed => "failed",
            AttemptOutcome::Invalid => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_kind_mapping() {
        assert_eq!(Action::Strike(StrikeType::Jab).kind(), ActionKind::Punch);
        assert_eq!(Action::Strike(StrikeType::HeadKick).kind(), ActionKind::Kick);
        assert_eq!(Action::Strike(StrikeType::ClinchKnee).kind(), ActionKind::ClinchStrike);
        assert_eq!(Action::Strike(StrikeType::GroundElbow).kind(), ActionKind::GroundStrike);
        assert_eq!(
            Action::Submission(SubmissionKind::Armbar).kind(),
            ActionKind::Submission
        );
    }

    #[test]
    fn test_strike_targets() {
        assert_eq!(StrikeType::Jab.target(), BodyRegion::Head);
        assert_eq!(StrikeType::BodyPunch.target(), BodyRegion::Body);
        assert_eq!(StrikeType::LegKick.target(), BodyRegion::Legs);
        assert_eq!(StrikeType::ClinchKnee.target(), BodyRegion::Body);
    }

    #[test]
    fn test_family_groupings_are_consistent() {
        for strike in StrikeType::PUNCHES {
            assert_eq!(strike.family(), StrikeFamily::Punch);
        }
        for strike in StrikeType::KICKS {
            assert_eq!(strike.family(), StrikeFamily::Kick);
        }
        assert_eq!(StrikeType::ALL.len(), 13);
    }
}

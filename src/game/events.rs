//! Append-only fight event timeline
//!
//! One entry per resolved action (per strike inside a combo) plus round and
//! fight boundaries. Events are plain data; turning them into prose is left to
//! the host.

use crate::core::{ActionKind, AttemptOutcome, BodyRegion, Corner, Position, StrikeOutcome, StrikeType, SubmissionKind};
use crate::game::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightEvent {
    pub round: u32,
    /// Seconds left on the round clock when the event completed
    pub clock: u32,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    RoundStart {
        red_stamina: f64,
        blue_stamina: f64,
    },
    Strike {
        attacker: Corner,
        defender: Corner,
        strike: StrikeType,
        target: BodyRegion,
        outcome: StrikeOutcome,
        damage: f64,
        critical: bool,
        /// 0 for the opening strike of a combo
        combo_index: u32,
    },
    Stun {
        attacker: Corner,
        defender: Corner,
    },
    /// The defender is finished: a knockout roll on a head strike, or any
    /// region emptied by damage
    Knockout {
        attacker: Corner,
        defender: Corner,
        strike: StrikeType,
        target: BodyRegion,
    },
    Attempt {
        actor: Corner,
        action: ActionKind,
        outcome: AttemptOutcome,
        from: Position,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        to: Option<Position>,
    },
    Submission {
        attacker: Corner,
        defender: Corner,
        submission: SubmissionKind,
        outcome: AttemptOutcome,
    },
    RoundEnd {
        winner: Corner,
        red_health_lost: f64,
        blue_health_lost: f64,
        /// Health loss was level and the tie-break decided the round
        tie_break: bool,
    },
    FightEnd {
        #[serde(default)]
        winner: Option<Corner>,
        method: Method,
    },
}

impl FightEvent {
    pub fn new(round: u32, clock: u32, kind: EventKind) -> Self {
        FightEvent { round, clock, kind }
    }

    /// Whether this event ends the fight by itself
    pub fn is_stoppage(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Knockout { .. }
                | EventKind::Submission {
                    outcome: AttemptOutcome::Success,
                    ..
                }
        )
    }
}

/// Ordered, append-only event store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<FightEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FightEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FightEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[FightEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&FightEvent> {
        self.events.last()
    }

    /// Events of one round, in order
    pub fn round(&self, round: u32) -> impl Iterator<Item = &FightEvent> {
        self.events.iter().filter(move |e| e.round == round)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a FightEvent;
    type IntoIter = std::slice::Iter<'a, FightEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

//! Bout orchestration
//!
//! Runs rounds, asks controllers for actions, commits resolutions, detects
//! stoppages and scores rounds that go the distance.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all format! allocations in the turn loop.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::config::{BoutConfig, TieBreak};
use crate::core::position::{apply_transition, reset_to_standing};
use crate::core::{Action, Corner, FightStats, Fighter, Health, Position};
use crate::game::controller::{BoutView, FightController};
use crate::game::events::{EventKind, EventLog, FightEvent};
use crate::game::logger::FightLogger;
use crate::game::resolver::{resolve_turn, Resolution, TurnContext};
use crate::game::selector::choose_actor;
use crate::game::Dice;
use crate::tables::ReferenceTables;
use crate::{FightError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

/// Verbosity level for bout output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during the bout
    Silent = 0,
    /// Minimal - only the outcome
    Minimal = 1,
    /// Normal - rounds and scoring (default)
    #[default]
    Normal = 2,
    /// Verbose - every event
    Verbose = 3,
}

/// How a bout ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Knockout,
    Submission,
    Decision,
    Draw,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Knockout => "knockout",
            Method::Submission => "submission",
            Method::Decision => "decision",
            Method::Draw => "draw",
        }
    }

    pub fn is_stoppage(self) -> bool {
        matches!(self, Method::Knockout | Method::Submission)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring of one round that went the distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundScore {
    pub round: u32,
    pub winner: Corner,
    /// Aggregate health lost this round, red then blue
    pub health_lost: [f64; 2],
    pub strikes_landed: [u32; 2],
    /// Health loss was level and the tie-break decided the round
    pub tie_break: bool,
}

/// End-of-bout snapshot of one fighter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterSummary {
    pub name: String,
    pub stats: FightStats,
    pub health: Health,
    pub max_health: Health,
    pub stamina: f64,
    pub rounds_won: u32,
}

impl From<&Fighter> for FighterSummary {
    fn from(fighter: &Fighter) -> Self {
        FighterSummary {
            name: fighter.name.clone(),
            stats: fighter.stats.clone(),
            health: fighter.health,
            max_health: fighter.max_health,
            stamina: fighter.stamina,
            rounds_won: fighter.rounds_won,
        }
    }
}

fn corner_index<S: Serializer>(corner: &Option<Corner>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match corner {
        Some(c) => serializer.serialize_some(&c.index()),
        None => serializer.serialize_none(),
    }
}

/// Result of running a bout to completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoutResult {
    /// Serialized as the corner index (0 red, 1 blue) or null for a draw
    #[serde(serialize_with = "corner_index")]
    pub winner: Option<Corner>,
    pub winner_name: Option<String>,
    pub loser_name: Option<String>,
    pub method: Method,
    /// Round in which the bout ended
    pub round: u32,
    /// Seconds left on the clock when the bout ended (0 after a full round)
    pub stop_clock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
    pub fighters: [FighterSummary; 2],
    pub scorecards: Vec<RoundScore>,
}

impl BoutResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Bout orchestrator
///
/// Owns both fighters, the dice and the event log for one bout. A bout runs
/// synchronously to completion; independent bouts can run on separate
/// threads with their own `FightLoop`.
pub struct FightLoop {
    fighters: [Fighter; 2],
    config: BoutConfig,
    tables: Arc<ReferenceTables>,
    dice: Dice,
    events: EventLog,
    pub logger: FightLogger,
    /// Current round; 0 before the first round starts
    round: u32,
    clock: u32,
    last_actor: Option<Corner>,
    round_start_health: [f64; 2],
    round_start_landed: [u32; 2],
    scorecards: Vec<RoundScore>,
    result: Option<BoutResult>,
}

impl FightLoop {
    /// Set up a bout between `red` (corner 0) and `blue` (corner 1)
    pub fn new(red: Fighter, blue: Fighter, config: BoutConfig, tables: Arc<ReferenceTables>, dice: Dice) -> Self {
        FightLoop {
            fighters: [red, blue],
            config,
            tables,
            dice,
            events: EventLog::new(),
            logger: FightLogger::new(),
            round: 0,
            clock: 0,
            last_actor: None,
            round_start_health: [0.0; 2],
            round_start_landed: [0; 2],
            scorecards: Vec::new(),
            result: None,
        }
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_logger(mut self, logger: FightLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn fighter(&self, corner: Corner) -> &Fighter {
        &self.fighters[corner.index()]
    }

    pub fn config(&self) -> &BoutConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn into_events(self) -> EventLog {
        self.events
    }

    pub fn result(&self) -> Option<&BoutResult> {
        self.result.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Put `corner` in `position` and the opponent in its mirror
    pub fn set_position(&mut self, corner: Corner, position: Position) {
        apply_transition(&mut self.fighters, corner, position);
    }

    /// Run the bout to completion
    pub fn run_fight(
        &mut self,
        red: &mut dyn FightController,
        blue: &mut dyn FightController,
    ) -> Result<BoutResult> {
        self.setup(red, blue)?;

        while self.result.is_none() {
            if self.round == 0 || self.clock == 0 {
                if self.round >= self.config.rounds {
                    self.finish_decision();
                    break;
                }
                self.start_round();
            }
            self.run_round(red, blue);
        }

        let result = match &self.result {
            Some(result) => result.clone(),
            None => return Err(FightError::InvalidConfig("bout ended without a result".to_string())),
        };
        self.notify_fight_end(red, blue, result.winner);
        Ok(result)
    }

    fn setup(&mut self, red: &dyn FightController, blue: &dyn FightController) -> Result<()> {
        self.config.validate()?;
        if red.corner() != Corner::Red || blue.corner() != Corner::Blue {
            return Err(FightError::InvalidConfig(format!(
                "controllers are for {} and {}, expected red and blue",
                red.corner(),
                blue.corner()
            )));
        }
        Ok(())
    }

    fn notify_fight_end(
        &self,
        red: &mut dyn FightController,
        blue: &mut dyn FightController,
        winner: Option<Corner>,
    ) {
        let tables = &*self.tables;
        red.on_fight_end(
            &BoutView::new(&self.fighters, Corner::Red, self.round, self.clock, tables),
            winner == Some(Corner::Red),
        );
        blue.on_fight_end(
            &BoutView::new(&self.fighters, Corner::Blue, self.round, self.clock, tables),
            winner == Some(Corner::Blue),
        );
    }

    /// Begin the next round
    ///
    /// Both fighters return to standing with a full clock and get stamina
    /// back. From round 2 on every body region also recovers.
    pub fn start_round(&mut self) {
        self.round += 1;
        self.clock = self.config.round_seconds;
        self.last_actor = None;
        reset_to_standing(&mut self.fighters);

        for fighter in self.fighters.iter_mut() {
            fighter.stunned = false;
            fighter.restore_stamina(self.config.stamina_restore);
            if self.round > 1 {
                let max = fighter.max_health;
                fighter.health.recover(self.config.health_recovery, &max);
            }
        }

        self.round_start_health = self.fighters.each_ref().map(|f| f.health.total());
        self.round_start_landed = self.fighters.each_ref().map(|f| f.stats.strikes_landed());

        self.logger.round(&format!("=== Round {} ===", self.round));
        self.record(FightEvent::new(
            self.round,
            self.clock,
            EventKind::RoundStart {
                red_stamina: self.fighters[0].stamina,
                blue_stamina: self.fighters[1].stamina,
            },
        ));
    }

    /// Run turns until the clock runs out or the bout stops
    ///
    /// Scores the round when the clock reaches zero. Returns the result when
    /// the bout ended during the round.
    pub fn run_round(
        &mut self,
        red: &mut dyn FightController,
        blue: &mut dyn FightController,
    ) -> Option<BoutResult> {
        while self.clock > 0 {
            if let Some(result) = self.step(red, blue) {
                return Some(result);
            }
        }
        self.end_round();
        None
    }

    /// Pick an actor, ask its controller for an action and resolve it
    pub fn step(
        &mut self,
        red: &mut dyn FightController,
        blue: &mut dyn FightController,
    ) -> Option<BoutResult> {
        let actor = choose_actor(&self.fighters, self.last_actor, &mut self.dice);
        let controller: &mut dyn FightController = match actor {
            Corner::Red => red,
            Corner::Blue => blue,
        };

        let action = {
            let view = BoutView::new(&self.fighters, actor, self.round, self.clock, &self.tables);
            controller.choose_action(&view, &mut self.dice)
        };
        log_if_verbose!(self, "{} ({}) attempts {}", self.fighters[actor.index()].name, actor, action);

        self.play_turn(actor, action)
    }

    /// Resolve one action for `actor` and commit it
    ///
    /// Starts round 1 if no round has started. Returns the result when this
    /// turn ended the bout; once the bout is over further calls change
    /// nothing.
    pub fn play_turn(&mut self, actor: Corner, action: Action) -> Option<BoutResult> {
        if self.result.is_some() {
            return self.result.clone();
        }
        if self.round == 0 {
            self.start_round();
        }

        let ctx = TurnContext {
            round: self.round,
            clock: self.clock,
            actor,
            max_combo: self.config.max_combo,
        };
        let resolution = resolve_turn(&self.fighters, &ctx, action, &self.tables, &mut self.dice);
        self.commit(actor, resolution)
    }

    fn commit(&mut self, actor: Corner, resolution: Resolution) -> Option<BoutResult> {
        let Resolution {
            fighters,
            events,
            elapsed,
        } = resolution;

        self.fighters = fighters;
        self.clock = self.clock.saturating_sub(elapsed);
        self.last_actor = Some(actor);

        let mut stop_clock = self.clock;
        for event in events {
            stop_clock = event.clock;
            self.record(event);
        }

        let loser = Corner::BOTH
            .into_iter()
            .find(|c| self.fighters[c.index()].is_finished())?;
        let method = if self.fighters[loser.index()].submission_tapped {
            Method::Submission
        } else {
            Method::Knockout
        };
        self.finish(Some(loser.opponent()), method, stop_clock);
        self.result.clone()
    }

    fn record(&mut self, event: FightEvent) {
        #[cfg(feature = "verbose-logging")]
        {
            let names = [&self.fighters[0].name, &self.fighters[1].name];
            self.logger.event(&event, || describe_event(&event, names));
        }
        self.events.push(event);
    }

    /// Score the round that just went the distance
    fn end_round(&mut self) {
        let lost = [0, 1].map(|i| (self.round_start_health[i] - self.fighters[i].health.total()).max(0.0));
        let landed = [0, 1].map(|i| {
            self.fighters[i]
                .stats
                .strikes_landed()
                .saturating_sub(self.round_start_landed[i])
        });

        let (winner, tie_break) = if lost[0] < lost[1] {
            (Corner::Red, false)
        } else if lost[1] < lost[0] {
            (Corner::Blue, false)
        } else {
            (self.break_tie(landed), true)
        };

        self.fighters[winner.index()].rounds_won += 1;
        self.scorecards.push(RoundScore {
            round: self.round,
            winner,
            health_lost: lost,
            strikes_landed: landed,
            tie_break,
        });

        self.logger.round(&format!(
            "Round {} to {} (health lost {:.1} - {:.1})",
            self.round,
            self.fighters[winner.index()].name,
            lost[0],
            lost[1]
        ));
        self.record(FightEvent::new(
            self.round,
            0,
            EventKind::RoundEnd {
                winner,
                red_health_lost: lost[0],
                blue_health_lost: lost[1],
                tie_break,
            },
        ));
    }

    fn break_tie(&mut self, landed: [u32; 2]) -> Corner {
        if self.config.tie_break == TieBreak::StrikeDifferential && landed[0] != landed[1] {
            return if landed[0] > landed[1] { Corner::Red } else { Corner::Blue };
        }
        if self.dice.coin_flip() {
            Corner::Red
        } else {
            Corner::Blue
        }
    }

    fn finish_decision(&mut self) {
        let [red, blue] = self.fighters.each_ref().map(|f| f.rounds_won);
        let (winner, method) = match red.cmp(&blue) {
            std::cmp::Ordering::Greater => (Some(Corner::Red), Method::Decision),
            std::cmp::Ordering::Less => (Some(Corner::Blue), Method::Decision),
            std::cmp::Ordering::Equal => (None, Method::Draw),
        };
        self.finish(winner, method, 0);
    }

    fn finish(&mut self, winner: Option<Corner>, method: Method, stop_clock: u32) {
        let submission = if method == Method::Submission {
            self.events.iter().rev().find_map(|e| match e.kind {
                EventKind::Submission { submission, .. } => {
                    self.tables.submissions.get(submission).map(|entry| entry.name.to_string())
                }
                _ => None,
            })
        } else {
            None
        };

        let result = BoutResult {
            winner,
            winner_name: winner.map(|c| self.fighters[c.index()].name.clone()),
            loser_name: winner.map(|c| self.fighters[c.opponent().index()].name.clone()),
            method,
            round: self.round,
            stop_clock,
            submission,
            fighters: self.fighters.each_ref().map(FighterSummary::from),
            scorecards: self.scorecards.clone(),
        };

        self.record(FightEvent::new(self.round, stop_clock, EventKind::FightEnd { winner, method }));
        self.logger.minimal(&describe_result(&result, self.config.round_seconds));
        self.result = Some(result);
    }
}

fn clock_text(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One-line summary of a bout result
pub fn describe_result(result: &BoutResult, round_seconds: u32) -> String {
    let elapsed = round_seconds.saturating_sub(result.stop_clock);
    match (&result.winner_name, &result.loser_name) {
        (Some(winner), Some(loser)) => format!(
            "{winner} def. {loser} by {} in round {} ({})",
            result.method,
            result.round,
            clock_text(elapsed)
        ),
        _ => format!(
            "{} vs {}: draw after {} rounds",
            result.fighters[0].name, result.fighters[1].name, result.round
        ),
    }
}

/// Plain text line for one event
pub fn describe_event(event: &FightEvent, names: [&String; 2]) -> String {
    let name = |c: Corner| names[c.index()].as_str();
    let at = format!("[R{} {}]", event.round, clock_text(event.clock));
    match &event.kind {
        EventKind::RoundStart { .. } => format!("{at} round {} begins", event.round),
        EventKind::Strike {
            attacker,
            strike,
            target,
            outcome,
            damage,
            critical,
            ..
        } => {
            let crit = if *critical { " (critical)" } else { "" };
            format!(
                "{at} {} throws a {strike} to the {}: {}{crit}, {damage:.1} damage",
                name(*attacker),
                target.as_str(),
                outcome.as_str()
            )
        }
        EventKind::Stun { attacker, defender } => {
            format!("{at} {} stuns {}", name(*attacker), name(*defender))
        }
        EventKind::Knockout {
            attacker,
            defender,
            strike,
            target,
        } => format!(
            "{at} {} knocks out {} with a {strike} to the {}",
            name(*attacker),
            name(*defender),
            target.as_str()
        ),
        EventKind::Attempt {
            actor,
            action,
            outcome,
            from,
            to,
        } => match to {
            Some(to) => format!("{at} {} {action} {} ({from} -> {to})", name(*actor), outcome.as_str()),
            None => format!("{at} {} {action} {} from {from}", name(*actor), outcome.as_str()),
        },
        EventKind::Submission {
            attacker,
            submission,
            outcome,
            ..
        } => format!("{at} {} attempts a {submission}: {}", name(*attacker), outcome.as_str()),
        EventKind::RoundEnd { winner, .. } => {
            format!("{at} round {} scored for {}", event.round, name(*winner))
        }
        EventKind::FightEnd { winner, method } => match winner {
            Some(w) => format!("{at} {} wins by {method}", name(*w)),
            None => format!("{at} fight ends in a {method}"),
        },
    }
}

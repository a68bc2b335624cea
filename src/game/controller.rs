//! Fighter controller trait and bout view
//!
//! The fight loop asks the acting fighter's controller for an action. The
//! controller sees a read-only [`BoutView`] and draws any randomness from the
//! bout's [`Dice`] so a whole bout replays from one seed.

use crate::core::position::has_target;
use crate::core::{Action, ActionKind, Corner, Fighter, LegalActions, Position};
use crate::game::Dice;
use crate::tables::{ReferenceTables, StyleProfile};

/// Read-only view of a bout from one corner
pub struct BoutView<'a> {
    fighters: &'a [Fighter; 2],
    corner: Corner,
    round: u32,
    clock: u32,
    tables: &'a ReferenceTables,
}

impl<'a> BoutView<'a> {
    pub fn new(
        fighters: &'a [Fighter; 2],
        corner: Corner,
        round: u32,
        clock: u32,
        tables: &'a ReferenceTables,
    ) -> Self {
        BoutView {
            fighters,
            corner,
            round,
            clock,
            tables,
        }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn me(&self) -> &Fighter {
        &self.fighters[self.corner.index()]
    }

    pub fn opponent(&self) -> &Fighter {
        &self.fighters[self.corner.opponent().index()]
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn position(&self) -> Position {
        self.me().position
    }

    pub fn tables(&self) -> &ReferenceTables {
        self.tables
    }

    pub fn style(&self) -> &StyleProfile {
        self.tables.styles.profile(self.me().style)
    }

    /// Legal action kinds that can actually go somewhere from here
    ///
    /// Drops kinds with no transition target (advancing from back control)
    /// and submissions when the catalogue has nothing for this position.
    pub fn available_actions(&self) -> LegalActions {
        available_actions(self.position(), self.tables)
    }
}

pub fn available_actions(position: Position, tables: &ReferenceTables) -> LegalActions {
    position
        .legal_actions()
        .into_iter()
        .filter(|kind| match kind {
            ActionKind::Submission => tables.submissions.any_applicable(position),
            other => has_target(position, *other),
        })
        .collect()
}

/// Decision maker for one corner
pub trait FightController {
    /// The corner this controller fights for
    fn corner(&self) -> Corner;

    /// Choose the next action when this corner has been selected to act
    ///
    /// Returning an action that is illegal from the current position is
    /// allowed; the resolver records it as an invalid no-op.
    fn choose_action(&mut self, view: &BoutView, dice: &mut Dice) -> Action;

    /// Called once when the bout ends
    fn on_fight_end(&mut self, _view: &BoutView, _won: bool) {}
}

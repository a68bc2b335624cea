//! Scripted fighter controller for testing
//!
//! Replays a fixed sequence of actions. Once the script runs out the
//! controller either starts over or falls back to a fixed safe action.

use crate::core::{Action, Corner};
use crate::game::controller::{BoutView, FightController};
use crate::game::selector::fallback_action;
use crate::game::Dice;

/// A controller that follows a predetermined sequence of actions
#[derive(Debug, Clone)]
pub struct ScriptedController {
    corner: Corner,
    actions: Vec<Action>,
    current_step: usize,
    repeat: bool,
}

impl ScriptedController {
    pub fn new(corner: Corner, actions: Vec<Action>) -> Self {
        ScriptedController {
            corner,
            actions,
            current_step: 0,
            repeat: false,
        }
    }

    /// Loop the script instead of falling back when it runs out
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn steps_taken(&self) -> usize {
        self.current_step
    }
}

impl FightController for ScriptedController {
    fn corner(&self) -> Corner {
        self.corner
    }

    fn choose_action(&mut self, view: &BoutView, _dice: &mut Dice) -> Action {
        if self.actions.is_empty() {
            return fallback_action(view);
        }
        let index = if self.repeat {
            self.current_step % self.actions.len()
        } else {
            self.current_step
        };
        self.current_step += 1;
        match self.actions.get(index) {
            Some(action) => *action,
            None => fallback_action(view),
        }
    }
}

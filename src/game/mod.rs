//! Bout simulation: probability model, selection, resolution and the fight loop

pub mod combo;
pub mod controller;
pub mod dice;
pub mod events;
pub mod fight_loop;
pub mod logger;
pub mod probability;
pub mod resolver;
pub mod scripted_controller;
pub mod selector;

pub use controller::{BoutView, FightController};
pub use dice::{ConstantRng, Dice};
pub use events::{EventKind, EventLog, FightEvent};
pub use fight_loop::{BoutResult, FightLoop, FighterSummary, Method, RoundScore, VerbosityLevel};
pub use logger::{FightLogger, OutputFormat, OutputMode};
pub use resolver::{resolve_turn, Resolution, TurnContext};
pub use scripted_controller::ScriptedController;
pub use selector::TendencyController;

//! Dilemma Logic
//!
//! Core logic for a single Prisoner's Dilemma encounter: two players each
//! commit one move, and once both moves are in, a per-player payoff matrix
//! turns the pair into an outcome and a terminal state for each player.
//! This crate is compiled to:
//! - Native (for hosts embedding the encounter)
//! - WASM (for running encounters in the browser)

use std::time::Duration;

mod moves;
mod error;
mod payoff;
mod player;
mod state;
mod strategy;
mod builder;
mod game;
mod config;

#[cfg(feature = "wasm")]
mod wasm;

pub use moves::Move;
pub use error::{ConfigError, PlayError};
pub use payoff::PayoffMatrix;
pub use player::{Commitment, Player, PlayerState, Resolution};
pub use state::{GameState, Phase, RoundReport};
pub use strategy::{AlwaysBetray, AlwaysCooperate, Strategy, StrategyInfo, StrategyRegistry};
pub use builder::{GameBuilder, PlayerBuilder, NUMBER_OF_PLAYERS};
pub use game::{Game, RoundObserver};
pub use config::{GameConfig, OutcomeConfig, PlayerConfig};

/// Default outcome when both players betray
pub const DEFAULT_BETRAY_BETRAY: f64 = -8.0;
/// Default outcome for betraying a cooperating opponent
pub const DEFAULT_BETRAY_COOPERATE: f64 = 0.0;
/// Default outcome for cooperating with a betraying opponent
pub const DEFAULT_COOPERATE_BETRAY: f64 = -10.0;
/// Default outcome when both players cooperate
pub const DEFAULT_COOPERATE_COOPERATE: f64 = -1.0;

/// Smallest per-move time budget a game accepts
pub const MIN_COMPUTATION_TIME_PER_MOVE: Duration = Duration::from_secs(1);
/// Largest per-move time budget a game accepts
pub const MAX_COMPUTATION_TIME_PER_MOVE: Duration = Duration::from_secs(3600);
/// Per-move time budget when none is configured
pub const DEFAULT_MAX_COMPUTATION_TIME_PER_MOVE: Duration = Duration::from_secs(5);

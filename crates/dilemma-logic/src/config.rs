//! Game configuration (JSON)
//!
//! ```json
//! {
//!   "max_computation_time_secs": 60,
//!   "players": [
//!     { "name": "A", "strategy": "AlwaysBetray" },
//!     { "name": "B", "strategy": "AlwaysCooperate",
//!       "outcomes": { "cooperate_betray": -12 } }
//!   ]
//! }
//! ```
//!
//! Omitted outcomes take the classic defaults; an explicit `null` counts
//! as missing and is rejected when the game is built.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::builder::{GameBuilder, PlayerBuilder};
use crate::error::ConfigError;
use crate::game::Game;
use crate::moves::Move;
use crate::strategy::StrategyRegistry;
use crate::{
    DEFAULT_BETRAY_BETRAY, DEFAULT_BETRAY_COOPERATE, DEFAULT_COOPERATE_BETRAY,
    DEFAULT_COOPERATE_COOPERATE, DEFAULT_MAX_COMPUTATION_TIME_PER_MOVE,
};

fn default_computation_secs() -> u64 {
    DEFAULT_MAX_COMPUTATION_TIME_PER_MOVE.as_secs()
}

fn default_forfeit_move() -> Move {
    Move::Betray
}

fn default_betray_betray() -> Option<f64> {
    Some(DEFAULT_BETRAY_BETRAY)
}

fn default_betray_cooperate() -> Option<f64> {
    Some(DEFAULT_BETRAY_COOPERATE)
}

fn default_cooperate_betray() -> Option<f64> {
    Some(DEFAULT_COOPERATE_BETRAY)
}

fn default_cooperate_cooperate() -> Option<f64> {
    Some(DEFAULT_COOPERATE_COOPERATE)
}

/// Four outcomes of one player
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeConfig {
    #[serde(default = "default_betray_betray")]
    pub betray_betray: Option<f64>,
    #[serde(default = "default_betray_cooperate")]
    pub betray_cooperate: Option<f64>,
    #[serde(default = "default_cooperate_betray")]
    pub cooperate_betray: Option<f64>,
    #[serde(default = "default_cooperate_cooperate")]
    pub cooperate_cooperate: Option<f64>,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            betray_betray: default_betray_betray(),
            betray_cooperate: default_betray_cooperate(),
            cooperate_betray: default_cooperate_betray(),
            cooperate_cooperate: default_cooperate_cooperate(),
        }
    }
}

impl OutcomeConfig {
    fn apply(&self, mut builder: PlayerBuilder) -> PlayerBuilder {
        let cells = [
            (Move::Betray, Move::Betray, self.betray_betray),
            (Move::Betray, Move::Cooperate, self.betray_cooperate),
            (Move::Cooperate, Move::Betray, self.cooperate_betray),
            (Move::Cooperate, Move::Cooperate, self.cooperate_cooperate),
        ];
        for (own, opponent, value) in cells {
            if let Some(value) = value {
                builder = builder.outcome(own, opponent, value);
            }
        }
        builder
    }
}

/// One player's configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Registered strategy name
    pub strategy: String,
    #[serde(default)]
    pub outcomes: OutcomeConfig,
}

/// Whole-game configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_computation_secs")]
    pub max_computation_time_secs: u64,
    #[serde(default = "default_forfeit_move")]
    pub forfeit_move: Move,
    pub players: Vec<PlayerConfig>,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate everything and build the game
    pub fn build_game(&self, registry: &StrategyRegistry, id: u32) -> Result<Game, ConfigError> {
        let mut builder = GameBuilder::new();
        builder
            .max_computation_time(Duration::from_secs(self.max_computation_time_secs))?
            .forfeit_move(self.forfeit_move);
        for pc in &self.players {
            let strategy = registry
                .get(&pc.strategy)
                .ok_or_else(|| ConfigError::UnknownStrategy { name: pc.strategy.clone() })?;
            let player = pc.outcomes.apply(builder.player_builder().name(pc.name.clone())).build()?;
            builder.add_player(player, strategy)?;
        }
        builder.build(id)
    }
}

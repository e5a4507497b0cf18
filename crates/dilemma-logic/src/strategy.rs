//! Strategy definitions and the injected strategy registry

use std::sync::Arc;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::moves::Move;
use crate::player::Player;
use crate::state::GameState;

/// Decision function choosing a player's move.
///
/// Strategies get read-only access to the state. They must answer within
/// `budget`; enforcing that is up to the host. `None` means no answer,
/// which the game driver replaces with its forfeit move.
pub trait Strategy: Send + Sync {
    /// Unique identifier used by the registry and configuration
    fn name(&self) -> &str;

    /// Human-readable description
    fn describe(&self) -> &str;

    fn decide(&self, player: &Player, state: &GameState, budget: Duration) -> Option<Move>;
}

/// Betray unconditionally.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysBetray;

impl Strategy for AlwaysBetray {
    fn name(&self) -> &str {
        "AlwaysBetray"
    }

    fn describe(&self) -> &str {
        "Never cooperates. Always betrays."
    }

    fn decide(&self, _player: &Player, _state: &GameState, _budget: Duration) -> Option<Move> {
        Some(Move::Betray)
    }
}

/// Cooperate unconditionally.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysCooperate;

impl Strategy for AlwaysCooperate {
    fn name(&self) -> &str {
        "AlwaysCooperate"
    }

    fn describe(&self) -> &str {
        "Never betrays. Always cooperates."
    }

    fn decide(&self, _player: &Player, _state: &GameState, _budget: Duration) -> Option<Move> {
        Some(Move::Cooperate)
    }
}

/// Listing entry for hosts presenting the available strategies
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyInfo {
    pub id: String,
    pub description: String,
}

/// Strategies available to a host, in registration order
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the two reference strategies
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AlwaysBetray));
        registry.register(Arc::new(AlwaysCooperate));
        registry
    }

    /// Add a strategy, replacing any registered under the same name
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) -> &mut Self {
        match self.strategies.iter().position(|s| s.name() == strategy.name()) {
            Some(i) => self.strategies[i] = strategy,
            None => self.strategies.push(strategy),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies.iter().find(|s| s.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn infos(&self) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo { id: s.name().to_string(), description: s.describe().to_string() })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

//! Player and game builders
//!
//! All configuration checks happen here, so a built game cannot fail
//! during play for configuration reasons.

use std::sync::Arc;
use std::time::Duration;
use crate::error::ConfigError;
use crate::game::Game;
use crate::moves::Move;
use crate::payoff::PayoffMatrix;
use crate::player::Player;
use crate::state::GameState;
use crate::strategy::Strategy;
use crate::{DEFAULT_MAX_COMPUTATION_TIME_PER_MOVE, MAX_COMPUTATION_TIME_PER_MOVE, MIN_COMPUTATION_TIME_PER_MOVE};

/// Players per game
pub const NUMBER_OF_PLAYERS: usize = 2;

/// Assembles one player from a name and a complete payoff matrix
#[derive(Clone, Debug, Default)]
pub struct PlayerBuilder {
    name: Option<String>,
    cells: Option<[[Option<f64>; 2]; 2]>,
}

impl PlayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace all four outcomes at once
    pub fn payoffs(mut self, payoffs: PayoffMatrix) -> Self {
        let mut cells = [[None; 2]; 2];
        for own in Move::ALL {
            for opponent in Move::ALL {
                cells[own.index()][opponent.index()] = Some(payoffs.lookup(own, opponent));
            }
        }
        self.cells = Some(cells);
        self
    }

    /// Set a single outcome
    pub fn outcome(mut self, own: Move, opponent: Move, value: f64) -> Self {
        let cells = self.cells.get_or_insert([[None; 2]; 2]);
        cells[own.index()][opponent.index()] = Some(value);
        self
    }

    pub fn build(self) -> Result<Player, ConfigError> {
        let name = self.name.ok_or(ConfigError::MissingPlayerField { field: "name" })?;
        if name.is_empty() || name.trim() != name {
            return Err(ConfigError::InvalidName { name });
        }
        let cells = self.cells.ok_or(ConfigError::MissingPlayerField { field: "payoffs" })?;
        let payoffs = PayoffMatrix::from_cells(cells)?;
        Ok(Player::new(name, payoffs))
    }
}

/// Assembles a game from exactly two players and their strategies
#[derive(Clone)]
pub struct GameBuilder {
    players: Vec<(Player, Arc<dyn Strategy>)>,
    max_computation_time: Duration,
    forfeit_move: Move,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            players: Vec::with_capacity(NUMBER_OF_PLAYERS),
            max_computation_time: DEFAULT_MAX_COMPUTATION_TIME_PER_MOVE,
            forfeit_move: Move::Betray,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_builder(&self) -> PlayerBuilder {
        PlayerBuilder::new()
    }

    /// Add the next player; the first call fills the first slot
    pub fn add_player(&mut self, player: Player, strategy: Arc<dyn Strategy>) -> Result<&mut Self, ConfigError> {
        if self.players.len() >= NUMBER_OF_PLAYERS {
            return Err(ConfigError::TooManyPlayers);
        }
        self.players.push((player, strategy));
        Ok(self)
    }

    /// Time budget handed to strategies for each move
    pub fn max_computation_time(&mut self, budget: Duration) -> Result<&mut Self, ConfigError> {
        if budget < MIN_COMPUTATION_TIME_PER_MOVE || budget > MAX_COMPUTATION_TIME_PER_MOVE {
            return Err(ConfigError::InvalidComputationTime { budget });
        }
        self.max_computation_time = budget;
        Ok(self)
    }

    /// Move committed for a player whose strategy gives no answer
    pub fn forfeit_move(&mut self, m: Move) -> &mut Self {
        self.forfeit_move = m;
        self
    }

    pub fn build(&self, id: u32) -> Result<Game, ConfigError> {
        let [(first, first_strategy), (second, second_strategy)] = match self.players.as_slice() {
            [a, b] => [a.clone(), b.clone()],
            _ => return Err(ConfigError::MissingPlayer { added: self.players.len() }),
        };
        let state = GameState::new(first, second)?;
        log::info!(
            "game {} built: {} ({}) vs {} ({})",
            id,
            state.first().name(),
            first_strategy.name(),
            state.second().name(),
            second_strategy.name(),
        );
        Ok(Game::new(
            id,
            state,
            [first_strategy, second_strategy],
            self.max_computation_time,
            self.forfeit_move,
        ))
    }
}

impl core::fmt::Debug for GameBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameBuilder")
            .field("players", &self.players.iter().map(|(p, s)| (p.name(), s.name())).collect::<Vec<_>>())
            .field("max_computation_time", &self.max_computation_time)
            .field("forfeit_move", &self.forfeit_move)
            .finish()
    }
}

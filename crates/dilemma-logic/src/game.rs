//! Game driver
//!
//! Asks each pending player's strategy for a move, substitutes the forfeit
//! move when a strategy gives no answer, and advances the state. Moves are
//! made one player per step, in slot order.

use std::sync::Arc;
use std::time::Duration;
use crate::error::PlayError;
use crate::moves::Move;
use crate::player::Player;
use crate::state::{GameState, RoundReport};
use crate::strategy::Strategy;

/// Notified when the round resolves
pub trait RoundObserver {
    fn on_round_resolved(&mut self, game_id: u32, report: &RoundReport);
}

impl RoundObserver for () {
    fn on_round_resolved(&mut self, _game_id: u32, _report: &RoundReport) {}
}

impl<F: FnMut(u32, &RoundReport)> RoundObserver for F {
    fn on_round_resolved(&mut self, game_id: u32, report: &RoundReport) {
        self(game_id, report)
    }
}

/// One encounter with the strategies driving its players
pub struct Game {
    id: u32,
    state: GameState,
    strategies: [Arc<dyn Strategy>; 2],
    max_computation_time: Duration,
    forfeit_move: Move,
}

impl Game {
    pub(crate) fn new(
        id: u32,
        state: GameState,
        strategies: [Arc<dyn Strategy>; 2],
        max_computation_time: Duration,
        forfeit_move: Move,
    ) -> Self {
        Self { id, state, strategies, max_computation_time, forfeit_move }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> [&Player; 2] {
        self.state.players()
    }

    pub fn max_computation_time(&self) -> Duration {
        self.max_computation_time
    }

    pub fn forfeit_move(&self) -> Move {
        self.forfeit_move
    }

    pub fn strategy_of(&self, name: &str) -> Option<&Arc<dyn Strategy>> {
        let [first, second] = self.state.players();
        if first.name() == name {
            Some(&self.strategies[0])
        } else if second.name() == name {
            Some(&self.strategies[1])
        } else {
            None
        }
    }

    /// Any move committed yet
    pub fn is_started(&self) -> bool {
        self.state.players().iter().any(|p| p.has_moved())
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_resolved()
    }

    /// Let the next pending player move, then try to resolve.
    ///
    /// Returns the report on the step that resolves the round. A no-op
    /// once the game is finished.
    pub fn step(&mut self) -> Result<Option<RoundReport>, PlayError> {
        let next = self.state.pending_players().first().map(|p| p.name().to_string());
        let Some(name) = next else {
            return Ok(self.state.advance());
        };
        let unknown = || PlayError::UnknownPlayer { player: name.clone() };
        let player = self.state.player(&name).ok_or_else(unknown)?;
        let strategy = self.strategy_of(&name).ok_or_else(unknown)?;

        let m = match strategy.decide(player, &self.state, self.max_computation_time) {
            Some(m) => m,
            None => {
                log::warn!(
                    "game {}: strategy {} gave no move for {}, using {}",
                    self.id,
                    strategy.name(),
                    name,
                    self.forfeit_move,
                );
                self.forfeit_move
            }
        };
        self.state.commit_move(&name, m)?;
        Ok(self.state.advance())
    }

    /// Step until the round is resolved and return the report.
    ///
    /// The observer fires exactly once, on resolution. Returns `None` if the
    /// game had already finished before this call.
    pub fn play(&mut self, observer: &mut impl RoundObserver) -> Result<Option<RoundReport>, PlayError> {
        while !self.is_finished() {
            if let Some(report) = self.step()? {
                observer.on_round_resolved(self.id, &report);
                return Ok(Some(report));
            }
        }
        Ok(None)
    }
}

impl core::fmt::Display for Game {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [first, second] = self.state.players();
        write!(
            f,
            "Game[id={}, state={}, strategies={{{}={}, {}={}}}]",
            self.id,
            self.state,
            first.name(),
            self.strategies[0].name(),
            second.name(),
            self.strategies[1].name(),
        )
    }
}

impl core::fmt::Debug for Game {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self)
    }
}

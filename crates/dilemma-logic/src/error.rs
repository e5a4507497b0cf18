//! Error kinds
//!
//! Configuration problems surface while building a game. Play errors are
//! sequencing bugs on the host side: a player moving or resolving twice.

use std::time::Duration;
use crate::moves::Move;

/// Errors raised while assembling payoffs, players or a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A payoff matrix lacks the outcome for this combination.
    MissingOutcome { own: Move, opponent: Move },
    /// A payoff matrix cell is NaN or infinite.
    NonFiniteOutcome { own: Move, opponent: Move },
    /// Player name is empty or has surrounding whitespace.
    InvalidName { name: String },
    /// A player builder was finished without this field.
    MissingPlayerField { field: &'static str },
    /// Fewer than two players were added to the game.
    MissingPlayer { added: usize },
    /// A third player was added.
    TooManyPlayers,
    /// Both players share a name.
    DuplicateName { name: String },
    /// A player entered the game with an outcome already computed.
    AlreadyResolved { name: String },
    /// Per-move computation time outside the accepted range.
    InvalidComputationTime { budget: Duration },
    /// No strategy with this name is registered.
    UnknownStrategy { name: String },
    /// Configuration input could not be parsed.
    Parse(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingOutcome { own, opponent } =>
                write!(f, "no outcome defined for combination {}/{}", own, opponent),
            ConfigError::NonFiniteOutcome { own, opponent } =>
                write!(f, "outcome for combination {}/{} is not a finite number", own, opponent),
            ConfigError::InvalidName { name } =>
                write!(f, "invalid player name '{}'", name),
            ConfigError::MissingPlayerField { field } =>
                write!(f, "player is missing its {}", field),
            ConfigError::MissingPlayer { added } =>
                write!(f, "a game needs two players, {} added", added),
            ConfigError::TooManyPlayers =>
                write!(f, "more than two players are not allowed"),
            ConfigError::DuplicateName { name } =>
                write!(f, "both players have the same name '{}'", name),
            ConfigError::AlreadyResolved { name } =>
                write!(f, "player '{}' already has an outcome", name),
            ConfigError::InvalidComputationTime { budget } =>
                write!(f, "computation time per move of {:?} is outside 1s..=3600s", budget),
            ConfigError::UnknownStrategy { name } =>
                write!(f, "unknown strategy '{}'", name),
            ConfigError::Parse(msg) =>
                write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Contract violations during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayError {
    /// The player already committed a move.
    AlreadyMoved { player: String },
    /// The player's outcome was already computed.
    AlreadyResolved { player: String },
    /// No player with this name takes part in the game.
    UnknownPlayer { player: String },
}

impl core::fmt::Display for PlayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayError::AlreadyMoved { player } =>
                write!(f, "player {} tried to change their move", player),
            PlayError::AlreadyResolved { player } =>
                write!(f, "player {} has already been resolved", player),
            PlayError::UnknownPlayer { player } =>
                write!(f, "no player named {}", player),
        }
    }
}

impl std::error::Error for PlayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_outcome_names_pair() {
        let err = ConfigError::MissingOutcome { own: Move::Cooperate, opponent: Move::Betray };
        assert_eq!(err.to_string(), "no outcome defined for combination cooperate/betray");
    }

    #[test]
    fn test_computation_time_keeps_fraction() {
        let err = ConfigError::InvalidComputationTime { budget: Duration::from_millis(3_600_500) };
        assert_eq!(err.to_string(), "computation time per move of 3600.5s is outside 1s..=3600s");
    }

    #[test]
    fn test_play_error_names_player() {
        let err = PlayError::AlreadyMoved { player: "A".to_string() };
        assert!(err.to_string().contains('A'));
    }
}

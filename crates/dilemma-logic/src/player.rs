//! Player: identity, payoffs, one move, one outcome

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::error::PlayError;
use crate::moves::Move;
use crate::payoff::PayoffMatrix;

/// Terminal state of a player, derived from the sign of the outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Won,
    Lost,
    Draw,
}

impl PlayerState {
    /// Strictly positive wins, strictly negative loses, zero draws
    pub fn from_outcome(outcome: f64) -> Self {
        if outcome > 0.0 {
            PlayerState::Won
        } else if outcome < 0.0 {
            PlayerState::Lost
        } else {
            PlayerState::Draw
        }
    }
}

/// Whether the player has committed a move yet
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Commitment {
    Unmoved,
    Moved(Move),
}

/// Whether the player's outcome has been computed yet
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Unresolved,
    Resolved { outcome: f64, state: PlayerState },
}

/// A participant in the encounter
///
/// Cloning yields an independent player; only the immutable payoff
/// matrix is shared.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    name: String,
    payoffs: Arc<PayoffMatrix>,
    commitment: Commitment,
    resolution: Resolution,
}

impl Player {
    /// Create an unmoved, unresolved player. Use `PlayerBuilder` for
    /// name validation.
    pub(crate) fn new(name: String, payoffs: PayoffMatrix) -> Self {
        Self {
            name,
            payoffs: Arc::new(payoffs),
            commitment: Commitment::Unmoved,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payoffs(&self) -> &PayoffMatrix {
        &self.payoffs
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn committed_move(&self) -> Option<Move> {
        match self.commitment {
            Commitment::Unmoved => None,
            Commitment::Moved(m) => Some(m),
        }
    }

    pub fn has_moved(&self) -> bool {
        matches!(self.commitment, Commitment::Moved(_))
    }

    pub fn outcome(&self) -> Option<f64> {
        match self.resolution {
            Resolution::Unresolved => None,
            Resolution::Resolved { outcome, .. } => Some(outcome),
        }
    }

    /// `Playing` until resolved
    pub fn state(&self) -> PlayerState {
        match self.resolution {
            Resolution::Unresolved => PlayerState::Playing,
            Resolution::Resolved { state, .. } => state,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    /// Commit the player's single move
    pub fn commit_move(&mut self, m: Move) -> Result<(), PlayError> {
        if let Commitment::Moved(_) = self.commitment {
            return Err(PlayError::AlreadyMoved { player: self.name.clone() });
        }
        self.commitment = Commitment::Moved(m);
        log::debug!("{} commits to {}", self.name, m);
        Ok(())
    }

    /// Compute the outcome for `own` played against `opponent`
    pub fn resolve(&mut self, own: Move, opponent: Move) -> Result<PlayerState, PlayError> {
        if self.is_resolved() {
            return Err(PlayError::AlreadyResolved { player: self.name.clone() });
        }
        Ok(self.settle(own, opponent))
    }

    /// Unchecked resolution; callers guarantee the player is unresolved.
    pub(crate) fn settle(&mut self, own: Move, opponent: Move) -> PlayerState {
        let outcome = self.payoffs.lookup(own, opponent);
        let state = PlayerState::from_outcome(outcome);
        self.resolution = Resolution::Resolved { outcome, state };
        state
    }

    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Player[name={}, state={:?}", self.name, self.state())?;
        match self.outcome() {
            Some(outcome) => write!(f, ", outcome={}", outcome)?,
            None => write!(f, ", outcome=-")?,
        }
        match self.committed_move() {
            Some(m) => write!(f, ", move={}]", m),
            None => write!(f, ", move=-]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player(name: &str) -> Player {
        Player::new(name.to_string(), PayoffMatrix::classic())
    }

    #[test]
    fn test_new_player_is_pending() {
        let p = player("A");
        assert_eq!(p.name(), "A");
        assert_eq!(p.committed_move(), None);
        assert_eq!(p.outcome(), None);
        assert_eq!(p.state(), PlayerState::Playing);
        assert!(!p.has_moved());
        assert!(!p.is_resolved());
    }

    #[test]
    fn test_commit_move_once() {
        let mut p = player("A");
        p.commit_move(Move::Cooperate).unwrap();
        assert_eq!(p.committed_move(), Some(Move::Cooperate));
        assert_eq!(p.commitment(), Commitment::Moved(Move::Cooperate));

        let err = p.commit_move(Move::Betray).unwrap_err();
        assert_eq!(err, PlayError::AlreadyMoved { player: "A".to_string() });
        assert_eq!(p.committed_move(), Some(Move::Cooperate));
    }

    #[test]
    fn test_resolve_once() {
        let mut p = player("A");
        let state = p.resolve(Move::Cooperate, Move::Betray).unwrap();
        assert_eq!(state, PlayerState::Lost);
        assert_eq!(p.outcome(), Some(-10.0));

        let err = p.resolve(Move::Betray, Move::Cooperate).unwrap_err();
        assert_eq!(err, PlayError::AlreadyResolved { player: "A".to_string() });
        assert_eq!(p.outcome(), Some(-10.0));
    }

    #[test]
    fn test_resolve_zero_is_draw() {
        let mut p = player("A");
        assert_eq!(p.resolve(Move::Betray, Move::Cooperate).unwrap(), PlayerState::Draw);
        assert_eq!(p.outcome(), Some(0.0));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = player("A");
        let mut copy = original.deep_copy();
        assert_eq!(copy, original);

        copy.commit_move(Move::Betray).unwrap();
        copy.resolve(Move::Betray, Move::Betray).unwrap();
        assert_eq!(original.committed_move(), None);
        assert_eq!(original.state(), PlayerState::Playing);
        assert_ne!(copy, original);
        assert!(Arc::ptr_eq(&copy.payoffs, &original.payoffs));
    }

    #[test]
    fn test_display() {
        let mut p = player("A");
        assert_eq!(p.to_string(), "Player[name=A, state=Playing, outcome=-, move=-]");
        p.commit_move(Move::Betray).unwrap();
        p.resolve(Move::Betray, Move::Betray).unwrap();
        assert_eq!(p.to_string(), "Player[name=A, state=Lost, outcome=-8, move=betray]");
    }

    proptest! {
        #[test]
        fn prop_sign_law(v in -1.0e6f64..1.0e6) {
            let m = PayoffMatrix::new(v, v, v, v).unwrap();
            let mut p = Player::new("A".to_string(), m);
            let state = p.resolve(Move::Betray, Move::Cooperate).unwrap();
            prop_assert_eq!(state == PlayerState::Won, v > 0.0);
            prop_assert_eq!(state == PlayerState::Lost, v < 0.0);
            prop_assert_eq!(state == PlayerState::Draw, v == 0.0);
        }

        #[test]
        fn prop_copy_isolation(own in prop_oneof![Just(Move::Betray), Just(Move::Cooperate)]) {
            let source = player("A");
            let mut copy = source.deep_copy();
            copy.commit_move(own).unwrap();
            copy.resolve(own, own.opposite()).unwrap();
            prop_assert!(!source.has_moved());
            prop_assert!(!source.is_resolved());

            let mut source = source;
            let copy = source.deep_copy();
            source.commit_move(own).unwrap();
            prop_assert!(!copy.has_moved());
        }
    }

    #[test]
    fn test_sign_law_zero_exact() {
        assert_eq!(PlayerState::from_outcome(0.0), PlayerState::Draw);
        assert_eq!(PlayerState::from_outcome(-0.0), PlayerState::Draw);
        assert_eq!(PlayerState::from_outcome(f64::MIN_POSITIVE), PlayerState::Won);
        assert_eq!(PlayerState::from_outcome(-f64::MIN_POSITIVE), PlayerState::Lost);
    }
}

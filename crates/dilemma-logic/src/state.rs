//! Encounter state and round resolution
//!
//! The state moves from `AwaitingMoves` to `Resolved` exactly once. While
//! any player still owes a move, `advance` does nothing; once both moves
//! are present it resolves both players against each other's raw move.
//! Resolution of one player never reads the other's derived state, so the
//! two lookups commute.

use serde::{Deserialize, Serialize};
use crate::error::{ConfigError, PlayError};
use crate::moves::Move;
use crate::player::{Player, PlayerState};

/// Phase of the encounter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMoves,
    Resolved,
}

/// Result of the resolved round, as handed to observers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub first_name: String,
    pub second_name: String,
    pub move_first: Move,
    pub move_second: Move,
    pub outcome_first: f64,
    pub outcome_second: f64,
    pub state_first: PlayerState,
    pub state_second: PlayerState,
}

/// The two players of one encounter
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    first: Player,
    second: Player,
    phase: Phase,
}

impl GameState {
    /// Fails if both players carry the same name or a player arrives
    /// with an outcome already set
    pub fn new(first: Player, second: Player) -> Result<Self, ConfigError> {
        if first.name() == second.name() {
            return Err(ConfigError::DuplicateName { name: first.name().to_string() });
        }
        if let Some(p) = [&first, &second].into_iter().find(|p| p.is_resolved()) {
            return Err(ConfigError::AlreadyResolved { name: p.name().to_string() });
        }
        Ok(Self { first, second, phase: Phase::AwaitingMoves })
    }

    pub fn first(&self) -> &Player {
        &self.first
    }

    pub fn second(&self) -> &Player {
        &self.second
    }

    /// Both players in slot order
    pub fn players(&self) -> [&Player; 2] {
        [&self.first, &self.second]
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players().into_iter().find(|p| p.name() == name)
    }

    pub fn opponent_of(&self, name: &str) -> Option<&Player> {
        if self.first.name() == name {
            Some(&self.second)
        } else if self.second.name() == name {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == Phase::Resolved
    }

    /// Players that have not committed a move, in slot order
    pub fn pending_players(&self) -> Vec<&Player> {
        self.players().into_iter().filter(|p| !p.has_moved()).collect()
    }

    /// Commit a move on behalf of the named player
    pub fn commit_move(&mut self, name: &str, m: Move) -> Result<(), PlayError> {
        let player = if self.first.name() == name {
            &mut self.first
        } else if self.second.name() == name {
            &mut self.second
        } else {
            return Err(PlayError::UnknownPlayer { player: name.to_string() });
        };
        player.commit_move(m)
    }

    /// Resolve the round if both moves are present.
    ///
    /// Returns the report on the single call that performs the resolution
    /// and `None` otherwise.
    pub fn advance(&mut self) -> Option<RoundReport> {
        if self.is_resolved() || self.first.is_resolved() || self.second.is_resolved() {
            return None;
        }
        let (Some(move_first), Some(move_second)) =
            (self.first.committed_move(), self.second.committed_move())
        else {
            return None;
        };

        let state_first = self.first.settle(move_first, move_second);
        let state_second = self.second.settle(move_second, move_first);
        self.phase = Phase::Resolved;

        let report = RoundReport {
            first_name: self.first.name().to_string(),
            second_name: self.second.name().to_string(),
            move_first,
            move_second,
            outcome_first: self.first.payoffs().lookup(move_first, move_second),
            outcome_second: self.second.payoffs().lookup(move_second, move_first),
            state_first,
            state_second,
        };
        log::info!(
            "round resolved: {} {} ({}, {:?}) / {} {} ({}, {:?})",
            report.first_name,
            report.move_first,
            report.outcome_first,
            report.state_first,
            report.second_name,
            report.move_second,
            report.outcome_second,
            report.state_second,
        );
        Some(report)
    }

    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl core::fmt::Display for GameState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "State[first={}, second={}]", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::PayoffMatrix;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(
            Player::new("A".to_string(), PayoffMatrix::classic()),
            Player::new("B".to_string(), PayoffMatrix::classic()),
        )
        .unwrap()
    }

    fn names(players: &[&Player]) -> Vec<String> {
        players.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = GameState::new(
            Player::new("A".to_string(), PayoffMatrix::classic()),
            Player::new("A".to_string(), PayoffMatrix::classic()),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName { name: "A".to_string() });
    }

    #[test]
    fn test_resolved_player_rejected() {
        let mut a = Player::new("A".to_string(), PayoffMatrix::classic());
        a.commit_move(Move::Betray).unwrap();
        a.resolve(Move::Cooperate, Move::Betray).unwrap();
        let err = GameState::new(a, Player::new("B".to_string(), PayoffMatrix::classic())).unwrap_err();
        assert_eq!(err, ConfigError::AlreadyResolved { name: "A".to_string() });

        let mut b = Player::new("B".to_string(), PayoffMatrix::classic());
        b.resolve(Move::Betray, Move::Betray).unwrap();
        let err = GameState::new(Player::new("A".to_string(), PayoffMatrix::classic()), b).unwrap_err();
        assert_eq!(err, ConfigError::AlreadyResolved { name: "B".to_string() });
    }

    #[test]
    fn test_premoved_player_resolves_once() {
        let mut a = Player::new("A".to_string(), PayoffMatrix::classic());
        a.commit_move(Move::Betray).unwrap();
        let mut s = GameState::new(a, Player::new("B".to_string(), PayoffMatrix::classic())).unwrap();
        assert_eq!(names(&s.pending_players()), vec!["B"]);
        s.commit_move("B", Move::Cooperate).unwrap();
        let report = s.advance().unwrap();
        assert_eq!(report.outcome_first, 0.0);
        assert_eq!(s.first().outcome(), Some(0.0));
        assert!(s.advance().is_none());
        assert_eq!(s.first().outcome(), Some(0.0));
    }

    #[test]
    fn test_initially_both_pending() {
        let s = state();
        assert_eq!(names(&s.pending_players()), vec!["A", "B"]);
        assert_eq!(s.phase(), Phase::AwaitingMoves);
    }

    #[test]
    fn test_pending_shrinks_in_slot_order() {
        let mut s = state();
        s.commit_move("B", Move::Cooperate).unwrap();
        assert_eq!(names(&s.pending_players()), vec!["A"]);
        s.commit_move("A", Move::Betray).unwrap();
        assert!(s.pending_players().is_empty());
    }

    #[test]
    fn test_advance_waits_for_both_moves() {
        let mut s = state();
        assert!(s.advance().is_none());
        s.commit_move("A", Move::Betray).unwrap();
        assert!(s.advance().is_none());
        assert_eq!(s.first().state(), PlayerState::Playing);
        assert_eq!(s.phase(), Phase::AwaitingMoves);
    }

    #[test]
    fn test_betray_vs_cooperate() {
        let mut s = state();
        s.commit_move("A", Move::Betray).unwrap();
        s.commit_move("B", Move::Cooperate).unwrap();
        let report = s.advance().unwrap();

        assert_eq!(report.outcome_first, 0.0);
        assert_eq!(report.state_first, PlayerState::Draw);
        assert_eq!(report.outcome_second, -10.0);
        assert_eq!(report.state_second, PlayerState::Lost);
        assert_eq!(s.player("A").unwrap().outcome(), Some(0.0));
        assert_eq!(s.player("B").unwrap().state(), PlayerState::Lost);
        assert!(s.is_resolved());
    }

    #[test]
    fn test_mutual_betrayal() {
        let mut s = state();
        s.commit_move("A", Move::Betray).unwrap();
        s.commit_move("B", Move::Betray).unwrap();
        s.advance().unwrap();
        for p in s.players() {
            assert_eq!(p.outcome(), Some(-8.0));
            assert_eq!(p.state(), PlayerState::Lost);
        }
    }

    #[test]
    fn test_asymmetric_payoffs_use_own_row() {
        let mut s = GameState::new(
            Player::new("A".to_string(), PayoffMatrix::new(1.0, 2.0, 3.0, 4.0).unwrap()),
            Player::new("B".to_string(), PayoffMatrix::new(-1.0, -2.0, -3.0, -4.0).unwrap()),
        )
        .unwrap();
        s.commit_move("A", Move::Cooperate).unwrap();
        s.commit_move("B", Move::Betray).unwrap();
        s.advance().unwrap();
        assert_eq!(s.first().outcome(), Some(3.0));
        assert_eq!(s.second().outcome(), Some(-2.0));
    }

    #[test]
    fn test_advance_idempotent() {
        let mut s = state();
        s.commit_move("A", Move::Cooperate).unwrap();
        s.commit_move("B", Move::Cooperate).unwrap();
        assert!(s.advance().is_some());
        let snapshot = s.deep_copy();
        assert!(s.advance().is_none());
        assert!(s.advance().is_none());
        assert_eq!(s, snapshot);
    }

    #[test]
    fn test_unknown_player() {
        let mut s = state();
        let err = s.commit_move("C", Move::Betray).unwrap_err();
        assert_eq!(err, PlayError::UnknownPlayer { player: "C".to_string() });
    }

    #[test]
    fn test_second_commit_rejected() {
        let mut s = state();
        s.commit_move("A", Move::Betray).unwrap();
        let err = s.commit_move("A", Move::Cooperate).unwrap_err();
        assert_eq!(err, PlayError::AlreadyMoved { player: "A".to_string() });
    }

    #[test]
    fn test_lookup_helpers() {
        let s = state();
        assert_eq!(s.opponent_of("A").unwrap().name(), "B");
        assert_eq!(s.opponent_of("B").unwrap().name(), "A");
        assert!(s.opponent_of("C").is_none());
        assert!(s.player("C").is_none());
        assert_eq!(names(&s.players()), vec!["A", "B"]);
    }

    #[test]
    fn test_deep_copy_isolation() {
        let mut live = state();
        live.commit_move("A", Move::Betray).unwrap();

        let mut simulated = live.deep_copy();
        simulated.commit_move("B", Move::Cooperate).unwrap();
        simulated.advance().unwrap();

        assert_eq!(names(&live.pending_players()), vec!["B"]);
        assert!(!live.is_resolved());
        assert_eq!(live.first().state(), PlayerState::Playing);
    }

    #[test]
    fn test_display() {
        let s = state();
        assert!(s.to_string().starts_with("State[first=Player[name=A"));
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![Just(Move::Betray), Just(Move::Cooperate)]
    }

    proptest! {
        #[test]
        fn prop_pending_strictly_shrinks(
            a in any_move(),
            b in any_move(),
            second_first in any::<bool>(),
        ) {
            let mut s = state();
            let order = if second_first { [("B", b), ("A", a)] } else { [("A", a), ("B", b)] };
            let mut before = s.pending_players().len();
            prop_assert_eq!(before, 2);
            for (name, m) in order {
                prop_assert!(s.advance().is_none());
                s.commit_move(name, m).unwrap();
                let after = s.pending_players().len();
                prop_assert!(after < before);
                before = after;
            }
            prop_assert_eq!(before, 0);

            let report = s.advance().unwrap();
            prop_assert_eq!(report.outcome_first, PayoffMatrix::classic().lookup(a, b));
            prop_assert_eq!(report.outcome_second, PayoffMatrix::classic().lookup(b, a));
            prop_assert!(s.advance().is_none());
        }
    }
}

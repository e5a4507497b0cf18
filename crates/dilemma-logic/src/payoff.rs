//! Per-player payoff matrix
//!
//! A fixed 2x2 table indexed by (own move, opponent move). Completeness is
//! checked once when the matrix is built, so lookups never fail.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::moves::Move;
use crate::{DEFAULT_BETRAY_BETRAY, DEFAULT_BETRAY_COOPERATE, DEFAULT_COOPERATE_BETRAY, DEFAULT_COOPERATE_COOPERATE};

/// Complete mapping from (own move, opponent move) to a signed outcome
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayoffCells", into = "PayoffCells")]
pub struct PayoffMatrix {
    table: [[f64; 2]; 2],
}

impl PayoffMatrix {
    /// Build from all four cells, rows are own move, columns opponent move
    pub fn new(
        betray_betray: f64,
        betray_cooperate: f64,
        cooperate_betray: f64,
        cooperate_cooperate: f64,
    ) -> Result<Self, ConfigError> {
        let table = [
            [betray_betray, betray_cooperate],
            [cooperate_betray, cooperate_cooperate],
        ];
        for own in Move::ALL {
            for opponent in Move::ALL {
                if !table[own.index()][opponent.index()].is_finite() {
                    return Err(ConfigError::NonFiniteOutcome { own, opponent });
                }
            }
        }
        Ok(Self { table })
    }

    /// Build from a possibly partial mapping.
    ///
    /// Fails with the first missing combination in canonical order
    /// (betray/betray, betray/cooperate, cooperate/betray, cooperate/cooperate).
    /// A repeated combination keeps the last value.
    pub fn from_outcomes<I>(outcomes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ((Move, Move), f64)>,
    {
        let mut cells: [[Option<f64>; 2]; 2] = [[None; 2]; 2];
        for ((own, opponent), value) in outcomes {
            cells[own.index()][opponent.index()] = Some(value);
        }
        Self::from_cells(cells)
    }

    pub(crate) fn from_cells(cells: [[Option<f64>; 2]; 2]) -> Result<Self, ConfigError> {
        let mut table = [[0.0; 2]; 2];
        for own in Move::ALL {
            for opponent in Move::ALL {
                table[own.index()][opponent.index()] = cells[own.index()][opponent.index()]
                    .ok_or(ConfigError::MissingOutcome { own, opponent })?;
            }
        }
        Self::new(table[0][0], table[0][1], table[1][0], table[1][1])
    }

    /// Classic dilemma payoffs (years in prison, negated)
    pub fn classic() -> Self {
        Self {
            table: [
                [DEFAULT_BETRAY_BETRAY, DEFAULT_BETRAY_COOPERATE],
                [DEFAULT_COOPERATE_BETRAY, DEFAULT_COOPERATE_COOPERATE],
            ],
        }
    }

    /// Outcome when playing `own` against `opponent`
    pub fn lookup(&self, own: Move, opponent: Move) -> f64 {
        self.table[own.index()][opponent.index()]
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::classic()
    }
}

/// Wire shape of a payoff matrix: four named cells
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct PayoffCells {
    betray_betray: Option<f64>,
    betray_cooperate: Option<f64>,
    cooperate_betray: Option<f64>,
    cooperate_cooperate: Option<f64>,
}

impl TryFrom<PayoffCells> for PayoffMatrix {
    type Error = ConfigError;

    fn try_from(cells: PayoffCells) -> Result<Self, Self::Error> {
        PayoffMatrix::from_cells([
            [cells.betray_betray, cells.betray_cooperate],
            [cells.cooperate_betray, cells.cooperate_cooperate],
        ])
    }
}

impl From<PayoffMatrix> for PayoffCells {
    fn from(m: PayoffMatrix) -> Self {
        Self {
            betray_betray: Some(m.lookup(Move::Betray, Move::Betray)),
            betray_cooperate: Some(m.lookup(Move::Betray, Move::Cooperate)),
            cooperate_betray: Some(m.lookup(Move::Cooperate, Move::Betray)),
            cooperate_cooperate: Some(m.lookup(Move::Cooperate, Move::Cooperate)),
        }
    }
}

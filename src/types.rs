use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::geometry::Direction;

/// Player identity. Encoded as 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            PlayerId::One => Cell::Player1,
            PlayerId::Two => Cell::Player2,
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        match id {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = PlayerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(PlayerError::InvalidId(other)),
        }
    }
}

/// Ownership of one cell. Encoded as 0 (empty), 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "u8")]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(PlayerId::One),
            Cell::Player2 => Some(PlayerId::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Player1),
            2 => Some(Cell::Player2),
            _ => None,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }
}

/// A run of opponent cells captured in one direction.
///
/// `from` is the cell the scan started at, `to` the mover's cell closing the
/// run, and `between` the captured cells in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSequence {
    pub direction: Direction,
    pub from: usize,
    pub to: usize,
    pub between: Vec<usize>,
}

/// Capture sequences discovered in one pass of chain-capture resolution.
pub type Wave = Vec<CaptureSequence>;

/// Final result once neither player can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "player")]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(Outcome),
}

/// Cell counts as `(empty, player1, player2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellCounts {
    pub empty: usize,
    pub player1: usize,
    pub player2: usize,
}

impl CellCounts {
    pub fn occupied(&self) -> usize {
        self.player1 + self.player2
    }

    pub fn of(&self, player: PlayerId) -> usize {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }
}

/// Everything a renderer needs to draw the current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub cells: Vec<Cell>,
    pub current_player: PlayerId,
    pub legal_moves: Vec<usize>,
    pub player1_score: usize,
    pub player2_score: usize,
    /// `None` while the game is in progress.
    pub outcome: Option<Outcome>,
    /// Contract:
    /// - `true` when the opponent had no legal move and the turn came back.
    /// - `false` after a regular turn change.
    pub last_turn_skipped: bool,
    pub steps_count: usize,
    pub remaining_steps: usize,
    pub version: usize,
    pub history_len: usize,
}

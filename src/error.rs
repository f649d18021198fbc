/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("row length must be a positive even integer, got {0}")]
    InvalidRowLength(usize),

    #[error("row length {row_length} exceeds the maximum of {max}")]
    RowLengthTooLarge { row_length: usize, max: usize },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when constructing a player.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("player id must be 1 or 2, got {0}")]
    InvalidId(u8),

    #[error("player name must not be empty")]
    EmptyName,

    #[error("player{slot} must have id {slot}, got {found}")]
    WrongSlot { slot: u8, found: u8 },
}

/// Errors returned when a move is refused. The game state is unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move at cell {0}")]
    IllegalMove(usize),

    #[error("cell {index} is out of range (board has {cell_count} cells)")]
    OutOfRange { index: usize, cell_count: usize },

    #[error("game is already over")]
    GameOver,

    #[error("a move is waiting to be committed")]
    CommitPending,

    #[error("no move to commit")]
    NothingToCommit,
}

/// Errors raised while rebuilding a game from saved data.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("failed to parse saved game: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid player{slot}: {source}")]
    Player { slot: u8, source: PlayerError },

    #[error("saved board has {found} cells, expected {expected}")]
    BoardSize { expected: usize, found: usize },

    #[error("cell {index} has invalid value {value}")]
    InvalidCell { index: usize, value: u8 },

    #[error("current player id must be 1 or 2, got {0}")]
    InvalidCurrentPlayer(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidRowLength(7);
        assert_eq!(
            err.to_string(),
            "row length must be a positive even integer, got 7"
        );
    }

    #[test]
    fn move_error_display() {
        let err = MoveError::OutOfRange {
            index: 300,
            cell_count: 256,
        };
        assert_eq!(
            err.to_string(),
            "cell 300 is out of range (board has 256 cells)"
        );
        assert_eq!(MoveError::IllegalMove(3).to_string(), "illegal move at cell 3");
    }

    #[test]
    fn restore_error_wraps_player_error() {
        let err = RestoreError::Player {
            slot: 2,
            source: PlayerError::EmptyName,
        };
        assert_eq!(err.to_string(), "invalid player2: player name must not be empty");
    }
}

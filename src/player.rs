use crate::board::Board;
use crate::error::PlayerError;
use crate::types::PlayerId;

/// A participant. Score and move availability are derived from the board the
/// caller passes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    is_computer: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        is_computer: bool,
    ) -> Result<Self, PlayerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlayerError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            is_computer,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_computer(&self) -> bool {
        self.is_computer
    }

    pub fn score(&self, board: &Board) -> usize {
        board.score(self.id)
    }

    pub fn has_legal_move(&self, board: &Board) -> bool {
        board.has_legal_move(self.id)
    }
}

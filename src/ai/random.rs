use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::PlayerId;

/// Picks uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: fastrand::Rng,
}

impl RandomMoveSelector {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&mut self, board: &Board, player: PlayerId) -> Option<usize> {
        let legal = board.legal_moves_for(player);
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.usize(..legal.len())])
    }
}

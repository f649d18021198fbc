//! Move selection for computer players. Not part of the rules engine: the
//! selectors only read the board and the driver goes through the same
//! two-phase protocol as any other caller.

mod random;

use tracing::debug;

use crate::board::Board;
use crate::game::Game;
use crate::types::PlayerId;

pub use random::RandomMoveSelector;

pub trait MoveSelector {
    fn select_move(&mut self, board: &Board, player: PlayerId) -> Option<usize>;
}

/// Always picks the lowest-indexed legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, player: PlayerId) -> Option<usize> {
        board.legal_moves_for(player).first().copied()
    }
}

/// Plays up to `count` moves chosen by `selector`, committing each one.
/// Stops early when the game ends or the selector declines. Returns the
/// number of moves played.
pub fn play_random_moves(
    game: &mut Game,
    selector: &mut dyn MoveSelector,
    count: usize,
) -> usize {
    let mut played = 0;
    while played < count && game.is_active() {
        let player = game.current_player().id();
        let Some(index) = selector.select_move(game.board(), player) else {
            break;
        };
        if game.play(index).is_err() {
            break;
        }
        played += 1;
    }
    debug!(requested = count, played, "automatic moves played");
    played
}

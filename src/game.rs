use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::{MoveError, PlayerError, RestoreError};
use crate::geometry::{Geometry, NUM_CENTER_CELLS};
use crate::persist::{self, SavedGame, SavedPlayer};
use crate::player::Player;
use crate::types::{GameStatus, GameView, Outcome, PlayerId, Wave};

/// Turn state machine layered on a [`Board`].
///
/// Moves are two-phase: [`Game::play_move`] mutates the board and returns the
/// capture waves, [`Game::commit_move`] records the snapshot and passes the
/// turn. Callers that need the waves (e.g. for animation) get them before the
/// turn advances.
#[derive(Debug, Clone)]
pub struct Game {
    player1: Player,
    player2: Player,
    board: Board,
    current: PlayerId,
    last_turn_skipped: bool,
    move_pending: bool,
}

impl Game {
    pub fn new(player1: Player, player2: Player, board: Board) -> Result<Self, PlayerError> {
        check_slot(&player1, PlayerId::One)?;
        check_slot(&player2, PlayerId::Two)?;
        let mut game = Self {
            player1,
            player2,
            board,
            current: PlayerId::One,
            last_turn_skipped: false,
            move_pending: false,
        };
        game.resolve_turn_skip();
        Ok(game)
    }

    /// Fresh game between two human players on a new board.
    pub fn with_names(
        player1: &str,
        player2: &str,
        geometry: Geometry,
    ) -> Result<Self, PlayerError> {
        Self::new(
            Player::new(PlayerId::One, player1, false)?,
            Player::new(PlayerId::Two, player2, false)?,
            Board::new(geometry),
        )
    }

    /// Rebuilds a game from saved data, validating every field.
    ///
    /// The history collapses to the restored position and turn skipping is
    /// re-evaluated, so a saved turn that can no longer move is passed on.
    pub fn restore(saved: &SavedGame, geometry: Geometry) -> Result<Self, RestoreError> {
        let player1 = saved.player1.to_player(PlayerId::One)?;
        let player2 = saved.player2.to_player(PlayerId::Two)?;
        let cells = persist::decode_cells(&saved.board, &geometry)?;
        let current = PlayerId::try_from(saved.current_player)
            .map_err(|_| RestoreError::InvalidCurrentPlayer(saved.current_player))?;
        let board = Board::from_cells(geometry, cells).ok_or(RestoreError::BoardSize {
            expected: geometry.cell_count(),
            found: saved.board.len(),
        })?;

        let mut game = Self {
            player1,
            player2,
            board,
            current,
            last_turn_skipped: false,
            move_pending: false,
        };
        game.resolve_turn_skip();
        debug!(
            current = u8::from(game.current),
            steps = game.steps_count(),
            "game restored"
        );
        Ok(game)
    }

    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            player1: SavedPlayer::from_player(&self.player1),
            player2: SavedPlayer::from_player(&self.player2),
            board: persist::encode_cells(self.board.cells()),
            current_player: self.current.into(),
        }
    }

    /// True once at least one move has been played.
    pub fn should_save(&self) -> bool {
        self.steps_count() > 0
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    pub fn player1(&self) -> &Player {
        &self.player1
    }

    pub fn player2(&self) -> &Player {
        &self.player2
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn opponent_player(&self) -> &Player {
        self.player(self.current.opponent())
    }

    pub fn last_turn_skipped(&self) -> bool {
        self.last_turn_skipped
    }

    pub fn is_move_pending(&self) -> bool {
        self.move_pending
    }

    /// `None` while either player can move.
    pub fn winner(&self) -> Option<Outcome> {
        if self.player1.has_legal_move(&self.board) || self.player2.has_legal_move(&self.board) {
            return None;
        }
        let counts = self.board.count_by_owner();
        Some(match counts.player1.cmp(&counts.player2) {
            Ordering::Greater => Outcome::Winner(PlayerId::One),
            Ordering::Less => Outcome::Winner(PlayerId::Two),
            Ordering::Equal => Outcome::Draw,
        })
    }

    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(outcome) => GameStatus::Finished(outcome),
            None => GameStatus::InProgress,
        }
    }

    pub fn is_active(&self) -> bool {
        self.winner().is_none()
    }

    /// Moves played so far, not counting the seeded center cells.
    pub fn steps_count(&self) -> usize {
        self.board.occupied_cell_count().saturating_sub(NUM_CENTER_CELLS)
    }

    /// Placements left until the board is full.
    pub fn remaining_steps(&self) -> usize {
        self.board.count_by_owner().empty
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.board.legal_moves_for(self.current)
    }

    /// First phase of a move: applies it to the board and returns the capture
    /// waves. The turn does not change until [`Game::commit_move`].
    #[instrument(level = "debug", skip(self))]
    pub fn play_move(&mut self, index: usize) -> Result<Vec<Wave>, MoveError> {
        if self.move_pending {
            return Err(MoveError::CommitPending);
        }
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        let waves = self.board.apply_move_if_legal(index, self.current)?;
        self.move_pending = true;
        Ok(waves)
    }

    /// Second phase of a move: records the board snapshot and passes the turn.
    #[instrument(level = "debug", skip(self))]
    pub fn commit_move(&mut self) -> Result<(), MoveError> {
        if !self.move_pending {
            return Err(MoveError::NothingToCommit);
        }
        self.move_pending = false;
        self.board.commit_snapshot();
        debug!(
            player = u8::from(self.current),
            version = self.board.version(),
            "move committed"
        );
        self.change_turn(false);
        self.resolve_turn_skip();
        Ok(())
    }

    /// Both phases at once, for callers that do not need to act between them.
    pub fn play(&mut self, index: usize) -> Result<Vec<Wave>, MoveError> {
        let waves = self.play_move(index)?;
        self.commit_move()?;
        Ok(waves)
    }

    /// Passes the turn back when the current player cannot move but the
    /// opponent can. Does nothing once the game is finished.
    pub fn resolve_turn_skip(&mut self) {
        if !self.is_active() {
            return;
        }
        if !self.board.has_legal_move(self.current)
            && self.board.has_legal_move(self.current.opponent())
        {
            debug!(skipped = u8::from(self.current), "no legal move, turn skipped");
            self.change_turn(true);
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> bool {
        if !self.board.move_to_previous_version() {
            return false;
        }
        self.after_navigation();
        true
    }

    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> bool {
        if !self.board.move_to_next_version() {
            return false;
        }
        self.after_navigation();
        true
    }

    /// Back to the initial position with player 1 to move.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = PlayerId::One;
        self.last_turn_skipped = false;
        self.move_pending = false;
        debug!("game reset");
    }

    pub fn view(&self) -> GameView {
        let counts = self.board.count_by_owner();
        GameView {
            cells: self.board.cells().to_vec(),
            current_player: self.current,
            legal_moves: self.legal_moves(),
            player1_score: counts.player1,
            player2_score: counts.player2,
            outcome: self.winner(),
            last_turn_skipped: self.last_turn_skipped,
            steps_count: counts.occupied().saturating_sub(NUM_CENTER_CELLS),
            remaining_steps: counts.empty,
            version: self.board.version(),
            history_len: self.board.history_len(),
        }
    }

    fn after_navigation(&mut self) {
        self.move_pending = false;
        debug!(version = self.board.version(), "history navigated");
        self.change_turn(false);
        self.resolve_turn_skip();
    }

    fn change_turn(&mut self, skipped: bool) {
        self.current = self.current.opponent();
        self.last_turn_skipped = skipped;
    }
}

fn check_slot(player: &Player, slot: PlayerId) -> Result<(), PlayerError> {
    if player.id() != slot {
        return Err(PlayerError::WrongSlot {
            slot: slot.into(),
            found: player.id().into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn default_game() -> Game {
        Game::with_names("Black", "White", Geometry::default()).unwrap()
    }

    /// Game on a board built from rows of `.`, `1`, `2`.
    fn game_from(rows: &[&str], current: PlayerId) -> Game {
        let saved = SavedGame {
            player1: SavedPlayer {
                id: 1,
                name: "Black".into(),
                is_computer: false,
            },
            player2: SavedPlayer {
                id: 2,
                name: "White".into(),
                is_computer: true,
            },
            board: rows
                .iter()
                .flat_map(|row| row.bytes())
                .map(|b| match b {
                    b'1' => 1,
                    b'2' => 2,
                    _ => 0,
                })
                .collect(),
            current_player: current.into(),
        };
        Game::restore(&saved, Geometry::new(rows.len()).unwrap()).unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = default_game();
        let view = game.view();

        assert_eq!(view.current_player, PlayerId::One);
        assert_eq!(view.player1_score, 2);
        assert_eq!(view.player2_score, 2);
        assert_eq!(view.outcome, None);
        assert!(!view.last_turn_skipped);
        assert_eq!(view.steps_count, 0);
        assert_eq!(view.remaining_steps, 252);
        assert_eq!(view.legal_moves, vec![104, 121, 134, 151]);
        assert_eq!((view.version, view.history_len), (0, 1));
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.should_save());
    }

    #[test]
    fn two_phase_move_advances_turn_only_on_commit() {
        let mut game = default_game();

        let waves = game.play_move(121).unwrap();
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0][0].between, vec![120]);
        assert_eq!(game.current_player().id(), PlayerId::One);
        assert_eq!(game.board().history_len(), 1);
        assert_eq!(game.play_move(104), Err(MoveError::CommitPending));

        game.commit_move().unwrap();

        assert_eq!(game.current_player().id(), PlayerId::Two);
        assert_eq!(game.board().version(), 1);
        assert_eq!(game.steps_count(), 1);
        assert!(game.should_save());
        assert_eq!(game.commit_move(), Err(MoveError::NothingToCommit));
    }

    #[test]
    fn illegal_move_leaves_state_unchanged() {
        let mut game = default_game();
        let before = game.view();

        assert_eq!(game.play_move(0), Err(MoveError::IllegalMove(0)));
        assert_eq!(game.play_move(119), Err(MoveError::IllegalMove(119)));
        assert!(matches!(
            game.play_move(1000),
            Err(MoveError::OutOfRange { index: 1000, .. })
        ));

        assert_eq!(game.view(), before);
        assert!(!game.is_move_pending());
    }

    #[test]
    fn undo_redo_restore_cells_and_turn() {
        let mut game = default_game();
        game.play(121).unwrap();
        let after_first = game.view();
        let reply = game.legal_moves()[0];
        game.play(reply).unwrap();
        let after_second = game.view();

        assert!(game.undo());
        assert_eq!(game.view().cells, after_first.cells);
        assert_eq!(game.current_player().id(), after_first.current_player);

        assert!(game.redo());
        assert_eq!(game.view().cells, after_second.cells);
        assert_eq!(game.current_player().id(), after_second.current_player);
        assert!(!game.redo());

        assert!(game.undo());
        assert!(game.undo());
        assert!(!game.undo());
        assert_eq!(game.current_player().id(), PlayerId::One);
        assert_eq!(game.steps_count(), 0);
    }

    #[test]
    fn new_move_after_undo_discards_redo_branch() {
        let mut game = default_game();
        game.play(121).unwrap();
        assert!(game.undo());

        game.play(104).unwrap();

        assert!(!game.redo());
        assert_eq!(game.board().history_len(), 2);
        assert_eq!(game.board().cell(121), Some(Cell::Empty));
    }

    #[test]
    fn turn_passes_back_when_opponent_cannot_move() {
        // After player 1 takes 0, player 2 has nothing left to flip but
        // player 1 can still capture at 15.
        let mut game = game_from(
            &[
                ".21.", //
                "....", //
                "....", //
                "..21",
            ],
            PlayerId::One,
        );
        assert!(game.is_active());

        game.play(0).unwrap();

        assert_eq!(game.current_player().id(), PlayerId::One);
        assert!(game.last_turn_skipped());
        assert_eq!(game.legal_moves(), vec![13]);
    }

    #[test]
    fn restore_passes_turn_of_player_without_moves() {
        let game = game_from(
            &[
                "121.", //
                "....", //
                "....", //
                "....",
            ],
            PlayerId::One,
        );
        assert_eq!(game.current_player().id(), PlayerId::Two);
        assert!(game.last_turn_skipped());
        assert_eq!(game.board().history_len(), 1);
    }

    #[test]
    fn new_game_passes_turn_of_blocked_first_player() {
        let cells = "..12............"
            .bytes()
            .map(|b| match b {
                b'1' => Cell::Player1,
                b'2' => Cell::Player2,
                _ => Cell::Empty,
            })
            .collect();
        let board = Board::from_cells(Geometry::new(4).unwrap(), cells).unwrap();
        let black = Player::new(PlayerId::One, "Black", false).unwrap();
        let white = Player::new(PlayerId::Two, "White", false).unwrap();

        let mut game = Game::new(black, white, board).unwrap();

        assert_eq!(game.current_player().id(), PlayerId::Two);
        assert!(game.last_turn_skipped());
        assert_eq!(game.legal_moves(), vec![1]);
        assert!(game.play(1).is_ok());
    }

    #[test]
    fn game_finishes_when_neither_player_can_move() {
        let mut game = game_from(
            &[
                ".21.", //
                "....", //
                "....", //
                "....",
            ],
            PlayerId::One,
        );

        game.play(0).unwrap();

        assert_eq!(game.winner(), Some(Outcome::Winner(PlayerId::One)));
        assert_eq!(
            game.status(),
            GameStatus::Finished(Outcome::Winner(PlayerId::One))
        );
        assert!(!game.is_active());
        assert_eq!(game.play_move(3), Err(MoveError::GameOver));
    }

    #[test]
    fn tie_is_a_draw() {
        let game = game_from(
            &[
                "1..2", //
                "....", //
                "....", //
                "....",
            ],
            PlayerId::One,
        );
        assert_eq!(game.winner(), Some(Outcome::Draw));
        assert_eq!(game.view().outcome, Some(Outcome::Draw));
    }

    #[test]
    fn full_tiny_board_is_finished_immediately() {
        let game = Game::with_names("Black", "White", Geometry::new(2).unwrap()).unwrap();
        assert_eq!(game.winner(), Some(Outcome::Draw));
        assert_eq!(game.steps_count(), 0);
        assert_eq!(game.remaining_steps(), 0);
    }

    #[test]
    fn reset_returns_to_initial_position() {
        let mut game = default_game();
        game.play(121).unwrap();
        game.play(game.legal_moves()[0]).unwrap();

        game.reset();

        assert_eq!(game.view(), default_game().view());
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut game = default_game();
        game.play(121).unwrap();
        game.play(game.legal_moves()[0]).unwrap();
        game.play(game.legal_moves()[0]).unwrap();

        let json = game.to_saved().to_json().unwrap();
        let saved = SavedGame::from_json(&json).unwrap();
        let restored = Game::restore(&saved, Geometry::default()).unwrap();

        assert_eq!(restored.board().cells(), game.board().cells());
        assert_eq!(restored.current_player().id(), game.current_player().id());
        assert_eq!(restored.player2().name(), "White");
        assert_eq!(restored.board().history_len(), 1);
        assert_eq!(restored.board().version(), 0);
    }

    #[test]
    fn restore_rejects_bad_fields() {
        let mut saved = default_game().to_saved();
        saved.current_player = 3;
        assert!(matches!(
            Game::restore(&saved, Geometry::default()),
            Err(RestoreError::InvalidCurrentPlayer(3))
        ));

        let saved = default_game().to_saved();
        assert!(matches!(
            Game::restore(&saved, Geometry::new(8).unwrap()),
            Err(RestoreError::BoardSize {
                expected: 64,
                found: 256
            })
        ));

        let mut saved = default_game().to_saved();
        saved.player1.name.clear();
        assert!(matches!(
            Game::restore(&saved, Geometry::default()),
            Err(RestoreError::Player {
                slot: 1,
                source: PlayerError::EmptyName
            })
        ));
    }

    #[test]
    fn players_must_match_their_slots() {
        let p2 = Player::new(PlayerId::Two, "White", false).unwrap();
        let err = Game::new(p2.clone(), p2, Board::default()).unwrap_err();
        assert_eq!(err, PlayerError::WrongSlot { slot: 1, found: 2 });
    }
}

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::MoveError;
use crate::geometry::{Direction, Geometry};
use crate::types::{CaptureSequence, Cell, CellCounts, PlayerId, Wave};

/// Board state with a linear history of snapshots for undo/redo.
///
/// Invariants: `cells.len() == geometry.cell_count()`, `version < history.len()`,
/// and after any navigation `cells == history[version]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
    history: Vec<Vec<Cell>>,
    version: usize,
}

impl Board {
    /// Creates the initial board: the center 2x2 block seeded diagonally,
    /// top-left and bottom-right for player 1.
    pub fn new(geometry: Geometry) -> Self {
        let cells = initial_cells(&geometry);
        Self {
            geometry,
            history: vec![cells.clone()],
            cells,
            version: 0,
        }
    }

    /// Builds a board from restored cells with a single-snapshot history.
    /// Returns `None` when the length does not match the geometry.
    pub fn from_cells(geometry: Geometry, cells: Vec<Cell>) -> Option<Self> {
        if cells.len() != geometry.cell_count() {
            return None;
        }
        Some(Self {
            geometry,
            history: vec![cells.clone()],
            cells,
            version: 0,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Puts the initial layout back and clears the history.
    pub fn reset(&mut self) {
        self.cells = initial_cells(&self.geometry);
        self.reset_history();
    }

    /// Scans from one step past `origin` and returns the capture closed by a
    /// `player` cell, if any opponent cells lie in between.
    pub fn sequence_in_direction(
        &self,
        origin: usize,
        player: PlayerId,
        direction: Direction,
    ) -> Option<CaptureSequence> {
        if origin >= self.cells.len() {
            return None;
        }
        let mine = player.cell();
        let mut between = Vec::new();
        let mut current = origin;

        while let Some(next) = self.geometry.neighbor(current, direction) {
            match self.cells[next] {
                Cell::Empty => return None,
                cell if cell == mine => {
                    if between.is_empty() {
                        return None;
                    }
                    return Some(CaptureSequence {
                        direction,
                        from: origin,
                        to: next,
                        between,
                    });
                }
                _ => between.push(next),
            }
            current = next;
        }

        None
    }

    /// All directions from `origin` that capture, in scan order.
    pub fn legal_capture_sequences(&self, origin: usize, player: PlayerId) -> Vec<CaptureSequence> {
        if origin >= self.cells.len() {
            return Vec::new();
        }
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.sequence_in_direction(origin, player, direction))
            .collect()
    }

    pub fn can_capture(&self, origin: usize, player: PlayerId) -> bool {
        self.cell(origin).is_some_and(Cell::is_empty)
            && Direction::ALL
                .iter()
                .any(|&direction| self.sequence_in_direction(origin, player, direction).is_some())
    }

    /// Empty cells where `player` may move, ascending.
    pub fn legal_moves_for(&self, player: PlayerId) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&index| self.can_capture(index, player))
            .collect()
    }

    pub fn has_legal_move(&self, player: PlayerId) -> bool {
        (0..self.cells.len()).any(|index| self.can_capture(index, player))
    }

    /// Places `player` at `origin` and resolves chain captures wave by wave.
    ///
    /// Wave 1 holds the direct captures from `origin`. Each later wave holds
    /// the captures found by scanning from the cells flipped in the previous
    /// wave, in flip order. Cells are flipped as soon as their sequence is
    /// found, so a cell is never captured twice and never flips back.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is occupied or captures nothing. Callers check
    /// legality first.
    pub fn apply_move(&mut self, origin: usize, player: PlayerId) -> Vec<Wave> {
        assert!(
            self.cell(origin).is_some_and(Cell::is_empty),
            "apply_move called on occupied cell {origin}"
        );
        let first = self.legal_capture_sequences(origin, player);
        assert!(
            !first.is_empty(),
            "apply_move called on cell {origin} with no capture"
        );

        let mine = player.cell();
        self.cells[origin] = mine;
        self.flip(&first, mine);

        let mut waves = Vec::new();
        let mut wave = first;
        while !wave.is_empty() {
            let mut next = Wave::new();
            for index in flipped_cells(&wave) {
                let found = self.legal_capture_sequences(index, player);
                self.flip(&found, mine);
                next.extend(found);
            }
            trace!(
                wave = waves.len() + 1,
                sequences = wave.len(),
                "capture wave resolved"
            );
            waves.push(std::mem::replace(&mut wave, next));
        }

        waves
    }

    /// Applies the move only if `index` is a legal move for `player`.
    pub fn apply_move_if_legal(
        &mut self,
        index: usize,
        player: PlayerId,
    ) -> Result<Vec<Wave>, MoveError> {
        if index >= self.cells.len() {
            return Err(MoveError::OutOfRange {
                index,
                cell_count: self.cells.len(),
            });
        }
        if !self.can_capture(index, player) {
            return Err(MoveError::IllegalMove(index));
        }
        Ok(self.apply_move(index, player))
    }

    /// Cell indices grouped by current owner.
    pub fn group_by_owner(&self) -> BTreeMap<Option<PlayerId>, Vec<usize>> {
        let mut groups: BTreeMap<Option<PlayerId>, Vec<usize>> = BTreeMap::new();
        for (index, cell) in self.cells.iter().enumerate() {
            groups.entry(cell.owner()).or_default().push(index);
        }
        groups
    }

    pub fn count_by_owner(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in &self.cells {
            match cell {
                Cell::Empty => counts.empty += 1,
                Cell::Player1 => counts.player1 += 1,
                Cell::Player2 => counts.player2 += 1,
            }
        }
        counts
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.count_by_owner().occupied()
    }

    pub fn score(&self, player: PlayerId) -> usize {
        let mine = player.cell();
        self.cells.iter().filter(|&&cell| cell == mine).count()
    }

    pub fn version(&self) -> usize {
        self.version
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.version > 0
    }

    pub fn can_redo(&self) -> bool {
        self.version + 1 < self.history.len()
    }

    /// Drops snapshots after the current version and records the live cells.
    pub fn commit_snapshot(&mut self) {
        self.history.truncate(self.version + 1);
        self.history.push(self.cells.clone());
        self.version = self.history.len() - 1;
    }

    pub fn move_to_previous_version(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.version -= 1;
        self.cells.clone_from(&self.history[self.version]);
        true
    }

    pub fn move_to_next_version(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.version += 1;
        self.cells.clone_from(&self.history[self.version]);
        true
    }

    pub fn reset_history(&mut self) {
        self.history = vec![self.cells.clone()];
        self.version = 0;
    }

    fn flip(&mut self, sequences: &[CaptureSequence], cell: Cell) {
        for index in sequences.iter().flat_map(|seq| seq.between.iter()) {
            self.cells[*index] = cell;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}

/// Captured cells of a wave, in discovery order.
pub fn flipped_cells(wave: &[CaptureSequence]) -> Vec<usize> {
    wave.iter()
        .flat_map(|seq| seq.between.iter().copied())
        .collect()
}

fn initial_cells(geometry: &Geometry) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; geometry.cell_count()];
    let [top_left, top_right, bottom_left, bottom_right] = geometry.center_cells();
    cells[top_left] = Cell::Player1;
    cells[bottom_right] = Cell::Player1;
    cells[top_right] = Cell::Player2;
    cells[bottom_left] = Cell::Player2;
    cells
}

use serde::Serialize;

use crate::error::ConfigError;

pub const DEFAULT_ROW_LENGTH: usize = 16;
/// Largest accepted row length.
pub const MAX_ROW_LENGTH: usize = 256;
/// Number of cells seeded before the first move.
pub const NUM_CENTER_CELLS: usize = 4;

/// One of the 8 scan directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Right,
    Left,
    Above,
    Below,
    RightAbove,
    RightBelow,
    LeftAbove,
    LeftBelow,
}

impl Direction {
    /// Scan order. Capture sequences are discovered in this order.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Left,
        Direction::Above,
        Direction::Below,
        Direction::RightAbove,
        Direction::RightBelow,
        Direction::LeftAbove,
        Direction::LeftBelow,
    ];

    /// `(row_step, col_step)`.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Above => (-1, 0),
            Direction::Below => (1, 0),
            Direction::RightAbove => (-1, 1),
            Direction::RightBelow => (1, 1),
            Direction::LeftAbove => (-1, -1),
            Direction::LeftBelow => (1, -1),
        }
    }
}

/// Board dimensions derived from the configured row length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    row_length: usize,
    cell_count: usize,
}

impl Geometry {
    pub fn new(row_length: usize) -> Result<Self, ConfigError> {
        if row_length == 0 || row_length % 2 != 0 {
            return Err(ConfigError::InvalidRowLength(row_length));
        }
        if row_length > MAX_ROW_LENGTH {
            return Err(ConfigError::RowLengthTooLarge {
                row_length,
                max: MAX_ROW_LENGTH,
            });
        }
        Ok(Self {
            row_length,
            cell_count: row_length * row_length,
        })
    }

    pub fn row_length(&self) -> usize {
        self.row_length
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Linear index delta of one step in `direction`.
    pub fn offset(&self, direction: Direction) -> isize {
        let (dr, dc) = direction.step();
        dr * self.row_length as isize + dc
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.row_length + col
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.row_length, index % self.row_length)
    }

    /// Cell one step away from `index`, or `None` when the step leaves the
    /// grid. Steps with a horizontal component never wrap into a neighbouring
    /// row.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (row, col) = self.row_col(index);
        let (dr, dc) = direction.step();
        let row = row.checked_add_signed(dr).filter(|r| *r < self.row_length)?;
        let col = col.checked_add_signed(dc).filter(|c| *c < self.row_length)?;
        Some(self.index(row, col))
    }

    /// Center 2x2 block as `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn center_cells(&self) -> [usize; NUM_CENTER_CELLS] {
        let after = self.row_length / 2;
        let before = after - 1;
        [
            self.index(before, before),
            self.index(before, after),
            self.index(after, before),
            self.index(after, after),
        ]
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            row_length: DEFAULT_ROW_LENGTH,
            cell_count: DEFAULT_ROW_LENGTH * DEFAULT_ROW_LENGTH,
        }
    }
}

//! The block grid
//!
//! Row 0 is the top of the field; new rows enter there and march down toward
//! the launcher one row per level. Cells hold hit points (> 0), a power-up
//! marker (-1) or nothing (0).

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Empty cell
pub const EMPTY: i32 = 0;
/// Power-up cell (grants one ball for the next round when touched)
pub const POWER_UP: i32 = -1;

/// What a cell holds, decoded from its raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Block { hp: u32 },
    PowerUp,
}

impl CellKind {
    pub fn from_value(value: i32) -> Self {
        match value {
            POWER_UP => CellKind::PowerUp,
            v if v > 0 => CellKind::Block { hp: v as u32 },
            _ => CellKind::Empty,
        }
    }
}

/// One row of cells, left to right
pub type Row = Vec<i32>;

/// Fixed-size grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<Row>,
}

impl Board {
    /// All-empty board
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            rows: vec![vec![EMPTY; cols]; rows],
        }
    }

    /// Build a board from raw rows, checking every row has `cols` cells and
    /// every value is legal.
    pub fn from_rows(rows: Vec<Row>, cols: usize) -> Result<Self, GameError> {
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GameError::RowWidth {
                    expected: cols,
                    got: row.len(),
                });
            }
            if let Some((c, &value)) = row.iter().enumerate().find(|(_, v)| **v < POWER_UP) {
                return Err(GameError::InvalidCell { col: c, row: r, value });
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows (constant for the life of the board)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Cell value, or None when out of range
    pub fn get(&self, col: usize, row: usize) -> Option<i32> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn kind(&self, col: usize, row: usize) -> Option<CellKind> {
        self.get(col, row).map(CellKind::from_value)
    }

    /// Apply one ball hit to a cell.
    ///
    /// Blocks lose one hit point, power-ups are consumed, empty cells are
    /// untouched. Returns the new value, or None if the cell does not exist
    /// (the hit is dropped).
    pub fn apply_hit(&mut self, col: usize, row: usize) -> Option<i32> {
        let cell = self.rows.get_mut(row)?.get_mut(col)?;
        if *cell > 0 {
            *cell -= 1;
        } else if *cell == POWER_UP {
            *cell = EMPTY;
        }
        Some(*cell)
    }

    /// Drop the bottom row, move every row down one and put `new_row` on top.
    pub fn shift_and_prepend(&mut self, new_row: Row) -> Result<(), GameError> {
        let cols = self.width();
        if new_row.len() != cols {
            return Err(GameError::RowWidth {
                expected: cols,
                got: new_row.len(),
            });
        }
        if self.rows.is_empty() {
            return Ok(());
        }
        self.rows.pop();
        self.rows.insert(0, new_row);
        Ok(())
    }

    /// Game-over predicate: the second-to-last row still holds a block.
    ///
    /// Checked before the next shift; if true, that shift would push a live
    /// block into the launcher row.
    pub fn is_overflowed(&self) -> bool {
        let Some(idx) = self.rows.len().checked_sub(2) else {
            return false;
        };
        self.rows[idx].iter().any(|&c| c > 0)
    }

    /// Number of cells still holding a block
    pub fn blocks_remaining(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c > 0).count()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

//! Play-field geometry
//!
//! Maps continuous ball coordinates onto board cells. The field origin is the
//! bottom-left corner with y growing upward, while board rows count from the
//! top, so the row transform is flipped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete cell address that may lie off the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    /// Column and row as board indices, if both are inside `cols x rows`
    pub fn on_board(self, cols: usize, rows: usize) -> Option<(usize, usize)> {
        let col = usize::try_from(self.col).ok().filter(|&c| c < cols)?;
        let row = usize::try_from(self.row).ok().filter(|&r| r < rows)?;
        Some((col, row))
    }
}

/// Continuous dimensions of the field and the grid laid over it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field width in pixel units
    pub width: f32,
    /// Field height in pixel units
    pub height: f32,
    /// Board columns
    pub cols: usize,
    /// Board rows
    pub rows: usize,
    /// Ball diameter
    pub ball_size: f32,
}

impl Field {
    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.width / self.cols as f32
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.height / self.rows as f32
    }

    /// Largest x a ball's corner may take
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.width - self.ball_size
    }

    /// Largest y a ball's corner may take
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.height - self.ball_size
    }

    /// Leading-edge offset for a ball travelling along `dir`.
    ///
    /// Positions are the ball's bottom-left corner, so an axis moving in the
    /// positive direction samples one diameter ahead.
    pub fn leading_edge(&self, dir: Vec2) -> Vec2 {
        Vec2::new(
            if dir.x > 0.0 { self.ball_size } else { 0.0 },
            if dir.y > 0.0 { self.ball_size } else { 0.0 },
        )
    }

    /// Grid cell containing `pos + offset`
    pub fn cell_of(&self, pos: Vec2, offset: Vec2) -> GridPos {
        let x = pos.x + offset.x;
        let y = pos.y + offset.y;
        let col = (x * self.cols as f32 / self.width).floor() as i32;
        let row = self.rows as i32 - (y * self.rows as f32 / self.height).floor() as i32 - 1;
        GridPos { col, row }
    }

    /// Left edge of a column
    #[inline]
    pub fn col_left(&self, col: i32) -> f32 {
        col as f32 * self.width / self.cols as f32
    }

    /// Right edge of a column
    #[inline]
    pub fn col_right(&self, col: i32) -> f32 {
        (col + 1) as f32 * self.width / self.cols as f32
    }

    /// Top edge (largest y) of a row
    #[inline]
    pub fn row_top(&self, row: i32) -> f32 {
        self.height - row as f32 * self.height / self.rows as f32
    }

    /// Bottom edge (smallest y) of a row
    #[inline]
    pub fn row_bottom(&self, row: i32) -> f32 {
        self.height - (row + 1) as f32 * self.height / self.rows as f32
    }
}

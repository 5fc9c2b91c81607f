//! New-row generation for each difficulty level

use rand::Rng;

use super::board::{Board, EMPTY, POWER_UP, Row};

/// Pick a random empty column, retrying until one is found.
///
/// The caller guarantees the row has a free cell.
fn random_empty_col<R: Rng + ?Sized>(row: &[i32], rng: &mut R) -> usize {
    loop {
        let col = rng.random_range(0..row.len());
        if row[col] == EMPTY {
            return col;
        }
    }
}

/// Generate the row that enters the top of the board at `level`.
///
/// 1-3 distinct columns get a block with `level` hit points. From level 2
/// on, one further empty column gets a power-up. `cols` must be at least 4.
pub fn generate_line<R: Rng + ?Sized>(level: u32, cols: usize, rng: &mut R) -> Row {
    let mut row = vec![EMPTY; cols];
    let hp = i32::try_from(level.max(1)).unwrap_or(i32::MAX);

    let blocks = rng.random_range(1..=3usize).min(cols);
    for _ in 0..blocks {
        let col = random_empty_col(&row, rng);
        row[col] = hp;
    }

    if level > 1 && row.contains(&EMPTY) {
        let col = random_empty_col(&row, rng);
        row[col] = POWER_UP;
    }

    row
}

/// Board for a fresh game: two level-1 rows on top, the rest empty
pub fn initial_board<R: Rng + ?Sized>(cols: usize, rows: usize, rng: &mut R) -> Board {
    let mut board = Board::empty(cols, rows);
    for _ in 0..2.min(rows) {
        // Width always matches, so the shift cannot fail
        let line = generate_line(1, cols, rng);
        let _ = board.shift_and_prepend(line);
    }
    board
}

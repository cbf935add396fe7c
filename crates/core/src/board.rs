//! Board module - manages the game grid
//!
//! The board is an 8x16 grid where each cell is empty or holds a box color.
//! Uses a flat array for cache locality and cheap copies (the AI simulates
//! placements on scratch copies).
//! Coordinates: (x, y) where x ranges 0..7 (left to right), y ranges 0..15 (top to bottom)
//!
//! Row clear rule: a row clears when any single color fills at least
//! `CLEAR_THRESHOLD` of its cells. The row does not need to be full.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Color, Position, BOARD_HEIGHT, BOARD_WIDTH, CLEAR_THRESHOLD};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row-major copy of the grid, as handed to renderers
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// Row indices found complete in one pass (bottom to top)
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 8 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Color at (x, y); out-of-bounds reads as empty
    pub fn color_at(&self, x: i8, y: i8) -> Cell {
        self.get(x, y).flatten()
    }

    /// Set cell at position (x, y)
    /// Returns false (and changes nothing) if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `piece` fits with its origin at `position`
    ///
    /// Every box must land inside the board on an empty cell.
    pub fn is_valid_position(&self, piece: &Piece, position: Position) -> bool {
        piece
            .cells_at(position)
            .all(|(p, _)| self.is_valid(p.x, p.y))
    }

    /// Write the piece's boxes into the grid at the piece's position
    ///
    /// No validation: callers check `is_valid_position` first. Boxes outside the
    /// board are dropped; occupied cells are overwritten.
    pub fn place_piece(&mut self, piece: &Piece) {
        for (p, color) in piece.cells() {
            self.set(p.x, p.y, Some(color));
        }
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row meets the majority-color clear rule
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let mut counts = [0u8; Color::ALL.len()];
        for color in self.row(y).iter().flatten() {
            counts[color.index()] += 1;
        }
        counts.iter().any(|&n| n >= CLEAR_THRESHOLD)
    }

    /// Rows that currently meet the clear rule, bottom to top
    pub fn completed_rows(&self) -> ClearedRows {
        (0..HEIGHT)
            .rev()
            .filter(|&y| self.is_row_complete(y))
            .collect()
    }

    /// Remove every complete row and return how many were removed
    ///
    /// Rows are judged against the grid as it was before this call. The new
    /// grid is rebuilt from that snapshot: surviving rows keep their order and
    /// settle at the bottom, and one empty row appears at the top per removal.
    pub fn clear_completed_rows(&mut self) -> usize {
        let cleared = self.completed_rows();
        if cleared.is_empty() {
            return 0;
        }

        let snapshot = self.cells;
        let mut rebuilt = [None; BOARD_SIZE];
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if cleared.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            let src = read_y * WIDTH;
            let dst = write_y * WIDTH;
            rebuilt[dst..dst + WIDTH].copy_from_slice(&snapshot[src..src + WIDTH]);
        }

        self.cells = rebuilt;
        cleared.len()
    }

    /// True iff any cell in the top row is occupied
    pub fn is_game_over(&self) -> bool {
        self.row(0).iter().any(|c| c.is_some())
    }

    /// Rows from the topmost non-empty row down to the bottom (0 when empty)
    pub fn filled_height(&self) -> u32 {
        (0..HEIGHT)
            .find(|&y| self.row(y).iter().any(|c| c.is_some()))
            .map(|y| (HEIGHT - y) as u32)
            .unwrap_or(0)
    }

    /// Empty cells lying below the topmost filled cell of their column, summed
    pub fn holes(&self) -> u32 {
        let mut holes = 0;
        for x in 0..WIDTH {
            let mut covered = false;
            for y in 0..HEIGHT {
                if self.cells[y * WIDTH + x].is_some() {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Row-major copy of the grid; changing it does not affect the board
    pub fn grid(&self) -> Grid {
        let mut grid = [[None; WIDTH]; HEIGHT];
        for (dst, src) in grid.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        grid
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a row-major grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, pattern: &[Cell]) {
        for (x, cell) in pattern.iter().enumerate() {
            board.set(x as i8, y, *cell);
        }
    }

    const R: Cell = Some(Color::Red);
    const B: Cell = Some(Color::Blue);

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(7, 0), Some(7));
        assert_eq!(Board::index(0, 1), Some(8));
        assert_eq!(Board::index(7, 15), Some(127));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(8, 0), None);
        assert_eq!(Board::index(0, 16), None);
    }

    #[test]
    fn test_row_complete_threshold() {
        let mut board = Board::new();
        fill_row(&mut board, 15, &[R, R, R, R, R, B, B, B]);
        assert!(!board.is_row_complete(15));

        fill_row(&mut board, 15, &[R, R, R, R, R, R, B, B]);
        assert!(board.is_row_complete(15));

        fill_row(&mut board, 14, &[R, R, R, B, R, R, R, None]);
        assert!(board.is_row_complete(14));

        assert!(!board.is_row_complete(16));
    }

    #[test]
    fn test_clear_uses_pre_clear_state_only() {
        let mut board = Board::new();
        // Two complete rows separated by a marker row.
        fill_row(&mut board, 15, &[B; 8]);
        fill_row(&mut board, 14, &[R, None, None, None, None, None, None, None]);
        fill_row(&mut board, 13, &[R; 6]);
        board.set(0, 12, B);

        let cleared = board.clear_completed_rows();
        assert_eq!(cleared, 2);

        // Marker rows shift down past both removed rows, keeping their order.
        assert_eq!(board.color_at(0, 15), R);
        assert_eq!(board.color_at(0, 14), B);
        for y in 0..14 {
            assert!(board.row(y).iter().all(|c| c.is_none()), "row {y}");
        }
    }

    #[test]
    fn test_metrics() {
        let mut board = Board::new();
        assert_eq!(board.filled_height(), 0);
        assert_eq!(board.holes(), 0);

        board.set(2, 12, R);
        assert_eq!(board.filled_height(), 4);
        // Column 2 has rows 13, 14, 15 empty below the block.
        assert_eq!(board.holes(), 3);

        board.set(2, 15, B);
        assert_eq!(board.holes(), 2);
    }

    #[test]
    fn test_grid_is_a_copy() {
        let mut board = Board::new();
        board.set(1, 1, R);
        let mut grid = board.grid();
        grid[1][1] = None;
        grid[0][0] = B;
        assert_eq!(board.color_at(1, 1), R);
        assert_eq!(board.color_at(0, 0), None);
        assert_eq!(Board::from_grid(&board.grid()), board);
    }
}

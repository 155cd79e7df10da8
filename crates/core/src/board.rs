//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! color id of a frozen piece. Dimensions are fixed at construction.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use arrayvec::ArrayVec;

use crate::types::{Cell, ColorId, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Row indices, large enough to hold every row of the tallest board
pub type RowList = ArrayVec<usize, { MAX_BOARD_DIM as usize }>;

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Dimensions are clamped into `MIN_BOARD_DIM..=MAX_BOARD_DIM`.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        let height = height.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, `1`..=`7` is a filled cell of that color id, and any other
    /// character is a filled cell of color 1. All rows must share one width.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "....", "....", "11.1"]);
    /// assert!(board.is_occupied(0, 3));
    /// assert!(!board.is_occupied(2, 3));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u8;
        let mut board = Self::new(width, height);
        assert!(
            board.width == width && board.height == height,
            "fixture dimensions {}x{} out of range",
            width,
            height
        );
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width as usize, "ragged fixture row {}", y);
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    d => d
                        .to_digit(10)
                        .and_then(|v| ColorId::new(v as u8))
                        .or(ColorId::new(1)),
                };
                board.cells[y * width as usize + x] = cell;
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn try_set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Fill the cell at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the board. Writers must have passed a
    /// collision check first, so an out-of-bounds write is a broken invariant.
    pub fn set(&mut self, x: i8, y: i8, color: ColorId) {
        assert!(
            self.try_set(x, y, Some(color)),
            "board write out of bounds: ({}, {}) on {}x{} board",
            x,
            y,
            self.width,
            self.height
        );
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[Cell] {
        let w = self.width as usize;
        &self.cells[y * w..(y + 1) * w]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of every full row, bottom to top
    pub fn full_rows(&self) -> RowList {
        (0..self.height as usize)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows and insert as many empty rows at the top.
    ///
    /// Surviving rows keep their relative order and the row count never
    /// changes. Duplicate and out-of-range indices are ignored. Returns the
    /// number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut removed = 0;

        // Scan from bottom to top, sliding kept rows down over removed ones.
        for read_y in (0..height).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        self.cells[..write_y * width].fill(None);
        removed
    }

    /// Clear all full rows and return how many were cleared
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }
        self.clear_rows(&full)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Export as color ids (0 = empty), row-major, reusing `out`'s allocation
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map(|id| id.get()).unwrap_or(0)));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLS, crate::types::DEFAULT_ROWS)
    }
}

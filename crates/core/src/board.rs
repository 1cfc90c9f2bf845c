//! Board module - manages the grid of locked blocks
//!
//! The board is `width` columns by `height` rows where each cell is empty or holds
//! the color of a locked block.
//! Storage is column-major: one contiguous run of `height` cells per column, so removing
//! a row is a per-column `copy_within` rather than a whole-grid move.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height
//! (floor to top). There is no ceiling: pieces may extend above the top row.

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::piece::Piece;
use crate::types::{BlockColor, Cell};

/// One column of cells, index 0 is the floor
#[derive(Debug, Clone, PartialEq)]
struct Column {
    blocks: Vec<Cell>,
}

impl Column {
    fn new(height: usize) -> Self {
        Self {
            blocks: vec![None; height],
        }
    }

    #[inline(always)]
    fn get(&self, y: i32) -> Cell {
        if y < 0 {
            return None;
        }
        self.blocks.get(y as usize).copied().flatten()
    }

    fn set(&mut self, y: usize, cell: Cell) {
        if let Some(slot) = self.blocks.get_mut(y) {
            *slot = cell;
        }
    }

    /// Remove the block at `y`, shifting everything above down by one
    fn remove(&mut self, y: usize) {
        let height = self.blocks.len();
        if y >= height {
            return;
        }
        self.blocks.copy_within(y + 1..height, y);
        self.blocks[height - 1] = None;
    }

    fn height(&self) -> usize {
        self.blocks.iter().rposition(|c| c.is_some()).map_or(0, |top| top + 1)
    }
}

/// Result of locking a piece into the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Row the piece origin came to rest on
    pub landing_y: i32,
    /// Number of complete rows removed
    pub rows_cleared: u32,
    /// Indices of removed rows, in scan order (top to bottom)
    pub cleared_rows: ArrayVec<i32, 4>,
}

/// The grid of locked blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    columns: Vec<Column>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            columns: (0..width).map(|_| Column::new(height as usize)).collect(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get the block at `(x, y)`, `None` when empty or out of range
    pub fn block(&self, x: i32, y: i32) -> Option<BlockColor> {
        if x < 0 || x >= self.width {
            return None;
        }
        self.columns[x as usize].get(y)
    }

    /// Check if a cell is occupied by a locked block
    #[inline(always)]
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.block(x, y).is_some()
    }

    fn collides_with_walls(&self, piece: &Piece, piece_x: i32) -> bool {
        piece.min_x() + piece_x < 0 || piece.max_x() + piece_x >= self.width
    }

    fn collides_with_floor(&self, piece: &Piece, piece_y: i32) -> bool {
        piece.min_y() + piece_y < 0
    }

    fn collides_with_blocks(&self, piece: &Piece, piece_x: i32, piece_y: i32) -> bool {
        piece
            .cells()
            .iter()
            .any(|c| self.is_occupied(piece_x + c.x, piece_y + c.y))
    }

    /// Check if `piece` at `(piece_x, piece_y)` hits a side wall, the floor or a locked block
    pub fn collides(&self, piece: &Piece, piece_x: i32, piece_y: i32) -> bool {
        self.collides_with_walls(piece, piece_x)
            || self.collides_with_floor(piece, piece_y)
            || self.collides_with_blocks(piece, piece_x, piece_y)
    }

    /// Get the row `piece` would rest on if dropped straight down from `(piece_x, piece_y)`
    ///
    /// The start position must be inside the walls and above the floor.
    pub fn drop_y(&self, piece: &Piece, piece_x: i32, piece_y: i32) -> Result<i32, BoardError> {
        if self.collides_with_walls(piece, piece_x) || self.collides_with_floor(piece, piece_y) {
            return Err(BoardError::InvalidDropStart {
                x: piece_x,
                y: piece_y,
            });
        }

        let floor_y = -piece.min_y();
        for y in (floor_y..=piece_y).rev() {
            if self.collides_with_blocks(piece, piece_x, y - 1)
                || self.collides_with_floor(piece, y - 1)
            {
                return Ok(y);
            }
        }
        Ok(floor_y)
    }

    /// Drop `piece` from `(piece_x, piece_y)`, lock it with `color` and clear completed rows
    ///
    /// Returns the number of rows this placement completed.
    pub fn drop_piece(
        &mut self,
        piece: &Piece,
        color: BlockColor,
        piece_x: i32,
        piece_y: i32,
    ) -> Result<u32, BoardError> {
        self.place(piece, color, piece_x, piece_y)
            .map(|placement| placement.rows_cleared)
    }

    /// Like [`Board::drop_piece`], but reports where the piece landed and which rows went away
    pub fn place(
        &mut self,
        piece: &Piece,
        color: BlockColor,
        piece_x: i32,
        piece_y: i32,
    ) -> Result<Placement, BoardError> {
        let landing_y = self.drop_y(piece, piece_x, piece_y)?;

        piece.for_each_cell(|cx, cy| {
            let x = piece_x + cx;
            let y = landing_y + cy;
            // Cells above the top row have nowhere to live.
            if y < self.height {
                self.columns[x as usize].set(y as usize, Some(color));
            }
        });

        let (rows_cleared, cleared_rows) = self.remove_completed_rows();
        Ok(Placement {
            landing_y,
            rows_cleared,
            cleared_rows,
        })
    }

    /// Check if every column holds a block at row `y`
    pub fn is_row_complete(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        self.columns.iter().all(|column| column.get(y).is_some())
    }

    fn remove_row(&mut self, y: i32) {
        for column in &mut self.columns {
            column.remove(y as usize);
        }
    }

    /// Scan rows top to bottom, removing each complete one
    ///
    /// Removal only moves blocks above `y` down, and those rows were already scanned,
    /// so a single pass removes every complete row.
    fn remove_completed_rows(&mut self) -> (u32, ArrayVec<i32, 4>) {
        let mut count = 0;
        let mut cleared = ArrayVec::new();
        for y in (0..self.height).rev() {
            if self.is_row_complete(y) {
                self.remove_row(y);
                count += 1;
                let pushed = cleared.try_push(y);
                debug_assert!(pushed.is_ok(), "a piece spans at most four rows");
            }
        }
        (count, cleared)
    }

    /// Number of locked blocks on the board
    pub fn filled_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.blocks.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Height of the topmost block in column `x` (0 for an empty column)
    pub fn column_height(&self, x: i32) -> i32 {
        if x < 0 || x >= self.width {
            return 0;
        }
        self.columns[x as usize].height() as i32
    }

    /// Write the grid row-major into `out` (`out[y * width + x]`, row 0 is the floor)
    pub fn write_grid(&self, out: &mut [Cell]) {
        let width = self.width as usize;
        for (x, column) in self.columns.iter().enumerate() {
            for (y, cell) in column.blocks.iter().enumerate() {
                if let Some(slot) = out.get_mut(y * width + x) {
                    *slot = *cell;
                }
            }
        }
    }
}

use crate::types::{BlockColor, Cell, Coord, ShapeKind};

/// The active piece as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub x: i32,
    pub y: i32,
    /// Local cells in the current orientation
    pub cells: [Coord; 4],
}

impl ActiveSnapshot {
    /// Board coordinates of the piece if its origin were at row `y`
    pub fn cells_at(&self, y: i32) -> [Coord; 4] {
        self.cells.map(|c| c.offset(self.x, y))
    }
}

/// A plain copy of everything a presentation layer reads from a game
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major locked blocks, `board[y * width + x]`, row 0 is the floor
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i32>,
    pub rows_completed: u32,
    pub pieces_locked: u32,
    pub lost: bool,
}

impl GameSnapshot {
    /// Resize for a board of `width` by `height` and empty every field
    ///
    /// Keeps the grid allocation when the size is unchanged.
    pub fn clear(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.board.clear();
        self.board
            .resize((width.max(0) as usize) * (height.max(0) as usize), None);
        self.active = None;
        self.ghost_y = None;
        self.rows_completed = 0;
        self.pieces_locked = 0;
        self.lost = false;
    }

    /// Locked block at `(x, y)`
    pub fn block(&self, x: i32, y: i32) -> Cell {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.board[(y * self.width + x) as usize]
    }

    pub fn playable(&self) -> bool {
        !self.lost
    }
}

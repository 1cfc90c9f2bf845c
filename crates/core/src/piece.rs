//! Piece module - immutable tetromino geometry
//!
//! A [`Piece`] is four cells relative to a local origin plus the tight bounding box
//! over those cells. Rotation returns a new value; nothing here ever consults the board,
//! so a rotated piece may sit outside it until the board checks legality.

use crate::types::{Coord, ShapeKind};

/// Four cells relative to the piece origin
pub type PieceCells = [Coord; 4];

/// An immutable 4-cell piece with its bounding box
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    cells: PieceCells,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl Piece {
    /// Create a piece from its four local cells
    pub fn new(cells: PieceCells) -> Self {
        let mut min_x = i32::MAX;
        let mut max_x = i32::MIN;
        let mut min_y = i32::MAX;
        let mut max_y = i32::MIN;
        for c in &cells {
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_y = min_y.min(c.y);
            max_y = max_y.max(c.y);
        }
        Self {
            cells,
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Return this piece rotated 90° about its origin
    pub fn rotate(&self) -> Piece {
        Piece::new(self.cells.map(Coord::rotate90))
    }

    /// Check if the piece has a cell at local `(x, y)`
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.iter().any(|c| c.x == x && c.y == y)
    }

    /// Check if both pieces occupy the same cells, including orientation
    pub fn equals(&self, other: &Piece) -> bool {
        self.cells.iter().all(|c| other.contains(c.x, c.y))
    }

    /// Check if `other`, in any of its four orientations, equals this piece
    pub fn same_shape(&self, other: &Piece) -> bool {
        let mut candidate = *other;
        for _ in 0..4 {
            if self.equals(&candidate) {
                return true;
            }
            candidate = candidate.rotate();
        }
        false
    }

    /// Call `f` with the local coordinates of each cell
    pub fn for_each_cell(&self, mut f: impl FnMut(i32, i32)) {
        for c in &self.cells {
            f(c.x, c.y);
        }
    }

    pub fn cells(&self) -> PieceCells {
        self.cells
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Piece {}

impl From<ShapeKind> for Piece {
    fn from(kind: ShapeKind) -> Self {
        Piece::new(kind.cells())
    }
}

/// Shape lookups that need the [`Piece`] geometry
pub trait ShapeExt {
    /// The canonical piece for this shape
    fn piece(&self) -> Piece;
}

impl ShapeExt for ShapeKind {
    fn piece(&self) -> Piece {
        Piece::from(*self)
    }
}

/// Recover the shape of a piece in any orientation
///
/// Returns `None` for cell sets that are not a rotation of a canonical shape.
pub fn identify(piece: &Piece) -> Option<ShapeKind> {
    ShapeKind::ALL
        .into_iter()
        .find(|kind| kind.piece().same_shape(piece))
}

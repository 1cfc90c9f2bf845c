//! Core types module - shared data structures and constants
//!
//! This module defines the value types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the rules engine, the terminal front end and tests alike.
//!
//! # Coordinates
//!
//! Board and piece coordinates are `(x, y)` pairs where `x` grows to the right
//! and `y` grows **upward**: row 0 is the floor.
//!
//! # Board Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Reference board width |
//! | `DEFAULT_HEIGHT` | 24 | Reference board height |
//! | `MIN_WIDTH` | 4 | Smallest width that fits every piece |
//! | `MIN_HEIGHT` | 4 | Smallest height that fits every spawn |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColor, Coord, GameAction, ShapeKind};
//!
//! // Every shape owns exactly one color
//! assert_eq!(ShapeKind::Z.color(), BlockColor::Red);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//!
//! // Coordinates rotate a quarter turn about the origin
//! assert_eq!(Coord::new(1, 2).rotate90(), Coord::new(2, -1));
//!
//! // Commands have stable names for logs
//! assert_eq!(GameAction::MoveLeft.as_str(), "moveLeft");
//! ```

/// Reference board width in columns
pub const DEFAULT_WIDTH: i32 = 10;

/// Reference board height in rows
pub const DEFAULT_HEIGHT: i32 = 24;

/// Minimum board width (the widest piece spans 4 columns)
pub const MIN_WIDTH: i32 = 4;

/// Minimum board height (the tallest piece spans 4 rows)
pub const MIN_HEIGHT: i32 = 4;

/// Default gravity interval in milliseconds (one `move_down` per tick)
pub const TICK_MS: u32 = 400;

/// Integer board/piece coordinate, y increasing upward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate 90° about the origin: `(x, y) -> (y, -x)`
    pub const fn rotate90(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Translate by an offset
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Colors a locked block can have
///
/// Each color belongs to exactly one [`ShapeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Yellow,
    Aqua,
    Blue,
    Green,
    Orange,
    Purple,
}

impl BlockColor {
    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::Aqua.as_str(), "aqua");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Yellow => "yellow",
            BlockColor::Aqua => "aqua",
            BlockColor::Blue => "blue",
            BlockColor::Green => "green",
            BlockColor::Orange => "orange",
            BlockColor::Purple => "purple",
        }
    }

    /// RGB triple used by renderers
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BlockColor::Red => (220, 50, 47),
            BlockColor::Yellow => (240, 220, 60),
            BlockColor::Aqua => (0, 220, 220),
            BlockColor::Blue => (50, 90, 230),
            BlockColor::Green => (60, 200, 80),
            BlockColor::Orange => (245, 150, 40),
            BlockColor::Purple => (170, 70, 200),
        }
    }
}

/// The seven tetromino shapes
///
/// Each shape carries its canonical cells (see [`ShapeKind::cells`]) and
/// a fixed color:
/// - **I**: Aqua
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes, in a fixed order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Canonical (spawn orientation) cells relative to the piece origin
    pub const fn cells(&self) -> [Coord; 4] {
        match self {
            ShapeKind::I => [
                Coord::new(-2, 1),
                Coord::new(-1, 1),
                Coord::new(0, 1),
                Coord::new(1, 1),
            ],
            ShapeKind::J => [
                Coord::new(0, 0),
                Coord::new(1, -1),
                Coord::new(1, 0),
                Coord::new(-1, 0),
            ],
            ShapeKind::L => [
                Coord::new(1, 0),
                Coord::new(0, 0),
                Coord::new(-1, 0),
                Coord::new(-1, -1),
            ],
            ShapeKind::O => [
                Coord::new(-1, -1),
                Coord::new(-1, 0),
                Coord::new(0, -1),
                Coord::new(0, 0),
            ],
            ShapeKind::S => [
                Coord::new(0, 0),
                Coord::new(-1, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
            ],
            ShapeKind::T => [
                Coord::new(0, 0),
                Coord::new(-1, 0),
                Coord::new(0, -1),
                Coord::new(1, 0),
            ],
            ShapeKind::Z => [
                Coord::new(0, 0),
                Coord::new(1, -1),
                Coord::new(0, -1),
                Coord::new(-1, 0),
            ],
        }
    }

    /// The fixed color of this shape
    pub const fn color(&self) -> BlockColor {
        match self {
            ShapeKind::Z => BlockColor::Red,
            ShapeKind::T => BlockColor::Purple,
            ShapeKind::S => BlockColor::Green,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::I => BlockColor::Aqua,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::J => BlockColor::Blue,
        }
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }
}

/// Commands a controller can issue against a game
///
/// These are used by both keyboard input and scripted drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° with a wall clamp
    Rotate,
    /// Drop piece to its resting row and lock it
    Drop,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Drop => "drop",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Locked block of that color
pub type Cell = Option<BlockColor>;

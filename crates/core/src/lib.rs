//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: piece geometry, collision
//! detection, locking and row clearing. It has **no dependencies** on rendering, input
//! or timing, which makes it:
//!
//! - **Deterministic**: an injected [`PieceSource`] fixes the piece sequence
//! - **Testable**: every rule is reachable through a small synchronous API
//! - **Portable**: the terminal runner is just one possible driver
//!
//! # Module Structure
//!
//! - [`piece`]: immutable 4-cell pieces, rotation and shape recognition
//! - [`board`]: column-major grid with collision, drop-row search and row clearing
//! - [`game`]: the active piece, move/rotate/drop commands and loss detection
//! - [`rng`]: piece sources (uniform random, scripted, closures)
//! - [`snapshot`]: plain copy of the query surface for renderers
//! - [`error`]: contract violations and configuration errors
//!
//! # Game Rules
//!
//! - **Coordinates**: y grows upward, row 0 is the floor, no ceiling check
//! - **Spawn**: centered at `x = width / 2`, top cell on the top row
//! - **Rotation**: 90° about the piece origin, clamped back inside the side walls
//! - **Lock**: a piece that cannot move down is written into the board
//! - **Rows**: every completed row is removed and the rows above shift down
//! - **Loss**: the game is over when a freshly spawned piece already collides
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, ScriptedSource};
//! use blockfall_types::{GameAction, ShapeKind};
//!
//! let mut game = Game::with_source(10, 24, ScriptedSource::repeat(ShapeKind::I)).unwrap();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::Drop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.rows_completed(), 0);
//! assert!(!game.has_lost());
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Placement};
pub use error::{BoardError, ConfigError};
pub use game::{DroppingPiece, Game, LockEvent};
pub use piece::{identify, Piece, PieceCells, ShapeExt};
pub use rng::{PieceSource, ScriptedSource, UniformSource};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

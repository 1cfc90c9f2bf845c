//! Game module - one active piece falling onto a board
//!
//! [`Game`] owns the [`Board`], the currently dropping piece and the running count of
//! completed rows. Every command refuses illegal moves by returning `false` instead of
//! erroring, and becomes a no-op once the game is lost.

use tracing::{debug, error, info, trace};

use crate::board::Board;
use crate::error::ConfigError;
use crate::piece::{Piece, ShapeExt};
use crate::rng::{PieceSource, UniformSource};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{BlockColor, GameAction, ShapeKind, MIN_HEIGHT, MIN_WIDTH};

/// The piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppingPiece {
    pub kind: ShapeKind,
    pub piece: Piece,
    pub color: BlockColor,
    pub x: i32,
    pub y: i32,
}

impl DroppingPiece {
    /// Place a fresh `kind` centered at the top of `board`
    pub fn spawn(kind: ShapeKind, board: &Board) -> Self {
        let piece = kind.piece();
        Self {
            kind,
            piece,
            color: kind.color(),
            x: board.width() / 2,
            y: board.height() - piece.max_y() - 1,
        }
    }
}

/// What happened the last time a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub x: i32,
    pub landing_y: i32,
    pub rows_cleared: u32,
}

/// A falling-block game
#[derive(Debug)]
pub struct Game<S = UniformSource> {
    board: Board,
    current: DroppingPiece,
    source: S,
    rows_completed: u32,
    pieces_locked: u32,
    last_lock: Option<LockEvent>,
    /// Drop preview for the current piece, `None` until computed
    drop_y_cache: std::cell::Cell<Option<i32>>,
}

impl Game<UniformSource> {
    /// Create a game with uniformly random pieces seeded from the OS
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        Self::with_source(width, height, UniformSource::from_os_rng())
    }

    /// Create a game whose piece sequence is fixed by `seed`
    pub fn seeded(width: i32, height: i32, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(width, height, UniformSource::seeded(seed))
    }
}

impl<S: PieceSource> Game<S> {
    /// Create a game drawing its pieces from `source`
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::{Game, ScriptedSource};
    /// use blockfall_types::ShapeKind;
    ///
    /// let mut game = Game::with_source(10, 24, ScriptedSource::repeat(ShapeKind::T)).unwrap();
    /// assert_eq!(game.current_piece_x(), 5);
    /// assert_eq!(game.current_piece_y(), 23);
    ///
    /// game.drop_current_piece();
    /// assert_eq!(game.pieces_locked(), 1);
    /// assert!(!game.has_lost());
    /// ```
    pub fn with_source(width: i32, height: i32, mut source: S) -> Result<Self, ConfigError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(ConfigError::TooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        let board = Board::new(width, height);
        let current = DroppingPiece::spawn(source.next_shape(), &board);
        debug!(width, height, shape = current.kind.as_str(), "new game");

        Ok(Self {
            board,
            current,
            source,
            rows_completed: 0,
            pieces_locked: 0,
            last_lock: None,
            drop_y_cache: std::cell::Cell::new(None),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &DroppingPiece {
        &self.current
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current.piece
    }

    pub fn current_shape(&self) -> ShapeKind {
        self.current.kind
    }

    pub fn current_piece_color(&self) -> BlockColor {
        self.current.color
    }

    pub fn current_piece_x(&self) -> i32 {
        self.current.x
    }

    pub fn current_piece_y(&self) -> i32 {
        self.current.y
    }

    /// Total rows completed over the whole game
    pub fn rows_completed(&self) -> u32 {
        self.rows_completed
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    pub fn block(&self, x: i32, y: i32) -> Option<BlockColor> {
        self.board.block(x, y)
    }

    /// Check if the current piece already overlaps the board where it stands
    pub fn has_lost(&self) -> bool {
        let p = &self.current;
        self.board.collides(&p.piece, p.x, p.y)
    }

    /// Row the current piece would land on if dropped now
    pub fn current_piece_drop_y(&self) -> i32 {
        if let Some(y) = self.drop_y_cache.get() {
            return y;
        }

        let p = &self.current;
        match self.board.drop_y(&p.piece, p.x, p.y) {
            Ok(y) => {
                self.drop_y_cache.set(Some(y));
                y
            }
            Err(err) => {
                error!(%err, "drop preview for an out-of-bounds piece");
                p.y
            }
        }
    }

    /// Move the piece down one row, locking it if it cannot move
    ///
    /// Returns `true` when the piece locked and a new one spawned.
    pub fn move_down(&mut self) -> bool {
        if self.has_lost() {
            return false;
        }

        let p = &self.current;
        if self.board.collides(&p.piece, p.x, p.y - 1) {
            return self.lock_current().is_some();
        }

        // Dropping from one row lower lands on the same row, so the preview stays valid.
        self.current.y -= 1;
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> bool {
        if self.has_lost() {
            return false;
        }

        let p = &self.current;
        if self.board.collides(&p.piece, p.x + dx, p.y) {
            return false;
        }

        self.current.x += dx;
        self.drop_y_cache.set(None);
        true
    }

    /// Rotate the piece 90°, pulling it back inside the side walls if needed
    ///
    /// Refused entirely when the rotated piece would still collide.
    pub fn rotate_current_piece(&mut self) -> bool {
        if self.has_lost() {
            return false;
        }

        let rotated = self.current.piece.rotate();
        let width = self.board.width();
        let mut x = self.current.x;
        if rotated.max_x() + x >= width {
            x = width - rotated.max_x() - 1;
        } else if rotated.min_x() + x < 0 {
            x = -rotated.min_x();
        }

        if self.board.collides(&rotated, x, self.current.y) {
            return false;
        }

        self.current.piece = rotated;
        self.current.x = x;
        self.drop_y_cache.set(None);
        true
    }

    /// Drop the piece to its resting row and lock it
    ///
    /// Returns the number of rows the lock completed.
    pub fn drop_current_piece(&mut self) -> u32 {
        if self.has_lost() {
            return 0;
        }
        self.lock_current().unwrap_or(0)
    }

    /// Apply a controller command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let accepted = match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate_current_piece(),
            GameAction::Drop => !self.has_lost() && self.lock_current().is_some(),
        };
        trace!(action = action.as_str(), accepted, "applied action");
        accepted
    }

    /// Lock the current piece at its drop position and spawn the next one
    fn lock_current(&mut self) -> Option<u32> {
        let p = self.current;
        let placement = match self.board.place(&p.piece, p.color, p.x, p.y) {
            Ok(placement) => placement,
            Err(err) => {
                error!(%err, shape = p.kind.as_str(), "refusing to lock piece");
                return None;
            }
        };

        let rows = placement.rows_cleared;
        self.rows_completed += rows;
        self.pieces_locked += 1;
        self.last_lock = Some(LockEvent {
            kind: p.kind,
            color: p.color,
            x: p.x,
            landing_y: placement.landing_y,
            rows_cleared: rows,
        });
        debug!(
            shape = p.kind.as_str(),
            color = p.color.as_str(),
            x = p.x,
            y = placement.landing_y,
            rows,
            total = self.rows_completed,
            "locked piece"
        );

        self.spawn_next();
        Some(rows)
    }

    fn spawn_next(&mut self) {
        self.current = DroppingPiece::spawn(self.source.next_shape(), &self.board);
        self.drop_y_cache.set(None);

        if self.has_lost() {
            info!(
                rows_completed = self.rows_completed,
                pieces_locked = self.pieces_locked,
                "spawn blocked, game over"
            );
        } else {
            debug!(shape = self.current.kind.as_str(), "spawned piece");
        }
    }

    /// Copy the query surface into `out`, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear(self.board.width(), self.board.height());
        self.board.write_grid(&mut out.board);

        let p = &self.current;
        out.active = Some(ActiveSnapshot {
            kind: p.kind,
            color: p.color,
            x: p.x,
            y: p.y,
            cells: p.piece.cells(),
        });
        out.ghost_y = Some(self.current_piece_drop_y());
        out.rows_completed = self.rows_completed;
        out.pieces_locked = self.pieces_locked;
        out.lost = self.has_lost();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn scripted(width: i32, height: i32, shapes: &[ShapeKind]) -> Game<ScriptedSource> {
        Game::with_source(width, height, ScriptedSource::new(shapes.to_vec()).unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_tiny_board() {
        let err = Game::with_source(3, 24, ScriptedSource::repeat(ShapeKind::O)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooSmall {
                width: 3,
                height: 24,
                min_width: 4,
                min_height: 4
            }
        );
        assert!(Game::with_source(10, 2, ScriptedSource::repeat(ShapeKind::O)).is_err());
    }

    #[test]
    fn test_spawn_position() {
        let game = scripted(10, 24, &[ShapeKind::T]);
        assert_eq!(game.current_shape(), ShapeKind::T);
        assert_eq!(game.current_piece_color(), BlockColor::Purple);
        assert_eq!(game.current_piece_x(), 5);
        // T has max_y = 0, so it spawns on the top row.
        assert_eq!(game.current_piece_y(), 23);
        assert!(!game.has_lost());
    }

    #[test]
    fn test_spawn_position_uses_max_y() {
        let game = scripted(10, 24, &[ShapeKind::I]);
        // I cells sit at y = 1, so the origin is one row below the top.
        assert_eq!(game.current_piece_y(), 22);
        assert_eq!(game.current_piece_y() + game.current_piece().max_y(), 23);
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut game = scripted(10, 24, &[ShapeKind::T]);
        for _ in 0..4 {
            assert!(game.move_left());
        }
        assert_eq!(game.current_piece_x(), 1);
        assert!(!game.move_left());
        assert_eq!(game.current_piece_x(), 1);
    }

    #[test]
    fn test_move_right_stops_at_wall() {
        let mut game = scripted(10, 24, &[ShapeKind::T]);
        for _ in 0..3 {
            assert!(game.move_right());
        }
        assert!(!game.move_right());
        assert_eq!(game.current_piece_x(), 8);
    }

    #[test]
    fn test_move_down_locks_on_floor() {
        let mut game = scripted(10, 24, &[ShapeKind::T, ShapeKind::S]);
        // From y = 23 down to the floor bound y = 1.
        for _ in 0..22 {
            assert!(!game.move_down());
        }
        assert_eq!(game.current_piece_y(), 1);

        assert!(game.move_down());
        assert_eq!(game.current_shape(), ShapeKind::S);
        assert_eq!(game.pieces_locked(), 1);
        assert_eq!(game.block(5, 0), Some(BlockColor::Purple));
        assert_eq!(game.block(4, 1), Some(BlockColor::Purple));
        assert_eq!(game.block(5, 1), Some(BlockColor::Purple));
        assert_eq!(game.block(6, 1), Some(BlockColor::Purple));
    }

    #[test]
    fn test_drop_current_piece_locks_at_drop_y() {
        let mut game = scripted(10, 24, &[ShapeKind::O]);
        let drop_y = game.current_piece_drop_y();
        assert_eq!(drop_y, 1);

        assert_eq!(game.drop_current_piece(), 0);
        let event = game.last_lock().unwrap();
        assert_eq!(event.kind, ShapeKind::O);
        assert_eq!(event.landing_y, 1);
        assert_eq!(event.rows_cleared, 0);
        assert_eq!(game.block(4, 0), Some(BlockColor::Yellow));
        assert_eq!(game.block(5, 1), Some(BlockColor::Yellow));
    }

    #[test]
    fn test_two_o_pieces_clear_two_rows() {
        let mut game = scripted(4, 4, &[ShapeKind::O]);
        assert!(game.move_left());
        assert_eq!(game.drop_current_piece(), 0);

        assert!(game.move_right());
        assert_eq!(game.drop_current_piece(), 2);

        assert_eq!(game.rows_completed(), 2);
        assert_eq!(game.board().filled_count(), 0);
    }

    #[test]
    fn test_rotate_against_right_wall_shifts_left() {
        let mut game = scripted(10, 24, &[ShapeKind::I]);
        assert!(game.rotate_current_piece());
        while game.move_right() {}
        assert_eq!(game.current_piece_x(), 8);

        assert!(game.rotate_current_piece());
        assert_eq!(game.current_piece_x(), 7);
        let p = *game.current_piece();
        assert_eq!(p.max_x() + game.current_piece_x(), 9);
    }

    #[test]
    fn test_rotate_against_left_wall_shifts_right() {
        let mut game = scripted(10, 24, &[ShapeKind::I]);
        assert!(game.rotate_current_piece());
        while game.move_left() {}
        assert_eq!(game.current_piece_x(), -1);

        assert!(game.rotate_current_piece());
        assert_eq!(game.current_piece_x(), 1);
        assert_eq!(game.current_piece().min_x() + game.current_piece_x(), 0);
    }

    #[test]
    fn test_rotate_into_floor_is_refused() {
        let mut game = scripted(10, 24, &[ShapeKind::I]);
        while !game.board().collides(
            game.current_piece(),
            game.current_piece_x(),
            game.current_piece_y() - 1,
        ) {
            assert!(!game.move_down());
        }
        assert_eq!(game.current_piece_y(), -1);

        let before = *game.current();
        assert!(!game.rotate_current_piece());
        assert_eq!(*game.current(), before);
    }

    #[test]
    fn test_rotate_refused_when_wall_clamp_hits_blocks() {
        let mut game = scripted(10, 24, &[ShapeKind::O, ShapeKind::I, ShapeKind::T]);
        assert!(game.move_right());
        assert!(game.move_right());
        assert_eq!(game.current_piece_x(), 7);
        game.drop_current_piece();
        assert_eq!(game.board().column_height(6), 2);
        assert_eq!(game.board().column_height(7), 2);

        assert_eq!(game.current_shape(), ShapeKind::I);
        assert!(game.rotate_current_piece());
        while game.move_right() {}
        assert_eq!(game.current_piece_x(), 8);
        while game.current_piece_y() > 2 {
            assert!(!game.move_down());
        }

        // Pulled back to x = 7, the flat bar would overlap the O on row 1.
        let rotated = game.current_piece().rotate();
        assert!(game.board().collides(&rotated, 7, 2));

        let before = *game.current();
        assert!(!game.rotate_current_piece());
        assert_eq!(*game.current(), before);
        assert_eq!(game.current_piece_x(), 8);
    }

    #[test]
    fn test_drop_y_cache_invalidated_on_move() {
        let mut game = scripted(10, 24, &[ShapeKind::O, ShapeKind::I]);
        game.drop_current_piece();

        // The O occupies columns 4..=5, rows 0..=1; the I spans columns 3..=6.
        assert_eq!(game.current_piece_drop_y(), 1);
        for _ in 0..3 {
            assert!(game.move_left());
        }
        assert_eq!(game.current_piece_drop_y(), -1);
    }

    #[test]
    fn test_drop_y_zero_is_cached_like_any_other_value() {
        // S has min_y = 0, so on an empty board it rests with its origin on row 0.
        let game = scripted(10, 24, &[ShapeKind::S]);
        assert_eq!(game.current_piece_drop_y(), 0);
        assert_eq!(game.drop_y_cache.get(), Some(0));
        assert_eq!(game.current_piece_drop_y(), 0);
    }

    #[test]
    fn test_lost_game_ignores_commands() {
        let mut game = scripted(4, 4, &[ShapeKind::O]);
        game.drop_current_piece();
        assert!(!game.has_lost());
        game.drop_current_piece();
        assert!(game.has_lost());

        let before = *game.current();
        assert!(!game.move_left());
        assert!(!game.move_right());
        assert!(!game.move_down());
        assert!(!game.rotate_current_piece());
        assert_eq!(game.drop_current_piece(), 0);
        assert!(!game.apply_action(GameAction::Drop));

        assert_eq!(*game.current(), before);
        assert_eq!(game.pieces_locked(), 2);
        assert_eq!(game.board().filled_count(), 8);
        assert!(game.has_lost());
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut game = scripted(10, 24, &[ShapeKind::T]);
        assert!(game.apply_action(GameAction::MoveLeft));
        assert_eq!(game.current_piece_x(), 4);
        assert!(game.apply_action(GameAction::MoveRight));
        assert_eq!(game.current_piece_x(), 5);
        assert!(!game.apply_action(GameAction::MoveDown));
        assert_eq!(game.current_piece_y(), 22);
        assert!(game.apply_action(GameAction::Rotate));
        assert!(game.apply_action(GameAction::Drop));
        assert_eq!(game.pieces_locked(), 1);
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let mut game = scripted(10, 24, &[ShapeKind::L, ShapeKind::Z]);
        game.drop_current_piece();
        let snap = game.snapshot();

        assert_eq!(snap.width, 10);
        assert_eq!(snap.height, 24);
        assert_eq!(snap.board.len(), 240);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, ShapeKind::Z);
        assert_eq!(active.color, BlockColor::Red);
        assert_eq!(active.x, game.current_piece_x());
        assert_eq!(snap.ghost_y, Some(game.current_piece_drop_y()));
        assert_eq!(snap.pieces_locked, 1);
        assert!(!snap.lost);
        for y in 0..24 {
            for x in 0..10 {
                assert_eq!(snap.block(x, y), game.block(x, y));
            }
        }
    }
}

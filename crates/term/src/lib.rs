//! Terminal front end for the falling-block game.
//!
//! A small, game-oriented rendering layer: [`GameView`] turns a
//! [`core::GameSnapshot`] into a [`FrameBuffer`] of styled characters, and
//! [`TerminalRenderer`] flushes framebuffers to the terminal with crossterm,
//! writing only the cells that changed since the previous frame.
//!
//! Board cells are drawn 2 characters wide by default to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] commands. Timing and
//! repeat handling are left to the runner: every press or terminal auto-repeat is one
//! command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_action_event, should_quit};

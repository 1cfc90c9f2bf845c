//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the runner, integration tests and
//! benches can use `blockfall::{core, input, term, types}`. The runner's command-line
//! configuration lives in [`config`].

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

use std::fmt;

/// Contract violations reported by [`crate::Board`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A drop was requested from a position that already hits a wall or the floor.
    InvalidDropStart { x: i32, y: i32 },
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidDropStart { .. } => "invalid_drop_start",
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDropStart { x, y } => write!(
                f,
                "invalid coordinates for dropped piece: ({}, {}) is outside the walls or below the floor",
                x, y
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Rejected game dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    TooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "board {}x{} is too small (minimum {}x{})",
                width, height, min_width, min_height
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

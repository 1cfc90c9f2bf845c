//! Runner configuration parsed from the command line.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

use crate::types::{ShapeKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH, TICK_MS};

pub const USAGE: &str = "\
usage: blockfall [--width N] [--height N] [--seed N | --shapes LETTERS] [--tick-ms N]
                 [--log-file PATH] [--log-level LEVEL]

--shapes replays a fixed cycle of pieces, e.g. `--shapes IOTSZJL`

keys: arrows / hjkl / wasd move and rotate, space drops, q quits";

/// Largest accepted board width
pub const MAX_WIDTH: i32 = 256;

/// Largest accepted board height
pub const MAX_HEIGHT: i32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub width: i32,
    pub height: i32,
    /// Fixed piece sequence; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Scripted piece cycle, replayed instead of random pieces
    pub shapes: Option<Vec<ShapeKind>>,
    /// Gravity interval
    pub tick_ms: u64,
    /// Where `tracing` output goes; `None` disables logging
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            shapes: None,
            tick_ms: TICK_MS as u64,
            log_file: None,
            log_level: Level::INFO,
        }
    }
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// Parse a piece cycle written as shape letters, e.g. `IOT`
fn parse_shapes(value: Option<&String>) -> Result<Vec<ShapeKind>> {
    let v = value.ok_or_else(|| anyhow!("missing value for --shapes"))?;
    let shapes = v
        .chars()
        .map(|c| {
            let mut buf = [0u8; 4];
            ShapeKind::from_str(c.encode_utf8(&mut buf))
                .ok_or_else(|| anyhow!("unknown shape {:?} in --shapes", c))
        })
        .collect::<Result<Vec<_>>>()?;
    if shapes.is_empty() {
        return Err(anyhow!("--shapes needs at least one shape"));
    }
    Ok(shapes)
}

/// Parse runner arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(None),
            "--width" => {
                i += 1;
                config.width = parse_value(flag, args.get(i))?;
            }
            "--height" => {
                i += 1;
                config.height = parse_value(flag, args.get(i))?;
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_value(flag, args.get(i))?);
            }
            "--shapes" => {
                i += 1;
                config.shapes = Some(parse_shapes(args.get(i))?);
            }
            "--tick-ms" => {
                i += 1;
                config.tick_ms = parse_value(flag, args.get(i))?;
            }
            "--log-file" => {
                i += 1;
                config.log_file = Some(parse_value(flag, args.get(i))?);
            }
            "--log-level" => {
                i += 1;
                config.log_level = parse_value(flag, args.get(i))?;
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    config.validate().context("invalid configuration")?;
    Ok(Some(config))
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(anyhow!(
                "board must be at least {}x{}, got {}x{}",
                MIN_WIDTH,
                MIN_HEIGHT,
                self.width,
                self.height
            ));
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(anyhow!(
                "board must be at most {}x{}, got {}x{}",
                MAX_WIDTH,
                MAX_HEIGHT,
                self.width,
                self.height
            ));
        }
        if self.seed.is_some() && self.shapes.is_some() {
            return Err(anyhow!("--seed and --shapes cannot be combined"));
        }
        if self.tick_ms == 0 {
            return Err(anyhow!("--tick-ms must be positive"));
        }
        Ok(())
    }
}

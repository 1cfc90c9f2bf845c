//! RNG module - where the next shape comes from
//!
//! A [`Game`](crate::Game) never reaches for a global generator. It draws every new shape
//! from an injected [`PieceSource`]:
//!
//! - [`UniformSource`]: uniform choice among the seven shapes, backed by any `rand::Rng`
//! - [`ScriptedSource`]: replays a fixed sequence, for deterministic tests and demos
//! - any `FnMut() -> ShapeKind` closure

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::ShapeKind;

/// Supplier of the next shape to spawn
pub trait PieceSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<F> PieceSource for F
where
    F: FnMut() -> ShapeKind,
{
    fn next_shape(&mut self) -> ShapeKind {
        self()
    }
}

/// Uniform random shapes
#[derive(Debug, Clone)]
pub struct UniformSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformSource<StdRng> {
    /// Reproducible source: the same seed always yields the same shapes
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PieceSource for UniformSource<R> {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())]
    }
}

/// Cycles through a fixed list of shapes
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl ScriptedSource {
    /// Create a source replaying `shapes` in order, wrapping around at the end
    ///
    /// Returns `None` for an empty list.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Option<Self> {
        let shapes = shapes.into();
        if shapes.is_empty() {
            return None;
        }
        Some(Self { shapes, index: 0 })
    }

    /// Source that only ever yields `kind`
    pub fn repeat(kind: ShapeKind) -> Self {
        Self {
            shapes: vec![kind],
            index: 0,
        }
    }
}

impl PieceSource for ScriptedSource {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        kind
    }
}

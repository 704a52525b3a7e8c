//! RNG module - shape selection
//!
//! The game draws each new shape from a [`ShapeSource`]. The default source is
//! a uniform draw over the seven shapes backed by a simple LCG, so the same seed
//! always produces the same game. [`FixedShapes`] replays a fixed sequence and
//! is meant for tests and scripted scenarios.

use crate::types::ShapeKind;

/// Anything that can hand out the next shape
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for SimpleRng {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.next_range(ShapeKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed shape sequence, wrapping around at the end
#[derive(Debug, Clone)]
pub struct FixedShapes {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl FixedShapes {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "FixedShapes needs at least one shape");
        Self { shapes, index: 0 }
    }

    /// Always hand out the same shape
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new(vec![kind])
    }
}

impl ShapeSource for FixedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.index % self.shapes.len()];
        self.index = self.index.wrapping_add(1);
        kind
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

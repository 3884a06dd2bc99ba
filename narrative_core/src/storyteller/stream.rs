//! Random streams feeding the storyteller and the tree builder.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws.
///
/// Every method consumes exactly one draw from the stream. The tree builder
/// and the event generator only ever talk to this trait, so a build can be
/// driven by a seeded generator or by a fixed script.
pub trait RandomStream {
    /// Uniform integer in `low..=high`. `low` must not exceed `high`.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0.0, 1.0)`.
    fn unit(&mut self) -> f64;
}

impl<S: RandomStream + ?Sized> RandomStream for &mut S {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        (**self).roll(low, high)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// A pseudo-random stream backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededStream {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededStream {
    /// Create a reproducible stream.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a stream seeded from platform entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when `seed` is present, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this stream was created from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomStream for SeededStream {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// A stream that replays a fixed script of unit values.
///
/// Each draw takes the next value `u` from the script (wrapping around at
/// the end) and maps it onto the requested range as `floor(u * span)`.
/// Useful for asserting exact builder and generator output.
#[derive(Debug, Clone)]
pub struct ScriptedStream {
    script: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedStream {
    /// Create a stream from unit values; each is clamped into `[0.0, 1.0)`.
    ///
    /// An empty script behaves like `[0.0]`.
    pub fn new(script: impl IntoIterator<Item = f64>) -> Self {
        let mut script: Vec<f64> = script
            .into_iter()
            .map(|u| if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        if script.is_empty() {
            script.push(0.0);
        }
        Self {
            script,
            cursor: 0,
            draws: 0,
        }
    }

    /// A stream that always yields the same unit value.
    pub fn constant(u: f64) -> Self {
        Self::new([u])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn next_unit(&mut self) -> f64 {
        let u = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        self.draws += 1;
        u
    }
}

impl RandomStream for ScriptedStream {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        let span = u64::from(high.saturating_sub(low)) + 1;
        let offset = ((self.next_unit() * span as f64) as u64).min(span - 1);
        low + offset as u32
    }

    fn index(&mut self, len: usize) -> usize {
        let u = self.next_unit();
        ((u * len as f64) as usize).min(len.saturating_sub(1))
    }

    fn unit(&mut self) -> f64 {
        self.next_unit()
    }
}

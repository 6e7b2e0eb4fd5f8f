//! Stochastic variate generators for arrival and service processes
//!
//! Both generators sample by inverse CDF from a uniform(0, 1) stream: each
//! draw consumes exactly one uniform value, so a run is fully reproducible
//! given its uniform sources. The theoretical mean, variance and standard
//! deviation of each distribution are pure functions of its parameters and
//! are computed once at construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Source of uniform(0, 1) draws feeding the inverse-CDF samplers.
///
/// The default implementation is [`StdUniform`]. Injecting a different source
/// (e.g. [`FixedUniform`]) makes every downstream sample deterministic, which
/// is how replay and the deterministic-seed tests work.
pub trait UniformSource {
    /// Returns the next uniform value in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// Uniform source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdUniform {
    rng: StdRng,
}

impl StdUniform {
    /// Creates a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible source from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdUniform {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UniformSource for StdUniform {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Scripted uniform source that replays a fixed sequence, cycling once the
/// sequence is exhausted. Intended for deterministic tests and replay.
#[derive(Debug, Clone)]
pub struct FixedUniform {
    values: Vec<f64>,
    next: usize,
}

impl FixedUniform {
    /// Creates a source cycling through `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "FixedUniform needs at least one value");
        Self { values, next: 0 }
    }

    /// Creates a source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl UniformSource for FixedUniform {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

/// Theoretical mean, variance and standard deviation of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl Moments {
    fn from_mean_variance(mean: f64, variance: f64) -> Self {
        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }

    /// Moments of an exponential distribution with rate `lambda`:
    /// mean `1/λ`, variance `1/λ²`.
    pub fn exponential(lambda: f64) -> Self {
        Self::from_mean_variance(1.0 / lambda, 1.0 / (lambda * lambda))
    }

    /// Moments of a triangular distribution on `[a, b]` with mode `m`:
    /// mean `(a+m+b)/3`, variance `((b−a)² − (m−a)(b−m))/18`.
    pub fn triangular(a: f64, m: f64, b: f64) -> Self {
        let mean = (a + m + b) / 3.0;
        let variance = ((b - a) * (b - a) - (m - a) * (b - m)) / 18.0;
        Self::from_mean_variance(mean, variance)
    }
}

/// Exponential stochastic variable, used for client inter-arrival times.
#[derive(Debug, Clone)]
pub struct ExponentialVariable<S = StdUniform> {
    lambda: f64,
    moments: Moments,
    source: S,
}

impl ExponentialVariable<StdUniform> {
    /// Creates an exponential variable with rate `lambda`, sampling from OS
    /// entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidExponentialRate`] unless `lambda > 0`.
    pub fn new(lambda: f64) -> Result<Self, SimError> {
        Self::with_source(lambda, StdUniform::from_entropy())
    }

    /// Creates a reproducible exponential variable from an explicit seed.
    pub fn seeded(lambda: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_source(lambda, StdUniform::seeded(seed))
    }
}

impl<S: UniformSource> ExponentialVariable<S> {
    /// Creates an exponential variable drawing uniforms from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidExponentialRate`] unless `lambda > 0`.
    pub fn with_source(lambda: f64, source: S) -> Result<Self, SimError> {
        if lambda > 0.0 {
            Ok(Self {
                lambda,
                moments: Moments::exponential(lambda),
                source,
            })
        } else {
            Err(SimError::InvalidExponentialRate { lambda })
        }
    }

    /// The rate parameter λ.
    pub fn rate(&self) -> f64 {
        self.lambda
    }

    /// The theoretical moments, computed once at construction.
    pub fn moments(&self) -> Moments {
        self.moments
    }

    /// Draws the next sample: `−ln(1 − u)/λ` for one uniform `u`.
    pub fn next(&mut self) -> f64 {
        let u = self.source.next_uniform();
        -((1.0 - u).ln()) / self.lambda
    }

    /// Unbounded lazy sequence of samples.
    pub fn sample_iter(&mut self) -> impl Iterator<Item = f64> + '_ {
        std::iter::repeat_with(move || self.next())
    }
}

/// Triangular stochastic variable, used for client service durations.
#[derive(Debug, Clone)]
pub struct TriangularVariable<S = StdUniform> {
    a: f64,
    m: f64,
    b: f64,
    moments: Moments,
    source: S,
}

impl TriangularVariable<StdUniform> {
    /// Creates a triangular variable on `[a, b]` with mode `m`, sampling from
    /// OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTriangularBounds`] unless
    /// `a <= m <= b` and `a < b`.
    pub fn new(a: f64, m: f64, b: f64) -> Result<Self, SimError> {
        Self::with_source(a, m, b, StdUniform::from_entropy())
    }

    /// Creates a reproducible triangular variable from an explicit seed.
    pub fn seeded(a: f64, m: f64, b: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_source(a, m, b, StdUniform::seeded(seed))
    }
}

impl<S: UniformSource> TriangularVariable<S> {
    /// Creates a triangular variable drawing uniforms from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTriangularBounds`] unless
    /// `a <= m <= b` and `a < b`.
    pub fn with_source(a: f64, m: f64, b: f64, source: S) -> Result<Self, SimError> {
        if a <= m && m <= b && a < b {
            Ok(Self {
                a,
                m,
                b,
                moments: Moments::triangular(a, m, b),
                source,
            })
        } else {
            Err(SimError::InvalidTriangularBounds { a, m, b })
        }
    }

    /// The lower bound `a` (shortest possible value).
    pub fn min(&self) -> f64 {
        self.a
    }

    /// The mode `m` (most common value).
    pub fn mode(&self) -> f64 {
        self.m
    }

    /// The upper bound `b` (longest possible value).
    pub fn max(&self) -> f64 {
        self.b
    }

    /// The theoretical moments, computed once at construction.
    pub fn moments(&self) -> Moments {
        self.moments
    }

    /// Draws the next sample by inverse CDF from one uniform `u`:
    /// `a + √((b−a)(m−a)u)` below the mode split `(m−a)/(b−a)`,
    /// `b − √((b−a)(b−m)(1−u))` above it.
    pub fn next(&mut self) -> f64 {
        let u = self.source.next_uniform();
        let split = (self.m - self.a) / (self.b - self.a);
        if u < split {
            self.a + ((self.b - self.a) * (self.m - self.a) * u).sqrt()
        } else {
            self.b - ((self.b - self.a) * (self.b - self.m) * (1.0 - u)).sqrt()
        }
    }

    /// Unbounded lazy sequence of samples.
    pub fn sample_iter(&mut self) -> impl Iterator<Item = f64> + '_ {
        std::iter::repeat_with(move || self.next())
    }
}

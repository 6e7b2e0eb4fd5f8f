//! Event-driven simulation core for a single-server FIFO queue.
//!
//! This crate provides the building blocks for simulating a queue with one
//! server and a finite population of clients: inverse-CDF stochastic variate
//! generators, a per-run event history, and the next-event time-advance
//! simulator that ties them together.
//!
//! # Architecture Overview
//!
//! - [`ExponentialVariable`] / [`TriangularVariable`]: inverse-CDF samplers
//!   over a pluggable [`UniformSource`], each carrying its theoretical
//!   [`Moments`].
//! - [`EventHistory`]: three parallel time series (arrival, service start,
//!   departure) indexed by client ordinal.
//! - [`SimQueue`]: owns the generators, run state and history for exactly one
//!   simulation at a time.
//!
//! Data flows one way: generators feed the simulator, the simulator fills the
//! history, and downstream consumers (the `qsim-stats` crate) read the
//! history.
//!
//! # Basic Usage
//!
//! ```
//! use qsim_core::{QueueParameters, SimQueue};
//!
//! let params = QueueParameters::new(100, 0.13, 0.0, 35.0, 60.0)?;
//! let mut sim = SimQueue::seeded(params, 7)?;
//! let history = sim.run();
//!
//! // Arrivals are chronological and service is strictly FIFO.
//! assert!(history.arrival().windows(2).all(|w| w[0] <= w[1]));
//! # Ok::<(), qsim_core::SimError>(())
//! ```
//!
//! Every run owns its state exclusively; for Monte Carlo batches, build one
//! `SimQueue` per run (with independent seeds) and execute them in parallel.

pub mod error;
pub mod history;
pub mod random;
pub mod sim;

pub use error::SimError;
pub use history::{ClientRecord, EventHistory};
pub use random::{
    ExponentialVariable, FixedUniform, Moments, StdUniform, TriangularVariable, UniformSource,
};
pub use sim::{QueueParameters, SimQueue, INFINITE_TIME};

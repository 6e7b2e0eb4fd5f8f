//! # qsim — stochastic single-server FIFO queue simulator
//!
//! Facade crate tying the workspace together:
//!
//! - [`qsim_core`]: variate generators, event history, event-driven simulator.
//! - [`qsim_stats`]: statistics snapshot, report rendering, file export.
//!
//! The `qsim` binary in this crate is the interactive driver: it collects the
//! queue parameters, runs the simulation, prints the history and statistics
//! report, and writes the tab-separated report file.
//!
//! ## Quick Start
//!
//! ```
//! use qsim::prelude::*;
//!
//! let params = QueueParameters::new(50, 0.25, 0.0, 4.0, 12.0)?;
//! let mut sim = SimQueue::seeded(params, 3)?;
//! sim.run();
//!
//! let snapshot = StatisticsSnapshot::compute(
//!     sim.history(),
//!     sim.arrival_moments(),
//!     sim.service_moments(),
//!     params.service_min,
//!     params.service_max,
//! );
//! println!("{}", SimulatedValues(&snapshot));
//! # Ok::<(), SimError>(())
//! ```

pub use qsim_core;
pub use qsim_stats;

pub mod prelude {
    //! Commonly used types and traits

    pub use qsim_core::{
        ClientRecord, EventHistory, ExponentialVariable, FixedUniform, Moments,
        QueueParameters, SimError, SimQueue, StdUniform, TriangularVariable, UniformSource,
        INFINITE_TIME,
    };

    pub use qsim_stats::{
        ErrorValues, Estimate, HistoryTable, JsonExporter, ReportExporter, SampleMoments,
        SimulatedValues, StatisticsSnapshot, StatsError, StatsRecorder, TheoreticalValues,
        TsvExporter,
    };
}

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes structured logging for the driver.
///
/// `RUST_LOG` takes precedence; `level` ("trace" through "error") is the
/// fallback filter. Safe to call once per process.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("qsim={level},qsim_core={level},qsim_stats={level}").into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}

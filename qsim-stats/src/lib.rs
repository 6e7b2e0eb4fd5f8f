//! Statistics engine for qsim simulation runs.
//!
//! Consumes a completed [`qsim_core::EventHistory`] and derives the simulated
//! moments of the inter-arrival and service processes, paired with the
//! theoretical moments of the generators that drove the run, plus absolute
//! and percent errors between the two. Report rendering and file export live
//! here as well, keeping the simulation core free of presentation concerns.
//!
//! ```
//! use qsim_core::{QueueParameters, SimQueue};
//! use qsim_stats::StatisticsSnapshot;
//!
//! let params = QueueParameters::new(200, 0.5, 0.0, 3.0, 9.0)?;
//! let mut sim = SimQueue::seeded(params, 11)?;
//! sim.run();
//!
//! let snapshot = StatisticsSnapshot::compute(
//!     sim.history(),
//!     sim.arrival_moments(),
//!     sim.service_moments(),
//!     params.service_min,
//!     params.service_max,
//! );
//! assert!(snapshot.service_mean.simulated > 0.0);
//! # Ok::<(), qsim_core::SimError>(())
//! ```

pub mod error;
pub mod export;
pub mod report;
pub mod snapshot;

pub use error::StatsError;
pub use export::{JsonExporter, ReportExporter, TsvExporter};
pub use report::{ErrorValues, HistoryTable, SimulatedValues, TheoreticalValues};
pub use snapshot::{Estimate, SampleMoments, StatisticsSnapshot, StatsRecorder};

//! File export for completed simulation runs

mod json;
mod tsv;

pub use json::JsonExporter;
pub use tsv::TsvExporter;

use qsim_core::EventHistory;

use crate::error::StatsError;
use crate::snapshot::StatisticsSnapshot;

/// Writes a completed run (history plus statistics) to an external format.
pub trait ReportExporter {
    /// Persists the run.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Io`] (or [`StatsError::Serialization`] for
    /// structured formats) when the destination cannot be written.
    fn export(
        &self,
        history: &EventHistory,
        snapshot: &StatisticsSnapshot,
    ) -> Result<(), StatsError>;
}

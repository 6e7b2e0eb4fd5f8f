//! Tab-separated report file
//!
//! One row per client: the three event times plus the sorted per-client
//! inter-arrival gaps and service durations, suitable for spreadsheet or
//! pandas analysis of the sampled distributions.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use qsim_core::EventHistory;

use crate::error::StatsError;
use crate::export::ReportExporter;
use crate::snapshot::StatisticsSnapshot;

/// Exporter writing the tab-separated run report.
#[derive(Debug)]
pub struct TsvExporter {
    path: PathBuf,
}

impl TsvExporter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Destination path of the report.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportExporter for TsvExporter {
    fn export(
        &self,
        history: &EventHistory,
        _snapshot: &StatisticsSnapshot,
    ) -> Result<(), StatsError> {
        let mut gaps = history.inter_arrival_gaps();
        gaps.sort_by(f64::total_cmp);
        let mut durations = history.service_durations();
        durations.sort_by(f64::total_cmp);

        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);
        writeln!(
            out,
            "Time\tArrivalTime\tServiceTime\tLeavingTime\tArrivalTimeSamples\tServiceTimeSamples"
        )?;
        for record in history.records() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                record.ordinal,
                record.arrival,
                record.service_start,
                record.departure,
                gaps[record.ordinal],
                durations[record.ordinal]
            )?;
        }
        out.flush()?;

        info!(path = %self.path.display(), clients = history.capacity(), "wrote TSV report");
        Ok(())
    }
}

//! JSON export of a completed run

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use qsim_core::{ClientRecord, EventHistory};

use crate::error::StatsError;
use crate::export::ReportExporter;
use crate::snapshot::StatisticsSnapshot;

/// Serialized shape of one exported run.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    records: Vec<ClientRecord>,
    statistics: &'a StatisticsSnapshot,
}

/// Exporter writing the run as a single JSON document.
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty: false,
        }
    }

    /// Pretty-prints the output for human consumption.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(
        &self,
        history: &EventHistory,
        snapshot: &StatisticsSnapshot,
    ) -> Result<(), StatsError> {
        let report = RunReport {
            records: history.records().collect(),
            statistics: snapshot,
        };

        let file = File::create(&self.path)?;
        let out = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(out, &report)?;
        } else {
            serde_json::to_writer(out, &report)?;
        }

        info!(path = %self.path.display(), "wrote JSON report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::Moments;

    #[test]
    fn exported_document_parses_back() {
        let history = EventHistory::from_series(
            vec![0.0, 1.0],
            vec![0.0, 2.0],
            vec![2.0, 3.0],
        );
        let snapshot = StatisticsSnapshot::compute(
            &history,
            Moments::exponential(1.0),
            Moments::triangular(0.0, 2.0, 4.0),
            0.0,
            4.0,
        );

        let path = std::env::temp_dir().join("qsim_export_test.json");
        JsonExporter::new(&path)
            .pretty()
            .export(&history, &snapshot)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["records"][1]["departure"], 3.0);
        assert!(value["statistics"]["service_mean"]["simulated"].is_number());

        std::fs::remove_file(&path).ok();
    }
}

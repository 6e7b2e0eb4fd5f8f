//! Chronological record of one simulated queue run
//!
//! The history holds three parallel time series indexed by client ordinal:
//! when each client arrived, when its service started, and when it departed.
//! Slots are zero-initialized at construction and filled monotonically by
//! ordinal while a run is in progress; afterwards the history is read-only
//! until the owning simulation is reset.

use serde::{Deserialize, Serialize};

/// One client's row of a completed history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Client ordinal, 0-based, in arrival (= service, FIFO) order.
    pub ordinal: usize,
    pub arrival: f64,
    pub service_start: f64,
    pub departure: f64,
}

/// Fixed-capacity record of arrival, service-start and departure times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHistory {
    arrival: Vec<f64>,
    service_start: Vec<f64>,
    departure: Vec<f64>,
}

impl EventHistory {
    /// Allocates a zero-initialized history for `clients` entries.
    pub(crate) fn with_capacity(clients: usize) -> Self {
        Self {
            arrival: vec![0.0; clients],
            service_start: vec![0.0; clients],
            departure: vec![0.0; clients],
        }
    }

    /// Rebuilds a history from its three series, e.g. when loading a
    /// persisted run.
    ///
    /// # Panics
    ///
    /// Panics if the series lengths differ.
    pub fn from_series(
        arrival: Vec<f64>,
        service_start: Vec<f64>,
        departure: Vec<f64>,
    ) -> Self {
        assert_eq!(arrival.len(), service_start.len());
        assert_eq!(arrival.len(), departure.len());
        Self {
            arrival,
            service_start,
            departure,
        }
    }

    /// Number of clients this history covers.
    pub fn capacity(&self) -> usize {
        self.arrival.len()
    }

    pub(crate) fn record_arrival(&mut self, ordinal: usize, time: f64) {
        self.arrival[ordinal] = time;
    }

    pub(crate) fn record_service_start(&mut self, ordinal: usize, time: f64) {
        self.service_start[ordinal] = time;
    }

    pub(crate) fn record_departure(&mut self, ordinal: usize, time: f64) {
        self.departure[ordinal] = time;
    }

    pub(crate) fn reset(&mut self) {
        self.arrival.fill(0.0);
        self.service_start.fill(0.0);
        self.departure.fill(0.0);
    }

    /// Arrival time of each client, non-decreasing in ordinal.
    pub fn arrival(&self) -> &[f64] {
        &self.arrival
    }

    /// Time each client's service began.
    pub fn service_start(&self) -> &[f64] {
        &self.service_start
    }

    /// Time each client left the server.
    pub fn departure(&self) -> &[f64] {
        &self.departure
    }

    /// The three series zipped into per-client rows.
    pub fn records(&self) -> impl Iterator<Item = ClientRecord> + '_ {
        (0..self.capacity()).map(move |ordinal| ClientRecord {
            ordinal,
            arrival: self.arrival[ordinal],
            service_start: self.service_start[ordinal],
            departure: self.departure[ordinal],
        })
    }

    /// Per-client inter-arrival gaps. The first entry is the gap from the
    /// simulation start to the first arrival, so the series has one value per
    /// client.
    pub fn inter_arrival_gaps(&self) -> Vec<f64> {
        (0..self.capacity())
            .map(|i| {
                if i == 0 {
                    self.arrival[0]
                } else {
                    self.arrival[i] - self.arrival[i - 1]
                }
            })
            .collect()
    }

    /// Per-client service durations (departure − service start).
    pub fn service_durations(&self) -> Vec<f64> {
        (0..self.capacity())
            .map(|i| self.departure[i] - self.service_start[i])
            .collect()
    }
}

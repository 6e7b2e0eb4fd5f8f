//! Event-driven simulation of a single-server FIFO queue
//!
//! The simulator advances time from one pending event to the next (next-event
//! time advance): either the next client arrival or the completion of the
//! service in progress, whichever comes first. Exactly `clients` arrivals are
//! ever scheduled, every admitted client eventually departs, and the run
//! terminates once the last client has left an idle server.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::SimError;
use crate::history::EventHistory;
use crate::random::{
    ExponentialVariable, Moments, StdUniform, TriangularVariable, UniformSource,
};

/// Reserved timestamp meaning "no pending event of this kind".
///
/// Used both for an idle server (no pending departure) and for exhausted
/// arrivals once the client capacity has been reached.
pub const INFINITE_TIME: f64 = f64::INFINITY;

/// Validated input parameters for one simulation run.
///
/// Times are unitless; the interactive driver works in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueParameters {
    /// Total number of clients to simulate.
    pub clients: usize,
    /// Rate λ of the exponential inter-arrival process (clients per time
    /// unit).
    pub arrival_rate: f64,
    /// Shortest possible service duration (triangular `a`).
    pub service_min: f64,
    /// Most common service duration (triangular mode `m`).
    pub service_mode: f64,
    /// Longest possible service duration (triangular `b`).
    pub service_max: f64,
}

impl QueueParameters {
    /// Builds a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns the matching [`SimError`] variant when `clients == 0`, when
    /// `arrival_rate <= 0`, or when the triangular bounds do not satisfy
    /// `a <= m <= b` and `a < b`.
    pub fn new(
        clients: usize,
        arrival_rate: f64,
        service_min: f64,
        service_mode: f64,
        service_max: f64,
    ) -> Result<Self, SimError> {
        let params = Self {
            clients,
            arrival_rate,
            service_min,
            service_mode,
            service_max,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-checks the validation rules, e.g. after deserializing from a
    /// config file.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.clients == 0 {
            return Err(SimError::InvalidQueueSize {
                clients: self.clients,
            });
        }
        if !(self.arrival_rate > 0.0) {
            return Err(SimError::InvalidExponentialRate {
                lambda: self.arrival_rate,
            });
        }
        let (a, m, b) = (self.service_min, self.service_mode, self.service_max);
        if !(a <= m && m <= b && a < b) {
            return Err(SimError::InvalidTriangularBounds { a, m, b });
        }
        Ok(())
    }
}

/// Mutable state of one run of the next-event loop.
///
/// Owned exclusively by its [`SimQueue`]; independent simulations never share
/// counters, clock or pending-event times, so seeded runs can execute in
/// parallel without interfering.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SimState {
    /// Ordinal of the last client to have arrived, `None` before the first.
    arrived: Option<usize>,
    /// Ordinal of the last client to have started service, `None` before the
    /// first.
    in_service: Option<usize>,
    /// Current simulated time, monotonically non-decreasing.
    clock: f64,
    /// Time of the next arrival; `INFINITE_TIME` once capacity is reached.
    next_arrival: f64,
    /// Time the in-service client finishes; `INFINITE_TIME` while idle.
    next_departure: f64,
}

impl SimState {
    fn initial() -> Self {
        Self {
            arrived: None,
            in_service: None,
            clock: 0.0,
            // The first client arrives at the simulation start.
            next_arrival: 0.0,
            next_departure: INFINITE_TIME,
        }
    }

    /// True when at least one arrived client has not started service.
    fn client_waiting(&self) -> bool {
        match (self.arrived, self.in_service) {
            (Some(arrived), Some(serving)) => arrived > serving,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// A single-server FIFO queue driven by stochastic arrival and service
/// processes.
///
/// Arrivals follow an exponential inter-arrival distribution and service
/// durations a triangular one; the generic parameter selects the uniform
/// source feeding both (entropy-backed by default, seedable for reproducible
/// runs).
///
/// ```
/// use qsim_core::{QueueParameters, SimQueue};
///
/// let params = QueueParameters::new(50, 0.2, 0.0, 3.0, 8.0)?;
/// let mut sim = SimQueue::seeded(params, 42)?;
/// let history = sim.run();
/// assert_eq!(history.capacity(), 50);
/// # Ok::<(), qsim_core::SimError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimQueue<S: UniformSource = StdUniform> {
    params: QueueParameters,
    arrivals: ExponentialVariable<S>,
    service: TriangularVariable<S>,
    state: SimState,
    history: EventHistory,
    completed: bool,
}

impl SimQueue<StdUniform> {
    /// Builds a simulation sampling from OS entropy.
    ///
    /// # Errors
    ///
    /// Propagates the validation failures documented on
    /// [`QueueParameters::new`].
    pub fn new(params: QueueParameters) -> Result<Self, SimError> {
        Self::with_sources(
            params,
            StdUniform::from_entropy(),
            StdUniform::from_entropy(),
        )
    }

    /// Builds a reproducible simulation: the seed derives one independent
    /// uniform stream per stochastic variable.
    pub fn seeded(params: QueueParameters, seed: u64) -> Result<Self, SimError> {
        Self::with_sources(
            params,
            StdUniform::seeded(seed),
            StdUniform::seeded(seed ^ 0x9e37_79b9_7f4a_7c15),
        )
    }
}

impl<S: UniformSource> SimQueue<S> {
    /// Builds a simulation with explicit uniform sources for the arrival and
    /// service processes.
    ///
    /// # Errors
    ///
    /// Propagates the validation failures documented on
    /// [`QueueParameters::new`].
    pub fn with_sources(
        params: QueueParameters,
        arrival_source: S,
        service_source: S,
    ) -> Result<Self, SimError> {
        params.validate()?;
        let arrivals = ExponentialVariable::with_source(params.arrival_rate, arrival_source)?;
        let service = TriangularVariable::with_source(
            params.service_min,
            params.service_mode,
            params.service_max,
            service_source,
        )?;
        Ok(Self {
            params,
            arrivals,
            service,
            state: SimState::initial(),
            history: EventHistory::with_capacity(params.clients),
            completed: false,
        })
    }

    /// The validated parameters this run was built with.
    pub fn params(&self) -> &QueueParameters {
        &self.params
    }

    /// The event history; fully populated only after a completed run.
    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    /// Whether a run has completed since construction or the last reset.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Theoretical moments of the inter-arrival distribution.
    pub fn arrival_moments(&self) -> Moments {
        self.arrivals.moments()
    }

    /// Theoretical moments of the service-duration distribution.
    pub fn service_moments(&self) -> Moments {
        self.service.moments()
    }

    /// Clears the history and run state so the instance can run again.
    /// Generator streams are not rewound: a fresh run continues consuming
    /// the same uniform sources.
    pub fn reset(&mut self) {
        self.state = SimState::initial();
        self.history.reset();
        self.completed = false;
    }

    /// Runs the event loop to completion and returns the populated history.
    ///
    /// Repeated calls without an intervening [`reset`](Self::reset) leave the
    /// existing history untouched.
    #[instrument(skip(self), fields(clients = self.params.clients))]
    pub fn run(&mut self) -> &EventHistory {
        if self.completed {
            debug!("run already completed; call reset() to run again");
            return &self.history;
        }

        loop {
            if self.state.next_arrival < self.state.next_departure {
                self.arrive();
            } else {
                if self.state.next_departure == INFINITE_TIME {
                    // No pending arrival or departure: the run is over.
                    break;
                }
                self.depart();
            }
        }

        self.completed = true;
        debug!(final_time = self.state.clock, "simulation run completed");
        &self.history
    }

    /// Alternative run mode: all inter-arrival gaps are drawn up front
    /// (including one for the first client, which therefore arrives at a
    /// drawn offset rather than at time zero) and FIFO service is then laid
    /// out sequentially with `start = max(arrival, previous departure)`.
    ///
    /// This ignores the arrival/service event interleaving of [`run`](Self::run)
    /// and produces systematically different arrival statistics; it is kept
    /// as an explicitly separate mode for comparison studies.
    #[instrument(skip(self), fields(clients = self.params.clients))]
    pub fn run_independent_arrivals(&mut self) -> &EventHistory {
        if self.completed {
            debug!("run already completed; call reset() to run again");
            return &self.history;
        }

        let clients = self.params.clients;
        let mut arrival = 0.0;
        for ordinal in 0..clients {
            arrival += self.arrivals.next();
            self.history.record_arrival(ordinal, arrival);
        }

        let mut previous_departure = 0.0;
        for ordinal in 0..clients {
            let start = self.history.arrival()[ordinal].max(previous_departure);
            self.history.record_service_start(ordinal, start);
            previous_departure = start + self.service.next();
            self.history.record_departure(ordinal, previous_departure);
        }

        self.state.arrived = Some(clients - 1);
        self.state.in_service = Some(clients - 1);
        self.state.clock = previous_departure;
        self.state.next_arrival = INFINITE_TIME;
        self.state.next_departure = INFINITE_TIME;
        self.completed = true;
        debug!(final_time = self.state.clock, "independent-arrival run completed");
        &self.history
    }

    /// Arrival branch: the next event is a client arrival.
    fn arrive(&mut self) {
        self.state.clock = self.state.next_arrival;
        let ordinal = self.state.arrived.map_or(0, |last| last + 1);
        self.state.arrived = Some(ordinal);
        self.history.record_arrival(ordinal, self.state.clock);
        trace!(ordinal, clock = self.state.clock, "client arrived");

        if ordinal + 1 == self.params.clients {
            // Capacity reached: no further arrivals are scheduled.
            self.state.next_arrival = INFINITE_TIME;
        } else {
            self.state.next_arrival = self.state.clock + self.arrivals.next();
        }

        if self.state.next_departure == INFINITE_TIME {
            // Idle server: this client is admitted immediately.
            self.admit_next();
        }
    }

    /// Departure branch: the in-service client finishes before the next
    /// arrival.
    fn depart(&mut self) {
        self.state.clock = self.state.next_departure;
        if let Some(serving) = self.state.in_service {
            self.history.record_departure(serving, self.state.clock);
            trace!(ordinal = serving, clock = self.state.clock, "client departed");
        }
        if self.state.client_waiting() {
            self.admit_next();
        } else {
            self.state.next_departure = INFINITE_TIME;
        }
    }

    /// Moves the next waiting client onto the server at the current clock.
    fn admit_next(&mut self) {
        let ordinal = self.state.in_service.map_or(0, |last| last + 1);
        self.state.in_service = Some(ordinal);
        self.history.record_service_start(ordinal, self.state.clock);
        self.state.next_departure = self.state.clock + self.service.next();
        trace!(
            ordinal,
            clock = self.state.clock,
            departs_at = self.state.next_departure,
            "service started"
        );
    }
}

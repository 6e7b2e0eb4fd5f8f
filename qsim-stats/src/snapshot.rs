//! Simulated-vs-theoretical statistics for one completed run
//!
//! The snapshot reproduces the moment-matched estimators of the original
//! queue study this engine models: the inter-arrival variance is recovered by
//! fitting an exponential shape to the simulated mean (`1/rate²` with
//! `rate = 1/mean`), and the service variance by fitting a triangular shape
//! to the simulated mean/min/max (`mode = 3·mean − min − max`). Neither is a
//! direct sample variance; the [`SampleMoments`] fields carry the rigorous
//! direct estimates for callers that want them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qsim_core::{EventHistory, Moments};

use crate::error::StatsError;

/// One simulated figure paired with its theoretical counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub theoretical: f64,
    pub simulated: f64,
}

impl Estimate {
    pub fn new(theoretical: f64, simulated: f64) -> Self {
        Self {
            theoretical,
            simulated,
        }
    }

    /// `|theoretical − simulated|`.
    pub fn absolute_error(&self) -> f64 {
        (self.theoretical - self.simulated).abs()
    }

    /// `100 · absolute_error / theoretical`. Yields the raw IEEE quotient —
    /// NaN or infinite — when the theoretical value is zero; callers that
    /// need a guard should use [`try_percent_error`](Self::try_percent_error).
    pub fn percent_error(&self) -> f64 {
        self.absolute_error() * 100.0 / self.theoretical
    }

    /// Guarded percent error.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::UndefinedPercentError`] when the theoretical
    /// value is zero.
    pub fn try_percent_error(&self) -> Result<f64, StatsError> {
        if self.theoretical == 0.0 {
            Err(StatsError::UndefinedPercentError)
        } else {
            Ok(self.percent_error())
        }
    }
}

/// Direct sample moments, the rigorous alternative to the moment-matched
/// figures. Variance uses the unbiased `n − 1` denominator and is zero for
/// fewer than two samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleMoments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl SampleMoments {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        if samples.len() < 2 {
            return Self {
                mean,
                variance: 0.0,
                std_dev: 0.0,
            };
        }
        let variance = samples
            .iter()
            .map(|&x| (x - mean) * (x - mean))
            .sum::<f64>()
            / (n - 1.0);
        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Statistics derived from one completed [`EventHistory`], paired with the
/// theoretical moments of the generators that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub arrival_mean: Estimate,
    pub arrival_variance: Estimate,
    pub arrival_std_dev: Estimate,
    pub service_min: Estimate,
    pub service_max: Estimate,
    pub service_mean: Estimate,
    pub service_variance: Estimate,
    pub service_std_dev: Estimate,
    /// Direct sample moments of the inter-arrival gaps.
    pub arrival_sample: SampleMoments,
    /// Direct sample moments of the service durations.
    pub service_sample: SampleMoments,
}

impl StatisticsSnapshot {
    /// Computes the snapshot for a completed history.
    ///
    /// `arrival_theory` and `service_theory` are the generators' theoretical
    /// moments; `service_bound_min`/`service_bound_max` are the triangular
    /// `a` and `b` parameters, paired against the simulated extrema.
    ///
    /// This is a pure function of its inputs: callers wanting compute-once
    /// semantics should hold the result in a [`StatsRecorder`].
    pub fn compute(
        history: &EventHistory,
        arrival_theory: Moments,
        service_theory: Moments,
        service_bound_min: f64,
        service_bound_max: f64,
    ) -> Self {
        let n = history.capacity();
        if n == 0 {
            // An empty history never comes out of the simulator, but it is
            // constructible; keep every simulated figure at zero instead of
            // propagating NaN.
            return Self {
                arrival_mean: Estimate::new(arrival_theory.mean, 0.0),
                arrival_variance: Estimate::new(arrival_theory.variance, 0.0),
                arrival_std_dev: Estimate::new(arrival_theory.std_dev, 0.0),
                service_min: Estimate::new(service_bound_min, 0.0),
                service_max: Estimate::new(service_bound_max, 0.0),
                service_mean: Estimate::new(service_theory.mean, 0.0),
                service_variance: Estimate::new(service_theory.variance, 0.0),
                service_std_dev: Estimate::new(service_theory.std_dev, 0.0),
                arrival_sample: SampleMoments::default(),
                service_sample: SampleMoments::default(),
            };
        }
        let arrival = history.arrival();

        // Simulated mean inter-arrival gap: the gap sum divided by the
        // client count (one fewer gap than clients; the divisor matches the
        // modeled estimator, not the gap count).
        let mut mean_gap = 0.0;
        for i in 1..n {
            mean_gap += arrival[i] - arrival[i - 1];
        }
        mean_gap /= n as f64;

        // Exponential moment-matching: variance recovered from the simulated
        // mean, not from the gap samples.
        let var_gap = if mean_gap == 0.0 {
            0.0
        } else {
            let rate = 1.0 / mean_gap;
            1.0 / (rate * rate)
        };
        let sd_gap = var_gap.sqrt();

        let durations = history.service_durations();
        let mean_service = durations.iter().sum::<f64>() / n as f64;
        let min_service = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max_service = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Triangular moment-matching from the simulated mean and extrema.
        let mode = 3.0 * mean_service - min_service - max_service;
        let var_service = ((max_service - min_service) * (max_service - min_service)
            - (mode - min_service) * (max_service - mode))
            / 18.0;
        let sd_service = var_service.sqrt();

        // Direct sample moments over the actual per-client samples; the gap
        // series excludes the first client (no predecessor).
        let gaps: Vec<f64> = (1..n).map(|i| arrival[i] - arrival[i - 1]).collect();

        debug!(
            clients = n,
            mean_gap,
            mean_service,
            "computed statistics snapshot"
        );

        Self {
            arrival_mean: Estimate::new(arrival_theory.mean, mean_gap),
            arrival_variance: Estimate::new(arrival_theory.variance, var_gap),
            arrival_std_dev: Estimate::new(arrival_theory.std_dev, sd_gap),
            service_min: Estimate::new(service_bound_min, min_service),
            service_max: Estimate::new(service_bound_max, max_service),
            service_mean: Estimate::new(service_theory.mean, mean_service),
            service_variance: Estimate::new(service_theory.variance, var_service),
            service_std_dev: Estimate::new(service_theory.std_dev, sd_service),
            arrival_sample: SampleMoments::from_samples(&gaps),
            service_sample: SampleMoments::from_samples(&durations),
        }
    }
}

/// Compute-once holder for a run's snapshot.
///
/// The cache is explicit: the first [`snapshot`](Self::snapshot) call
/// computes, later calls return the stored value, and [`reset`](Self::reset)
/// must be called before statistics for a different run (or different
/// parameters) are wanted.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    cached: Option<StatisticsSnapshot>,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot, computing it on first use.
    pub fn snapshot(
        &mut self,
        history: &EventHistory,
        arrival_theory: Moments,
        service_theory: Moments,
        service_bound_min: f64,
        service_bound_max: f64,
    ) -> &StatisticsSnapshot {
        self.cached.get_or_insert_with(|| {
            StatisticsSnapshot::compute(
                history,
                arrival_theory,
                service_theory,
                service_bound_min,
                service_bound_max,
            )
        })
    }

    /// The cached snapshot, if one has been computed since the last reset.
    pub fn cached(&self) -> Option<&StatisticsSnapshot> {
        self.cached.as_ref()
    }

    /// Drops the cached snapshot so the next call recomputes.
    pub fn reset(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::EventHistory;

    fn three_client_history() -> EventHistory {
        // Gaps 2, 2; durations 3, 3, 3.
        EventHistory::from_series(
            vec![0.0, 2.0, 4.0],
            vec![0.0, 3.0, 6.0],
            vec![3.0, 6.0, 9.0],
        )
    }

    fn snapshot() -> StatisticsSnapshot {
        StatisticsSnapshot::compute(
            &three_client_history(),
            Moments::exponential(1.0),
            Moments::triangular(0.0, 3.0, 6.0),
            0.0,
            6.0,
        )
    }

    #[test]
    fn mean_gap_divides_by_client_count() {
        let snap = snapshot();
        // (2 + 2) / 3, not / 2.
        assert!((snap.arrival_mean.simulated - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn arrival_variance_is_moment_matched() {
        let snap = snapshot();
        // Exponential shape fitted to the simulated mean: var = mean².
        let mean = snap.arrival_mean.simulated;
        assert!((snap.arrival_variance.simulated - mean * mean).abs() < 1e-12);
        assert!((snap.arrival_std_dev.simulated - mean).abs() < 1e-12);
        // The direct sample variance of [2, 2] is 0 and clearly differs.
        assert_eq!(snap.arrival_sample.variance, 0.0);
        assert!((snap.arrival_sample.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn service_statistics_match_the_triangular_fit() {
        let snap = snapshot();
        assert_eq!(snap.service_mean.simulated, 3.0);
        assert_eq!(snap.service_min.simulated, 3.0);
        assert_eq!(snap.service_max.simulated, 3.0);
        // Degenerate fit: min = max = mean collapses the variance to zero.
        assert_eq!(snap.service_variance.simulated, 0.0);
        assert_eq!(snap.service_std_dev.simulated, 0.0);
        assert_eq!(snap.service_sample.variance, 0.0);
    }

    #[test]
    fn service_variance_uses_the_recovered_mode() {
        let history = EventHistory::from_series(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 2.0, 5.0, 9.0],
            vec![2.0, 5.0, 9.0, 10.0],
        );
        let snap = StatisticsSnapshot::compute(
            &history,
            Moments::exponential(1.0),
            Moments::triangular(0.0, 3.0, 6.0),
            0.0,
            6.0,
        );
        // Durations 2, 3, 4, 1: mean 2.5, min 1, max 4, mode 3·2.5 − 1 − 4.
        let (mean, min, max) = (2.5, 1.0, 4.0);
        let mode = 3.0 * mean - min - max;
        let expected = ((max - min) * (max - min) - (mode - min) * (max - mode)) / 18.0;
        assert!((snap.service_variance.simulated - expected).abs() < 1e-12);
        assert!((snap.service_std_dev.simulated - expected.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn errors_are_nonnegative_and_exact() {
        let snap = snapshot();
        for estimate in [
            snap.arrival_mean,
            snap.arrival_variance,
            snap.arrival_std_dev,
            snap.service_min,
            snap.service_max,
            snap.service_mean,
            snap.service_variance,
            snap.service_std_dev,
        ] {
            let error = estimate.absolute_error();
            assert!(error >= 0.0);
            assert_eq!(error, (estimate.theoretical - estimate.simulated).abs());
        }
    }

    #[test]
    fn percent_error_against_zero_theory_is_guarded() {
        let undefined = Estimate::new(0.0, 1.0);
        assert!(undefined.percent_error().is_infinite());
        assert!(matches!(
            undefined.try_percent_error(),
            Err(StatsError::UndefinedPercentError)
        ));

        let defined = Estimate::new(2.0, 1.5);
        assert!((defined.percent_error() - 25.0).abs() < 1e-12);
        assert!((defined.try_percent_error().unwrap() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn single_client_run_has_no_arrival_statistic() {
        let history = EventHistory::from_series(vec![0.0], vec![0.0], vec![4.0]);
        let snap = StatisticsSnapshot::compute(
            &history,
            Moments::exponential(1.0),
            Moments::triangular(0.0, 3.0, 6.0),
            0.0,
            6.0,
        );
        // No gap exists: the arrival figures stay at zero while the service
        // figures populate.
        assert_eq!(snap.arrival_mean.simulated, 0.0);
        assert_eq!(snap.arrival_variance.simulated, 0.0);
        assert_eq!(snap.arrival_sample, SampleMoments::default());
        assert_eq!(snap.service_mean.simulated, 4.0);
        assert_eq!(snap.service_min.simulated, 4.0);
        assert_eq!(snap.service_max.simulated, 4.0);
    }

    #[test]
    fn empty_history_yields_zeroed_figures() {
        let history = EventHistory::from_series(vec![], vec![], vec![]);
        let snap = StatisticsSnapshot::compute(
            &history,
            Moments::exponential(1.0),
            Moments::triangular(0.0, 3.0, 6.0),
            0.0,
            6.0,
        );
        assert_eq!(snap.service_mean.simulated, 0.0);
        assert_eq!(snap.service_min.simulated, 0.0);
        assert_eq!(snap.arrival_mean.simulated, 0.0);
        assert!(snap.service_variance.simulated == 0.0);
        // Theoretical figures are still carried through.
        assert_eq!(snap.service_mean.theoretical, 3.0);
    }

    #[test]
    fn recorder_computes_once_until_reset() {
        let history = three_client_history();
        let arrival_theory = Moments::exponential(1.0);
        let service_theory = Moments::triangular(0.0, 3.0, 6.0);

        let mut recorder = StatsRecorder::new();
        assert!(recorder.cached().is_none());

        let first = *recorder.snapshot(&history, arrival_theory, service_theory, 0.0, 6.0);

        // A different history without a reset is ignored: the cache wins.
        let other = EventHistory::from_series(
            vec![0.0, 5.0],
            vec![0.0, 5.0],
            vec![1.0, 6.0],
        );
        let second = *recorder.snapshot(&other, arrival_theory, service_theory, 0.0, 6.0);
        assert_eq!(first, second);

        recorder.reset();
        let third = *recorder.snapshot(&other, arrival_theory, service_theory, 0.0, 6.0);
        assert_ne!(first, third);
    }

    #[test]
    fn sample_moments_use_the_unbiased_denominator() {
        let moments = SampleMoments::from_samples(&[1.0, 3.0]);
        assert_eq!(moments.mean, 2.0);
        assert_eq!(moments.variance, 2.0);
        assert!((moments.std_dev - 2.0f64.sqrt()).abs() < 1e-12);

        assert_eq!(SampleMoments::from_samples(&[]), SampleMoments::default());
        assert_eq!(SampleMoments::from_samples(&[5.0]).variance, 0.0);
    }
}

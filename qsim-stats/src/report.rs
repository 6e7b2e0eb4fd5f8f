//! Console report rendering for a completed run
//!
//! Each block is a thin `Display` adapter over the snapshot or history, so
//! drivers can `println!` them directly or collect them into strings.

use std::fmt;

use qsim_core::EventHistory;

use crate::snapshot::{Estimate, StatisticsSnapshot};

/// Theoretical moments of the active generators.
pub struct TheoreticalValues<'a>(pub &'a StatisticsSnapshot);

impl fmt::Display for TheoreticalValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "[THEORETICAL VALUES]")?;
        writeln!(f, " 1- Mean inter-arrival time: \t{} min", s.arrival_mean.theoretical)?;
        writeln!(f, " 2- Variance inter-arrival:  \t{} min^2", s.arrival_variance.theoretical)?;
        writeln!(f, " 3- Std dev inter-arrival:   \t{} min", s.arrival_std_dev.theoretical)?;
        writeln!(f, " 4- Maximum service time:    \t{} min", s.service_max.theoretical)?;
        writeln!(f, " 5- Mean service time:       \t{} min", s.service_mean.theoretical)?;
        writeln!(f, " 6- Variance service time:   \t{} min^2", s.service_variance.theoretical)?;
        write!(f, " 7- Std dev service time:    \t{} min", s.service_std_dev.theoretical)
    }
}

/// Moments measured from the simulated history.
pub struct SimulatedValues<'a>(pub &'a StatisticsSnapshot);

impl fmt::Display for SimulatedValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "[SIMULATED VALUES]")?;
        writeln!(f, " 1- Mean inter-arrival time: \t{} min", s.arrival_mean.simulated)?;
        writeln!(f, " 2- Variance inter-arrival:  \t{} min^2", s.arrival_variance.simulated)?;
        writeln!(f, " 3- Std dev inter-arrival:   \t{} min", s.arrival_std_dev.simulated)?;
        writeln!(f, " 4- Maximum service time:    \t{} min", s.service_max.simulated)?;
        writeln!(f, " 5- Mean service time:       \t{} min", s.service_mean.simulated)?;
        writeln!(f, " 6- Variance service time:   \t{} min^2", s.service_variance.simulated)?;
        write!(f, " 7- Std dev service time:    \t{} min", s.service_std_dev.simulated)
    }
}

/// Absolute and percent errors between the two.
pub struct ErrorValues<'a>(pub &'a StatisticsSnapshot);

fn write_error_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    unit: &str,
    estimate: Estimate,
) -> fmt::Result {
    write!(f, " {label}\t{} {unit}", estimate.absolute_error())?;
    match estimate.try_percent_error() {
        Ok(percent) => writeln!(f, "\t[{percent} %]"),
        Err(_) => writeln!(f, "\t[n/a]"),
    }
}

impl fmt::Display for ErrorValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "[RELATIVE ERRORS]")?;
        write_error_line(f, "1- Mean inter-arrival error: ", "min", s.arrival_mean)?;
        write_error_line(f, "2- Variance inter-arrival error:", "min^2", s.arrival_variance)?;
        write_error_line(f, "3- Std dev inter-arrival error:", "min", s.arrival_std_dev)?;
        write_error_line(f, "4- Maximum service time error:", "min", s.service_max)?;
        write_error_line(f, "5- Mean service time error:  ", "min", s.service_mean)?;
        write_error_line(f, "6- Variance service time error:", "min^2", s.service_variance)?;
        write_error_line(f, "7- Std dev service time error:", "min", s.service_std_dev)
    }
}

/// The per-client event table, tab-separated with 1-based client labels.
pub struct HistoryTable<'a>(pub &'a EventHistory);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Client\tArrival Time (min)\tServing Time (min)\tLeaving Time (min)"
        )?;
        writeln!(
            f,
            "------\t------------------\t------------------\t------------------"
        )?;
        for record in self.0.records() {
            writeln!(
                f,
                "[{}]\t{}\t{}\t{}",
                record.ordinal + 1,
                record.arrival,
                record.service_start,
                record.departure
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::Moments;

    fn snapshot() -> StatisticsSnapshot {
        let history = EventHistory::from_series(
            vec![0.0, 2.0, 4.0],
            vec![0.0, 3.0, 6.0],
            vec![3.0, 6.0, 9.0],
        );
        StatisticsSnapshot::compute(
            &history,
            Moments::exponential(1.0),
            Moments::triangular(0.0, 3.0, 6.0),
            0.0,
            6.0,
        )
    }

    #[test]
    fn blocks_render_their_headers_and_lines() {
        let snap = snapshot();
        let theoretical = TheoreticalValues(&snap).to_string();
        assert!(theoretical.starts_with("[THEORETICAL VALUES]"));
        assert_eq!(theoretical.lines().count(), 8);

        let simulated = SimulatedValues(&snap).to_string();
        assert!(simulated.starts_with("[SIMULATED VALUES]"));
        assert!(simulated.contains("Mean service time"));

        let errors = ErrorValues(&snap).to_string();
        assert!(errors.starts_with("[RELATIVE ERRORS]"));
        assert!(errors.contains('%'));
    }

    #[test]
    fn history_table_labels_clients_from_one() {
        let history = EventHistory::from_series(
            vec![0.0, 1.5],
            vec![0.0, 2.0],
            vec![2.0, 3.5],
        );
        let table = HistoryTable(&history).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Client\t"));
        assert!(lines[2].starts_with("[1]\t0\t"));
        assert!(lines[3].starts_with("[2]\t1.5\t"));
    }
}

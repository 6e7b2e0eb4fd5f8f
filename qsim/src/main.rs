//! Interactive driver for the queue simulator.
//!
//! Collects the queue parameters from stdin (or a JSON config file), runs the
//! simulation, prints the stochastic history and the statistics report, and
//! writes the tab-separated report file.
//!
//! Usage: `qsim [report-file] [--config params.json]`

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use tracing::info;

use qsim::prelude::*;

const DEFAULT_REPORT_FILE: &str = "simqueue.csv";

fn main() -> Result<(), Box<dyn Error>> {
    qsim::init_logging("info");

    let args = CliArgs::parse(env::args().skip(1))?;

    println!("\nqsim: a queue simulator based on stochastic time events.\n");

    let params = match &args.config {
        Some(path) => load_params(path)?,
        None => prompt_params()?,
    };

    let mut sim = SimQueue::new(params)?;
    let started = Instant::now();
    sim.run();
    let elapsed = started.elapsed();

    let mut recorder = StatsRecorder::new();
    let snapshot = *recorder.snapshot(
        sim.history(),
        sim.arrival_moments(),
        sim.service_moments(),
        params.service_min,
        params.service_max,
    );

    println!("\nStochastic generation of Arrival/Service/Leaving times for this simulated queue (FIFO):\n");
    println!("{}", HistoryTable(sim.history()));
    println!("{}\n", TheoreticalValues(&snapshot));
    println!("{}\n", SimulatedValues(&snapshot));
    println!("{}", ErrorValues(&snapshot));
    println!(
        "Running time of the simulation: {} min {} s {} ms",
        elapsed.as_secs() / 60,
        elapsed.as_secs() % 60,
        elapsed.subsec_millis()
    );

    let exporter = TsvExporter::new(Path::new(&args.report_file));
    exporter.export(sim.history(), &snapshot)?;
    info!(path = %args.report_file, "report written");

    Ok(())
}

struct CliArgs {
    report_file: String,
    config: Option<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
        let mut report_file = DEFAULT_REPORT_FILE.to_string();
        let mut config = None;
        while let Some(arg) = args.next() {
            if arg == "--config" {
                config = Some(
                    args.next()
                        .ok_or("--config requires a path to a JSON parameter file")?,
                );
            } else {
                report_file = arg;
            }
        }
        Ok(Self {
            report_file,
            config,
        })
    }
}

/// Loads parameters from a JSON file and re-validates them.
fn load_params(path: &str) -> Result<QueueParameters, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let params: QueueParameters = serde_json::from_str(&contents)?;
    params.validate()?;
    info!(path, "loaded parameters from config file");
    Ok(params)
}

/// Collects parameters interactively. The arrival rate is entered as clients
/// per hour and converted to a per-minute rate; the shortest service time is
/// fixed at zero.
fn prompt_params() -> Result<QueueParameters, Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let clients: usize = prompt(&mut lines, "Number of clients to simulate: ")?;
    let per_hour: f64 = prompt(&mut lines, "Mean number of clients per hour: ")?;
    let mode: f64 = prompt(&mut lines, "Most common service time [min] (the mode): ")?;
    let longest: f64 = prompt(&mut lines, "Longest service time [min]: ")?;

    Ok(QueueParameters::new(
        clients,
        per_hour / 60.0,
        0.0,
        mode,
        longest,
    )?)
}

fn prompt<T>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    print!("{label}");
    io::stdout().flush()?;
    let line = lines.next().ok_or("no input available")??;
    Ok(line.trim().parse::<T>()?)
}

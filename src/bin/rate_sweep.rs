//! Rate sensitivity sweep over a base schedule
//!
//! Applies a grid of parallel shifts (in percentage points) to every
//! segment rate of a base schedule, solves each shifted schedule, and
//! writes a CSV summary of the solved payments. Shifts that push a rate
//! negative, or schedules that fail to converge, produce rows with blank
//! payment columns.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use irate::{parse_rate_year_pairs, solve, LoanSchedule, SolverConfig};

#[derive(Parser, Debug)]
#[command(
    name = "rate_sweep",
    about = "Solve a schedule under a grid of parallel interest rate shifts"
)]
struct Cli {
    /// Initial credit amount
    principal: f64,

    /// Alternating RATE YEARS pairs: interest rate in percent, duration in
    /// whole years
    #[arg(required = true, num_args = 2..)]
    terms: Vec<f64>,

    /// Lowest rate shift in percentage points
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    from: f64,

    /// Highest rate shift in percentage points
    #[arg(long, default_value_t = 1.0)]
    to: f64,

    /// Number of grid points between --from and --to (inclusive)
    #[arg(long, default_value_t = 21)]
    steps: u32,

    /// Output CSV path
    #[arg(long, default_value = "rate_sweep.csv")]
    output: PathBuf,
}

/// One line of the sweep summary
#[derive(Debug, Serialize)]
struct SweepRow {
    /// Parallel shift applied to every segment rate, percentage points
    shift_pct: f64,
    /// Solved monthly payment, blank if the shifted schedule failed
    monthly_payment: Option<f64>,
    /// Total payments over the full runtime, blank on failure
    total_payments: Option<f64>,
}

fn sweep_row(principal: f64, pairs: &[(f64, u32)], shift_pct: f64) -> SweepRow {
    let shifted: Vec<(f64, u32)> = pairs
        .iter()
        .map(|&(rate, years)| (rate + shift_pct, years))
        .collect();

    let solution = LoanSchedule::from_percent_pairs(principal, &shifted)
        .and_then(|schedule| solve(&schedule, &SolverConfig::default()));

    match solution {
        Ok(solution) => SweepRow {
            shift_pct,
            monthly_payment: Some(solution.monthly_payment),
            total_payments: Some(solution.total_payments),
        },
        Err(err) => {
            log::warn!("shift {shift_pct:+.2} pp failed: {err}");
            SweepRow {
                shift_pct,
                monthly_payment: None,
                total_payments: None,
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.steps < 2 {
        bail!("need at least 2 grid points");
    }

    let pairs = parse_rate_year_pairs(&cli.terms)?;

    let step = (cli.to - cli.from) / (cli.steps - 1) as f64;
    let shifts: Vec<f64> = (0..cli.steps)
        .map(|i| cli.from + step * i as f64)
        .collect();

    println!("Sweeping {} shifts over [{}, {}] pp...", cli.steps, cli.from, cli.to);
    let start = Instant::now();

    let rows: Vec<SweepRow> = shifts
        .par_iter()
        .map(|&shift| sweep_row(cli.principal, &pairs, shift))
        .collect();

    println!("Sweep complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", cli.output.display());
    Ok(())
}

//! Command line payment solver
//!
//! Usage mirrors the classic invocation:
//!
//!     irate INITIAL_CREDIT RATE1 YEARS1 [RATE2 YEARS2]*
//!
//! Rates are given in percent. Prints the text report, or the solution as
//! JSON with `--json`; `--monthly-csv` additionally writes the full
//! month-by-month projection at the solved payment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use irate::projection::project_monthly;
use irate::{parse_rate_year_pairs, solve, LoanSchedule, SolverConfig};

#[derive(Parser, Debug)]
#[command(
    name = "irate",
    about = "Compute the constant monthly payment that fully amortizes a multi-period credit"
)]
struct Cli {
    /// Initial credit amount
    principal: f64,

    /// Alternating RATE YEARS pairs: interest rate in percent, duration in
    /// whole years
    #[arg(required = true, num_args = 2..)]
    terms: Vec<f64>,

    /// Print the solution as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the month-by-month projection at the solved payment to a CSV
    /// file
    #[arg(long, value_name = "PATH")]
    monthly_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let pairs = parse_rate_year_pairs(&cli.terms)?;
    let schedule = LoanSchedule::from_percent_pairs(cli.principal, &pairs)
        .context("invalid schedule")?;

    let solution =
        solve(&schedule, &SolverConfig::default()).context("failed to solve schedule")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print!("{solution}");
    }

    if let Some(path) = &cli.monthly_csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for row in project_monthly(&schedule, solution.monthly_payment) {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    Ok(())
}

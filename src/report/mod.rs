//! Per-period reporting on top of the solved payment
//!
//! After the payment is solved, the schedule is replayed segment by
//! segment to capture each period's starting balance, the interest share
//! of its first instalment and the balance left when it ends.

use std::fmt;

use serde::Serialize;

use crate::error::SolveError;
use crate::projection::{project_segment, MONTHS_PER_YEAR};
use crate::schedule::LoanSchedule;
use crate::solver::{solve_payment, SolverConfig};

/// Statistics for one segment of the solved schedule
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodTrace {
    /// Period number (1-based)
    pub index: usize,
    /// Years left on the whole schedule when this period starts
    pub years_remaining_at_start: u32,
    /// Duration of the period in years
    pub years: u32,
    /// Annual interest rate of the period (fraction)
    pub annual_rate: f64,
    /// Fraction of the period's first instalment that is interest
    pub initial_interest_share: f64,
    /// Balance remaining when the period ends
    pub ending_balance: f64,
}

/// Complete solve output: payment, totals and the per-period trace
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Initial credit amount
    pub principal: f64,
    /// Solved constant monthly payment
    pub monthly_payment: f64,
    /// Total runtime across all segments in years
    pub total_runtime_years: u32,
    /// Sum of all instalments over the full runtime
    pub total_payments: f64,
    /// One trace entry per segment, in schedule order
    pub periods: Vec<PeriodTrace>,
}

/// Solve a schedule and build the full per-period report.
pub fn solve(schedule: &LoanSchedule, config: &SolverConfig) -> Result<Solution, SolveError> {
    let solved = solve_payment(schedule, config)?;
    let payment = solved.payment;

    let total_runtime_years = schedule.total_years();
    let total_payments = payment * MONTHS_PER_YEAR as f64 * total_runtime_years as f64;

    let mut periods = Vec::with_capacity(schedule.segments.len());
    let mut balance = schedule.principal;
    let mut passed_years = 0u32;

    for (i, segment) in schedule.segments.iter().enumerate() {
        let start_balance = balance;
        balance = project_segment(balance, payment, segment.annual_rate, segment.years);

        periods.push(PeriodTrace {
            index: i + 1,
            years_remaining_at_start: total_runtime_years - passed_years,
            years: segment.years,
            annual_rate: segment.annual_rate,
            initial_interest_share: (start_balance * segment.annual_rate
                / MONTHS_PER_YEAR as f64)
                / payment,
            ending_balance: balance,
        });

        passed_years += segment.years;
    }

    Ok(Solution {
        principal: schedule.principal,
        monthly_payment: payment,
        total_runtime_years,
        total_payments,
        periods,
    })
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial Credit: {:.2}", self.principal)?;
        writeln!(
            f,
            "Computed Monthly Rate: {:.2} over {} years",
            self.monthly_payment, self.total_runtime_years
        )?;
        writeln!(
            f,
            "Total Payments: {:.2} ({:.2} % of Initial Credit)",
            self.total_payments,
            100.0 * self.total_payments / self.principal
        )?;

        for period in &self.periods {
            writeln!(f, "Period {}:", period.index)?;
            writeln!(
                f,
                "  Years Remaining at Beginning: {}",
                period.years_remaining_at_start
            )?;
            writeln!(f, "  Duration: {} years", period.years)?;
            writeln!(f, "  Interest Rate: {:.2} %", period.annual_rate * 100.0)?;
            writeln!(
                f,
                "  Initial Share of Interest in Instalments: {:.2} %",
                period.initial_interest_share * 100.0
            )?;
            writeln!(
                f,
                "  Remaining Credit after Period: {:.2}",
                period.ending_balance
            )?;
        }

        Ok(())
    }
}

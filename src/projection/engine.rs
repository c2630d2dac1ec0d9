//! Balance projection for single segments and full schedules

use crate::schedule::LoanSegment;

use super::MONTHS_PER_YEAR;

/// Project a single segment's ending balance.
///
/// Each year, interest accrues month by month on the declining balance
/// (`balance * annual_rate / 12`) while the payment is subtracted, and
/// the accrued year of interest is credited back in one lump at year end.
/// This ordering is the contractual model of the tool: principal is
/// reduced by the flat payment before the year's interest lands.
///
/// A duration of zero years returns the input balance unchanged.
pub fn project_segment(
    start_balance: f64,
    monthly_payment: f64,
    annual_rate: f64,
    years: u32,
) -> f64 {
    let mut balance = start_balance;

    for _ in 0..years {
        let mut yearly_interest = 0.0;
        for _ in 0..MONTHS_PER_YEAR {
            yearly_interest += balance * annual_rate / MONTHS_PER_YEAR as f64;
            balance -= monthly_payment;
        }
        balance += yearly_interest;
    }

    balance
}

/// Project a full schedule: fold segments left to right, each segment's
/// ending balance feeding the next segment's start. The payment is
/// constant across all segments.
pub fn project_schedule(principal: f64, monthly_payment: f64, segments: &[LoanSegment]) -> f64 {
    segments.iter().fold(principal, |balance, segment| {
        project_segment(balance, monthly_payment, segment.annual_rate, segment.years)
    })
}

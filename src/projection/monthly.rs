//! Month-by-month projection rows for detailed output

use serde::Serialize;

use crate::schedule::LoanSchedule;

use super::MONTHS_PER_YEAR;

/// One simulated month of a schedule projection.
///
/// `interest_credited` is zero except on year-end rows, where the whole
/// year's accrued interest lands as a lump sum.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthRow {
    /// Month counter across the whole schedule (1-based)
    pub month: u32,
    /// Annual rate of the segment this month belongs to (fraction)
    pub annual_rate: f64,
    /// Balance at the beginning of the month
    pub bop_balance: f64,
    /// Monthly payment applied
    pub payment: f64,
    /// Interest credited at the end of this month (year-end months only)
    pub interest_credited: f64,
    /// Balance at the end of the month
    pub eop_balance: f64,
}

/// Replay the schedule projection month by month at a fixed payment.
///
/// Performs the exact arithmetic of [`super::project_schedule`], so the
/// last row's `eop_balance` matches its return value bit-for-bit.
pub fn project_monthly(schedule: &LoanSchedule, monthly_payment: f64) -> Vec<MonthRow> {
    let mut rows = Vec::with_capacity(schedule.total_years() as usize * 12);
    let mut balance = schedule.principal;
    let mut month = 0u32;

    for segment in &schedule.segments {
        for _ in 0..segment.years {
            let mut yearly_interest = 0.0;
            for month_in_year in 1..=MONTHS_PER_YEAR {
                month += 1;
                let bop_balance = balance;
                yearly_interest += balance * segment.annual_rate / MONTHS_PER_YEAR as f64;
                balance -= monthly_payment;

                let interest_credited = if month_in_year == MONTHS_PER_YEAR {
                    balance += yearly_interest;
                    yearly_interest
                } else {
                    0.0
                };

                rows.push(MonthRow {
                    month,
                    annual_rate: segment.annual_rate,
                    bop_balance,
                    payment: monthly_payment,
                    interest_credited,
                    eop_balance: balance,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_schedule;

    fn schedule() -> LoanSchedule {
        LoanSchedule::from_percent_pairs(500_000.0, &[(1.0, 5), (2.0, 10), (3.5, 10)])
            .unwrap()
    }

    #[test]
    fn test_row_count_and_numbering() {
        let rows = project_monthly(&schedule(), 2000.0);
        assert_eq!(rows.len(), 25 * 12);
        assert_eq!(rows.first().unwrap().month, 1);
        assert_eq!(rows.last().unwrap().month, 300);
    }

    #[test]
    fn test_interest_credited_only_at_year_end() {
        let rows = project_monthly(&schedule(), 2000.0);
        for row in &rows {
            if row.month % 12 == 0 {
                assert!(row.interest_credited > 0.0);
            } else {
                assert_eq!(row.interest_credited, 0.0);
            }
        }
    }

    #[test]
    fn test_final_balance_matches_engine() {
        let s = schedule();
        let payment = 2073.36;
        let rows = project_monthly(&s, payment);
        let end = project_schedule(s.principal, payment, &s.segments);
        assert_eq!(rows.last().unwrap().eop_balance, end);
    }

    #[test]
    fn test_rows_chain() {
        let rows = project_monthly(&schedule(), 2000.0);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].eop_balance, pair[1].bop_balance);
        }
    }

    #[test]
    fn test_segment_rate_carried_on_rows() {
        let rows = project_monthly(&schedule(), 2000.0);
        assert_eq!(rows[0].annual_rate, 0.01);
        assert_eq!(rows[5 * 12].annual_rate, 0.02);
        assert_eq!(rows[15 * 12].annual_rate, 0.035);
    }
}

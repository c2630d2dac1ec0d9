//! Loan payment solver for multi-period credits
//!
//! Given an initial principal and an ordered sequence of
//! (annual interest rate, duration in years) segments, this library finds
//! the single constant monthly payment that drives the outstanding balance
//! to zero at the end of the last segment, then reports per-period
//! statistics (remaining balance, interest share, totals).
//!
//! The library provides:
//! - A deterministic amortization engine with monthly payments and
//!   year-end interest reconciliation
//! - A derivative-free Newton solver for the monthly payment
//! - A per-period trace builder and formatted report

pub mod error;
pub mod projection;
pub mod report;
pub mod schedule;
pub mod solver;

// Re-export commonly used types
pub use error::SolveError;
pub use report::{solve, PeriodTrace, Solution};
pub use schedule::{parse_rate_year_pairs, LoanSchedule, LoanSegment};
pub use solver::{solve_payment, SolvedPayment, SolverConfig};

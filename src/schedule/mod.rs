//! Loan schedule data structures and validation

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// One sub-period of a loan with a fixed annual interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSegment {
    /// Annual interest rate as a fraction (0.025 = 2.5%)
    pub annual_rate: f64,

    /// Duration of the segment in whole years
    pub years: u32,
}

impl LoanSegment {
    /// Create a segment from a percent rate (2.5 for 2.5%) and duration
    pub fn from_percent(rate_percent: f64, years: u32) -> Self {
        Self {
            annual_rate: rate_percent / 100.0,
            years,
        }
    }
}

/// A full financing schedule: initial principal plus an ordered sequence
/// of rate/duration segments. Later segments apply to the balance left
/// over by earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Initial credit amount
    pub principal: f64,

    /// Segments in the order they run
    pub segments: Vec<LoanSegment>,
}

impl LoanSchedule {
    /// Create a schedule and validate it up front
    pub fn new(principal: f64, segments: Vec<LoanSegment>) -> Result<Self, SolveError> {
        let schedule = Self {
            principal,
            segments,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Create a schedule from (percent rate, years) pairs as entered on
    /// the command line
    pub fn from_percent_pairs(
        principal: f64,
        pairs: &[(f64, u32)],
    ) -> Result<Self, SolveError> {
        let segments = pairs
            .iter()
            .map(|&(rate, years)| LoanSegment::from_percent(rate, years))
            .collect();
        Self::new(principal, segments)
    }

    /// Total runtime across all segments in years
    pub fn total_years(&self) -> u32 {
        self.segments.iter().map(|s| s.years).sum()
    }

    /// Check schedule invariants
    ///
    /// Rejects non-positive or non-finite principal, negative or
    /// non-finite rates, empty schedules and schedules whose total
    /// duration is zero. A single zero-duration segment is fine as long
    /// as the others add up to a positive runtime.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.principal.is_finite() {
            return Err(SolveError::NonFiniteInput { what: "principal" });
        }
        if self.principal <= 0.0 {
            return Err(SolveError::NonPositivePrincipal {
                principal: self.principal,
            });
        }
        if self.segments.is_empty() {
            return Err(SolveError::EmptySchedule);
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if !segment.annual_rate.is_finite() {
                return Err(SolveError::NonFiniteInput {
                    what: "interest rate",
                });
            }
            if segment.annual_rate < 0.0 {
                return Err(SolveError::NegativeRate {
                    index,
                    rate: segment.annual_rate,
                });
            }
        }
        if self.total_years() == 0 {
            return Err(SolveError::ZeroTotalDuration);
        }
        Ok(())
    }
}

/// Convert a flat RATE YEARS argument list, as entered on the command
/// line, into (percent rate, years) pairs.
///
/// Durations arrive as floats from the argument parser and must be whole
/// non-negative year counts.
pub fn parse_rate_year_pairs(terms: &[f64]) -> Result<Vec<(f64, u32)>, SolveError> {
    if terms.len() % 2 != 0 {
        return Err(SolveError::UnpairedTerms { count: terms.len() });
    }

    let mut pairs = Vec::with_capacity(terms.len() / 2);
    for chunk in terms.chunks_exact(2) {
        let (rate, years) = (chunk[0], chunk[1]);
        if years < 0.0 || years.fract() != 0.0 || years > u32::MAX as f64 {
            return Err(SolveError::InvalidDuration { years });
        }
        pairs.push((rate, years as u32));
    }
    Ok(pairs)
}

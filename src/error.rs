//! Error types for schedule validation and payment solving

use thiserror::Error;

/// Errors raised by schedule validation and the payment solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Principal must be a positive amount.
    #[error("principal must be positive, got {principal}")]
    NonPositivePrincipal {
        /// The rejected principal.
        principal: f64,
    },

    /// Negative interest rates are rejected before simulation begins.
    #[error("segment {index} has negative interest rate {rate}")]
    NegativeRate {
        /// Zero-based segment index.
        index: usize,
        /// The rejected annual rate (fraction).
        rate: f64,
    },

    /// NaN or infinite input value.
    #[error("{what} is not a finite number")]
    NonFiniteInput {
        /// Which input was non-finite.
        what: &'static str,
    },

    /// Command line terms must come in RATE YEARS pairs.
    #[error("expected RATE YEARS pairs, got {count} values")]
    UnpairedTerms {
        /// Number of values supplied.
        count: usize,
    },

    /// Durations must be whole non-negative years.
    #[error("duration must be a non-negative whole number of years, got {years}")]
    InvalidDuration {
        /// The rejected duration value.
        years: f64,
    },

    /// A schedule needs at least one segment.
    #[error("schedule has no segments")]
    EmptySchedule,

    /// All segments have zero duration, so there is nothing to amortize.
    #[error("schedule has zero total duration")]
    ZeroTotalDuration,

    /// Solver exceeded its iteration cap.
    #[error("payment solver failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual balance.
        residual: f64,
    },

    /// Secant derivative estimate too close to zero to take a Newton step.
    #[error("residual is flat at payment {payment:.2} (derivative estimate: {derivative:.2e})")]
    FlatResidual {
        /// Payment at which the derivative collapsed.
        payment: f64,
        /// The near-zero derivative estimate.
        derivative: f64,
    },

    /// Iteration produced a NaN or infinite value.
    #[error("payment iteration became non-finite near payment {payment}")]
    NumericalInstability {
        /// Last finite payment candidate.
        payment: f64,
    },
}

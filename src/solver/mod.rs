//! Newton solver for the constant monthly payment
//!
//! The residual function is the ending balance of the full schedule for a
//! candidate payment. Because every monthly step is affine in the payment,
//! the residual is an affine function of the payment as well, so the
//! secant-style Newton step is exact up to rounding and the solver
//! normally lands inside tolerance after a single iteration.

use log::debug;

use crate::error::SolveError;
use crate::projection::{project_schedule, MONTHS_PER_YEAR};
use crate::schedule::LoanSchedule;

/// Absolute convergence tolerance on the ending balance, in the same
/// units as the principal
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Finite-difference probe step, in the same units as the payment
pub const DEFAULT_PROBE_STEP: f64 = 0.1;

/// Iteration cap guarding against pathological schedules
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivative estimates below this magnitude abort the iteration
const MIN_DERIVATIVE: f64 = 1e-12;

/// Solver tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual balance
    pub tolerance: f64,
    /// Step used for the finite-difference derivative estimate
    pub probe_step: f64,
    /// Maximum number of Newton iterations
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            probe_step: DEFAULT_PROBE_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Solved payment with iteration statistics
#[derive(Debug, Clone, Copy)]
pub struct SolvedPayment {
    /// The monthly payment that zeroes the final balance
    pub payment: f64,
    /// Newton iterations used
    pub iterations: u32,
    /// Residual balance at the returned payment
    pub residual: f64,
}

/// Find the monthly payment that drives the schedule's final balance to
/// zero.
///
/// Validates the schedule once at entry, starts from the straight-line
/// guess `principal / (total_years * 12)` and iterates a Newton step with
/// a finite-difference derivative. The convergence test runs before the
/// first iteration, so a schedule whose straight-line guess is already
/// exact (all rates zero) returns it untouched with zero iterations.
pub fn solve_payment(
    schedule: &LoanSchedule,
    config: &SolverConfig,
) -> Result<SolvedPayment, SolveError> {
    schedule.validate()?;

    let residual_at =
        |payment: f64| project_schedule(schedule.principal, payment, &schedule.segments);

    let total_months = schedule.total_years() * MONTHS_PER_YEAR;
    let mut payment = schedule.principal / total_months as f64;
    let mut residual = residual_at(payment);

    for iteration in 0..config.max_iterations {
        if !residual.is_finite() || !payment.is_finite() {
            return Err(SolveError::NumericalInstability { payment });
        }
        if residual.abs() <= config.tolerance {
            debug!(
                "converged after {} iterations: payment={:.6}, residual={:.3e}",
                iteration, payment, residual
            );
            return Ok(SolvedPayment {
                payment,
                iterations: iteration,
                residual,
            });
        }

        let probed = residual_at(payment + config.probe_step);
        let derivative = (probed - residual) / config.probe_step;
        if !derivative.is_finite() || derivative.abs() < MIN_DERIVATIVE {
            return Err(SolveError::FlatResidual {
                payment,
                derivative,
            });
        }

        payment -= residual / derivative;
        residual = residual_at(payment);

        debug!(
            "iteration {}: payment={:.6}, residual={:.3e}, derivative={:.3e}",
            iteration + 1,
            payment,
            residual,
            derivative
        );
    }

    if residual.abs() <= config.tolerance {
        return Ok(SolvedPayment {
            payment,
            iterations: config.max_iterations,
            residual,
        });
    }

    Err(SolveError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_segment_scenario() {
        // 500k at 2.5% over 25 years
        let schedule =
            LoanSchedule::from_percent_pairs(500_000.0, &[(2.5, 25)]).unwrap();
        let solved = solve_payment(&schedule, &SolverConfig::default()).unwrap();

        assert_abs_diff_eq!(solved.payment, 2235.88, epsilon = 0.01);
        assert!(solved.residual.abs() <= DEFAULT_TOLERANCE);
        // Affine residual: one secant step is exact
        assert_eq!(solved.iterations, 1);
    }

    #[test]
    fn test_multi_segment_scenario() {
        // 500k refinanced twice: 1% for 5y, 2% for 10y, 3.5% for 10y
        let schedule = LoanSchedule::from_percent_pairs(
            500_000.0,
            &[(1.0, 5), (2.0, 10), (3.5, 10)],
        )
        .unwrap();
        let solved = solve_payment(&schedule, &SolverConfig::default()).unwrap();

        assert_abs_diff_eq!(solved.payment, 2073.36, epsilon = 0.01);
        assert!(solved.residual.abs() <= DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_zero_rate_returns_straight_line_guess() {
        let schedule =
            LoanSchedule::from_percent_pairs(120_000.0, &[(0.0, 10)]).unwrap();
        let solved = solve_payment(&schedule, &SolverConfig::default()).unwrap();

        assert_eq!(solved.payment, 1000.0);
        assert_eq!(solved.iterations, 0);
        assert_eq!(solved.residual, 0.0);
    }

    #[test]
    fn test_solved_payment_zeroes_schedule() {
        let schedule = LoanSchedule::from_percent_pairs(
            350_000.0,
            &[(1.5, 10), (4.0, 20)],
        )
        .unwrap();
        let solved = solve_payment(&schedule, &SolverConfig::default()).unwrap();

        let end = project_schedule(schedule.principal, solved.payment, &schedule.segments);
        assert!(end.abs() <= DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_deterministic() {
        let schedule = LoanSchedule::from_percent_pairs(
            500_000.0,
            &[(1.0, 5), (2.0, 10), (3.5, 10)],
        )
        .unwrap();
        let a = solve_payment(&schedule, &SolverConfig::default()).unwrap();
        let b = solve_payment(&schedule, &SolverConfig::default()).unwrap();

        assert_eq!(a.payment, b.payment);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.residual, b.residual);
    }

    #[test]
    fn test_validates_before_solving() {
        let schedule = LoanSchedule {
            principal: -5.0,
            segments: vec![crate::schedule::LoanSegment::from_percent(2.5, 10)],
        };
        assert_eq!(
            solve_payment(&schedule, &SolverConfig::default()).unwrap_err(),
            SolveError::NonPositivePrincipal { principal: -5.0 }
        );
    }

    #[test]
    fn test_overflowing_schedule_reported_as_instability() {
        // A principal near the f64 range limit at 1000% overflows the
        // yearly interest accumulator, so the residual goes infinite
        let schedule =
            LoanSchedule::from_percent_pairs(1e308, &[(1000.0, 30)]).unwrap();
        assert!(matches!(
            solve_payment(&schedule, &SolverConfig::default()).unwrap_err(),
            SolveError::NumericalInstability { .. }
        ));
    }

    #[test]
    fn test_collapsed_derivative_reported_as_flat() {
        // A probe step below float resolution leaves the probed payment
        // bitwise unchanged, so the finite difference collapses to zero
        let schedule =
            LoanSchedule::from_percent_pairs(500_000.0, &[(2.5, 25)]).unwrap();
        let config = SolverConfig {
            probe_step: 1e-300,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_payment(&schedule, &config).unwrap_err(),
            SolveError::FlatResidual { derivative, .. } if derivative == 0.0
        ));
    }

    #[test]
    fn test_iteration_cap() {
        let schedule =
            LoanSchedule::from_percent_pairs(500_000.0, &[(2.5, 25)]).unwrap();
        let config = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_payment(&schedule, &config).unwrap_err(),
            SolveError::ConvergenceFailed { iterations: 0, .. }
        ));
    }
}

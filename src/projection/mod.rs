//! Amortization projection engine
//!
//! Projects an outstanding balance through one or more rate segments for a
//! candidate monthly payment. The engine performs no validation and no
//! clamping; a too-small payment leaves a positive balance and a too-large
//! payment drives it negative. The solver is responsible for finding the
//! payment that lands on zero.

mod engine;
mod monthly;

pub use engine::{project_schedule, project_segment};
pub use monthly::{project_monthly, MonthRow};

/// Number of payment steps per year
pub const MONTHS_PER_YEAR: u32 = 12;

//! Rivet is a discrete constraint satisfaction problem (CSP) solver.
//!
//! A problem is a set of variables, each with a finite domain of [`Value`]s,
//! plus constraints restricting which combinations are admissible. The
//! solver interleaves depth-first backtracking search with constraint
//! propagation (forward checking by default, full AC-3 arc consistency on
//! request) and either returns a complete satisfying assignment or reports
//! that none exists.
//!
//! # Core concepts
//!
//! - **[`Solver`]**: owns the problem and runs the search. Configure it with
//!   [`SolverConfig`] or the individual setters (timeout, propagation mode,
//!   variable/value ordering).
//! - **[`Constraint`]**: a rule over one or more variables. Built through
//!   the factory functions in [`solver::constraints`], such as
//!   [`not_equal`](solver::constraints::not_equal) or
//!   [`sum_equals`](solver::constraints::sum_equals); arbitrary rules fit
//!   through [`unary_constraint`](solver::constraints::unary_constraint) and
//!   [`binary_constraint`](solver::constraints::binary_constraint).
//! - **[`Solution`]**: the result, carrying the assignment, the solve time
//!   and the backtrack count. Infeasibility and timeout are solutions with
//!   `is_satisfied == false`, not errors.
//!
//! # Example: map colouring
//!
//! Three adjacent regions, three colours, no two neighbours alike:
//!
//! ```
//! use rivet::solver::constraints::not_equal;
//! use rivet::{Solver, Value};
//!
//! # fn main() -> rivet::Result<()> {
//! let mut solver = Solver::new();
//! let colours = || vec![Value::from("red"), Value::from("green"), Value::from("blue")];
//! for region in ["wa", "nt", "sa"] {
//!     solver.add_variable(region, colours())?;
//! }
//! solver.add_constraint(not_equal("wa", "nt"));
//! solver.add_constraint(not_equal("nt", "sa"));
//! solver.add_constraint(not_equal("wa", "sa"));
//!
//! let solution = solver.solve()?;
//! assert!(solution.is_satisfied);
//! assert_ne!(solution.assignment["wa"], solution.assignment["nt"]);
//!
//! // A solved assignment always validates cleanly.
//! assert!(solver.is_consistent(&solution.assignment));
//! # Ok(())
//! # }
//! ```
//!
//! Runs are deterministic for a fixed configuration, including the seeded
//! `Random` value ordering, so statistics are reproducible run to run.

pub mod error;
pub mod solver;

pub use error::{Error, Result};
pub use solver::config::{PropagationMode, SolverConfig, ValueOrdering, VariableOrdering};
pub use solver::constraint::Constraint;
pub use solver::engine::{Solver, VariableId};
pub use solver::solution::{Assignment, Solution, ValidationResult, Violation};
pub use solver::stats::SolverStats;
pub use solver::value::Value;

/// The crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Whether a GPU search backend is available. The portable core has none,
/// so this is always `false`.
pub fn is_gpu_available() -> bool {
    false
}

/// Number of usable GPU devices; always `0` in the portable core.
pub fn gpu_device_count() -> usize {
    0
}

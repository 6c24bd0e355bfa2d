use std::collections::HashMap;

use crate::solver::{engine::VariableId, value::Value};

/// A (possibly partial) mapping from variable ids to values.
pub type Assignment = HashMap<VariableId, Value>;

/// The outcome of a [`solve`](crate::solver::engine::Solver::solve) call.
///
/// Infeasibility and timeout are reported here rather than as errors: the
/// assignment is empty and `is_satisfied` is `false`.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The satisfying assignment; complete when `is_satisfied` is true,
    /// empty otherwise.
    pub assignment: Assignment,
    pub is_satisfied: bool,
    /// Wall-clock time of this solve, in milliseconds.
    pub solve_time_ms: f64,
    /// Backtracks performed by this solve.
    pub backtracks: u64,
}

/// One failed constraint (or synthetic check) found by
/// [`validate`](crate::solver::engine::Solver::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub constraint_name: String,
    pub involved_variables: Vec<VariableId>,
    pub description: String,
}

/// The outcome of validating a user-supplied assignment.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

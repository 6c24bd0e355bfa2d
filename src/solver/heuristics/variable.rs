//! Variable selection heuristics.
//!
//! Selectors observe the problem read-only and return the index of the next
//! unassigned variable to branch on, or `None` when every variable is
//! assigned. All tie-breaks bottom out in insertion order, which keeps the
//! search deterministic.

use crate::solver::{config::VariableOrdering, engine::Problem};

pub(crate) trait VariableSelector {
    fn select(&self, problem: &Problem) -> Option<usize>;
}

pub(crate) fn from_config(ordering: VariableOrdering) -> Box<dyn VariableSelector> {
    match ordering {
        VariableOrdering::Static => Box::new(SelectFirst),
        VariableOrdering::Mrv => Box::new(MinRemainingValues),
        VariableOrdering::Degree => Box::new(MaxDegree),
        VariableOrdering::DynamicMrv => Box::new(DynamicMinRemainingValues),
    }
}

/// Number of constraints linking `var` to at least one other unassigned
/// variable.
pub(crate) fn unassigned_degree(problem: &Problem, var: usize) -> usize {
    problem
        .vars
        .var(var)
        .constraints()
        .iter()
        .filter(|&&ci| {
            problem.scopes[ci]
                .iter()
                .any(|&other| other != var && !problem.vars.var(other).is_assigned())
        })
        .count()
}

fn select_min_remaining(problem: &Problem) -> Option<usize> {
    let mut best: Option<(usize, usize, usize)> = None; // (len, neg-degree, index)
    for (index, variable) in problem.vars.iter().enumerate() {
        if variable.is_assigned() {
            continue;
        }
        let degree = unassigned_degree(problem, index);
        let key = (variable.domain().len(), usize::MAX - degree, index);
        if best.map_or(true, |b| key < b) {
            best = Some(key);
        }
    }
    best.map(|(_, _, index)| index)
}

/// First unassigned variable in insertion order.
#[derive(Debug)]
struct SelectFirst;

impl VariableSelector for SelectFirst {
    fn select(&self, problem: &Problem) -> Option<usize> {
        problem.vars.iter().position(|v| !v.is_assigned())
    }
}

/// Minimum remaining values, the fail-first strategy: smallest current
/// domain, ties broken by degree, then insertion order.
#[derive(Debug)]
struct MinRemainingValues;

impl VariableSelector for MinRemainingValues {
    fn select(&self, problem: &Problem) -> Option<usize> {
        select_min_remaining(problem)
    }
}

/// Most constraints to other unassigned variables, ties by insertion order.
#[derive(Debug)]
struct MaxDegree;

impl VariableSelector for MaxDegree {
    fn select(&self, problem: &Problem) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None; // (index, degree)
        for (index, variable) in problem.vars.iter().enumerate() {
            if variable.is_assigned() {
                continue;
            }
            let degree = unassigned_degree(problem, index);
            if best.map_or(true, |(_, d)| degree > d) {
                best = Some((index, degree));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// MRV recomputed from scratch on every call. The plain [`MinRemainingValues`]
/// is allowed to cache within a depth; this one never may, so both share the
/// same rescan today and only the contract differs.
#[derive(Debug)]
struct DynamicMinRemainingValues;

impl VariableSelector for DynamicMinRemainingValues {
    fn select(&self, problem: &Problem) -> Option<usize> {
        select_min_remaining(problem)
    }
}

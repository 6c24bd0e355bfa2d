//! Value ordering heuristics.
//!
//! A selector materializes the order in which a variable's remaining values
//! are tried. Selectors may carry state (the random ordering owns its seeded
//! RNG), so `order` takes `&mut self`; fresh selectors are built per solve,
//! which keeps repeated runs reproducible.

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::{
    error::Result,
    solver::{
        config::ValueOrdering, engine::Problem, solution::Assignment, stats::SolverStats,
        value::Value,
    },
};

pub(crate) trait ValueSelector {
    fn order(
        &mut self,
        var: usize,
        problem: &Problem,
        assignment: &Assignment,
        stats: &mut SolverStats,
    ) -> Result<Vec<Value>>;
}

pub(crate) fn from_config(ordering: ValueOrdering, seed: u64) -> Box<dyn ValueSelector> {
    match ordering {
        ValueOrdering::Natural => Box::new(NaturalOrder),
        ValueOrdering::LeastConstraining => Box::new(LeastConstraining),
        ValueOrdering::Random => Box::new(RandomOrder {
            rng: SmallRng::seed_from_u64(seed),
        }),
    }
}

/// Domain (insertion) order.
#[derive(Debug)]
struct NaturalOrder;

impl ValueSelector for NaturalOrder {
    fn order(
        &mut self,
        var: usize,
        problem: &Problem,
        _assignment: &Assignment,
        _stats: &mut SolverStats,
    ) -> Result<Vec<Value>> {
        Ok(problem.vars.var(var).domain().values().to_vec())
    }
}

/// Least constraining value first.
///
/// For each candidate, counts the neighbour values that would become
/// unsupportable if the candidate were assigned, and tries candidates in
/// ascending order of that count. The sort is stable, so ties fall back to
/// domain order.
#[derive(Debug)]
struct LeastConstraining;

impl ValueSelector for LeastConstraining {
    fn order(
        &mut self,
        var: usize,
        problem: &Problem,
        assignment: &Assignment,
        stats: &mut SolverStats,
    ) -> Result<Vec<Value>> {
        let var_id = problem.vars.id_of(var).clone();
        let candidates = problem.vars.var(var).domain().values().to_vec();

        let mut scratch = assignment.clone();
        let mut keyed: Vec<(usize, Value)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            scratch.insert(var_id.clone(), candidate.clone());
            let mut ruled_out = 0usize;

            for &ci in problem.vars.var(var).constraints() {
                let constraint = problem.constraints[ci].clone();
                for &neighbour in &problem.scopes[ci] {
                    if neighbour == var || problem.vars.var(neighbour).is_assigned() {
                        continue;
                    }
                    let neighbour_id = problem.vars.id_of(neighbour).clone();
                    for w in problem.vars.var(neighbour).domain() {
                        scratch.insert(neighbour_id.clone(), w.clone());
                        stats.constraint_checks += 1;
                        if !constraint.is_satisfied(&scratch)? {
                            ruled_out += 1;
                        }
                    }
                    scratch.remove(&neighbour_id);
                }
            }

            keyed.push((ruled_out, candidate));
        }
        scratch.remove(&var_id);

        keyed.sort_by_key(|(count, _)| *count);
        Ok(keyed.into_iter().map(|(_, value)| value).collect())
    }
}

/// Seeded deterministic shuffle of the domain order.
#[derive(Debug)]
struct RandomOrder {
    rng: SmallRng,
}

impl ValueSelector for RandomOrder {
    fn order(
        &mut self,
        var: usize,
        problem: &Problem,
        _assignment: &Assignment,
        _stats: &mut SolverStats,
    ) -> Result<Vec<Value>> {
        let mut values = problem.vars.var(var).domain().values().to_vec();
        values.shuffle(&mut self.rng);
        Ok(values)
    }
}

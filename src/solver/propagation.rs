//! Constraint propagation: queue-driven AC-3 and single-step forward
//! checking. Both funnel through the same per-arc revise step, which applies
//! removals via the trail so search can undo them.

use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        engine::{Problem, TimeBudget},
        stats::SolverStats,
        trail::Trail,
        work_list::WorkList,
    },
};

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Propagated {
    /// A fixpoint was reached with every domain non-empty.
    Fixpoint,
    /// Some domain was wiped out; the current branch is infeasible.
    EmptyDomain,
    /// The time budget ran out mid-propagation.
    TimedOut,
}

/// Runs AC-3 to fixpoint over the whole constraint graph.
///
/// The queue starts with one arc per (variable, constraint) pair. When a
/// revise prunes a variable, every *other* constraint watching that variable
/// gets its other scope variables re-enqueued.
pub(crate) fn arc_consistency(
    problem: &mut Problem,
    trail: &mut Trail,
    stats: &mut SolverStats,
    budget: &TimeBudget,
) -> Result<Propagated> {
    let mut worklist = WorkList::new();
    for (ci, scope) in problem.scopes.iter().enumerate() {
        for &vi in scope {
            worklist.push_back(vi, ci);
        }
    }

    while let Some((target, ci)) = worklist.pop_front() {
        if budget.expired() {
            return Ok(Propagated::TimedOut);
        }

        if revise_arc(problem, trail, stats, target, ci)? {
            if problem.vars.var(target).domain().is_empty() {
                trace!(
                    variable = %problem.vars.id_of(target),
                    "domain wiped out during arc consistency"
                );
                return Ok(Propagated::EmptyDomain);
            }
            let dependents = problem.vars.var(target).constraints().to_vec();
            for cj in dependents {
                if cj == ci {
                    continue;
                }
                for &neighbour in &problem.scopes[cj] {
                    if neighbour != target {
                        worklist.push_back(neighbour, cj);
                    }
                }
            }
        }
    }

    debug!("arc consistency fixpoint reached");
    Ok(Propagated::Fixpoint)
}

/// Prunes the unassigned neighbours of a freshly assigned variable.
///
/// One revise pass per (constraint, neighbour) arc, no queue: this is the
/// cheap propagation used by default during search.
pub(crate) fn forward_check(
    assigned: usize,
    problem: &mut Problem,
    trail: &mut Trail,
    stats: &mut SolverStats,
    budget: &TimeBudget,
) -> Result<Propagated> {
    if budget.expired() {
        return Ok(Propagated::TimedOut);
    }

    let constraints = problem.vars.var(assigned).constraints().to_vec();
    for ci in constraints {
        let scope = problem.scopes[ci].clone();
        for neighbour in scope {
            if neighbour == assigned || problem.vars.var(neighbour).is_assigned() {
                continue;
            }
            if revise_arc(problem, trail, stats, neighbour, ci)?
                && problem.vars.var(neighbour).domain().is_empty()
            {
                trace!(
                    variable = %problem.vars.id_of(neighbour),
                    "forward check emptied a neighbour domain"
                );
                return Ok(Propagated::EmptyDomain);
            }
        }
    }
    Ok(Propagated::Fixpoint)
}

/// Revises one arc, applying any removals through the trail. Returns whether
/// the target's domain changed.
fn revise_arc(
    problem: &mut Problem,
    trail: &mut Trail,
    stats: &mut SolverStats,
    target: usize,
    ci: usize,
) -> Result<bool> {
    let constraint = problem.constraints[ci].clone();
    let started = Instant::now();

    stats.constraint_checks += 1;
    let removals = {
        let target_id = problem.vars.id_of(target);
        constraint.revise(target_id, &problem.vars)?
    };

    let changed = !removals.is_empty();
    for value in removals {
        if let Some(pos) = problem.vars.var_mut(target).domain_mut().remove(&value) {
            trail.record(target, value, pos);
            stats.domain_reductions += 1;
        }
    }

    let per = stats.constraint_stats.entry(ci).or_default();
    per.revisions += 1;
    if changed {
        per.prunings += 1;
    }
    per.time_spent_micros += started.elapsed().as_micros() as u64;

    Ok(changed)
}

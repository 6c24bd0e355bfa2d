use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    solver::{
        config::{PropagationMode, SolverConfig, ValueOrdering, VariableOrdering},
        constraint::Constraint,
        domain::Domain,
        heuristics::{
            value::{self as value_heuristics, ValueSelector},
            variable::{self as variable_heuristics, VariableSelector},
        },
        propagation::{self, Propagated},
        solution::{Assignment, Solution, ValidationResult, Violation},
        stats::SolverStats,
        trail::Trail,
        value::Value,
        variable::{Variable, VariableTable},
    },
};

/// Identifier of a variable within a problem. Semantically a string;
/// uniqueness is enforced by [`Solver::add_variable`].
pub type VariableId = String;
/// Index of a constraint in the order it was added.
pub type ConstraintId = usize;

/// The bound problem the search operates on: variables, constraints and the
/// constraint scopes resolved to variable indices.
#[derive(Debug, Default)]
pub(crate) struct Problem {
    pub(crate) vars: VariableTable,
    pub(crate) constraints: Vec<Arc<Constraint>>,
    pub(crate) scopes: Vec<Vec<usize>>,
}

/// Monotonic solve budget. `expired` is the only clock read in the solver.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeBudget {
    started_at: Instant,
    budget: Option<Duration>,
}

impl TimeBudget {
    pub(crate) fn starting_now(timeout_ms: f64) -> Self {
        let budget = (timeout_ms > 0.0).then(|| Duration::from_secs_f64(timeout_ms / 1000.0));
        Self {
            started_at: Instant::now(),
            budget,
        }
    }

    pub(crate) fn expired(&self) -> bool {
        self.budget
            .is_some_and(|budget| self.started_at.elapsed() >= budget)
    }
}

/// A discrete constraint satisfaction problem solver.
///
/// Variables and constraints are registered up front; [`solve`](Self::solve)
/// then runs a depth-first backtracking search interleaved with constraint
/// propagation. The solver owns all problem state, is single-threaded, and
/// is deterministic for a fixed configuration: rerunning the same problem
/// produces the same solution and the same statistics.
///
/// ```
/// use rivet::solver::constraints::not_equal;
/// use rivet::{Solver, Value};
///
/// # fn main() -> rivet::Result<()> {
/// let mut solver = Solver::new();
/// solver.add_variable("a", vec![Value::Int(1), Value::Int(2)])?;
/// solver.add_variable("b", vec![Value::Int(1)])?;
/// solver.add_constraint(not_equal("a", "b"));
///
/// let solution = solver.solve()?;
/// assert!(solution.is_satisfied);
/// assert_eq!(solution.assignment["a"], Value::Int(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Solver {
    problem: Problem,
    config: SolverConfig,
    stats: SolverStats,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Problem construction
    // ------------------------------------------------------------------

    /// Registers a variable with its discrete domain.
    ///
    /// Rejects duplicate ids and empty domains.
    pub fn add_variable(
        &mut self,
        id: impl Into<VariableId>,
        values: Vec<Value>,
    ) -> Result<()> {
        let id = id.into();
        if values.is_empty() {
            return Err(Error::EmptyDomain(id));
        }
        let variable = Variable::new(id, Domain::new(values));
        self.problem.vars.insert(variable)?;
        Ok(())
    }

    /// Registers a constraint. Unknown variable ids in its scope are
    /// reported at solve time.
    pub fn add_constraint(&mut self, constraint: Arc<Constraint>) {
        self.problem.constraints.push(constraint);
    }

    /// Drops all variables, constraints and statistics.
    pub fn clear(&mut self) {
        self.problem.vars.clear();
        self.problem.constraints.clear();
        self.problem.scopes.clear();
        self.stats = SolverStats::default();
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Solve budget in milliseconds; `0` disables the timeout.
    pub fn set_timeout_ms(&mut self, timeout_ms: f64) {
        self.config.timeout_ms = timeout_ms;
    }

    /// Toggles propagation. Enabling restores the default forward checking;
    /// use [`set_propagation_mode`](Self::set_propagation_mode) for full arc
    /// consistency during search.
    pub fn set_propagation_enabled(&mut self, enabled: bool) {
        if enabled {
            if self.config.propagation == PropagationMode::Disabled {
                self.config.propagation = PropagationMode::ForwardChecking;
            }
        } else {
            self.config.propagation = PropagationMode::Disabled;
        }
    }

    pub fn set_propagation_mode(&mut self, mode: PropagationMode) {
        self.config.propagation = mode;
    }

    pub fn set_variable_ordering(&mut self, ordering: VariableOrdering) {
        self.config.variable_ordering = ordering;
    }

    pub fn set_value_ordering(&mut self, ordering: ValueOrdering) {
        self.config.value_ordering = ordering;
    }

    pub fn set_random_seed(&mut self, seed: u64) {
        self.config.random_seed = seed;
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    pub fn statistics(&self) -> &SolverStats {
        &self.stats
    }

    pub fn reset_statistics(&mut self) {
        self.stats = SolverStats::default();
    }

    /// The constraints registered so far, in insertion order.
    pub fn constraints(&self) -> &[Arc<Constraint>] {
        &self.problem.constraints
    }

    // ------------------------------------------------------------------
    // Solving
    // ------------------------------------------------------------------

    /// Runs the backtracking search.
    ///
    /// Returns a [`Solution`] with `is_satisfied == false` on exhaustion or
    /// timeout. Structural errors (a constraint naming an unknown variable)
    /// and type mismatches inside numeric constraints are `Err`.
    pub fn solve(&mut self) -> Result<Solution> {
        let started = Instant::now();
        self.bind()?;
        debug!(
            variables = self.problem.vars.len(),
            constraints = self.problem.constraints.len(),
            "starting solve"
        );

        let budget = TimeBudget::starting_now(self.config.timeout_ms);
        let backtracks_before = self.stats.backtracks;
        let mut trail = Trail::new();

        if self.config.propagation != PropagationMode::Disabled {
            match propagation::arc_consistency(
                &mut self.problem,
                &mut trail,
                &mut self.stats,
                &budget,
            )? {
                Propagated::Fixpoint => {}
                Propagated::EmptyDomain | Propagated::TimedOut => {
                    debug!("infeasible during preprocessing");
                    return Ok(self.finish(false, Assignment::new(), started, backtracks_before));
                }
            }
        }

        let mut search = Search {
            problem: &mut self.problem,
            stats: &mut self.stats,
            var_selector: variable_heuristics::from_config(self.config.variable_ordering),
            value_selector: value_heuristics::from_config(
                self.config.value_ordering,
                self.config.random_seed,
            ),
            propagation: self.config.propagation,
            budget,
            assignment: Assignment::new(),
            trail,
        };
        let outcome = search.run(0)?;
        let assignment = match outcome {
            SearchOutcome::Solved => std::mem::take(&mut search.assignment),
            _ => Assignment::new(),
        };
        drop(search);

        let satisfied = matches!(outcome, SearchOutcome::Solved);
        Ok(self.finish(satisfied, assignment, started, backtracks_before))
    }

    /// True iff no constraint is violated by `assignment` and every binding
    /// lies in its variable's original domain. The assignment may be partial.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        self.validate(assignment).is_valid
    }

    /// Collects every violated constraint, plus synthetic violations for
    /// bindings outside a variable's original domain or naming no variable
    /// at all.
    pub fn validate(&self, assignment: &Assignment) -> ValidationResult {
        let mut violations = Vec::new();

        let mut ids: Vec<&VariableId> = assignment.keys().collect();
        ids.sort();
        for id in ids {
            let value = &assignment[id];
            match self.problem.vars.get(id) {
                None => violations.push(Violation {
                    constraint_name: "OutOfDomain".to_string(),
                    involved_variables: vec![id.clone()],
                    description: format!("variable '{id}' is not part of the problem"),
                }),
                Some(variable) if !variable.original_domain().contains(value) => {
                    violations.push(Violation {
                        constraint_name: "OutOfDomain".to_string(),
                        involved_variables: vec![id.clone()],
                        description: format!(
                            "value {value} is outside the original domain of '{id}'"
                        ),
                    });
                }
                Some(_) => {}
            }
        }

        for constraint in &self.problem.constraints {
            match constraint.is_satisfied(assignment) {
                Ok(true) => {}
                Ok(false) => violations.push(Violation {
                    constraint_name: constraint.name().to_string(),
                    involved_variables: constraint.scope().to_vec(),
                    description: constraint.description(),
                }),
                Err(err) => violations.push(Violation {
                    constraint_name: constraint.name().to_string(),
                    involved_variables: constraint.scope().to_vec(),
                    description: err.to_string(),
                }),
            }
        }

        ValidationResult::new(violations)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Resets all search state and wires constraints to variables by index.
    /// Fails if a constraint references an id that was never registered.
    fn bind(&mut self) -> Result<()> {
        for variable in self.problem.vars.iter_mut() {
            variable.reset();
        }

        let mut scopes = Vec::with_capacity(self.problem.constraints.len());
        for constraint in &self.problem.constraints {
            let mut scope = Vec::with_capacity(constraint.arity());
            for id in constraint.scope() {
                let index =
                    self.problem
                        .vars
                        .index_of(id)
                        .ok_or_else(|| Error::UnknownVariable {
                            constraint: constraint.name().to_string(),
                            variable: id.clone(),
                        })?;
                scope.push(index);
            }
            scopes.push(scope);
        }

        for (ci, scope) in scopes.iter().enumerate() {
            for &vi in scope {
                self.problem.vars.var_mut(vi).add_constraint(ci);
            }
        }
        self.problem.scopes = scopes;
        Ok(())
    }

    fn finish(
        &mut self,
        is_satisfied: bool,
        assignment: Assignment,
        started: Instant,
        backtracks_before: u64,
    ) -> Solution {
        let solve_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.stats.total_time_ms += solve_time_ms;
        let backtracks = self.stats.backtracks - backtracks_before;
        debug!(is_satisfied, solve_time_ms, backtracks, "solve finished");
        Solution {
            assignment,
            is_satisfied,
            solve_time_ms,
            backtracks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchOutcome {
    Solved,
    Exhausted,
    TimedOut,
}

/// One in-flight solve: the recursive assign/propagate/undo loop and the
/// mutable state it threads through the recursion.
struct Search<'a> {
    problem: &'a mut Problem,
    stats: &'a mut SolverStats,
    var_selector: Box<dyn VariableSelector>,
    value_selector: Box<dyn ValueSelector>,
    propagation: PropagationMode,
    budget: TimeBudget,
    assignment: Assignment,
    trail: Trail,
}

impl Search<'_> {
    fn run(&mut self, depth: usize) -> Result<SearchOutcome> {
        self.stats.nodes_explored += 1;

        if self.budget.expired() {
            debug!(depth, "search timed out");
            return Ok(SearchOutcome::TimedOut);
        }
        if self.assignment.len() == self.problem.vars.len() {
            return Ok(SearchOutcome::Solved);
        }

        let Some(var) = self.var_selector.select(self.problem) else {
            debug_assert!(false, "no selectable variable in an incomplete assignment");
            return Ok(SearchOutcome::Exhausted);
        };
        let values =
            self.value_selector
                .order(var, self.problem, &self.assignment, self.stats)?;
        trace!(
            variable = %self.problem.vars.id_of(var),
            candidates = values.len(),
            depth,
            "branching"
        );

        for value in values {
            let mark = self.trail.checkpoint();
            self.assign(var, value);

            let mut viable = self.check_local(var)?;
            if viable {
                match self.propagate(var)? {
                    Propagated::Fixpoint => {}
                    Propagated::EmptyDomain => viable = false,
                    Propagated::TimedOut => {
                        self.undo(var, mark);
                        return Ok(SearchOutcome::TimedOut);
                    }
                }
            }

            if viable {
                match self.run(depth + 1)? {
                    SearchOutcome::Solved => return Ok(SearchOutcome::Solved),
                    SearchOutcome::TimedOut => {
                        self.undo(var, mark);
                        return Ok(SearchOutcome::TimedOut);
                    }
                    SearchOutcome::Exhausted => {}
                }
            }

            self.undo(var, mark);
        }

        self.stats.backtracks += 1;
        Ok(SearchOutcome::Exhausted)
    }

    /// Binds `var` to `value` and narrows its domain to the singleton,
    /// recording the removals on the trail.
    fn assign(&mut self, var: usize, value: Value) {
        let id = self.problem.vars.id_of(var).clone();
        trace!(variable = %id, value = %value, "assign");

        self.problem.vars.var_mut(var).assign(value.clone());
        let others: Vec<Value> = self
            .problem
            .vars
            .var(var)
            .domain()
            .iter()
            .filter(|v| **v != value)
            .cloned()
            .collect();
        for other in others {
            if let Some(pos) = self.problem.vars.var_mut(var).domain_mut().remove(&other) {
                self.trail.record(var, other, pos);
                self.stats.domain_reductions += 1;
            }
        }

        self.assignment.insert(id, value);
    }

    /// Checks the constraints touching `var` against the partial assignment.
    /// This is what keeps plain backtracking sound when propagation is off.
    fn check_local(&mut self, var: usize) -> Result<bool> {
        let constraint_ids = self.problem.vars.var(var).constraints().to_vec();
        for ci in constraint_ids {
            let constraint = self.problem.constraints[ci].clone();
            self.stats.constraint_checks += 1;
            if !constraint.is_satisfied(&self.assignment)? {
                trace!(constraint = %constraint.description(), "local check failed");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn propagate(&mut self, var: usize) -> Result<Propagated> {
        match self.propagation {
            PropagationMode::Disabled => Ok(Propagated::Fixpoint),
            PropagationMode::ForwardChecking => propagation::forward_check(
                var,
                self.problem,
                &mut self.trail,
                self.stats,
                &self.budget,
            ),
            PropagationMode::ArcConsistency => propagation::arc_consistency(
                self.problem,
                &mut self.trail,
                self.stats,
                &self.budget,
            ),
        }
    }

    fn undo(&mut self, var: usize, mark: usize) {
        self.trail.rollback_to(mark, &mut self.problem.vars);
        let id = self.problem.vars.id_of(var).clone();
        self.assignment.remove(&id);
        self.problem.vars.var_mut(var).unassign();
    }
}

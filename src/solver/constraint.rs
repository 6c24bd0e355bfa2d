use crate::{
    error::{Error, Result},
    solver::{
        constraints::{
            all_different::AllDifferent,
            equal::Equal,
            less_than::{LessThan, LessThanOrEqual},
            not_equal::NotEqual,
            predicate::{BinaryPredicate, UnaryPredicate},
            sum_equals::SumEquals,
        },
        domain::Domain,
        engine::VariableId,
        solution::Assignment,
        value::Value,
        variable::VariableTable,
    },
};

/// A constraint over one or more variables.
///
/// Constraints are a closed sum over the supported kinds plus two generic
/// predicate variants carrying boxed functions; dispatch is a match on the
/// variant. They are immutable once constructed and shared between the user
/// and the solver behind an `Arc` (see the factory functions in
/// [`crate::solver::constraints`]).
///
/// Every variant honors the same contract:
///
/// - [`is_satisfied`](Constraint::is_satisfied) is pure over a possibly
///   partial [`Assignment`]. A constraint whose scope is not fully bound is
///   vacuously satisfied unless falsity is already provable from the bound
///   subset.
/// - [`revise`](Constraint::revise) is the per-arc pruning step used by both
///   AC-3 and forward checking: it returns the values of the target
///   variable's current domain that have no supporting assignment in the
///   other scope variables' domains. The propagator applies the removals.
#[derive(Debug)]
pub enum Constraint {
    NotEqual(NotEqual),
    AllDifferent(AllDifferent),
    Equal(Equal),
    LessThan(LessThan),
    LessThanOrEqual(LessThanOrEqual),
    SumEquals(SumEquals),
    UnaryPredicate(UnaryPredicate),
    BinaryPredicate(BinaryPredicate),
}

impl Constraint {
    /// The ordered list of variable ids this constraint ranges over.
    pub fn scope(&self) -> &[VariableId] {
        match self {
            Constraint::NotEqual(c) => c.scope(),
            Constraint::AllDifferent(c) => c.scope(),
            Constraint::Equal(c) => c.scope(),
            Constraint::LessThan(c) => c.scope(),
            Constraint::LessThanOrEqual(c) => c.scope(),
            Constraint::SumEquals(c) => c.scope(),
            Constraint::UnaryPredicate(c) => c.scope(),
            Constraint::BinaryPredicate(c) => c.scope(),
        }
    }

    pub fn arity(&self) -> usize {
        self.scope().len()
    }

    /// Stable constraint kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::NotEqual(_) => "NotEqual",
            Constraint::AllDifferent(_) => "AllDifferent",
            Constraint::Equal(_) => "Equal",
            Constraint::LessThan(_) => "LessThan",
            Constraint::LessThanOrEqual(_) => "LessThanOrEqual",
            Constraint::SumEquals(_) => "SumEquals",
            Constraint::UnaryPredicate(_) => "UnaryPredicate",
            Constraint::BinaryPredicate(_) => "BinaryPredicate",
        }
    }

    /// Human-readable rendering of the constraint.
    pub fn description(&self) -> String {
        match self {
            Constraint::NotEqual(c) => c.description(),
            Constraint::AllDifferent(c) => c.description(),
            Constraint::Equal(c) => c.description(),
            Constraint::LessThan(c) => c.description(),
            Constraint::LessThanOrEqual(c) => c.description(),
            Constraint::SumEquals(c) => c.description(),
            Constraint::UnaryPredicate(c) => c.description(),
            Constraint::BinaryPredicate(c) => c.description(),
        }
    }

    /// Tests the constraint against a possibly partial assignment.
    pub fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        match self {
            Constraint::NotEqual(c) => c.is_satisfied(assignment),
            Constraint::AllDifferent(c) => c.is_satisfied(assignment),
            Constraint::Equal(c) => c.is_satisfied(assignment),
            Constraint::LessThan(c) => c.is_satisfied(assignment),
            Constraint::LessThanOrEqual(c) => c.is_satisfied(assignment),
            Constraint::SumEquals(c) => c.is_satisfied(assignment),
            Constraint::UnaryPredicate(c) => c.is_satisfied(assignment),
            Constraint::BinaryPredicate(c) => c.is_satisfied(assignment),
        }
    }

    /// Computes the values to drop from `target`'s current domain.
    ///
    /// Assigned variables are visible here through their narrowed singleton
    /// domains, so no assignment parameter is needed.
    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        match self {
            Constraint::NotEqual(c) => c.revise(target, vars),
            Constraint::AllDifferent(c) => c.revise(target, vars),
            Constraint::Equal(c) => c.revise(target, vars),
            Constraint::LessThan(c) => c.revise(target, vars),
            Constraint::LessThanOrEqual(c) => c.revise(target, vars),
            Constraint::SumEquals(c) => c.revise(target, vars),
            Constraint::UnaryPredicate(c) => c.revise(target, vars),
            Constraint::BinaryPredicate(c) => c.revise(target, vars),
        }
    }
}

/// Looks up a variable's current domain, reporting a structural error naming
/// the constraint when the id is unknown.
pub(crate) fn domain_or_err<'a>(
    vars: &'a VariableTable,
    constraint: &str,
    id: &str,
) -> Result<&'a Domain> {
    vars.domain_of(id).ok_or_else(|| Error::UnknownVariable {
        constraint: constraint.to_string(),
        variable: id.to_string(),
    })
}

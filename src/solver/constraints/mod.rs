//! The standard library of constraints plus their factory functions.
//!
//! Factories return `Arc<Constraint>` so a constraint can be handed to
//! several solver instances at once; constraints are immutable after
//! construction.

use std::sync::Arc;

use crate::solver::{constraint::Constraint, engine::VariableId, value::Value};

pub mod all_different;
pub mod equal;
pub mod less_than;
pub mod not_equal;
pub mod predicate;
pub mod sum_equals;

pub use all_different::AllDifferent;
pub use equal::Equal;
pub use less_than::{LessThan, LessThanOrEqual};
pub use not_equal::NotEqual;
pub use predicate::{BinaryPredicate, UnaryPredicate};
pub use sum_equals::SumEquals;

/// `x != y`
pub fn not_equal(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Arc<Constraint> {
    Arc::new(Constraint::NotEqual(NotEqual::new(x, y)))
}

/// All listed variables take pairwise distinct values.
pub fn all_different<I>(vars: I) -> Arc<Constraint>
where
    I: IntoIterator,
    I::Item: Into<VariableId>,
{
    Arc::new(Constraint::AllDifferent(AllDifferent::new(vars)))
}

/// `x == y`
pub fn equal(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Arc<Constraint> {
    Arc::new(Constraint::Equal(Equal::new(x, y)))
}

/// `x < y` (numeric)
pub fn less_than(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Arc<Constraint> {
    Arc::new(Constraint::LessThan(LessThan::new(x, y)))
}

/// `x <= y` (numeric)
pub fn less_than_or_equal(
    x: impl Into<VariableId>,
    y: impl Into<VariableId>,
) -> Arc<Constraint> {
    Arc::new(Constraint::LessThanOrEqual(LessThanOrEqual::new(x, y)))
}

/// The listed integer variables sum to `target`.
pub fn sum_equals<I>(vars: I, target: i64) -> Arc<Constraint>
where
    I: IntoIterator,
    I::Item: Into<VariableId>,
{
    Arc::new(Constraint::SumEquals(SumEquals::new(vars, target)))
}

/// The variable's value satisfies `predicate`.
pub fn unary_constraint(
    var: impl Into<VariableId>,
    predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Arc<Constraint> {
    Arc::new(Constraint::UnaryPredicate(UnaryPredicate::new(
        var, predicate,
    )))
}

/// The pair of values satisfies `predicate`, in `(x, y)` argument order.
pub fn binary_constraint(
    x: impl Into<VariableId>,
    y: impl Into<VariableId>,
    predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
) -> Arc<Constraint> {
    Arc::new(Constraint::BinaryPredicate(BinaryPredicate::new(
        x, y, predicate,
    )))
}

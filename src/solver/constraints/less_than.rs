//! Numeric ordering constraints: `x < y` and `x <= y`.
//!
//! Both prune by bound arithmetic: values on the left side survive only if
//! they lie below the right side's maximum, and symmetrically for the right
//! side against the left's minimum. Scope values must be numeric and share a
//! single tag; anything else is a type mismatch surfaced on first evaluation.

use std::cmp::Ordering;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::domain_or_err, domain::Domain, engine::VariableId, solution::Assignment,
        value::Value, variable::VariableTable,
    },
};

/// Enforces `x < y` over numeric values.
#[derive(Debug, Clone)]
pub struct LessThan {
    vars: [VariableId; 2],
}

impl LessThan {
    pub fn new(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Self {
        Self {
            vars: [x.into(), y.into()],
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("{} < {}", self.vars[0], self.vars[1])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        is_satisfied_ordering("LessThan", &self.vars, assignment, true)
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        revise_ordering("LessThan", &self.vars, target, vars, true)
    }
}

/// Enforces `x <= y` over numeric values.
#[derive(Debug, Clone)]
pub struct LessThanOrEqual {
    vars: [VariableId; 2],
}

impl LessThanOrEqual {
    pub fn new(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Self {
        Self {
            vars: [x.into(), y.into()],
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("{} <= {}", self.vars[0], self.vars[1])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        is_satisfied_ordering("LessThanOrEqual", &self.vars, assignment, false)
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        revise_ordering("LessThanOrEqual", &self.vars, target, vars, false)
    }
}

fn ordering_holds(ordering: Ordering, strict: bool) -> bool {
    match ordering {
        Ordering::Less => true,
        Ordering::Equal => !strict,
        Ordering::Greater => false,
    }
}

fn numeric_cmp(constraint: &str, a: &Value, b: &Value) -> Result<Ordering> {
    if !a.is_numeric() || !b.is_numeric() {
        return Err(Error::TypeMismatch {
            constraint: constraint.to_string(),
            details: format!("cannot order {} and {} values", a.kind(), b.kind()),
        });
    }
    a.same_tag_cmp(b).ok_or_else(|| Error::TypeMismatch {
        constraint: constraint.to_string(),
        details: format!("cannot order {} against {}", a.kind(), b.kind()),
    })
}

/// Minimum and maximum of a domain under the numeric single-tag order.
/// `None` for an empty domain.
fn numeric_bounds<'a>(
    constraint: &str,
    domain: &'a Domain,
) -> Result<Option<(&'a Value, &'a Value)>> {
    let mut iter = domain.iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };
    if !first.is_numeric() {
        return Err(Error::TypeMismatch {
            constraint: constraint.to_string(),
            details: format!("cannot order {} values", first.kind()),
        });
    }
    let (mut lo, mut hi) = (first, first);
    for value in iter {
        if numeric_cmp(constraint, value, lo)? == Ordering::Less {
            lo = value;
        }
        if numeric_cmp(constraint, value, hi)? == Ordering::Greater {
            hi = value;
        }
    }
    Ok(Some((lo, hi)))
}

fn is_satisfied_ordering(
    name: &str,
    scope: &[VariableId; 2],
    assignment: &Assignment,
    strict: bool,
) -> Result<bool> {
    match (assignment.get(&scope[0]), assignment.get(&scope[1])) {
        (Some(u), Some(v)) => Ok(ordering_holds(numeric_cmp(name, u, v)?, strict)),
        _ => Ok(true),
    }
}

fn revise_ordering(
    name: &str,
    scope: &[VariableId; 2],
    target: &str,
    vars: &VariableTable,
    strict: bool,
) -> Result<Vec<Value>> {
    let target_is_left = target == scope[0];
    let other = if target_is_left {
        &scope[1]
    } else if target == scope[1] {
        &scope[0]
    } else {
        return Ok(Vec::new());
    };

    let other_domain = domain_or_err(vars, name, other)?;
    let target_domain = domain_or_err(vars, name, target)?;

    let Some((other_min, other_max)) = numeric_bounds(name, other_domain)? else {
        // No support at all: the whole target domain goes.
        return Ok(target_domain.values().to_vec());
    };

    let mut removed = Vec::new();
    for value in target_domain {
        let supported = if target_is_left {
            ordering_holds(numeric_cmp(name, value, other_max)?, strict)
        } else {
            ordering_holds(numeric_cmp(name, other_min, value)?, strict)
        };
        if !supported {
            removed.push(value.clone());
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{LessThan, LessThanOrEqual};
    use crate::solver::{
        domain::Domain, solution::Assignment, value::Value, variable::Variable,
        variable::VariableTable,
    };

    fn table(entries: &[(&str, &[i64])]) -> VariableTable {
        let mut vars = VariableTable::default();
        for (id, values) in entries {
            let domain = Domain::new(values.iter().map(|&i| Value::Int(i)).collect());
            vars.insert(Variable::new(id.to_string(), domain)).unwrap();
        }
        vars
    }

    #[test]
    fn revise_prunes_left_side_by_the_right_maximum() {
        let vars = table(&[("x", &[1, 3, 5]), ("y", &[2, 4])]);
        let constraint = LessThan::new("x", "y");

        let removed = constraint.revise("x", &vars).unwrap();
        assert_eq!(removed, vec![Value::Int(5)]);
    }

    #[test]
    fn revise_prunes_right_side_by_the_left_minimum() {
        let vars = table(&[("x", &[3, 4]), ("y", &[1, 3, 5])]);
        let constraint = LessThan::new("x", "y");

        let removed = constraint.revise("y", &vars).unwrap();
        assert_eq!(removed, vec![Value::Int(1), Value::Int(3)]);
    }

    #[test]
    fn less_than_or_equal_keeps_the_boundary_value() {
        let vars = table(&[("x", &[1, 3, 5]), ("y", &[2, 3])]);
        let constraint = LessThanOrEqual::new("x", "y");

        let removed = constraint.revise("x", &vars).unwrap();
        assert_eq!(removed, vec![Value::Int(5)]);
    }

    #[test]
    fn bound_pairs_are_compared_exactly() {
        let lt = LessThan::new("x", "y");
        let le = LessThanOrEqual::new("x", "y");

        let mut assignment = Assignment::new();
        assignment.insert("x".to_string(), Value::Int(3));
        assignment.insert("y".to_string(), Value::Int(3));

        assert!(!lt.is_satisfied(&assignment).unwrap());
        assert!(le.is_satisfied(&assignment).unwrap());
    }

    #[test]
    fn non_numeric_values_are_a_type_mismatch() {
        let constraint = LessThan::new("x", "y");

        let mut assignment = Assignment::new();
        assignment.insert("x".to_string(), Value::from("a"));
        assignment.insert("y".to_string(), Value::from("b"));

        assert!(constraint.is_satisfied(&assignment).is_err());
    }

    #[test]
    fn cross_tag_comparison_is_a_type_mismatch() {
        let constraint = LessThan::new("x", "y");

        let mut assignment = Assignment::new();
        assignment.insert("x".to_string(), Value::Int(1));
        assignment.insert("y".to_string(), Value::Float(2.0));

        assert!(constraint.is_satisfied(&assignment).is_err());
    }
}

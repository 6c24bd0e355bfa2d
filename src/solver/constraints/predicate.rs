//! Generic constraints defined by user-supplied pure predicates.

use std::fmt;

use crate::{
    error::Result,
    solver::{
        constraint::domain_or_err, engine::VariableId, solution::Assignment, value::Value,
        variable::VariableTable,
    },
};

pub type UnaryFn = dyn Fn(&Value) -> bool + Send + Sync;
pub type BinaryFn = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// Restricts a single variable to the values accepted by a predicate.
pub struct UnaryPredicate {
    vars: [VariableId; 1],
    predicate: Box<UnaryFn>,
}

impl UnaryPredicate {
    pub fn new(var: impl Into<VariableId>, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            vars: [var.into()],
            predicate: Box::new(predicate),
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("predicate({})", self.vars[0])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        match assignment.get(&self.vars[0]) {
            Some(value) => Ok((self.predicate)(value)),
            None => Ok(true),
        }
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        if target != self.vars[0] {
            return Ok(Vec::new());
        }
        let domain = domain_or_err(vars, "UnaryPredicate", target)?;
        Ok(domain
            .iter()
            .filter(|v| !(self.predicate)(v))
            .cloned()
            .collect())
    }
}

impl fmt::Debug for UnaryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryPredicate")
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

/// Relates two variables through an arbitrary predicate over their values.
///
/// The revise step is the textbook AC-3 support test: a value survives in
/// the target's domain only if some value of the other variable satisfies
/// the predicate with it, respecting argument order.
pub struct BinaryPredicate {
    vars: [VariableId; 2],
    predicate: Box<BinaryFn>,
}

impl BinaryPredicate {
    pub fn new(
        x: impl Into<VariableId>,
        y: impl Into<VariableId>,
        predicate: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            vars: [x.into(), y.into()],
            predicate: Box::new(predicate),
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("predicate({}, {})", self.vars[0], self.vars[1])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        match (assignment.get(&self.vars[0]), assignment.get(&self.vars[1])) {
            (Some(u), Some(v)) => Ok((self.predicate)(u, v)),
            _ => Ok(true),
        }
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        let target_is_left = target == self.vars[0];
        let other = if target_is_left {
            &self.vars[1]
        } else if target == self.vars[1] {
            &self.vars[0]
        } else {
            return Ok(Vec::new());
        };

        let other_domain = domain_or_err(vars, "BinaryPredicate", other)?;
        let target_domain = domain_or_err(vars, "BinaryPredicate", target)?;

        let mut removed = Vec::new();
        for value in target_domain {
            let supported = other_domain.iter().any(|w| {
                if target_is_left {
                    (self.predicate)(value, w)
                } else {
                    (self.predicate)(w, value)
                }
            });
            if !supported {
                removed.push(value.clone());
            }
        }
        Ok(removed)
    }
}

impl fmt::Debug for BinaryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryPredicate")
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

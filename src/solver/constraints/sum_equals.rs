//! An n-ary constraint requiring an integer scope to sum to a fixed target.

use crate::{
    error::{Error, Result},
    solver::{
        constraint::domain_or_err, domain::Domain, engine::VariableId, solution::Assignment,
        value::Value, variable::VariableTable,
    },
};

/// Enforces `vars[0] + vars[1] + ... == target` over integer values.
///
/// Pruning is by interval arithmetic: a candidate value survives only if the
/// target minus that candidate still fits inside the sum of the remaining
/// scope variables' domain ranges.
#[derive(Debug, Clone)]
pub struct SumEquals {
    vars: Vec<VariableId>,
    target: i64,
}

impl SumEquals {
    pub fn new<I>(vars: I, target: i64) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VariableId>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
            target,
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn description(&self) -> String {
        format!("{} == {}", self.vars.join(" + "), self.target)
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        let mut sum = 0i64;
        for id in &self.vars {
            match assignment.get(id) {
                Some(value) => sum += self.as_int(value)?,
                // An unbound scope variable leaves the constraint tentative.
                None => return Ok(true),
            }
        }
        Ok(sum == self.target)
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        if !self.vars.iter().any(|id| id == target) {
            return Ok(Vec::new());
        }

        let target_domain = domain_or_err(vars, "SumEquals", target)?;

        // Sum the domain ranges of every other scope variable. Singleton
        // domains contribute exact values, so assignments are accounted for.
        let mut rest_lo = 0i64;
        let mut rest_hi = 0i64;
        for id in &self.vars {
            if id == target {
                continue;
            }
            let domain = domain_or_err(vars, "SumEquals", id)?;
            let Some((lo, hi)) = self.int_bounds(domain)? else {
                // An empty neighbour domain admits no completion.
                return Ok(target_domain.values().to_vec());
            };
            rest_lo += lo;
            rest_hi += hi;
        }

        let mut removed = Vec::new();
        for value in target_domain {
            let v = self.as_int(value)?;
            let residue = self.target - v;
            if residue < rest_lo || residue > rest_hi {
                removed.push(value.clone());
            }
        }
        Ok(removed)
    }

    fn as_int(&self, value: &Value) -> Result<i64> {
        value.as_int().ok_or_else(|| Error::TypeMismatch {
            constraint: "SumEquals".to_string(),
            details: format!("expected an int value, found {}", value.kind()),
        })
    }

    fn int_bounds(&self, domain: &Domain) -> Result<Option<(i64, i64)>> {
        let mut bounds: Option<(i64, i64)> = None;
        for value in domain {
            let v = self.as_int(value)?;
            bounds = Some(match bounds {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        Ok(bounds)
    }
}

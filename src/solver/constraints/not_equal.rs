use crate::{
    error::Result,
    solver::{
        constraint::domain_or_err, engine::VariableId, solution::Assignment, value::Value,
        variable::VariableTable,
    },
};

/// Enforces inequality between two variables (`x != y`).
///
/// Pruning only fires once one side has been narrowed to a singleton: that
/// value is then removed from the other side's domain.
#[derive(Debug, Clone)]
pub struct NotEqual {
    vars: [VariableId; 2],
}

impl NotEqual {
    pub fn new(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Self {
        Self {
            vars: [x.into(), y.into()],
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("{} != {}", self.vars[0], self.vars[1])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        match (assignment.get(&self.vars[0]), assignment.get(&self.vars[1])) {
            (Some(u), Some(v)) => Ok(u != v),
            _ => Ok(true),
        }
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        let other = if target == self.vars[0] {
            &self.vars[1]
        } else if target == self.vars[1] {
            &self.vars[0]
        } else {
            return Ok(Vec::new());
        };

        let other_domain = domain_or_err(vars, "NotEqual", other)?;
        let Some(taken) = other_domain.singleton_value() else {
            return Ok(Vec::new());
        };

        let target_domain = domain_or_err(vars, "NotEqual", target)?;
        if target_domain.contains(taken) {
            Ok(vec![taken.clone()])
        } else {
            Ok(Vec::new())
        }
    }
}

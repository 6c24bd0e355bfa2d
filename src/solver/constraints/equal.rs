use crate::{
    error::Result,
    solver::{
        constraint::domain_or_err, engine::VariableId, solution::Assignment, value::Value,
        variable::VariableTable,
    },
};

/// Enforces equality between two variables (`x == y`).
///
/// Revising prunes the target's domain to its intersection with the other
/// side's domain. Works for any value tag, since equality is defined across
/// the whole [`Value`] union.
#[derive(Debug, Clone)]
pub struct Equal {
    vars: [VariableId; 2],
}

impl Equal {
    pub fn new(x: impl Into<VariableId>, y: impl Into<VariableId>) -> Self {
        Self {
            vars: [x.into(), y.into()],
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("{} == {}", self.vars[0], self.vars[1])
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        match (assignment.get(&self.vars[0]), assignment.get(&self.vars[1])) {
            (Some(u), Some(v)) => Ok(u == v),
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

        let other_domain = domain_or_err(vars, "Equal", other)?;
        let target_domain = domain_or_err(vars, "Equal", target)?;
        Ok(target_domain
            .iter()
            .filter(|v| !other_domain.contains(v))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Equal;
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
    fn revise_prunes_to_the_intersection() {
        let vars = table(&[("x", &[1, 2, 3]), ("y", &[2, 3, 4])]);
        let constraint = Equal::new("x", "y");

        let removed = constraint.revise("x", &vars).unwrap();
        assert_eq!(removed, vec![Value::Int(1)]);
    }

    #[test]
    fn revise_is_quiet_when_already_consistent() {
        let vars = table(&[("x", &[2, 3]), ("y", &[2, 3, 4])]);
        let constraint = Equal::new("x", "y");

        assert!(constraint.revise("x", &vars).unwrap().is_empty());
    }

    #[test]
    fn bound_values_are_compared_directly() {
        let constraint = Equal::new("x", "y");

        let mut assignment = Assignment::new();
        assignment.insert("x".to_string(), Value::Int(1));
        assert!(constraint.is_satisfied(&assignment).unwrap());

        assignment.insert("y".to_string(), Value::Int(2));
        assert!(!constraint.is_satisfied(&assignment).unwrap());
    }
}

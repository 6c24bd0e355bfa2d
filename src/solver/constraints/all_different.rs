use std::collections::HashSet;

use crate::{
    error::Result,
    solver::{
        constraint::domain_or_err, engine::VariableId, solution::Assignment, value::Value,
        variable::VariableTable,
    },
};

/// Requires all variables in a group to take pairwise distinct values.
///
/// The revise step projects out the values already uniquely owned by other
/// scope variables, i.e. those whose domain has collapsed to a singleton.
/// Hall-interval pruning is not implemented.
#[derive(Debug, Clone)]
pub struct AllDifferent {
    vars: Vec<VariableId>,
}

impl AllDifferent {
    pub fn new<I>(vars: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VariableId>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    pub fn description(&self) -> String {
        format!("AllDifferent({})", self.vars.join(", "))
    }

    pub(crate) fn is_satisfied(&self, assignment: &Assignment) -> Result<bool> {
        let mut seen: HashSet<&Value> = HashSet::with_capacity(self.vars.len());
        for id in &self.vars {
            if let Some(value) = assignment.get(id) {
                if !seen.insert(value) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    pub(crate) fn revise(&self, target: &str, vars: &VariableTable) -> Result<Vec<Value>> {
        if !self.vars.iter().any(|id| id == target) {
            return Ok(Vec::new());
        }

        let mut taken: Vec<Value> = Vec::new();
        for id in &self.vars {
            if id == target {
                continue;
            }
            let variable = vars.get(id).ok_or_else(|| crate::error::Error::UnknownVariable {
                constraint: "AllDifferent".to_string(),
                variable: id.clone(),
            })?;
            let owned = variable
                .assigned_value()
                .or_else(|| variable.domain().singleton_value());
            if let Some(value) = owned {
                if !taken.contains(value) {
                    taken.push(value.clone());
                }
            }
        }

        let target_domain = domain_or_err(vars, "AllDifferent", target)?;
        Ok(target_domain
            .iter()
            .filter(|v| taken.contains(v))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::AllDifferent;
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
    fn revise_removes_values_owned_by_singletons() {
        let vars = table(&[("a", &[1, 2, 3]), ("b", &[2]), ("c", &[3])]);
        let constraint = AllDifferent::new(["a", "b", "c"]);

        let removed = constraint.revise("a", &vars).unwrap();
        assert_eq!(removed, vec![Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn revise_ignores_wide_neighbours() {
        let vars = table(&[("a", &[1, 2]), ("b", &[1, 2]), ("c", &[1, 2])]);
        let constraint = AllDifferent::new(["a", "b", "c"]);

        assert!(constraint.revise("a", &vars).unwrap().is_empty());
    }

    #[test]
    fn duplicate_bound_values_prove_falsity() {
        let constraint = AllDifferent::new(["a", "b", "c"]);

        let mut assignment = Assignment::new();
        assignment.insert("a".to_string(), Value::Int(1));
        assignment.insert("c".to_string(), Value::Int(1));
        assert!(!constraint.is_satisfied(&assignment).unwrap());
    }

    #[test]
    fn partial_distinct_bindings_are_tentatively_satisfied() {
        let constraint = AllDifferent::new(["a", "b", "c"]);

        let mut assignment = Assignment::new();
        assignment.insert("a".to_string(), Value::Int(1));
        assignment.insert("b".to_string(), Value::Int(2));
        assert!(constraint.is_satisfied(&assignment).unwrap());
    }
}

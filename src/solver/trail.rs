use crate::solver::{value::Value, variable::VariableTable};

/// The undo log of domain removals.
///
/// Every value pruned during search is recorded here together with the
/// position it occupied, so a rollback replays the entries in reverse and
/// leaves each domain exactly as it was at the checkpoint. A checkpoint is
/// just the trail length at the moment a branch starts.
#[derive(Debug, Default)]
pub(crate) struct Trail {
    entries: Vec<TrailEntry>,
}

#[derive(Debug)]
struct TrailEntry {
    var: usize,
    value: Value,
    pos: usize,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn record(&mut self, var: usize, value: Value, pos: usize) {
        self.entries.push(TrailEntry { var, value, pos });
    }

    /// Replays removals in reverse down to `mark`, re-inserting each value at
    /// its recorded position.
    pub(crate) fn rollback_to(&mut self, mark: usize, vars: &mut VariableTable) {
        debug_assert!(mark <= self.entries.len(), "trail checkpoint out of range");
        while self.entries.len() > mark {
            let entry = self.entries.pop().expect("trail entry present above mark");
            vars.var_mut(entry.var)
                .domain_mut()
                .insert_at(entry.pos, entry.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Trail;
    use crate::solver::{domain::Domain, value::Value, variable::Variable, variable::VariableTable};

    fn table(values: &[i64]) -> VariableTable {
        let mut vars = VariableTable::default();
        let domain = Domain::new(values.iter().map(|&i| Value::Int(i)).collect());
        vars.insert(Variable::new("x".to_string(), domain)).unwrap();
        vars
    }

    #[test]
    fn rollback_restores_domains_exactly() {
        let mut vars = table(&[1, 2, 3, 4]);
        let mut trail = Trail::new();
        let snapshot = vars.var(0).domain().clone();

        let mark = trail.checkpoint();
        for value in [Value::Int(2), Value::Int(4), Value::Int(1)] {
            let pos = vars.var_mut(0).domain_mut().remove(&value).unwrap();
            trail.record(0, value, pos);
        }
        assert_eq!(vars.var(0).domain().len(), 1);

        trail.rollback_to(mark, &mut vars);
        assert_eq!(vars.var(0).domain(), &snapshot);
        assert_eq!(trail.checkpoint(), 0);
    }

    #[test]
    fn nested_checkpoints_unwind_independently() {
        let mut vars = table(&[1, 2, 3]);
        let mut trail = Trail::new();

        let outer = trail.checkpoint();
        let pos = vars.var_mut(0).domain_mut().remove(&Value::Int(1)).unwrap();
        trail.record(0, Value::Int(1), pos);

        let inner = trail.checkpoint();
        let pos = vars.var_mut(0).domain_mut().remove(&Value::Int(3)).unwrap();
        trail.record(0, Value::Int(3), pos);

        trail.rollback_to(inner, &mut vars);
        assert_eq!(
            vars.var(0).domain().values(),
            &[Value::Int(2), Value::Int(3)]
        );

        trail.rollback_to(outer, &mut vars);
        assert_eq!(
            vars.var(0).domain().values(),
            &[Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }
}

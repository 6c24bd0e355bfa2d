use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    solver::{
        domain::Domain,
        engine::{ConstraintId, VariableId},
        value::Value,
    },
};

/// A CSP variable: an identity, a mutable current domain and an optional
/// assignment.
///
/// Variables are owned by the solver. The constraints touching a variable
/// are tracked as indices into the solver's constraint list, never as
/// pointers, which keeps the variable/constraint cycle trivially safe.
#[derive(Debug, Clone)]
pub struct Variable {
    id: VariableId,
    domain: Domain,
    original: Domain,
    assigned: Option<Value>,
    constraints: Vec<ConstraintId>,
}

impl Variable {
    pub fn new(id: VariableId, domain: Domain) -> Self {
        Self {
            id,
            original: domain.clone(),
            domain,
            assigned: None,
            constraints: Vec::new(),
        }
    }

    pub fn id(&self) -> &VariableId {
        &self.id
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn domain_mut(&mut self) -> &mut Domain {
        &mut self.domain
    }

    /// The domain the variable was created with.
    pub fn original_domain(&self) -> &Domain {
        &self.original
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn assigned_value(&self) -> Option<&Value> {
        self.assigned.as_ref()
    }

    pub(crate) fn assign(&mut self, value: Value) {
        self.assigned = Some(value);
    }

    pub(crate) fn unassign(&mut self) {
        self.assigned = None;
    }

    /// Restores the original domain and clears any assignment and constraint
    /// bookkeeping, ready for a fresh solve.
    pub(crate) fn reset(&mut self) {
        self.domain = self.original.clone();
        self.assigned = None;
        self.constraints.clear();
    }

    pub(crate) fn add_constraint(&mut self, constraint: ConstraintId) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }

    /// Indices of the constraints whose scope contains this variable.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    /// Number of constraints attached to this variable.
    pub fn degree(&self) -> usize {
        self.constraints.len()
    }
}

/// The solver's variable store: insertion-ordered, with an id index.
///
/// Insertion order is the tie-break order for every heuristic, so iteration
/// always goes through the `Vec`, never the map.
#[derive(Debug, Default, Clone)]
pub(crate) struct VariableTable {
    vars: Vec<Variable>,
    index: HashMap<VariableId, usize>,
}

impl VariableTable {
    pub(crate) fn insert(&mut self, variable: Variable) -> Result<usize> {
        if self.index.contains_key(variable.id()) {
            return Err(Error::DuplicateVariable(variable.id().clone()));
        }
        let slot = self.vars.len();
        self.index.insert(variable.id().clone(), slot);
        self.vars.push(variable);
        Ok(slot)
    }

    pub(crate) fn len(&self) -> usize {
        self.vars.len()
    }

    pub(crate) fn var(&self, index: usize) -> &Variable {
        &self.vars[index]
    }

    pub(crate) fn var_mut(&mut self, index: usize) -> &mut Variable {
        &mut self.vars[index]
    }

    pub(crate) fn id_of(&self, index: usize) -> &VariableId {
        self.vars[index].id()
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Variable> {
        self.index_of(id).map(|i| &self.vars[i])
    }

    /// Current domain of the named variable, if it exists.
    pub(crate) fn domain_of(&self, id: &str) -> Option<&Domain> {
        self.get(id).map(Variable::domain)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.vars.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Variable> {
        self.vars.iter_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.vars.clear();
        self.index.clear();
    }
}

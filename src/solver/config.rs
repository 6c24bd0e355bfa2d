/// How the next branching variable is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableOrdering {
    /// First unassigned variable in insertion order.
    Static,
    /// Minimum remaining values; ties broken by degree, then insertion order.
    #[default]
    Mrv,
    /// Most constraints to other unassigned variables; ties by insertion order.
    Degree,
    /// MRV rescanned on every call, never cached.
    DynamicMrv,
}

/// The order in which a variable's candidate values are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Domain (insertion) order.
    #[default]
    Natural,
    /// Least constraining value first: ascending by how many neighbour
    /// values the assignment would rule out.
    LeastConstraining,
    /// Seeded deterministic shuffle.
    Random,
}

/// The propagation performed after each assignment (and once up front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationMode {
    /// Pure backtracking: constraints are only checked, never propagated.
    Disabled,
    /// Prune the neighbours of the freshly assigned variable.
    #[default]
    ForwardChecking,
    /// Re-establish full arc consistency after every assignment.
    ArcConsistency,
}

/// Solver configuration knobs. All fields have working defaults.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Solve budget in milliseconds; `0` disables the timeout.
    pub timeout_ms: f64,
    pub propagation: PropagationMode,
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    /// Seed for [`ValueOrdering::Random`]; fixed so runs are reproducible.
    pub random_seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 0.0,
            propagation: PropagationMode::default(),
            variable_ordering: VariableOrdering::default(),
            value_ordering: ValueOrdering::default(),
            random_seed: 42,
        }
    }
}

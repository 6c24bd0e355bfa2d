use std::collections::HashMap;
use std::sync::Arc;

use prettytable::{Cell, Row, Table};

use crate::solver::{constraint::Constraint, engine::ConstraintId};

/// Performance counters for a single constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerConstraintStats {
    /// How many times the constraint's revise step ran.
    pub revisions: u64,
    /// How many of those runs pruned at least one value.
    pub prunings: u64,
    /// Total time spent revising, in microseconds.
    pub time_spent_micros: u64,
}

/// Counters for the whole search. Accumulates across solves until
/// [`Solver::reset_statistics`](crate::solver::engine::Solver::reset_statistics)
/// is called.
#[derive(Debug, Default, Clone)]
pub struct SolverStats {
    /// Search tree nodes entered.
    pub nodes_explored: u64,
    /// Nodes whose candidate values were all exhausted.
    pub backtracks: u64,
    /// Satisfaction tests plus revise calls.
    pub constraint_checks: u64,
    /// Values removed from domains (and recorded on the trail).
    pub domain_reductions: u64,
    /// Wall-clock time across solves, in milliseconds.
    pub total_time_ms: f64,
    /// Per-constraint revise counters, keyed by constraint index.
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// Renders the per-constraint counters as a table, slowest constraint last.
pub fn render_stats_table(stats: &SolverStats, constraints: &[Arc<Constraint>]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (us)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(id, per)| (per.time_spent_micros, **id));

    for (constraint_id, per) in sorted_stats {
        let constraint = &constraints[*constraint_id];
        let avg_time = if per.revisions > 0 {
            per.time_spent_micros as f64 / per.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(constraint.name()),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&constraint.description()),
            Cell::new(&per.revisions.to_string()),
            Cell::new(&per.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!("{:.2}", per.time_spent_micros as f64 / 1000.0)),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::{PerConstraintStats, SolverStats};
    use crate::solver::constraints::not_equal;

    #[test]
    fn table_lists_every_tracked_constraint() {
        let constraints = vec![not_equal("x", "y"), not_equal("y", "z")];
        let mut stats = SolverStats::default();
        stats.constraint_stats.insert(
            0,
            PerConstraintStats {
                revisions: 4,
                prunings: 1,
                time_spent_micros: 12,
            },
        );
        stats.constraint_stats.insert(1, PerConstraintStats::default());

        let rendered = super::render_stats_table(&stats, &constraints);
        assert!(rendered.contains("NotEqual"));
        assert!(rendered.contains("x != y"));
        assert!(rendered.contains("y != z"));
    }
}

use pretty_assertions::assert_eq;
use rivet::solver::constraints::{all_different, binary_constraint, equal, not_equal, sum_equals};
use rivet::{Assignment, PropagationMode, Solver, Value, ValueOrdering, VariableOrdering};

fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Value> {
    values.into_iter().map(Value::Int).collect()
}

/// Builds the n-queens problem on column positions: one variable per row,
/// all positions distinct, and no two queens on a shared diagonal.
fn queens_solver(n: i64) -> Solver {
    let mut solver = Solver::new();
    let rows: Vec<String> = (0..n).map(|i| format!("q{i}")).collect();
    for row in &rows {
        solver.add_variable(row.clone(), ints(0..n)).unwrap();
    }
    solver.add_constraint(all_different(rows.clone()));
    for i in 0..n as usize {
        for j in (i + 1)..n as usize {
            let gap = (j - i) as i64;
            solver.add_constraint(binary_constraint(
                rows[i].clone(),
                rows[j].clone(),
                move |a, b| {
                    a.as_int()
                        .zip(b.as_int())
                        .is_some_and(|(a, b)| (a - b).abs() != gap)
                },
            ));
        }
    }
    solver
}

fn assert_valid_queens(n: i64, assignment: &Assignment) {
    let positions: Vec<i64> = (0..n)
        .map(|i| assignment[&format!("q{i}")].as_int().unwrap())
        .collect();
    for i in 0..n as usize {
        assert!((0..n).contains(&positions[i]));
        for j in (i + 1)..n as usize {
            assert_ne!(positions[i], positions[j], "columns clash");
            assert_ne!(
                (positions[i] - positions[j]).abs(),
                (j - i) as i64,
                "diagonals clash"
            );
        }
    }
}

#[test]
fn trivial_problem_solves_instantly() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut solver = Solver::new();
    solver.add_variable("x", ints([1])).unwrap();

    let solution = solver.solve().unwrap();

    assert!(solution.is_satisfied);
    assert_eq!(solution.assignment["x"], Value::Int(1));
    assert_eq!(solution.backtracks, 0);
}

#[test]
fn four_queens_solves_with_few_backtracks() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut solver = queens_solver(4);
    let solution = solver.solve().unwrap();

    assert!(solution.is_satisfied);
    assert_valid_queens(4, &solution.assignment);
    assert!(
        solution.backtracks <= 8,
        "expected at most 8 backtracks, got {}",
        solution.backtracks
    );
}

#[test]
fn eight_queens_solves_under_every_heuristic_combination() {
    let orderings = [
        VariableOrdering::Static,
        VariableOrdering::Mrv,
        VariableOrdering::Degree,
        VariableOrdering::DynamicMrv,
    ];
    let value_orderings = [
        ValueOrdering::Natural,
        ValueOrdering::LeastConstraining,
        ValueOrdering::Random,
    ];

    for variable_ordering in orderings {
        for value_ordering in value_orderings {
            let mut solver = queens_solver(8);
            solver.set_variable_ordering(variable_ordering);
            solver.set_value_ordering(value_ordering);

            let solution = solver.solve().unwrap();
            assert!(
                solution.is_satisfied,
                "8-queens failed under {variable_ordering:?}/{value_ordering:?}"
            );
            assert_valid_queens(8, &solution.assignment);
        }
    }
}

#[test]
fn contradictory_equality_pair_is_unsatisfiable() {
    let mut solver = Solver::new();
    solver.add_variable("x", ints([1, 2])).unwrap();
    solver.add_variable("y", ints([1, 2])).unwrap();
    solver.add_constraint(equal("x", "y"));
    solver.add_constraint(not_equal("x", "y"));

    let solution = solver.solve().unwrap();

    assert!(!solution.is_satisfied);
    assert!(solution.assignment.is_empty());
}

#[test]
fn distinct_triple_summing_to_twelve() {
    let mut solver = Solver::new();
    for id in ["a", "b", "c"] {
        solver.add_variable(id, ints(1..=5)).unwrap();
    }
    solver.add_constraint(sum_equals(["a", "b", "c"], 12));
    solver.add_constraint(all_different(["a", "b", "c"]));

    let solution = solver.solve().unwrap();
    assert!(solution.is_satisfied);

    let mut values: Vec<i64> = ["a", "b", "c"]
        .iter()
        .map(|id| solution.assignment[*id].as_int().unwrap())
        .collect();
    assert_eq!(values.iter().sum::<i64>(), 12);
    values.sort_unstable();
    // 12 from three distinct values in 1..=5 forces exactly {3, 4, 5}.
    assert_eq!(values, vec![3, 4, 5]);
}

#[test]
fn timeout_reports_unsatisfied_with_elapsed_budget() {
    // Pigeonhole: 14 variables over 13 values cannot all differ, and proving
    // it by search takes far longer than the granted budget.
    let mut solver = Solver::new();
    let vars: Vec<String> = (0..14).map(|i| format!("p{i}")).collect();
    for var in &vars {
        solver.add_variable(var.clone(), ints(0..13)).unwrap();
    }
    solver.add_constraint(all_different(vars));
    solver.set_timeout_ms(50.0);

    let solution = solver.solve().unwrap();

    assert!(!solution.is_satisfied);
    assert!(solution.assignment.is_empty());
    assert!(
        solution.solve_time_ms >= 45.0,
        "stopped well before the budget: {}ms",
        solution.solve_time_ms
    );
    assert!(solver.statistics().total_time_ms >= 45.0);
}

#[test]
fn validation_pinpoints_the_violated_constraint() {
    let mut solver = Solver::new();
    for id in ["a", "b", "c"] {
        solver.add_variable(id, ints(1..=3)).unwrap();
    }
    solver.add_constraint(all_different(["a", "b", "c"]));
    solver.add_constraint(not_equal("a", "b"));

    let mut assignment = Assignment::new();
    assignment.insert("a".to_string(), Value::Int(1));
    assignment.insert("b".to_string(), Value::Int(2));
    assignment.insert("c".to_string(), Value::Int(2));

    let report = solver.validate(&assignment);

    assert!(!report.is_valid);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].constraint_name, "AllDifferent");
    assert_eq!(
        report.violations[0].involved_variables,
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert_eq!(report.is_valid, solver.is_consistent(&assignment));
}

#[test]
fn identical_runs_are_byte_identical() {
    let build = || {
        let mut solver = queens_solver(6);
        solver.set_value_ordering(ValueOrdering::Random);
        solver.set_random_seed(7);
        solver
    };

    let mut first = build();
    let mut second = build();
    let a = first.solve().unwrap();
    let b = second.solve().unwrap();

    assert_eq!(a.assignment, b.assignment);
    assert_eq!(a.backtracks, b.backtracks);

    let (sa, sb) = (first.statistics(), second.statistics());
    assert_eq!(sa.nodes_explored, sb.nodes_explored);
    assert_eq!(sa.backtracks, sb.backtracks);
    assert_eq!(sa.constraint_checks, sb.constraint_checks);
    assert_eq!(sa.domain_reductions, sb.domain_reductions);
}

#[test]
fn satisfied_solutions_survive_validation() {
    let mut solver = queens_solver(6);
    let solution = solver.solve().unwrap();
    assert!(solution.is_satisfied);

    let report = solver.validate(&solution.assignment);
    assert!(report.is_valid, "violations: {:?}", report.violations);
}

#[test]
fn disabled_propagation_agrees_with_forward_checking() {
    let build = |mode| {
        let mut solver = Solver::new();
        solver.set_propagation_mode(mode);
        for id in ["a", "b", "c"] {
            solver.add_variable(id, ints(1..=3)).unwrap();
        }
        solver.add_constraint(all_different(["a", "b", "c"]));
        solver.add_constraint(sum_equals(["a", "b", "c"], 6));
        solver
    };

    let plain = build(PropagationMode::Disabled).solve().unwrap();
    let checked = build(PropagationMode::ForwardChecking).solve().unwrap();
    let full = build(PropagationMode::ArcConsistency).solve().unwrap();

    assert!(plain.is_satisfied);
    assert!(checked.is_satisfied);
    assert!(full.is_satisfied);
}

mod prop_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rivet::solver::constraints::not_equal;
    use rivet::{Solver, Value};

    fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Value> {
        values.into_iter().map(Value::Int).collect()
    }

    /// Random binary inequality CSPs, small enough to brute-force.
    fn random_csp() -> impl Strategy<Value = (usize, i64, Vec<(usize, usize)>)> {
        (2..5usize, 2..4i64).prop_flat_map(|(num_vars, domain_size)| {
            let edges = proptest::collection::vec(
                (0..num_vars, 0..num_vars)
                    .prop_filter("self-loops are trivially unsatisfiable", |(a, b)| a != b)
                    .prop_map(|(a, b)| if a < b { (a, b) } else { (b, a) }),
                0..=8,
            )
            .prop_map(|edges| {
                let unique: HashSet<(usize, usize)> = edges.into_iter().collect();
                let mut sorted: Vec<_> = unique.into_iter().collect();
                sorted.sort_unstable();
                sorted
            });
            (Just(num_vars), Just(domain_size), edges)
        })
    }

    fn brute_force_satisfiable(num_vars: usize, domain_size: i64, edges: &[(usize, usize)]) -> bool {
        let total = (domain_size as usize).pow(num_vars as u32);
        (0..total).any(|mut code| {
            let mut values = vec![0i64; num_vars];
            for slot in values.iter_mut() {
                *slot = (code % domain_size as usize) as i64;
                code /= domain_size as usize;
            }
            edges.iter().all(|&(a, b)| values[a] != values[b])
        })
    }

    proptest! {
        #[test]
        fn solver_agrees_with_brute_force((num_vars, domain_size, edges) in random_csp()) {
            let mut solver = Solver::new();
            for i in 0..num_vars {
                solver.add_variable(format!("v{i}"), ints(0..domain_size)).unwrap();
            }
            for &(a, b) in &edges {
                solver.add_constraint(not_equal(format!("v{a}"), format!("v{b}")));
            }

            let solution = solver.solve().unwrap();
            let expected = brute_force_satisfiable(num_vars, domain_size, &edges);
            prop_assert_eq!(solution.is_satisfied, expected);

            if solution.is_satisfied {
                prop_assert_eq!(solution.assignment.len(), num_vars);
                let report = solver.validate(&solution.assignment);
                prop_assert!(report.is_valid, "violations: {:?}", report.violations);
            }
        }
    }
}

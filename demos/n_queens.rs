//! Solves n-queens and prints the board plus the per-constraint statistics.
//!
//! Run with `cargo run --example n_queens`.

use rivet::solver::constraints::{all_different, binary_constraint};
use rivet::solver::stats::render_stats_table;
use rivet::{Solver, Value};

const N: i64 = 8;

fn main() -> rivet::Result<()> {
    tracing_subscriber::fmt::init();

    let mut solver = Solver::new();
    let rows: Vec<String> = (0..N).map(|i| format!("q{i}")).collect();
    for row in &rows {
        solver.add_variable(row.clone(), (0..N).map(Value::Int).collect())?;
    }
    solver.add_constraint(all_different(rows.clone()));
    for i in 0..N as usize {
        for j in (i + 1)..N as usize {
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

    let solution = solver.solve()?;
    if !solution.is_satisfied {
        println!("no solution for {N}-queens");
        return Ok(());
    }

    println!(
        "{N}-queens solved in {:.2}ms with {} backtracks",
        solution.solve_time_ms, solution.backtracks
    );
    for row in &rows {
        let column = solution.assignment[row].as_int().unwrap();
        let mut line = String::new();
        for c in 0..N {
            line.push_str(if c == column { " Q" } else { " ." });
        }
        println!("{line}");
    }

    println!("{}", render_stats_table(solver.statistics(), solver.constraints()));
    Ok(())
}

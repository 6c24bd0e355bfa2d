//! Fills a 3x3 magic square: digits 1..9, all lines summing to 15.
//!
//! Run with `cargo run --example magic_square`.

use rivet::solver::constraints::{all_different, sum_equals};
use rivet::{Solver, Value};

const MAGIC_SUM: i64 = 15;

fn main() -> rivet::Result<()> {
    tracing_subscriber::fmt::init();

    let mut solver = Solver::new();
    let cells: Vec<String> = (0..3)
        .flat_map(|r| (0..3).map(move |c| format!("m{r}{c}")))
        .collect();
    for cell in &cells {
        solver.add_variable(cell.clone(), (1..=9).map(Value::Int).collect())?;
    }
    solver.add_constraint(all_different(cells.clone()));

    let cell = |r: usize, c: usize| format!("m{r}{c}");
    for i in 0..3 {
        solver.add_constraint(sum_equals(
            (0..3).map(|c| cell(i, c)).collect::<Vec<_>>(),
            MAGIC_SUM,
        ));
        solver.add_constraint(sum_equals(
            (0..3).map(|r| cell(r, i)).collect::<Vec<_>>(),
            MAGIC_SUM,
        ));
    }
    solver.add_constraint(sum_equals(
        (0..3).map(|i| cell(i, i)).collect::<Vec<_>>(),
        MAGIC_SUM,
    ));
    solver.add_constraint(sum_equals(
        (0..3).map(|i| cell(i, 2 - i)).collect::<Vec<_>>(),
        MAGIC_SUM,
    ));

    let solution = solver.solve()?;
    if !solution.is_satisfied {
        println!("no magic square found");
        return Ok(());
    }

    println!(
        "solved in {:.2}ms with {} backtracks",
        solution.solve_time_ms, solution.backtracks
    );
    for r in 0..3 {
        let row: Vec<String> = (0..3)
            .map(|c| solution.assignment[&cell(r, c)].to_string())
            .collect();
        println!("{}", row.join(" "));
    }
    Ok(())
}

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyevolve::api::LayoutReport;
use keyevolve::geometry::KeyboardGeometry;
use keyevolve::layouts::Layout;
use keyevolve::optimizer::OptimizationResult;
use std::collections::BTreeMap;

/// Rows of the history table shown before the tail is elided.
const HISTORY_HEAD: usize = 10;

/// Draws the layout one keyboard row per table row. Keys beyond the
/// chromosome stay blank.
pub fn print_layout_grid(name: &str, layout: &Layout, keyboard: &KeyboardGeometry) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut rows: BTreeMap<i8, Vec<String>> = BTreeMap::new();
    for (i, key) in keyboard.keys().iter().enumerate() {
        let legend = layout
            .chars
            .get(i)
            .map_or(" ".to_string(), |c| c.to_string());
        rows.entry(key.row).or_default().push(legend);
    }

    for legends in rows.values() {
        let cells: Vec<Cell> = legends
            .iter()
            .map(|s| Cell::new(s).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_search_summary(result: &OptimizationResult) {
    let best = &result.best;
    println!("Best fitness: {:.4}", best.fitness_or_zero());
    if let Some(r) = best.result() {
        println!(
            "Distance score: {:.4} | Time score: {:.4}",
            r.distance_score, r.time_score
        );
    }
    println!("Layout: {}", best.layout.as_string());
    println!(
        "Generations: {} | Elapsed: {:.2?} | {}",
        result.generations,
        result.elapsed,
        if result.stagnated {
            "stopped on stagnation"
        } else {
            "reached generation limit"
        }
    );
}

/// Best fitness per generation. Long runs show the first generations,
/// every tenth one after that, and always the last.
pub fn print_history(history: &[f64]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Gen").add_attribute(Attribute::Bold),
        Cell::new("Best").fg(Color::Cyan),
        Cell::new("Delta"),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let last = history.len().saturating_sub(1);
    for (generation, &best) in history.iter().enumerate() {
        if generation >= HISTORY_HEAD && generation % 10 != 0 && generation != last {
            continue;
        }
        let delta = if generation == 0 { 0.0 } else { best - history[generation - 1] };
        table.add_row(vec![
            Cell::new(generation),
            Cell::new(format!("{:.5}", best)),
            Cell::new(format!("{:+.5}", delta)),
        ]);
    }
    println!("\n{}", table);
}

/// Ranked comparison; `reports` is expected best first.
pub fn print_comparison_report(reports: &[LayoutReport]) {
    let Some(best) = reports.first() else {
        return;
    };
    let best_fitness = best.result.fitness;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Fitness").fg(Color::Cyan),
        Cell::new("Dist"),
        Cell::new("Time"),
        Cell::new("Delta"),
        Cell::new("% Diff"),
    ]);
    for i in 2..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, report) in reports.iter().enumerate() {
        let r = &report.result;
        let delta = r.fitness - best_fitness;
        let pct = if best_fitness > 0.0 {
            (delta / best_fitness) * 100.0
        } else {
            0.0
        };

        let name_cell = if rank == 0 {
            Cell::new(&report.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&report.name)
        };
        let pct_cell = if pct < -5.0 {
            Cell::new(format!("{:.2}%", pct)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.2}%", pct))
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            name_cell,
            Cell::new(format!("{:.4}", r.fitness)),
            Cell::new(format!("{:.4}", r.distance_score)),
            Cell::new(format!("{:.4}", r.time_score)),
            Cell::new(format!("{:+.4}", delta)),
            pct_cell,
        ]);
    }
    println!("\n{}", table);
}

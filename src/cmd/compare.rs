use crate::reports;
use clap::Args;
use keyevolve::api::compare_layouts;
use keyevolve::config::Config;
use keyevolve::error::KeResult;
use keyevolve::fitness::Evaluator;
use keyevolve::geometry::KeyboardGeometry;
use keyevolve::layouts::all_layouts;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(evaluator: &Evaluator, keyboard: &KeyboardGeometry) -> KeResult<()> {
    let layouts = all_layouts();

    println!("\n🔎 === LAYOUT COMPARISON === 🔎");
    let reports = compare_layouts(evaluator, keyboard, &layouts);
    if let Some(top) = reports.first() {
        if let Some(layout) = layouts.iter().find(|l| l.name == top.name) {
            reports::print_layout_grid(&top.name, layout, keyboard);
        }
    }
    reports::print_comparison_report(&reports);
    Ok(())
}

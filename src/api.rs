use crate::fitness::{Evaluator, FitnessResult};
use crate::geometry::KeyboardGeometry;
use crate::layouts::Layout;

#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub name: String,
    pub layout: String,
    pub result: FitnessResult,
}

/// Scores `layouts` side by side, best first.
///
/// One warm-up pass folds every layout into the evaluator's calibration
/// before the reported pass, so no entry is judged against bounds that
/// happened to exclude a later one.
pub fn compare_layouts(
    evaluator: &Evaluator,
    keyboard: &KeyboardGeometry,
    layouts: &[Layout],
) -> Vec<LayoutReport> {
    for layout in layouts {
        evaluator.evaluate(layout, keyboard);
    }

    let mut reports: Vec<LayoutReport> = layouts
        .iter()
        .map(|layout| LayoutReport {
            name: layout.name.clone(),
            layout: layout.as_string(),
            result: evaluator.evaluate(layout, keyboard),
        })
        .collect();

    reports.sort_by(|a, b| b.result.fitness.total_cmp(&a.result.fitness));
    reports
}

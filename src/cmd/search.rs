use crate::reports;
use clap::Args;
use keyevolve::config::Config;
use keyevolve::error::KeResult;
use keyevolve::fitness::Evaluator;
use keyevolve::geometry::KeyboardGeometry;
use keyevolve::optimizer::{GenerationReport, GeneticOptimizer, OptimizationResult, ProgressCallback};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Independent runs; the best one is reported
    #[arg(short = 'a', long)]
    pub attempts: Option<usize>,
}

struct CliLogger {
    interval: usize,
}

impl ProgressCallback for CliLogger {
    fn on_generation(&self, report: &GenerationReport<'_>) {
        if report.generation % self.interval == 0 {
            info!(
                "Gen {:4} | Best: {:.5} | Stagnant: {:3} | Mut: {:.3}",
                report.generation,
                report.best.fitness_or_zero(),
                report.stagnation,
                report.mutation_rate
            );
        }
    }
}

pub fn run(
    args: &SearchArgs,
    config: Config,
    evaluator: Arc<Evaluator>,
    keyboard: Arc<KeyboardGeometry>,
) -> KeResult<()> {
    let optimizer = GeneticOptimizer::new(evaluator, keyboard.clone(), config.genetic)?;
    let attempts = args.attempts.unwrap_or(1).max(1);
    info!(
        "🧬 Population {} | Generations {} | Threads {}",
        optimizer.config().population_size,
        optimizer.config().max_generations,
        optimizer.config().worker_threads()
    );

    let mut best: Option<OptimizationResult> = None;
    for attempt in 0..attempts {
        let seed = args.seed.map(|s| s + attempt as u64 * 100);
        info!("➡️  Attempt #{} (seed: {:?})", attempt + 1, seed);

        let result = optimizer.run(seed, CliLogger { interval: 10 })?;
        let improved = best
            .as_ref()
            .map_or(true, |b| result.best.fitness_or_zero() > b.best.fitness_or_zero());
        if improved {
            best = Some(result);
        }
    }

    if let Some(result) = best {
        println!("\n=== 🏆 FINAL RESULT ===");
        reports::print_search_summary(&result);
        reports::print_layout_grid("OPTIMIZED", &result.best.layout, &keyboard);
        reports::print_history(&result.history);
    }
    Ok(())
}

pub mod crossover;
pub mod individual;
pub mod initialization;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::individual::{IdGen, Individual};
pub use self::runner::{
    GenerationReport, GeneticOptimizer, NoProgress, OptimizationResult, ProgressCallback,
};

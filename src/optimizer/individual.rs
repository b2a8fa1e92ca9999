use crate::fitness::FitnessResult;
use crate::layouts::Layout;
use std::sync::Arc;

/// Hands out identities that are unique within one run.
#[derive(Debug, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One member of the population. The layout is shared and never edited;
/// breeding always produces a fresh `Layout`.
#[derive(Debug, Clone)]
pub struct Individual {
    pub id: u64,
    pub layout: Arc<Layout>,
    pub generation: usize,
    pub parents: Vec<u64>,
    result: Option<FitnessResult>,
}

impl Individual {
    pub fn new(id: u64, layout: Arc<Layout>, generation: usize, parents: Vec<u64>) -> Self {
        debug_assert!(parents.len() <= 2);
        Self {
            id,
            layout,
            generation,
            parents,
            result: None,
        }
    }

    pub fn fitness(&self) -> Option<f64> {
        self.result.map(|r| r.fitness)
    }

    /// Ranking key: unevaluated individuals count as zero.
    #[inline(always)]
    pub fn fitness_or_zero(&self) -> f64 {
        self.fitness().unwrap_or(0.0)
    }

    pub fn result(&self) -> Option<&FitnessResult> {
        self.result.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.result.is_some()
    }

    /// Records the evaluation. Returns `false` and keeps the first result
    /// if this individual was already scored.
    pub fn set_result(&mut self, result: FitnessResult) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(result);
        true
    }
}

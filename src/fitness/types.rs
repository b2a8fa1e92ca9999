use std::time::Duration;

/// Unnormalized averages over the valid transitions of the sample text.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RawScores {
    pub distance: f64,
    pub time: f64,
    pub transitions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessResult {
    /// Normalized score in [0, 1], higher is better.
    pub fitness: f64,
    pub distance_score: f64,
    pub time_score: f64,
    pub elapsed: Duration,
}

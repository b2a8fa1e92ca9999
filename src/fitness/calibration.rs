use super::types::RawScores;
use crate::config::FitnessConfig;

/// Score returned for a dimension before any spread has been observed.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Running extremes of one raw-score dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline(always)]
    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Zero is the implicit floor: the minimum only decides whether a
    /// spread exists, it is never subtracted.
    #[inline(always)]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value / self.max).clamp(0.0, 1.0)
        } else {
            NEUTRAL_SCORE
        }
    }
}

/// Self-calibration state of an `Evaluator`. Snapshots can be taken and
/// restored so repeated runs share (or deliberately do not share) a scale.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub distance: Bounds,
    pub time: Bounds,
    pub samples: u64,
}

impl Calibration {
    pub fn observe(&mut self, raw: &RawScores) {
        self.distance.observe(raw.distance);
        self.time.observe(raw.time);
        self.samples += 1;
    }

    pub fn normalized(&self, raw: &RawScores) -> (f64, f64) {
        (
            self.distance.normalize(raw.distance),
            self.time.normalize(raw.time),
        )
    }

    /// Fitness under the current bounds, without observing `raw`.
    pub fn fitness(&self, raw: &RawScores, config: &FitnessConfig) -> f64 {
        let (nd, nt) = self.normalized(raw);
        let sickness = config.distance_weight * nd + config.time_weight * nt;
        (1.0 - sickness).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_is_neutral() {
        let mut b = Bounds::EMPTY;
        b.observe(3.0);
        assert_eq!(b.normalize(3.0), NEUTRAL_SCORE);
    }

    #[test]
    fn test_normalize_ignores_min() {
        let b = Bounds::new(2.0, 4.0);
        assert_eq!(b.normalize(2.0), 0.5);
        assert_eq!(b.normalize(4.0), 1.0);
        assert_eq!(b.normalize(8.0), 1.0);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Bounds::EMPTY.is_empty());
        assert_eq!(Bounds::EMPTY.normalize(1.0), NEUTRAL_SCORE);
    }
}

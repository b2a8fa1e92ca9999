pub mod calibration;
pub mod physics;
pub mod sample;
pub mod types;

pub use self::calibration::{Bounds, Calibration};
pub use self::types::{FitnessResult, RawScores};

use crate::config::FitnessConfig;
use crate::error::KeResult;
use crate::geometry::{distance_between, KeyNode, KeyboardGeometry};
use crate::layouts::Layout;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

/// Scores layouts by simulated travel distance and Fitts' movement time.
///
/// Raw scores are normalized against the extremes this instance has seen
/// so far, so the fitness scale adapts to the population being searched.
/// The calibration is shared by every caller of the same `Evaluator`; the
/// exact fitness of one layout therefore depends on evaluation order.
pub struct Evaluator {
    config: FitnessConfig,
    finger_scale: [f64; 5],
    sample: Vec<char>,
    calibration: Mutex<Calibration>,
}

impl Evaluator {
    pub fn new(config: FitnessConfig) -> KeResult<Self> {
        Self::with_text(config, sample::SAMPLE_TEXT)
    }

    /// Uses `text` (lowercased, truncated to `window_size`) instead of the
    /// built-in sample.
    pub fn with_text(config: FitnessConfig, text: &str) -> KeResult<Self> {
        config.validate()?;
        let finger_scale = config.get_finger_strength_scale()?;

        let sample: Vec<char> = text
            .chars()
            .flat_map(char::to_lowercase)
            .take(config.window_size)
            .collect();

        debug!(
            "Evaluator ready: {} sample chars, weights d={} t={}",
            sample.len(),
            config.distance_weight,
            config.time_weight
        );

        Ok(Self {
            config,
            finger_scale,
            sample,
            calibration: Mutex::new(Calibration::default()),
        })
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    pub fn sample_len(&self) -> usize {
        self.sample.len()
    }

    /// Scores `layout` on `keyboard` and folds the raw scores into this
    /// evaluator's calibration. Never fails: characters without a key are
    /// skipped.
    pub fn evaluate(&self, layout: &Layout, keyboard: &KeyboardGeometry) -> FitnessResult {
        let start = Instant::now();
        let raw = self.raw_scores(layout, keyboard);

        let fitness = {
            let mut cal = self.lock();
            cal.observe(&raw);
            cal.fitness(&raw, &self.config)
        };

        FitnessResult {
            fitness,
            distance_score: raw.distance,
            time_score: raw.time,
            elapsed: start.elapsed(),
        }
    }

    /// Stateless half of `evaluate`: averages over valid transitions only.
    pub fn raw_scores(&self, layout: &Layout, keyboard: &KeyboardGeometry) -> RawScores {
        // zip stops at the shorter side: a tail longer than the board is dropped
        let slots: HashMap<char, &KeyNode> = layout
            .chars
            .iter()
            .copied()
            .zip(keyboard.keys())
            .collect();

        let cfg = &self.config;
        let mut distance_sum = 0.0;
        let mut time_sum = 0.0;
        let mut transitions = 0usize;

        for pair in self.sample.windows(2) {
            let (Some(from), Some(to)) = (slots.get(&pair[0]), slots.get(&pair[1])) else {
                continue;
            };

            let dist = distance_between(from, to);
            distance_sum += dist;
            time_sum += physics::weighted_move_time(
                dist,
                cfg.fitts_a,
                cfg.fitts_b,
                cfg.key_width,
                to.finger,
                &self.finger_scale,
            );
            transitions += 1;
        }

        if transitions == 0 {
            return RawScores::default();
        }

        RawScores {
            distance: distance_sum / transitions as f64,
            time: time_sum / transitions as f64,
            transitions,
        }
    }

    pub fn calibration(&self) -> Calibration {
        *self.lock()
    }

    pub fn set_calibration(&self, calibration: Calibration) {
        *self.lock() = calibration;
    }

    pub fn reset_calibration(&self) {
        self.set_calibration(Calibration::default());
    }

    fn lock(&self) -> MutexGuard<'_, Calibration> {
        // Bounds only ever widen, so a panic mid-update leaves them usable.
        self.calibration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

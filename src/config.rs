use crate::error::{KeResult, KeyEvolveError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tolerance allowed when checking that the fitness weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Smallest population the engine will accept.
pub const MIN_POPULATION: usize = 4;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub fitness: FitnessConfig,
    #[command(flatten)]
    pub genetic: GeneticConfig,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    // === SICKNESS WEIGHTS ===
    #[arg(long, default_value_t = 0.5)]
    pub distance_weight: f64,
    #[arg(long, default_value_t = 0.5)]
    pub time_weight: f64,

    // === FITTS ===
    /// Fixed reaction cost per keystroke (ms)
    #[arg(long, default_value_t = 50.0)]
    pub fitts_a: f64,
    /// Slope applied to the index of difficulty (ms/bit)
    #[arg(long, default_value_t = 150.0)]
    pub fitts_b: f64,
    #[arg(long, default_value_t = 1.0)]
    pub key_width: f64,

    // === SIMULATION ===
    /// Number of sample-text characters walked per evaluation
    #[arg(long, default_value_t = 2000)]
    pub window_size: usize,

    /// Thumb, Index, Middle, Ring, Pinky
    #[arg(long, default_value = "1.3,1.0,1.2,1.5,1.8")]
    pub finger_strength_scale: String,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            distance_weight: 0.5,
            time_weight: 0.5,
            fitts_a: 50.0,
            fitts_b: 150.0,
            key_width: 1.0,
            window_size: 2000,
            finger_strength_scale: "1.3,1.0,1.2,1.5,1.8".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    #[arg(long, default_value_t = 100)]
    pub population_size: usize,
    #[arg(long, default_value_t = 200)]
    pub max_generations: usize,
    #[arg(long, default_value_t = 5)]
    pub tournament_size: usize,
    #[arg(long, default_value_t = 0.05)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = 4)]
    pub elite_count: usize,
    #[arg(long, default_value_t = 2)]
    pub offspring_per_pair: usize,
    #[arg(long, default_value_t = 30)]
    pub stagnation_limit: usize,

    /// Evaluation workers (defaults to available parallelism)
    #[arg(long)]
    pub num_threads: Option<usize>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            tournament_size: 5,
            mutation_rate: 0.05,
            elite_count: 4,
            offspring_per_pair: 2,
            stagnation_limit: 30,
            num_threads: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Copies every flag the user typed explicitly onto `self`, leaving
    /// file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(fitness, distance_weight);
        update_if_present!(fitness, time_weight);
        update_if_present!(fitness, fitts_a);
        update_if_present!(fitness, fitts_b);
        update_if_present!(fitness, key_width);
        update_if_present!(fitness, window_size);
        update_if_present!(fitness, finger_strength_scale);

        update_if_present!(genetic, population_size);
        update_if_present!(genetic, max_generations);
        update_if_present!(genetic, tournament_size);
        update_if_present!(genetic, mutation_rate);
        update_if_present!(genetic, elite_count);
        update_if_present!(genetic, offspring_per_pair);
        update_if_present!(genetic, stagnation_limit);
        update_if_present!(genetic, num_threads);
    }
}

impl FitnessConfig {
    pub fn validate(&self) -> KeResult<()> {
        for (name, w) in [
            ("distance_weight", self.distance_weight),
            ("time_weight", self.time_weight),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(config_err(format!("{} must be in [0, 1], got {}", name, w)));
            }
        }

        let sum = self.distance_weight + self.time_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(config_err(format!(
                "distance_weight + time_weight must equal 1.0 (got {:.4})",
                sum
            )));
        }

        let fitts_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !fitts_ok(self.fitts_a) || !fitts_ok(self.fitts_b) {
            return Err(config_err(format!(
                "Fitts constants must be finite and non-negative (a={}, b={})",
                self.fitts_a, self.fitts_b
            )));
        }
        if self.key_width <= 0.0 || !self.key_width.is_finite() {
            return Err(config_err(format!(
                "key_width must be positive, got {}",
                self.key_width
            )));
        }
        if self.window_size < 2 {
            return Err(config_err(
                "window_size must cover at least one transition".to_string(),
            ));
        }

        self.get_finger_strength_scale()?;
        Ok(())
    }

    /// Parsed multipliers indexed by `Finger as usize`.
    pub fn get_finger_strength_scale(&self) -> KeResult<[f64; 5]> {
        let scale = parse_f64_array::<5>(&self.finger_strength_scale, "finger_strength_scale")?;
        if scale.iter().any(|&s| s <= 0.0 || !s.is_finite()) {
            return Err(config_err(
                "finger_strength_scale values must be positive".to_string(),
            ));
        }
        Ok(scale)
    }
}

impl GeneticConfig {
    pub fn validate(&self) -> KeResult<()> {
        if self.population_size < MIN_POPULATION {
            return Err(config_err(format!(
                "population_size must be at least {}, got {}",
                MIN_POPULATION, self.population_size
            )));
        }

        for (name, v) in [
            ("max_generations", self.max_generations),
            ("tournament_size", self.tournament_size),
            ("offspring_per_pair", self.offspring_per_pair),
            ("stagnation_limit", self.stagnation_limit),
        ] {
            if v == 0 {
                return Err(config_err(format!("{} must be positive", name)));
            }
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(config_err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if self.elite_count > self.population_size / 2 {
            return Err(config_err(format!(
                "elite_count ({}) exceeds half the population ({})",
                self.elite_count,
                self.population_size / 2
            )));
        }

        if self.num_threads == Some(0) {
            return Err(config_err("num_threads must be positive".to_string()));
        }

        Ok(())
    }

    pub fn worker_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

fn config_err(msg: String) -> KeyEvolveError {
    KeyEvolveError::Config(msg)
}

fn parse_f64_array<const N: usize>(s: &str, name: &str) -> KeResult<[f64; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(config_err(format!("--{} requires {} values", name, N)));
    }
    let mut arr = [0.0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p
            .trim()
            .parse()
            .map_err(|_| config_err(format!("Invalid number in {}: '{}'", name, p.trim())))?;
    }
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        FitnessConfig::default().validate().unwrap();
        GeneticConfig::default().validate().unwrap();
    }

    #[test]
    fn test_finger_scale_order() {
        let scale = FitnessConfig::default().get_finger_strength_scale().unwrap();
        assert_eq!(scale, [1.3, 1.0, 1.2, 1.5, 1.8]);
    }

    #[test]
    fn test_weight_sum_tolerance() {
        let cfg = FitnessConfig {
            distance_weight: 0.5004,
            time_weight: 0.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());

        let cfg = FitnessConfig {
            distance_weight: 0.502,
            time_weight: 0.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}

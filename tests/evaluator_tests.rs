mod common;

use common::{alphabet, line_keyboard, short_window};
use keyevolve::config::FitnessConfig;
use keyevolve::fitness::calibration::NEUTRAL_SCORE;
use keyevolve::fitness::{Bounds, Calibration, Evaluator, RawScores};
use keyevolve::geometry::KnownKeyboard;
use keyevolve::layouts::{KnownLayout, Layout};
use proptest::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_first_evaluation_is_neutral() {
    let ev = Evaluator::new(FitnessConfig::default()).unwrap();
    let kb = line_keyboard(26);
    let qwerty = KnownLayout::Qwerty.layout();

    let result = ev.evaluate(&qwerty, &kb);
    assert!(result.distance_score > 0.0);
    assert!(result.time_score > 0.0);
    assert!((result.fitness - 0.5).abs() < 1e-12, "got {}", result.fitness);
    assert_eq!(ev.calibration().samples, 1);
}

#[test]
fn test_fitness_stays_in_unit_range() {
    let ev = Evaluator::new(short_window()).unwrap();
    let kb = KnownKeyboard::Ansi60.geometry();
    for kl in KnownLayout::iter() {
        let r = ev.evaluate(&kl.layout(), &kb);
        assert!((0.0..=1.0).contains(&r.fitness), "{} -> {}", kl, r.fitness);
    }
}

#[test]
fn test_known_raw_scores() {
    // a and b sit one unit apart on the line; "abab" has three a<->b moves
    let ev = Evaluator::with_text(FitnessConfig::default(), "ABAB").unwrap();
    let kb = line_keyboard(26);
    let layout = Layout::from_letters("abc", &alphabet());

    let raw = ev.raw_scores(&layout, &kb);
    assert_eq!(raw.transitions, 3);
    assert!((raw.distance - 1.0).abs() < 1e-12);
    // 50 + 150 * log2(2), index finger scale 1.0
    assert!((raw.time - 200.0).abs() < 1e-9);
}

#[test]
fn test_unmapped_text_is_neutral() {
    let ev = Evaluator::with_text(FitnessConfig::default(), "1234 5678 !!").unwrap();
    let kb = line_keyboard(26);
    let layout = Layout::from_letters("abc", &alphabet());

    assert_eq!(ev.raw_scores(&layout, &kb), RawScores::default());
    let r = ev.evaluate(&layout, &kb);
    assert_eq!(r.distance_score, 0.0);
    assert!((r.fitness - NEUTRAL_SCORE).abs() < 1e-12);
}

#[test]
fn test_long_chromosome_is_truncated() {
    let ev = Evaluator::new(short_window()).unwrap();
    let kb = line_keyboard(10);
    let layout = Layout::from_letters("long", &alphabet());

    let raw = ev.raw_scores(&layout, &kb);
    assert!(raw.transitions > 0);

    let short = Layout::from_letters("short", "abcdefghij");
    assert_eq!(raw, ev.raw_scores(&short, &kb));
}

#[test]
fn test_window_limits_sample() {
    let cfg = FitnessConfig {
        window_size: 10,
        ..Default::default()
    };
    let ev = Evaluator::new(cfg).unwrap();
    assert_eq!(ev.sample_len(), 10);
}

#[test]
fn test_better_layout_scores_higher_after_calibration() {
    // Text only uses a/b; putting them far apart is strictly worse.
    let ev = Evaluator::with_text(FitnessConfig::default(), "abababababab").unwrap();
    let kb = line_keyboard(26);
    let near = Layout::from_letters("near", &alphabet());
    let far = Layout::from_letters("far", "acdefghijklmnopqrstuvwxyzb");

    ev.evaluate(&near, &kb);
    ev.evaluate(&far, &kb);

    let near_fit = ev.evaluate(&near, &kb).fitness;
    let far_fit = ev.evaluate(&far, &kb).fitness;
    assert!(near_fit > far_fit, "{} <= {}", near_fit, far_fit);
    assert_eq!(far_fit, 0.0);
}

#[test]
fn test_calibration_snapshot_restores_scale() {
    let ev = Evaluator::new(short_window()).unwrap();
    let kb = KnownKeyboard::Ansi60.geometry();

    ev.evaluate(&KnownLayout::Qwerty.layout(), &kb);
    ev.evaluate(&KnownLayout::Dvorak.layout(), &kb);
    let snapshot = ev.calibration();

    let colemak = KnownLayout::Colemak.layout();
    let first = ev.evaluate(&colemak, &kb).fitness;
    ev.evaluate(&KnownLayout::Halmak.layout(), &kb);

    ev.set_calibration(snapshot);
    let replay = ev.evaluate(&colemak, &kb).fitness;
    assert_eq!(first, replay);

    ev.reset_calibration();
    assert_eq!(ev.calibration(), Calibration::default());
}

#[test]
fn test_shared_evaluator_across_threads() {
    let ev = Evaluator::new(short_window()).unwrap();
    let kb = KnownKeyboard::Ansi60.geometry();
    let layouts: Vec<KnownLayout> = KnownLayout::iter().collect();

    std::thread::scope(|s| {
        for kl in &layouts {
            let (ev, kb) = (&ev, &kb);
            s.spawn(move || ev.evaluate(&kl.layout(), kb));
        }
    });
    assert_eq!(ev.calibration().samples, layouts.len() as u64);
}

proptest! {
    #[test]
    fn test_lower_raw_scores_never_lose(
        d_max in 1.0..100.0f64,
        t_max in 100.0..5000.0f64,
        d1 in 0.0..1.0f64,
        d2 in 0.0..1.0f64,
        t1 in 0.0..1.0f64,
        t2 in 0.0..1.0f64,
    ) {
        let cal = Calibration {
            distance: Bounds::new(0.0, d_max),
            time: Bounds::new(0.0, t_max),
            samples: 2,
        };
        let cfg = FitnessConfig::default();
        let better = RawScores { distance: d1.min(d2) * d_max, time: t1.min(t2) * t_max, transitions: 1 };
        let worse = RawScores { distance: d1.max(d2) * d_max, time: t1.max(t2) * t_max, transitions: 1 };

        let fb = cal.fitness(&better, &cfg);
        let fw = cal.fitness(&worse, &cfg);
        prop_assert!(fb >= fw);
        prop_assert!((0.0..=1.0).contains(&fb));
    }
}

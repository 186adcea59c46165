use super::*;
use crate::error::TrainError;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;

// ============================================================================
// CyclicLr
// ============================================================================

#[test]
fn cyclic_worked_example() {
    let s = CyclicLr::new(4e-4, 10, 5, 0.5).unwrap();
    for epoch in 0..5 {
        assert_abs_diff_eq!(s.lr(epoch), 4e-4, epsilon = 1e-15);
    }
    for epoch in 5..10 {
        assert_abs_diff_eq!(s.lr(epoch), 2e-4, epsilon = 1e-15);
    }
    assert_abs_diff_eq!(s.lr(10), 4e-4, epsilon = 1e-15);
}

#[test]
fn cyclic_defaults() {
    let s = CyclicLr::default();
    assert_abs_diff_eq!(s.lr(0), 3e-4);
    assert_abs_diff_eq!(s.lr(10), 1.5e-4);
    assert_abs_diff_eq!(s.lr(29), 7.5e-5);
    assert_abs_diff_eq!(s.lr(30), 3e-4);
}

#[test]
fn cyclic_uneven_last_step_is_shorter() {
    // cycle 7, step 3 → steps [0,1,2] [3,4,5] [6]
    let s = CyclicLr::new(1.0, 7, 3, 0.5).unwrap();
    assert_abs_diff_eq!(s.lr(5), 0.5);
    assert_abs_diff_eq!(s.lr(6), 0.25);
    assert_abs_diff_eq!(s.lr(7), 1.0);
}

#[test]
fn cyclic_handles_huge_epochs() {
    let s = CyclicLr::new(1.0, 4, 2, 0.5).unwrap();
    assert_abs_diff_eq!(s.lr(usize::MAX), s.lr(usize::MAX % 4));
}

#[test]
fn cyclic_rejects_zero_lengths() {
    assert!(matches!(CyclicLr::new(1e-3, 0, 1, 0.5), Err(TrainError::InvalidSchedule(_))));
    assert!(matches!(CyclicLr::new(1e-3, 10, 0, 0.5), Err(TrainError::InvalidSchedule(_))));
}

#[test]
fn cyclic_rejects_bad_rates() {
    assert!(CyclicLr::new(f64::NAN, 10, 5, 0.5).is_err());
    assert!(CyclicLr::new(-1e-3, 10, 5, 0.5).is_err());
    assert!(CyclicLr::new(1e-3, 10, 5, 0.0).is_err());
    assert!(CyclicLr::new(1e-3, 10, 5, f64::INFINITY).is_err());
    assert!(matches!(CyclicLr::new(1e-3, 10, 5, 2.0), Err(TrainError::InvalidSchedule(_))));
    assert!(CyclicLr::new(1e-3, 10, 5, 1.0).is_ok());
}

// ============================================================================
// StepDecayLr / ConstantLr
// ============================================================================

#[test]
fn step_decay_defaults() {
    let s = StepDecayLr::default();
    assert_abs_diff_eq!(s.lr(0), 5e-4);
    assert_abs_diff_eq!(s.lr(49), 5e-4);
    assert_abs_diff_eq!(s.lr(50), 1e-4, epsilon = 1e-15);
    assert_abs_diff_eq!(s.lr(100), 2e-5, epsilon = 1e-15);
}

#[test]
fn step_decay_never_restarts() {
    let s = StepDecayLr::new(1.0, 2, 0.5).unwrap();
    let rates: Vec<f64> = (0..8).map(|e| s.lr(e)).collect();
    assert!(rates.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn step_decay_rejects_growing_factor() {
    assert!(matches!(StepDecayLr::new(1.0, 2, 1.5), Err(TrainError::InvalidSchedule(_))));
}

#[test]
fn constant_is_flat() {
    let s = ConstantLr::new(0.01).unwrap();
    assert_eq!(s.lr(0), s.lr(12345));
    assert!(ConstantLr::new(-0.01).is_err());
}

// ============================================================================
// ScheduleConfig
// ============================================================================

#[test]
fn config_fills_missing_fields_with_defaults() {
    let cfg: ScheduleConfig = serde_json::from_str(r#"{"kind":"cyclic","initial_lr":0.0004}"#).unwrap();
    let expected = ScheduleConfig::Cyclic(CyclicLr { initial_lr: 4e-4, ..CyclicLr::default() });
    assert_eq!(cfg, expected);
}

#[test]
fn config_builds_each_kind() {
    let cyclic = ScheduleConfig::default().build().unwrap();
    assert_abs_diff_eq!(cyclic.lr(30), 3e-4);

    let step: ScheduleConfig = serde_json::from_str(r#"{"kind":"step_decay"}"#).unwrap();
    assert_abs_diff_eq!(step.build().unwrap().lr(50), 1e-4, epsilon = 1e-15);

    let constant: ScheduleConfig = serde_json::from_str(r#"{"kind":"constant","lr":0.1}"#).unwrap();
    assert_abs_diff_eq!(constant.build().unwrap().lr(7), 0.1);
}

#[test]
fn config_build_validates() {
    let cfg: ScheduleConfig = serde_json::from_str(r#"{"kind":"cyclic","cycle_len":0}"#).unwrap();
    assert!(cfg.build().is_err());
}

// ============================================================================
// Properties
// ============================================================================

fn cyclic_strategy() -> impl Strategy<Value = CyclicLr> {
    (1e-6f64..1.0, 1usize..64, 1usize..64, 0.05f64..=1.0).prop_map(
        |(initial_lr, cycle_len, decay_step, decay_factor)| CyclicLr {
            initial_lr,
            cycle_len,
            decay_step,
            decay_factor,
        },
    )
}

proptest! {
    #[test]
    fn prop_cyclic_is_periodic(s in cyclic_strategy(), epoch in 0usize..100_000) {
        prop_assert_eq!(s.lr(epoch), s.lr(epoch % s.cycle_len));
        prop_assert_eq!(s.lr(epoch), s.lr(epoch + s.cycle_len));
    }

    #[test]
    fn prop_cyclic_non_increasing_within_cycle(s in cyclic_strategy()) {
        for pos in 1..s.cycle_len {
            prop_assert!(s.lr(pos) <= s.lr(pos - 1));
        }
    }

    #[test]
    fn prop_cyclic_decays_by_factor_at_boundaries(s in cyclic_strategy()) {
        let mut boundary = s.decay_step;
        while boundary < s.cycle_len {
            let ratio = s.lr(boundary) / s.lr(boundary - 1);
            prop_assert!((ratio - s.decay_factor).abs() < 1e-9);
            boundary += s.decay_step;
        }
    }

    #[test]
    fn prop_cyclic_bounded_by_initial(s in cyclic_strategy(), epoch in 0usize..10_000) {
        let lr = s.lr(epoch);
        prop_assert!(lr > 0.0 && lr <= s.initial_lr);
    }
}

//! Scenario tests for the rate conversion layer.
//!
//! These exercise the public API the way a simulation loop does: one curve
//! per event type, ages advancing a month at a time, rates compounded over a
//! year.

use approx::assert_relative_eq;
use fpsim_core::rates::reference;
use fpsim_core::{
    activity_probability, annual_to_step, miscarriage_probability, mortality_step_probability,
    pregnancy_step_probability, AgeIndexedCurve,
};
use proptest::prelude::*;

const MPY: f64 = 12.0;

/// Mortality rising linearly with age, sampled ten times per year.
fn mortality_curve() -> AgeIndexedCurve {
    let values = (0..=1000).map(|i| 0.001 + i as f64 * 2e-4).collect();
    AgeIndexedCurve::new(values, 10.0).unwrap()
}

#[test]
fn test_monthly_survival_compounds_to_annual_rate() {
    let curve = AgeIndexedCurve::annual(vec![0.02; 120]).unwrap();
    let mut survival = 1.0;
    for month in 0..12 {
        let age = 40.0 + month as f64 / MPY;
        survival *= 1.0 - curve.mortality_step_probability(1.0, age, MPY);
    }
    assert_relative_eq!(1.0 - survival, 0.02, epsilon = 1e-12);
}

#[test]
fn test_trend_above_one_matches_certain_death() {
    let values = vec![0.6; 120];
    let clamped = mortality_step_probability(&values, 2.5, 70.0, 1.0, MPY);
    let certain = mortality_step_probability(&vec![1.0; 120], 1.0, 70.0, 1.0, MPY);
    assert_eq!(clamped, certain);
}

#[test]
fn test_negative_trend_matches_zero_mortality() {
    let values = vec![0.6; 120];
    let clamped = mortality_step_probability(&values, -0.2 / 0.6, 70.0, 1.0, MPY);
    let zero = mortality_step_probability(&vec![0.0; 120], 1.0, 70.0, 1.0, MPY);
    assert_eq!(clamped, zero);
}

#[test]
fn test_fine_resolution_tracks_age_within_year() {
    let curve = mortality_curve();
    let january = curve.mortality_step_probability(1.0, 50.0, MPY);
    let june = curve.mortality_step_probability(1.0, 50.5, MPY);
    assert!(june > january);
    assert_relative_eq!(january, annual_to_step(0.001 + 500.0 * 2e-4, MPY), epsilon = 1e-15);
}

#[test]
fn test_pregnancy_scenarios() {
    let fecundity = AgeIndexedCurve::annual(vec![0.3; 50]).unwrap();

    let lam = fecundity.pregnancy_step_probability(1.0, 28.0, 0.0, true, 0.95, MPY);
    assert!((lam - 0.001258).abs() < 1e-6);

    // LAM efficacy wins over the method efficacy when both are present.
    let lam_with_method = fecundity.pregnancy_step_probability(1.0, 28.0, 0.99, true, 0.95, MPY);
    assert_eq!(lam, lam_with_method);

    let unprotected = fecundity.pregnancy_step_probability(1.0, 28.0, 0.0, false, 0.95, MPY);
    assert_relative_eq!(unprotected, annual_to_step(0.3, MPY), epsilon = 1e-15);
}

#[test]
fn test_curve_methods_match_slice_functions() {
    let curve = mortality_curve();
    for age in [0.0, 15.25, 49.9, 100.0] {
        assert_eq!(
            curve.mortality_step_probability(0.9, age, MPY),
            mortality_step_probability(curve.values(), 0.9, age, curve.resolution(), MPY)
        );
        assert_eq!(
            curve.pregnancy_step_probability(1.1, age, 0.5, false, 0.0, MPY),
            pregnancy_step_probability(
                curve.values(),
                1.1,
                age,
                curve.resolution(),
                0.5,
                false,
                0.0,
                MPY
            )
        );
    }
}

#[test]
fn test_activity_and_miscarriage_are_untransformed() {
    let activity: Vec<f64> = (0..=50).map(|age| if age < 15 { 0.0 } else { 0.85 }).collect();
    let miscarriage: Vec<f64> = (0..=50).map(|age| 0.1 + age as f64 * 0.005).collect();

    assert_eq!(activity_probability(&activity, 14.0, 1.0), 0.0);
    assert_eq!(activity_probability(&activity, 22.0, 1.0), 0.85);
    assert_eq!(miscarriage_probability(&miscarriage, 40.0, 1.0), miscarriage[40]);
}

#[test]
#[should_panic(expected = "outside curve")]
fn test_age_beyond_table_is_a_loud_failure() {
    let curve = AgeIndexedCurve::annual(vec![0.1; 51]).unwrap();
    let _ = curve.at_age(51.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_mortality_step_in_unit_interval(
        rate in 0.0..=1.0_f64,
        trend in -5.0..5.0_f64,
        age in 0.0..99.0_f64,
    ) {
        let curve = vec![rate; 100];
        let monthly = mortality_step_probability(&curve, trend, age, 1.0, MPY);
        prop_assert!((0.0..=1.0).contains(&monthly));
    }

    #[test]
    fn prop_reference_mortality_is_bit_identical(
        rate in 0.0..=1.0_f64,
        trend in -5.0..5.0_f64,
    ) {
        let curve = vec![rate; 10];
        let fast = mortality_step_probability(&curve, trend, 5.0, 1.0, MPY);
        let literal = reference::mortality_step_probability(&curve, trend, 5.0, 1.0, MPY);
        prop_assert_eq!(fast.to_bits(), literal.to_bits());
    }

    #[test]
    fn prop_pregnancy_step_bounded_for_bounded_inputs(
        rate in 0.0..=1.0_f64,
        efficacy in 0.0..=1.0_f64,
        lam_efficacy in 0.0..=1.0_f64,
        lam in any::<bool>(),
    ) {
        let curve = vec![rate; 10];
        let monthly =
            pregnancy_step_probability(&curve, 1.0, 5.0, 1.0, efficacy, lam, lam_efficacy, MPY);
        prop_assert!((0.0..=1.0).contains(&monthly));
    }
}

#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use la_peers::internals::math::transforms::{
    boxcox, boxcox_lambda, yeo_johnson, yeo_johnson_lambda, TransformKind,
};

// ============================================================================
// Transform Kind Tests
// ============================================================================

#[test]
fn test_wire_codes() {
    assert_eq!(TransformKind::Auto.code(), "none");
    assert_eq!(TransformKind::Log.code(), "log");
    assert_eq!(TransformKind::SquareRoot.code(), "sqrr");
    assert_eq!(TransformKind::Squared.code(), "squared");
    assert_eq!(TransformKind::YeoJohnson.code(), "yj");
    assert_eq!(TransformKind::BoxCox.code(), "bc");
    assert_eq!(TransformKind::Reciprocal.code(), "recip");
    assert_eq!(TransformKind::ReciprocalSqrt.code(), "recip_sqrr");
}

#[test]
fn test_default_is_auto() {
    assert_eq!(TransformKind::default(), TransformKind::Auto);
}

#[test]
fn test_candidate_order_starts_with_identity() {
    assert_eq!(TransformKind::CANDIDATES[0], TransformKind::Auto);
    assert_eq!(TransformKind::CANDIDATES.len(), 8);
}

#[test]
fn test_domain_admission() {
    let positive = [1.0, 2.5, 10.0];
    let with_zero = [0.0, 1.0, 2.0];
    let with_negative = [-1.0, 1.0, 2.0];

    // Unconstrained transforms admit everything.
    for kind in [
        TransformKind::Auto,
        TransformKind::Squared,
        TransformKind::YeoJohnson,
    ] {
        assert!(kind.admits(&with_negative));
        assert!(kind.domain_requirement().is_none());
    }

    // Square root tolerates zero but not negatives.
    assert!(TransformKind::SquareRoot.admits(&with_zero));
    assert!(!TransformKind::SquareRoot.admits(&with_negative));
    assert_eq!(
        TransformKind::SquareRoot.domain_requirement(),
        Some("requires non-negative values")
    );

    // Strictly positive family rejects zero.
    for kind in [
        TransformKind::Log,
        TransformKind::BoxCox,
        TransformKind::Reciprocal,
        TransformKind::ReciprocalSqrt,
    ] {
        assert!(kind.admits(&positive));
        assert!(!kind.admits(&with_zero));
        assert!(!kind.admits(&with_negative));
        assert_eq!(
            kind.domain_requirement(),
            Some("requires strictly positive values")
        );
    }
}

#[test]
fn test_apply_elementwise_transforms() {
    assert_eq!(
        TransformKind::Auto.apply(&[3.0, -1.0, 7.5]),
        vec![3.0, -1.0, 7.5]
    );

    let logged = TransformKind::Log.apply(&[1.0, std::f64::consts::E]);
    assert_relative_eq!(logged[0], 0.0);
    assert_relative_eq!(logged[1], 1.0);

    assert_eq!(TransformKind::SquareRoot.apply(&[4.0, 9.0]), vec![2.0, 3.0]);
    assert_eq!(TransformKind::Squared.apply(&[2.0, -3.0]), vec![4.0, 9.0]);
    assert_eq!(
        TransformKind::Reciprocal.apply(&[2.0, 4.0]),
        vec![0.5, 0.25]
    );

    let rs = TransformKind::ReciprocalSqrt.apply(&[4.0, 16.0]);
    assert_relative_eq!(rs[0], 0.5);
    assert_relative_eq!(rs[1], 0.25);
}

// ============================================================================
// Box-Cox Tests
// ============================================================================

#[test]
fn test_boxcox_at_unit_lambda_shifts_by_one() {
    let out = boxcox(&[1.0, 2.0, 5.0], 1.0);
    assert_relative_eq!(out[0], 0.0);
    assert_relative_eq!(out[1], 1.0);
    assert_relative_eq!(out[2], 4.0);
}

#[test]
fn test_boxcox_at_zero_lambda_is_log() {
    let values = [0.5, 1.0, std::f64::consts::E];
    let out = boxcox(&values, 0.0);
    for (o, v) in out.iter().zip(values.iter()) {
        assert_relative_eq!(*o, v.ln());
    }
}

#[test]
fn test_boxcox_general_lambda() {
    // (x^2 - 1) / 2
    let out = boxcox(&[1.0, 2.0, 4.0], 2.0);
    assert_relative_eq!(out[0], 0.0);
    assert_relative_eq!(out[1], 1.5);
    assert_relative_eq!(out[2], 7.5);
}

#[test]
fn test_boxcox_lambda_is_bounded_and_deterministic() {
    let values = [1.2, 3.7, 0.4, 12.9, 2.2, 6.1, 0.8, 4.4];
    let lambda: f64 = boxcox_lambda(&values);
    assert!(lambda.is_finite());
    assert!((-5.0..=5.0).contains(&lambda));
    assert_relative_eq!(lambda, boxcox_lambda(&values));
}

#[test]
fn test_boxcox_lambda_near_zero_for_lognormal_shape() {
    // exp of symmetric values; the log transform (lambda 0) symmetrizes
    // this exactly, so the fitted lambda lands near zero.
    let values: Vec<f64> = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0]
        .iter()
        .map(|x: &f64| x.exp())
        .collect();
    let lambda: f64 = boxcox_lambda(&values);
    assert!(lambda.abs() < 0.5, "lambda was {}", lambda);
}

// ============================================================================
// Yeo-Johnson Tests
// ============================================================================

#[test]
fn test_yeo_johnson_at_unit_lambda_is_identity() {
    let values = [-2.0, -0.5, 0.0, 1.0, 3.0];
    let out = yeo_johnson(&values, 1.0);
    for (o, v) in out.iter().zip(values.iter()) {
        assert_relative_eq!(*o, *v, epsilon = 1e-12);
    }
}

#[test]
fn test_yeo_johnson_branch_formulas() {
    // lambda 0, non-negative branch: ln(1 + x)
    let out = yeo_johnson(&[0.0, 1.0, 3.0], 0.0);
    assert_relative_eq!(out[0], 0.0);
    assert_relative_eq!(out[1], 2.0f64.ln());
    assert_relative_eq!(out[2], 4.0f64.ln());

    // lambda 2, negative branch: -ln(1 - x)
    let out = yeo_johnson(&[-1.0, -3.0], 2.0);
    assert_relative_eq!(out[0], -(2.0f64.ln()));
    assert_relative_eq!(out[1], -(4.0f64.ln()));

    // lambda 0.5, negative branch: -((1 - x)^1.5 - 1) / 1.5
    let out = yeo_johnson(&[-3.0], 0.5);
    assert_relative_eq!(out[0], -(4.0f64.powf(1.5) - 1.0) / 1.5);
}

#[test]
fn test_yeo_johnson_lambda_is_bounded_and_deterministic() {
    let values = [-3.2, 0.0, 1.7, 8.4, -0.9, 2.3, 15.0, 4.1];
    let lambda: f64 = yeo_johnson_lambda(&values);
    assert!(lambda.is_finite());
    assert!((-5.0..=5.0).contains(&lambda));
    assert_relative_eq!(lambda, yeo_johnson_lambda(&values));
}

#[test]
fn test_yeo_johnson_apply_produces_finite_output() {
    let values: [f64; 5] = [-40.0, -2.5, 0.0, 3.75, 120.0];
    let out = TransformKind::YeoJohnson.apply(&values);
    assert_eq!(out.len(), values.len());
    assert!(out.iter().all(|x| x.is_finite()));
}

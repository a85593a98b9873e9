//! Distribution-normalizing transforms.
//!
//! ## Purpose
//!
//! This module provides the closed set of per-feature transforms the engine
//! can apply before standardization, each with a declared domain predicate
//! and a forward mapping. Box-Cox and Yeo-Johnson fit their λ parameter by
//! maximizing the profile log-likelihood.
//!
//! ## Design notes
//!
//! * **Closed enumeration**: The transform set is fixed and small, so it is
//!   modeled as an enum with methods rather than a plugin trait.
//! * **Domain predicates**: Positivity-constrained transforms are excluded
//!   from candidacy up front, never attempted-and-caught.
//! * **λ search**: Golden-section maximization on [−5, 5] with a fixed
//!   iteration count, so fitting is deterministic across runs.
//!
//! ## Key concepts
//!
//! * **Wire code**: The short configuration code for each transform
//!   (`"yj"`, `"bc"`, `"log"`, ...). `"none"` requests automatic selection
//!   and doubles as the reported code when the identity mapping wins.
//!
//! ## Invariants
//!
//! * `apply` on values satisfying `admits` produces finite output for
//!   finite input, except where extreme magnitudes overflow the float type.
//!
//! ## Non-goals
//!
//! * This module does not choose between transforms (see the selection
//!   algorithm) and does not standardize.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// ============================================================================
// Transform Kind
// ============================================================================

/// A distribution-normalizing transform, or automatic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformKind {
    /// No manual override: the engine picks the best-normalizing candidate.
    /// The identity mapping is the first candidate, and this code is what
    /// the transform report shows when it wins.
    #[default]
    #[serde(rename = "none")]
    Auto,

    /// Natural logarithm. Requires strictly positive values.
    #[serde(rename = "log")]
    Log,

    /// Square root. Requires non-negative values.
    #[serde(rename = "sqrr")]
    SquareRoot,

    /// Square.
    #[serde(rename = "squared")]
    Squared,

    /// Yeo-Johnson power transform with λ fitted by maximum likelihood.
    /// Defined on all reals.
    #[serde(rename = "yj")]
    YeoJohnson,

    /// Box-Cox power transform with λ fitted by maximum likelihood.
    /// Requires strictly positive values.
    #[serde(rename = "bc")]
    BoxCox,

    /// Reciprocal (1/x). Requires strictly positive values.
    #[serde(rename = "recip")]
    Reciprocal,

    /// Reciprocal square root (1/√x). Requires strictly positive values.
    #[serde(rename = "recip_sqrr")]
    ReciprocalSqrt,
}

impl TransformKind {
    /// Fixed candidate set for automatic selection, in tie-break priority
    /// order. `Auto` stands for the identity mapping here.
    pub const CANDIDATES: [TransformKind; 8] = [
        TransformKind::Auto,
        TransformKind::Log,
        TransformKind::SquareRoot,
        TransformKind::Squared,
        TransformKind::YeoJohnson,
        TransformKind::BoxCox,
        TransformKind::Reciprocal,
        TransformKind::ReciprocalSqrt,
    ];

    /// The short configuration code for this transform.
    pub fn code(&self) -> &'static str {
        match self {
            TransformKind::Auto => "none",
            TransformKind::Log => "log",
            TransformKind::SquareRoot => "sqrr",
            TransformKind::Squared => "squared",
            TransformKind::YeoJohnson => "yj",
            TransformKind::BoxCox => "bc",
            TransformKind::Reciprocal => "recip",
            TransformKind::ReciprocalSqrt => "recip_sqrr",
        }
    }

    /// Whether every value satisfies this transform's domain constraint.
    pub fn admits<T: Float>(&self, values: &[T]) -> bool {
        match self {
            TransformKind::Auto | TransformKind::Squared | TransformKind::YeoJohnson => true,
            TransformKind::SquareRoot => values.iter().all(|&x| x >= T::zero()),
            TransformKind::Log
            | TransformKind::BoxCox
            | TransformKind::Reciprocal
            | TransformKind::ReciprocalSqrt => values.iter().all(|&x| x > T::zero()),
        }
    }

    /// Human-readable description of the domain constraint, if any.
    pub fn domain_requirement(&self) -> Option<&'static str> {
        match self {
            TransformKind::Auto | TransformKind::Squared | TransformKind::YeoJohnson => None,
            TransformKind::SquareRoot => Some("requires non-negative values"),
            TransformKind::Log
            | TransformKind::BoxCox
            | TransformKind::Reciprocal
            | TransformKind::ReciprocalSqrt => Some("requires strictly positive values"),
        }
    }

    /// Apply the forward mapping to a column.
    ///
    /// The caller must have checked `admits` first; violating the domain
    /// produces NaN rather than a panic.
    pub fn apply<T: Float>(&self, values: &[T]) -> Vec<T> {
        debug_assert!(self.admits(values), "Domain constraint violated");
        match self {
            TransformKind::Auto => values.to_vec(),
            TransformKind::Log => values.iter().map(|&x| x.ln()).collect(),
            TransformKind::SquareRoot => values.iter().map(|&x| x.sqrt()).collect(),
            TransformKind::Squared => values.iter().map(|&x| x * x).collect(),
            TransformKind::YeoJohnson => {
                let lambda = yeo_johnson_lambda(values);
                yeo_johnson(values, lambda)
            }
            TransformKind::BoxCox => {
                let lambda = boxcox_lambda(values);
                boxcox(values, lambda)
            }
            TransformKind::Reciprocal => values.iter().map(|&x| x.recip()).collect(),
            TransformKind::ReciprocalSqrt => values.iter().map(|&x| x.sqrt().recip()).collect(),
        }
    }
}

// ============================================================================
// Power Transform Forward Mappings
// ============================================================================

/// Box-Cox transform with a given λ: (x^λ − 1)/λ, or ln(x) at λ = 0.
///
/// All values must be strictly positive.
pub fn boxcox<T: Float>(values: &[T], lambda: T) -> Vec<T> {
    if lambda.abs() <= T::epsilon() {
        return values.iter().map(|&x| x.ln()).collect();
    }
    values
        .iter()
        .map(|&x| (x.powf(lambda) - T::one()) / lambda)
        .collect()
}

/// Yeo-Johnson transform with a given λ (the standard four-branch form).
pub fn yeo_johnson<T: Float>(values: &[T], lambda: T) -> Vec<T> {
    let two = T::from(2.0).unwrap();
    values
        .iter()
        .map(|&x| {
            if x >= T::zero() {
                if lambda.abs() <= T::epsilon() {
                    x.ln_1p()
                } else {
                    ((T::one() + x).powf(lambda) - T::one()) / lambda
                }
            } else if (lambda - two).abs() <= T::epsilon() {
                -(-x).ln_1p()
            } else {
                -((T::one() - x).powf(two - lambda) - T::one()) / (two - lambda)
            }
        })
        .collect()
}

// ============================================================================
// Maximum-Likelihood λ Estimation
// ============================================================================

/// λ search interval endpoints.
const LAMBDA_LO: f64 = -5.0;
const LAMBDA_HI: f64 = 5.0;

/// Golden-section iteration count; shrinks the interval well below f64
/// resolution (0.618^80 · 10 ≈ 2e-16).
const LAMBDA_ITERATIONS: usize = 80;

/// Estimate the Box-Cox λ maximizing the profile log-likelihood.
///
/// All values must be strictly positive.
pub fn boxcox_lambda<T: Float>(values: &[T]) -> T {
    let log_sum = values.iter().fold(T::zero(), |acc, &x| acc + x.ln());
    golden_section_max(|lambda| {
        let transformed = boxcox(values, lambda);
        power_log_likelihood(&transformed, lambda, log_sum)
    })
}

/// Estimate the Yeo-Johnson λ maximizing the profile log-likelihood.
pub fn yeo_johnson_lambda<T: Float>(values: &[T]) -> T {
    // Jacobian term: Σ sign(x)·ln(1 + |x|).
    let log_sum = values
        .iter()
        .fold(T::zero(), |acc, &x| acc + x.signum() * x.abs().ln_1p());
    golden_section_max(|lambda| {
        let transformed = yeo_johnson(values, lambda);
        power_log_likelihood(&transformed, lambda, log_sum)
    })
}

/// Profile log-likelihood shared by both power transforms:
/// −n/2 · ln(σ²_mle) + (λ − 1) · Σ log-Jacobian.
fn power_log_likelihood<T: Float>(transformed: &[T], lambda: T, log_sum: T) -> T {
    let n = T::from(transformed.len()).unwrap();
    let mean = transformed.iter().fold(T::zero(), |acc, &x| acc + x) / n;
    let var = transformed.iter().fold(T::zero(), |acc, &x| {
        let diff = x - mean;
        acc + diff * diff
    }) / n;

    if !(var.is_finite() && var > T::zero()) {
        return T::neg_infinity();
    }

    let two = T::from(2.0).unwrap();
    -(n / two) * var.ln() + (lambda - T::one()) * log_sum
}

/// Golden-section maximization over the fixed λ interval.
fn golden_section_max<T: Float, F: Fn(T) -> T>(objective: F) -> T {
    let inv_phi = (T::from(5.0).unwrap().sqrt() - T::one()) / T::from(2.0).unwrap();
    let mut lo = T::from(LAMBDA_LO).unwrap();
    let mut hi = T::from(LAMBDA_HI).unwrap();

    let mut c = hi - inv_phi * (hi - lo);
    let mut d = lo + inv_phi * (hi - lo);
    let mut fc = objective(c);
    let mut fd = objective(d);

    for _ in 0..LAMBDA_ITERATIONS {
        if fc > fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - inv_phi * (hi - lo);
            fc = objective(c);
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + inv_phi * (hi - lo);
            fd = objective(d);
        }
    }

    (lo + hi) / T::from(2.0).unwrap()
}

//! Sample moments and z-score standardization.
//!
//! ## Purpose
//!
//! This module provides the moment statistics the pipeline is built on:
//! mean, sample standard deviation, sample skewness, and the z-score
//! standardization that rescales each transformed feature column to zero
//! mean and unit variance.
//!
//! ## Design notes
//!
//! * **Sample variance**: Uses the n − 1 denominator, matching the
//!   population the table actually holds (retained units only).
//! * **Skewness**: Biased estimator m₃ / m₂^(3/2); it is used only as a
//!   relative score between transform candidates, so the small-sample bias
//!   correction buys nothing.
//! * **Degenerate columns**: A constant column standardizes to the zero
//!   vector instead of dividing by zero.
//!
//! ## Invariants
//!
//! * `standardize` output has mean ≈ 0 and sample sd ≈ 1 unless the input
//!   is constant, in which case the output is exactly zero everywhere.
//!
//! ## Non-goals
//!
//! * This module does not decide which transform to apply (see the
//!   selection algorithm) and does not emit diagnostics.

// External dependencies
use num_traits::Float;

// ============================================================================
// Moment Statistics
// ============================================================================

/// Arithmetic mean. Returns zero for an empty slice.
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
    sum / T::from(values.len()).unwrap()
}

/// Sample standard deviation (n − 1 denominator).
///
/// Returns zero for slices with fewer than two values.
#[inline]
pub fn sample_std<T: Float>(values: &[T]) -> T {
    let n = values.len();
    if n < 2 {
        return T::zero();
    }
    let m = mean(values);
    let sum_sq = values.iter().fold(T::zero(), |acc, &x| {
        let diff = x - m;
        acc + diff * diff
    });
    (sum_sq / T::from(n - 1).unwrap()).sqrt()
}

/// Biased sample skewness: m₃ / m₂^(3/2) over population moments.
///
/// Returns zero for constant or near-constant input (m₂ below machine
/// epsilon), so a flat column scores as perfectly symmetric.
#[inline]
pub fn skewness<T: Float>(values: &[T]) -> T {
    if values.len() < 2 {
        return T::zero();
    }

    let n = T::from(values.len()).unwrap();
    let m = mean(values);

    let (m2, m3) = values.iter().fold((T::zero(), T::zero()), |(m2, m3), &x| {
        let diff = x - m;
        let sq = diff * diff;
        (m2 + sq, m3 + sq * diff)
    });
    let m2 = m2 / n;
    let m3 = m3 / n;

    if m2 <= T::epsilon() {
        return T::zero();
    }

    m3 / (m2 * m2.sqrt())
}

// ============================================================================
// Standardization
// ============================================================================

/// Result of standardizing a column, retaining the fitted parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized<T> {
    /// Z-scored data (or the zero vector for a constant column).
    pub data: Vec<T>,
    /// Mean subtracted from every value.
    pub center: T,
    /// Standard deviation divided out (1 when the column is constant).
    pub scale: T,
    /// Whether the column was constant (sd of 0).
    pub degenerate: bool,
}

/// Standardize a column to zero mean and unit sample variance.
///
/// A constant column has standard deviation 0; dividing by it would flood
/// the distance computation with NaN, so the scale falls back to 1 and the
/// centered values (all zero) pass through unchanged.
pub fn standardize<T: Float>(values: &[T]) -> Standardized<T> {
    if values.is_empty() {
        return Standardized {
            data: Vec::new(),
            center: T::zero(),
            scale: T::one(),
            degenerate: false,
        };
    }

    let center = mean(values);
    let std = sample_std(values);
    let degenerate = std <= T::epsilon();
    let scale = if degenerate { T::one() } else { std };

    let data = values.iter().map(|&x| (x - center) / scale).collect();

    Standardized {
        data,
        center,
        scale,
        degenerate,
    }
}

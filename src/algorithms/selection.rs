//! Automatic transform selection.
//!
//! ## Purpose
//!
//! This module picks, for each feature without a manual override, the
//! candidate transform that best normalizes the column's distribution.
//! Candidates are scored by absolute sample skewness; the lowest score
//! wins.
//!
//! ## Design notes
//!
//! * **Deterministic**: Candidates are evaluated in a fixed priority order
//!   and ties keep the earlier candidate, so identical input always yields
//!   the identical choice. The identity mapping is first, so a tie never
//!   moves data away from raw values.
//! * **Domain filtering**: Positivity-constrained transforms are skipped
//!   outright when any value violates their domain.
//! * **Score transparency**: Every evaluated candidate's score is recorded
//!   for the output report.
//!
//! ## Key concepts
//!
//! * **Score**: |skewness| of the transformed column; lower is closer to
//!   symmetric.
//!
//! ## Invariants
//!
//! * The identity candidate always admits, so selection never comes up
//!   empty-handed on finite input.
//!
//! ## Non-goals
//!
//! * This module does not enforce manual overrides (see `apply_override`'s
//!   caller in the engine for the error path wiring) and does not
//!   standardize.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::moments::skewness;
use crate::math::transforms::TransformKind;
use crate::primitives::errors::PeerError;

// ============================================================================
// Selection Types
// ============================================================================

/// Score of one evaluated transform candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// The candidate transform.
    pub transform: TransformKind,
    /// Absolute sample skewness of the transformed column.
    pub score: f64,
}

/// Outcome of automatic selection for one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    /// The winning transform.
    pub chosen: TransformKind,
    /// The column under the winning transform.
    pub transformed: Vec<T>,
    /// Scores of every candidate that was evaluated (domain-valid and
    /// finite), in candidate-priority order.
    pub scores: Vec<CandidateScore>,
}

// ============================================================================
// Selection
// ============================================================================

/// Choose the best-normalizing transform for a column.
///
/// Iterates the fixed candidate set, skipping candidates whose domain the
/// column violates or whose transformed output or score is non-finite, and
/// picks the lowest absolute skewness. Ties keep the earlier candidate.
pub fn select_transform<T: Float>(feature: &str, values: &[T]) -> Selection<T> {
    let mut scores = Vec::new();
    let mut best: Option<(f64, TransformKind, Vec<T>)> = None;

    for &candidate in TransformKind::CANDIDATES.iter() {
        if !candidate.admits(values) {
            continue;
        }

        let transformed = candidate.apply(values);
        if transformed.iter().any(|x| !x.is_finite()) {
            continue;
        }

        let score = skewness(&transformed).abs().to_f64().unwrap_or(f64::NAN);
        if !score.is_finite() {
            continue;
        }

        scores.push(CandidateScore {
            transform: candidate,
            score,
        });

        let improves = match &best {
            Some((best_score, _, _)) => score < *best_score,
            None => true,
        };
        if improves {
            best = Some((score, candidate, transformed));
        }
    }

    let (chosen, transformed) = match best {
        Some((_, chosen, transformed)) => (chosen, transformed),
        // Every candidate produced non-finite output; fall back to raw values.
        None => (TransformKind::Auto, values.to_vec()),
    };

    tracing::info!(
        feature = %feature,
        transform = chosen.code(),
        "selected transform"
    );

    Selection {
        chosen,
        transformed,
        scores,
    }
}

/// Apply a manual transform override, enforcing its domain constraint.
///
/// Fails with an error naming the feature when the column violates the
/// transform's domain (e.g. a zero value under a reciprocal-family
/// transform); values are never silently coerced.
pub fn apply_override<T: Float>(
    feature: &str,
    kind: TransformKind,
    values: &[T],
) -> Result<Vec<T>, PeerError> {
    if !kind.admits(values) {
        // admits() only fails for domain-constrained transforms, so the
        // requirement string is always present here.
        let reason = kind
            .domain_requirement()
            .unwrap_or("domain constraint violated")
            .to_string();
        return Err(PeerError::InvalidTransform {
            feature: feature.to_string(),
            transform: kind.code(),
            reason,
        });
    }
    Ok(kind.apply(values))
}

//! Feature configuration and weight application.
//!
//! ## Purpose
//!
//! This module defines the validated feature record (name, weight,
//! optional transform override) and the weighting stage: dropping
//! zero-weight features before any fitting, and scaling standardized
//! columns by their configured weight.
//!
//! ## Design notes
//!
//! * **Zero means gone**: A weight of 0 excludes the feature from the
//!   pipeline entirely, so it cannot influence transform fitting or
//!   standardization statistics.
//! * **Stable order**: Retained features keep configuration order, so
//!   reports are reproducible run to run.
//!
//! ## Invariants
//!
//! * Weights reaching `scale_columns` are in (0, 1] (validated upstream).
//!
//! ## Non-goals
//!
//! * This module does not validate weight bounds (see the engine
//!   validator) and does not standardize.

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::transforms::TransformKind;
use crate::primitives::table::FeatureTable;

// ============================================================================
// Feature Record
// ============================================================================

/// One configured feature: name, weight, and optional transform override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Column name in the input table.
    pub name: String,

    /// Influence on the distance computation, in [0, 1]. 0 excludes the
    /// feature entirely.
    pub weight: f64,

    /// Manual transform override; `Auto` (the default) selects
    /// automatically.
    #[serde(default)]
    pub transform: TransformKind,
}

impl Feature {
    /// Create a feature with automatic transform selection.
    pub fn new<S: Into<String>>(name: S, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            transform: TransformKind::Auto,
        }
    }

    /// Set a manual transform override.
    pub fn transform(mut self, kind: TransformKind) -> Self {
        self.transform = kind;
        self
    }
}

// ============================================================================
// Weighting Stage
// ============================================================================

/// Features with non-zero weight, in configuration order.
pub fn retain_positive(features: &[Feature]) -> Vec<Feature> {
    features
        .iter()
        .filter(|f| f.weight > 0.0)
        .cloned()
        .collect()
}

/// Multiply each column of a standardized table by its feature weight.
///
/// `weights` must be parallel to the table's columns.
pub fn scale_columns<T: Float>(table: &FeatureTable<T>, weights: &[T]) -> FeatureTable<T> {
    debug_assert_eq!(table.n_features(), weights.len());

    let columns = table
        .columns()
        .iter()
        .zip(weights.iter())
        .map(|(column, &w)| column.iter().map(|&x| x * w).collect())
        .collect();

    FeatureTable::from_parts(
        table.feature_names().to_vec(),
        table.codes().to_vec(),
        table.la_names().to_vec(),
        columns,
    )
}

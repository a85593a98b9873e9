//! Input validation for peer-group configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation for the engine's configuration and
//! input table. It checks weight bounds, peer counts, duplicate
//! configuration, and reconciles the configured features against the
//! incoming table before any statistic is computed.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Ordering**: Configuration errors surface at build time; table
//!   errors surface at fit time, before transform fitting.
//!
//! ## Key concepts
//!
//! * **Weight bounds**: Every configured weight must lie in [0, 1].
//! * **Reconciliation**: Every configured feature must have a column.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not filter, transform, or standardize data.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::weighting::Feature;
use crate::primitives::errors::PeerError;
use crate::primitives::table::FeatureTable;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for peer-group configuration and input data.
///
/// Provides static methods for validating configuration and input tables.
/// All methods return `Result<(), PeerError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate a single feature weight against the [0, 1] bound.
    pub fn validate_weight(feature: &str, weight: f64) -> Result<(), PeerError> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(PeerError::InvalidWeight {
                feature: feature.to_string(),
                weight,
            });
        }
        Ok(())
    }

    /// Validate the full feature configuration.
    ///
    /// Checks every weight bound, rejects duplicate feature names, and
    /// requires at least one feature with non-zero weight.
    pub fn validate_features(features: &[Feature]) -> Result<(), PeerError> {
        for feature in features {
            Self::validate_weight(&feature.name, feature.weight)?;
        }

        for (i, feature) in features.iter().enumerate() {
            if features[..i].iter().any(|f| f.name == feature.name) {
                return Err(PeerError::DuplicateFeature {
                    feature: feature.name.clone(),
                });
            }
        }

        if !features.iter().any(|f| f.weight > 0.0) {
            return Err(PeerError::EmptyFeatureSet);
        }

        Ok(())
    }

    /// Validate the configured peer count.
    pub fn validate_n_peers(n_peers: usize) -> Result<(), PeerError> {
        if n_peers == 0 {
            return Err(PeerError::InvalidPeerCount { got: n_peers });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), PeerError> {
        if let Some(param) = duplicate_param {
            return Err(PeerError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Table Validation
    // ========================================================================

    /// Validate the input table against the feature configuration.
    ///
    /// Checks that the table is non-empty, that no two rows share an LA
    /// code, and that every configured feature has a matching column.
    pub fn validate_table<T: Float>(
        table: &FeatureTable<T>,
        features: &[Feature],
    ) -> Result<(), PeerError> {
        if table.is_empty() {
            return Err(PeerError::EmptyTable);
        }

        let codes = table.codes();
        for (i, code) in codes.iter().enumerate() {
            if codes[..i].contains(code) {
                return Err(PeerError::DuplicateLaCode { code: code.clone() });
            }
        }

        for feature in features {
            if table.column(&feature.name).is_none() {
                return Err(PeerError::MissingFeature {
                    feature: feature.name.clone(),
                });
            }
        }

        Ok(())
    }
}

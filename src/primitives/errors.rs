//! Error types for peer-group computation.
//!
//! ## Purpose
//!
//! This module defines the error taxonomy for the peer-group engine.
//! Every fallible operation in the crate surfaces one of these variants;
//! all of them are fatal for the current run and carry enough context to
//! name the offending feature, unit, or parameter.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Errors abort the run; there is no partial-result mode.
//! * **Context**: Variants name the feature/code that triggered them.
//! * **Determinism**: The engine is pure, so retrying with identical input
//!   reproduces the same error.
//!
//! ## Non-goals
//!
//! * This module does not log or format reports; it only describes failures.

// External dependencies
use std::error::Error;
use std::fmt;

// ============================================================================
// Error Enum
// ============================================================================

/// Errors that can occur during peer-group configuration or fitting.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerError {
    /// A configured feature weight falls outside [0, 1].
    InvalidWeight {
        /// Name of the offending feature.
        feature: String,
        /// The rejected weight value.
        weight: f64,
    },

    /// A manual transform override was applied to data violating its domain.
    InvalidTransform {
        /// Name of the offending feature.
        feature: String,
        /// Wire code of the rejected transform.
        transform: &'static str,
        /// Description of the violated domain constraint.
        reason: String,
    },

    /// Every configured feature has weight 0, leaving nothing to compute
    /// distance over.
    EmptyFeatureSet,

    /// The configured peer count is zero.
    InvalidPeerCount {
        /// The rejected peer count.
        got: usize,
    },

    /// A configured feature has no corresponding column in the input table.
    MissingFeature {
        /// Name of the missing feature.
        feature: String,
    },

    /// The same feature name was configured more than once.
    DuplicateFeature {
        /// Name of the duplicated feature.
        feature: String,
    },

    /// Two rows in the input table share the same LA code.
    DuplicateLaCode {
        /// The duplicated LA code.
        code: String,
    },

    /// A builder parameter was set multiple times.
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    /// A pushed row does not match the table's feature count.
    MismatchedRow {
        /// Number of values expected per row.
        expected: usize,
        /// Number of values actually supplied.
        got: usize,
    },

    /// A non-finite value (NaN or infinity) was encountered in input data.
    InvalidNumericValue(String),

    /// The input table contains no rows after exclusions.
    EmptyTable,
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerError::InvalidWeight { feature, weight } => {
                write!(
                    f,
                    "Invalid weight for feature '{}': {} (must be in [0, 1])",
                    feature, weight
                )
            }
            PeerError::InvalidTransform {
                feature,
                transform,
                reason,
            } => {
                write!(
                    f,
                    "Invalid transform '{}' for feature '{}': {}",
                    transform, feature, reason
                )
            }
            PeerError::EmptyFeatureSet => {
                write!(f, "No features with non-zero weight remain")
            }
            PeerError::InvalidPeerCount { got } => {
                write!(f, "Invalid n_peers: {} (must be at least 1)", got)
            }
            PeerError::MissingFeature { feature } => {
                write!(
                    f,
                    "Feature '{}' has no matching column in the input table",
                    feature
                )
            }
            PeerError::DuplicateFeature { feature } => {
                write!(f, "Feature '{}' was configured multiple times", feature)
            }
            PeerError::DuplicateLaCode { code } => {
                write!(f, "Duplicate LA code: '{}'", code)
            }
            PeerError::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                    parameter
                )
            }
            PeerError::MismatchedRow { expected, got } => {
                write!(
                    f,
                    "Row length mismatch: expected {} values, got {}",
                    expected, got
                )
            }
            PeerError::InvalidNumericValue(detail) => {
                write!(f, "Invalid numeric value: {}", detail)
            }
            PeerError::EmptyTable => {
                write!(f, "Input table has no rows")
            }
        }
    }
}

impl Error for PeerError {}

//! High-level API for peer-group computation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for building
//! peer groups. It implements a fluent builder pattern for configuring
//! features, the peer count, and the removed-LA list, plus a serde-backed
//! configuration type for loading the same settings from a file.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Declarative**: [`ModelConfig`] mirrors the builder for file-based
//!   configuration; both paths produce the same validated engine.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: Builder pattern ending in `.build()`, which
//!   yields an immutable [`PeerEngine`].
//! * **Defaults**: `n_peers` defaults to 15; the removed-LA list defaults
//!   to empty.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PeerModelBuilder`] via `PeerModel::new()`.
//! 2. Chain configuration methods (`.feature()`, `.n_peers()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`PeerEngine`].

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::executor::PeerEngine;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::ranking::PeerRecord;
pub use crate::algorithms::selection::CandidateScore;
pub use crate::algorithms::weighting::Feature;
pub use crate::engine::output::{PeerModelOutput, TransformChoice, TransformReport};
pub use crate::math::distance::DistanceMatrix;
pub use crate::math::transforms::TransformKind;
pub use crate::primitives::errors::PeerError;
pub use crate::primitives::table::FeatureTable;

/// Default peer-group size when `n_peers` is not configured.
pub const DEFAULT_N_PEERS: usize = 15;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a peer-group model.
#[derive(Debug, Clone, Default)]
pub struct PeerModelBuilder {
    /// Configured features, in call order.
    pub features: Vec<Feature>,

    /// Number of peers per unit.
    pub n_peers: Option<usize>,

    /// LA names removed from the run.
    pub remove_las: Option<Vec<String>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl PeerModelBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature to the configuration.
    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Add several features to the configuration.
    pub fn features<I>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = Feature>,
    {
        self.features.extend(features);
        self
    }

    /// Set the number of peers per unit (default: 15).
    pub fn n_peers(mut self, n_peers: usize) -> Self {
        if self.n_peers.is_some() {
            self.duplicate_param = Some("n_peers");
        }
        self.n_peers = Some(n_peers);
        self
    }

    /// Set the LA names to exclude from the run.
    pub fn remove_las<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.remove_las.is_some() {
            self.duplicate_param = Some("remove_las");
        }
        self.remove_las = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Populate the builder from a declarative configuration.
    pub fn from_config(config: ModelConfig) -> Self {
        Self {
            features: config.features,
            n_peers: Some(config.n_peers),
            remove_las: Some(config.las_to_remove),
            duplicate_param: None,
        }
    }

    /// Validate the configuration and produce an immutable engine.
    pub fn build(self) -> Result<PeerEngine, PeerError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_features(&self.features)?;

        let n_peers = self.n_peers.unwrap_or(DEFAULT_N_PEERS);
        Validator::validate_n_peers(n_peers)?;

        Ok(PeerEngine::new(
            self.features,
            n_peers,
            self.remove_las.unwrap_or_default(),
        ))
    }
}

// ============================================================================
// Declarative Configuration
// ============================================================================

/// Serializable peer-group configuration.
///
/// Mirrors [`PeerModelBuilder`] for file-based setups; deserialize one from
/// TOML or JSON and hand it to [`PeerModelBuilder::from_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Configured features, in file order.
    pub features: Vec<Feature>,

    /// Number of peers per unit.
    #[serde(default = "default_n_peers")]
    pub n_peers: usize,

    /// LA names removed from the run.
    #[serde(default)]
    pub las_to_remove: Vec<String>,
}

fn default_n_peers() -> usize {
    DEFAULT_N_PEERS
}

impl ModelConfig {
    /// Validate this configuration and produce an immutable engine.
    pub fn build(self) -> Result<PeerEngine, PeerError> {
        PeerModelBuilder::from_config(self).build()
    }
}

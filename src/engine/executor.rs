//! Execution engine for peer-group computation.
//!
//! ## Purpose
//!
//! This module provides the engine that orchestrates a full peer-group
//! run: table validation, removed-LA filtering, zero-weight dropping,
//! per-feature transform selection, standardization, weighting, the
//! pairwise distance matrix, and peer ranking. The executor coordinates
//! all lower-level algorithms and assembles the run output.
//!
//! ## Design notes
//!
//! * **Stage order is a correctness requirement**: Excluded units are
//!   filtered and zero-weight features dropped before any statistic is
//!   computed, so fitted transform and standardization parameters reflect
//!   exactly the retained population.
//! * **Pure pipeline**: No stage mutates a shared table in place; each
//!   produces a new one, so intermediates stay independently inspectable.
//! * **Stateless**: A configuration change requires a full re-run; there
//!   is no partial or incremental recomputation.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Synchronization barrier**: Every feature is transformed and
//!   standardized before any distance is computed.
//!
//! ## Invariants
//!
//! * Configuration reaching the engine has already passed builder
//!   validation; table validation happens here, before transform fitting.
//! * The output's table, matrix, and peer records all index the same
//!   retained unit set in the same order.
//!
//! ## Non-goals
//!
//! * This module does not parse configuration (handled by the API layer).
//! * This module does not persist results (caller's responsibility).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::ranking;
use crate::algorithms::selection;
use crate::algorithms::weighting::{self, Feature};
use crate::engine::output::{PeerModelOutput, TransformChoice, TransformReport};
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMatrix;
use crate::math::moments;
use crate::math::transforms::TransformKind;
use crate::primitives::errors::PeerError;
use crate::primitives::table::FeatureTable;

// ============================================================================
// Peer Engine
// ============================================================================

/// A validated, immutable peer-group configuration, ready to fit tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerEngine {
    features: Vec<Feature>,
    n_peers: usize,
    remove_las: Vec<String>,
}

impl PeerEngine {
    /// Construct from an already-validated configuration.
    pub(crate) fn new(features: Vec<Feature>, n_peers: usize, remove_las: Vec<String>) -> Self {
        Self {
            features,
            n_peers,
            remove_las,
        }
    }

    /// The configured features, in configuration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The configured peer count.
    pub fn n_peers(&self) -> usize {
        self.n_peers
    }

    /// LA names excluded from all stages of the run.
    pub fn removed_las(&self) -> &[String] {
        &self.remove_las
    }

    /// Run the full pipeline over an input table.
    pub fn fit<T: Float>(&self, table: &FeatureTable<T>) -> Result<PeerModelOutput<T>, PeerError> {
        Validator::validate_table(table, &self.features)?;

        // Removal happens before any statistic is computed, so excluded
        // units cannot influence transform or standardization parameters.
        let retained = table.without_las(&self.remove_las);
        if retained.is_empty() {
            return Err(PeerError::EmptyTable);
        }

        // Zero-weight features are dropped before fitting, not zeroed after.
        let active = weighting::retain_positive(&self.features);
        let names: Vec<String> = active.iter().map(|f| f.name.clone()).collect();
        let selected = retained.select(&names)?;

        let mut report = TransformReport::default();
        let mut degenerate_features = Vec::new();
        let mut columns = Vec::with_capacity(active.len());

        for (feature, raw) in active.iter().zip(selected.columns()) {
            let (transformed, choice) = match feature.transform {
                TransformKind::Auto => {
                    let selection = selection::select_transform(&feature.name, raw);
                    let choice = TransformChoice {
                        feature: feature.name.clone(),
                        chosen: selection.chosen,
                        overridden: false,
                        scores: selection.scores,
                    };
                    (selection.transformed, choice)
                }
                kind => {
                    let transformed = selection::apply_override(&feature.name, kind, raw)?;
                    tracing::info!(
                        feature = %feature.name,
                        transform = kind.code(),
                        "applied transform override"
                    );
                    let choice = TransformChoice {
                        feature: feature.name.clone(),
                        chosen: kind,
                        overridden: true,
                        scores: Vec::new(),
                    };
                    (transformed, choice)
                }
            };
            report.entries.push(choice);

            let standardized = moments::standardize(&transformed);
            if standardized.degenerate {
                tracing::warn!(
                    feature = %feature.name,
                    "standard deviation is 0 after transform; column contributes nothing to distances"
                );
                degenerate_features.push(feature.name.clone());
            }
            columns.push(standardized.data);
        }

        let standardized_table = FeatureTable::from_parts(
            names,
            retained.codes().to_vec(),
            retained.la_names().to_vec(),
            columns,
        );

        let weights: Vec<T> = active
            .iter()
            .map(|f| T::from(f.weight).unwrap())
            .collect();
        let weighted = weighting::scale_columns(&standardized_table, &weights);

        let points = weighted.to_row_major();
        let distances =
            DistanceMatrix::compute(weighted.codes().to_vec(), &points, weighted.n_features());

        let peers = ranking::rank_peers(&distances, self.n_peers);

        Ok(PeerModelOutput {
            table: weighted,
            distances,
            peers,
            transforms: report,
            degenerate_features,
        })
    }
}

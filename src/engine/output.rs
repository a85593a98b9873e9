//! Assembled output of a peer-group run.
//!
//! ## Purpose
//!
//! This module defines the result bundle a fit produces: the weighted
//! feature table, the full distance matrix, every unit's peer group, the
//! per-feature transform report, and the degenerate-column diagnostics.
//! Downstream collaborators persist these; this crate only assembles them.
//!
//! ## Design notes
//!
//! * **Regenerated fresh**: The output is rebuilt in full on every run,
//!   never updated incrementally.
//! * **Inspectability**: Each pipeline stage's product is exposed, so the
//!   weighted table and matrix can be checked independently of the peer
//!   lists.
//!
//! ## Non-goals
//!
//! * This module does not choose persistence formats; serialization of the
//!   result tables is owned by the caller.

// External dependencies
use num_traits::Float;
use std::fmt;

// Internal dependencies
use crate::algorithms::ranking::PeerRecord;
use crate::algorithms::selection::CandidateScore;
use crate::math::distance::DistanceMatrix;
use crate::math::transforms::TransformKind;
use crate::primitives::table::FeatureTable;

// ============================================================================
// Transform Report
// ============================================================================

/// The transform decision for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformChoice {
    /// Feature name.
    pub feature: String,
    /// The transform that was applied.
    pub chosen: TransformKind,
    /// Whether the choice came from a manual override rather than
    /// automatic selection.
    pub overridden: bool,
    /// Scores of the candidates evaluated during automatic selection;
    /// empty for overridden features.
    pub scores: Vec<CandidateScore>,
}

/// Per-feature record of which transform was applied and why.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformReport {
    /// One entry per retained feature, in configuration order.
    pub entries: Vec<TransformChoice>,
}

impl TransformReport {
    /// Look up the choice for a feature by name.
    pub fn choice(&self, feature: &str) -> Option<&TransformChoice> {
        self.entries.iter().find(|entry| entry.feature == feature)
    }
}

// ============================================================================
// Model Output
// ============================================================================

/// Everything a peer-group fit produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerModelOutput<T> {
    /// The transformed, standardized, weighted feature table, i.e. the
    /// vector space distances were computed in.
    pub table: FeatureTable<T>,
    /// Full symmetric pairwise distance matrix over retained units.
    pub distances: DistanceMatrix<T>,
    /// Ranked peer group per retained unit, in table row order.
    pub peers: Vec<PeerRecord<T>>,
    /// Which transform each feature received.
    pub transforms: TransformReport,
    /// Features whose post-transform standard deviation was 0; they
    /// contribute zero to every distance.
    pub degenerate_features: Vec<String>,
}

impl<T: Float + fmt::Display> fmt::Display for PeerModelOutput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Units: {}", self.table.n_rows())?;
        writeln!(f, "  Features: {}", self.table.n_features())?;
        if !self.degenerate_features.is_empty() {
            writeln!(
                f,
                "  Degenerate features: {}",
                self.degenerate_features.join(", ")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Transforms:")?;
        for entry in &self.transforms.entries {
            writeln!(f, "  {:<24} {}", entry.feature, entry.chosen.code())?;
        }

        writeln!(f)?;
        writeln!(f, "Peer Groups:")?;
        for record in &self.peers {
            write!(f, "  {}:", record.la_code)?;
            for (code, dist) in &record.peers {
                write!(f, " {} ({:.4})", code, dist)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

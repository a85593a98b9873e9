//! Deterministic peer ranking.
//!
//! ## Purpose
//!
//! This module turns the pairwise distance matrix into per-unit peer
//! groups: for each LA, the n nearest other LAs by ascending distance.
//!
//! ## Design notes
//!
//! * **Tie-breaking**: Units at equal distance are ordered by LA code
//!   ascending, so rankings are reproducible across runs.
//! * **Boundary**: When n_peers exceeds the number of other units, every
//!   other unit is returned rather than failing.
//!
//! ## Invariants
//!
//! * A unit never appears in its own peer list.
//! * Peer distances within a record are non-decreasing.
//! * Every record has exactly `min(n_peers, unit_count − 1)` entries.
//!
//! ## Non-goals
//!
//! * This module does not compute distances and does not apply the
//!   removed-LA filter (excluded units never reach the matrix).

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMatrix;

// ============================================================================
// Peer Record
// ============================================================================

/// The ranked peer group of one local authority.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRecord<T> {
    /// LA code of the subject unit.
    pub la_code: String,
    /// Nearest other units as `(peer code, distance)`, ascending by
    /// distance, ties by code.
    pub peers: Vec<(String, T)>,
}

// ============================================================================
// Ranking
// ============================================================================

/// Extract the peer group of every unit in the matrix.
pub fn rank_peers<T: Float>(matrix: &DistanceMatrix<T>, n_peers: usize) -> Vec<PeerRecord<T>> {
    let n = matrix.len();
    let codes = matrix.codes();

    (0..n)
        .map(|i| {
            let mut peers: Vec<(String, T)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (codes[j].clone(), matrix.get(i, j)))
                .collect();

            peers.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            peers.truncate(n_peers);

            PeerRecord {
                la_code: codes[i].clone(),
                peers,
            }
        })
        .collect()
}

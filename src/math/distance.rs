//! Euclidean distance and the pairwise distance matrix.
//!
//! ## Purpose
//!
//! This module computes the distance between weighted feature vectors and
//! assembles the full symmetric pairwise matrix over all retained units.
//! The unit count is small (≈150 UTLAs), so the O(n²·k) dense computation
//! is the right tool; no nearest-neighbor index is needed.
//!
//! ## Design notes
//!
//! * **Symmetry by construction**: Each unordered pair is computed once
//!   and mirrored, so d(i,j) == d(j,i) holds exactly, not just to
//!   floating tolerance.
//! * **Exact-zero diagonal**: The diagonal is written as zero, never
//!   computed.
//!
//! ## Invariants
//!
//! * Distances are non-negative; the matrix is symmetric with zero diagonal.
//!
//! ## Non-goals
//!
//! * This module does not rank peers or apply exclusion rules.

// External dependencies
use num_traits::Float;

// ============================================================================
// Distance Computation
// ============================================================================

/// Euclidean distance between two feature vectors.
#[inline]
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| {
            let diff = ai - bi;
            diff * diff
        })
        .fold(T::zero(), |acc, x| acc + x)
        .sqrt()
}

// ============================================================================
// Distance Matrix
// ============================================================================

/// Dense symmetric pairwise distance matrix, indexed by LA code.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    codes: Vec<String>,
    values: Vec<T>,
}

impl<T: Float> DistanceMatrix<T> {
    /// Compute the full pairwise Euclidean matrix from a row-major buffer
    /// of feature vectors (one unit's features after another).
    pub fn compute(codes: Vec<String>, points: &[T], dimensions: usize) -> Self {
        let n = codes.len();
        debug_assert_eq!(
            points.len(),
            n * dimensions,
            "Points buffer must hold one vector per code"
        );

        let mut values = vec![T::zero(); n * n];
        for i in 0..n {
            let a = &points[i * dimensions..(i + 1) * dimensions];
            for j in (i + 1)..n {
                let b = &points[j * dimensions..(j + 1) * dimensions];
                let dist = euclidean(a, b);
                values[i * n + j] = dist;
                values[j * n + i] = dist;
            }
        }

        Self { codes, values }
    }

    /// Number of units on each axis.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// LA codes, in axis order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Distance between units at axis positions `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.values[i * self.len() + j]
    }

    /// Axis position of an LA code.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    /// Long-form listing of every unordered pair as
    /// `(code_a, code_b, distance)`, sorted by `(code_a, code_b)`.
    pub fn to_pairs(&self) -> Vec<(String, String, T)> {
        let n = self.len();
        let mut pairs = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = if self.codes[i] <= self.codes[j] {
                    (i, j)
                } else {
                    (j, i)
                };
                pairs.push((self.codes[a].clone(), self.codes[b].clone(), self.get(i, j)));
            }
        }
        pairs.sort_by(|x, y| (&x.0, &x.1).cmp(&(&y.0, &y.1)));
        pairs
    }
}

//! Rectangular feature table keyed by LA code.
//!
//! ## Purpose
//!
//! This module provides the in-memory table every pipeline stage operates
//! on: one row per local authority, one numeric column per configured
//! feature. Storage is column-major so per-feature statistics (moments,
//! transforms, standardization) run over contiguous slices.
//!
//! ## Design notes
//!
//! * **Column-major**: Each feature column is its own `Vec<T>`.
//! * **Immutability**: Pipeline stages never mutate a table in place; each
//!   stage produces a new table so intermediates stay inspectable.
//! * **Rectangularity**: Enforced at insertion time, not fit time.
//!
//! ## Key concepts
//!
//! * **LA code**: The unique row key (e.g. "E06000001").
//! * **LA name**: The display name, used by the removal filter.
//!
//! ## Invariants
//!
//! * `codes`, `names`, and every column have identical length.
//! * All stored values are finite.
//!
//! ## Non-goals
//!
//! * This module does not validate duplicate codes or reconcile the table
//!   against a feature configuration (handled by the engine validator).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PeerError;

// ============================================================================
// Feature Table
// ============================================================================

/// A rectangular numeric table: one row per local authority, one column per
/// feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable<T> {
    feature_names: Vec<String>,
    codes: Vec<String>,
    names: Vec<String>,
    columns: Vec<Vec<T>>,
}

impl<T: Float> FeatureTable<T> {
    /// Create an empty table with the given feature columns.
    pub fn new<I, S>(feature_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let feature_names: Vec<String> = feature_names.into_iter().map(Into::into).collect();
        let columns = feature_names.iter().map(|_| Vec::new()).collect();
        Self {
            feature_names,
            codes: Vec::new(),
            names: Vec::new(),
            columns,
        }
    }

    /// Assemble a table from pre-built columns.
    ///
    /// Used by pipeline stages that derive a new table from an existing one,
    /// so lengths are assumed consistent.
    pub(crate) fn from_parts(
        feature_names: Vec<String>,
        codes: Vec<String>,
        names: Vec<String>,
        columns: Vec<Vec<T>>,
    ) -> Self {
        debug_assert_eq!(feature_names.len(), columns.len());
        debug_assert_eq!(codes.len(), names.len());
        Self {
            feature_names,
            codes,
            names,
            columns,
        }
    }

    /// Append one row of raw values.
    ///
    /// Fails if the value count does not match the feature count, or if any
    /// value is non-finite.
    pub fn push_row<C, N>(&mut self, code: C, name: N, values: &[T]) -> Result<(), PeerError>
    where
        C: Into<String>,
        N: Into<String>,
    {
        if values.len() != self.feature_names.len() {
            return Err(PeerError::MismatchedRow {
                expected: self.feature_names.len(),
                got: values.len(),
            });
        }

        let code = code.into();
        for (feature, &val) in self.feature_names.iter().zip(values.iter()) {
            if !val.is_finite() {
                return Err(PeerError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    feature,
                    code,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        self.codes.push(code);
        self.names.push(name.into());
        for (column, &val) in self.columns.iter_mut().zip(values.iter()) {
            column.push(val);
        }
        Ok(())
    }

    /// Number of rows (local authorities).
    pub fn n_rows(&self) -> usize {
        self.codes.len()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// LA codes, in row order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// LA display names, in row order.
    pub fn la_names(&self) -> &[String] {
        &self.names
    }

    /// Feature column names, in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Look up a feature column by name.
    pub fn column(&self, feature: &str) -> Option<&[T]> {
        self.feature_names
            .iter()
            .position(|name| name == feature)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// All feature columns, in column order.
    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    /// Collect row `i` as one value per feature, in column order.
    pub fn row(&self, i: usize) -> Vec<T> {
        self.columns.iter().map(|column| column[i]).collect()
    }

    /// Flatten all rows into a row-major buffer (one row's features after
    /// another), for distance computation.
    pub fn to_row_major(&self) -> Vec<T> {
        let mut points = Vec::with_capacity(self.n_rows() * self.n_features());
        for i in 0..self.n_rows() {
            for column in &self.columns {
                points.push(column[i]);
            }
        }
        points
    }

    /// Produce a new table with every row whose LA *name* appears in
    /// `names_to_remove` filtered out.
    pub fn without_las(&self, names_to_remove: &[String]) -> Self {
        let keep: Vec<usize> = (0..self.n_rows())
            .filter(|&i| !names_to_remove.contains(&self.names[i]))
            .collect();

        let codes = keep.iter().map(|&i| self.codes[i].clone()).collect();
        let names = keep.iter().map(|&i| self.names[i].clone()).collect();
        let columns = self
            .columns
            .iter()
            .map(|column| keep.iter().map(|&i| column[i]).collect())
            .collect();

        Self {
            feature_names: self.feature_names.clone(),
            codes,
            names,
            columns,
        }
    }

    /// Produce a new table restricted to the named features, in the given
    /// order. Fails if any requested feature is absent.
    pub fn select(&self, features: &[String]) -> Result<Self, PeerError> {
        let mut columns = Vec::with_capacity(features.len());
        for feature in features {
            match self.column(feature) {
                Some(column) => columns.push(column.to_vec()),
                None => {
                    return Err(PeerError::MissingFeature {
                        feature: feature.clone(),
                    })
                }
            }
        }

        Ok(Self {
            feature_names: features.to_vec(),
            codes: self.codes.clone(),
            names: self.names.clone(),
            columns,
        })
    }
}

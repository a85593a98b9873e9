//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the
//! peer-group engine:
//! - Sample moments and z-score standardization
//! - Distribution-normalizing transforms (with MLE λ fitting)
//! - Euclidean distance and the pairwise distance matrix
//!
//! These are reusable mathematical building blocks with no pipeline-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Sample moments and z-score standardization.
pub mod moments;

/// Distribution-normalizing transforms.
pub mod transforms;

/// Euclidean distance and the pairwise distance matrix.
pub mod distance;

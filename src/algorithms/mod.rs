//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core peer-group algorithms:
//! - Automatic transform selection (skewness-scored, deterministic)
//! - Feature weighting (validation-gated scaling and zero-weight dropping)
//! - Deterministic peer ranking with tie-breaking by LA code
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Automatic transform selection.
pub mod selection;

/// Feature configuration and weight application.
pub mod weighting;

/// Deterministic peer ranking.
pub mod ranking;

//! # la-peers: Peer groups for upper-tier local authorities
//!
//! This crate builds, for every local authority in a feature table, the
//! group of statistically nearest other authorities. Each configured
//! feature is transformed towards symmetry (automatically or by explicit
//! override), standardized to z-scores, and scaled by its weight; peer
//! groups are then read off a full pairwise Euclidean distance matrix.
//!
//! ## Pipeline
//!
//! A fit runs these stages in order:
//!
//! 1. Validate the input table against the configuration.
//! 2. Remove excluded LAs, before any statistic is computed.
//! 3. Drop zero-weight features.
//! 4. Transform each feature (automatic selection or override).
//! 5. Standardize each transformed column to mean 0, sd 1.
//! 6. Multiply each column by its weight.
//! 7. Compute the pairwise distance matrix.
//! 8. Rank each unit's nearest peers, ties broken by LA code.
//!
//! ## Quick Start
//!
//! ```rust
//! use la_peers::prelude::*;
//!
//! // Build the model
//! let engine = PeerModel::new()
//!     .feature(Feature::new("population", 1.0))
//!     .feature(Feature::new("density", 0.5))
//!     .n_peers(2)
//!     .build()?;
//!
//! // Assemble the input table
//! let mut table = FeatureTable::new(["population", "density"]);
//! table.push_row("E06000001", "Alpha", &[120_000.0, 3.1])?;
//! table.push_row("E06000002", "Beta", &[95_000.0, 2.4])?;
//! table.push_row("E06000003", "Gamma", &[143_000.0, 4.0])?;
//!
//! // Fit the model to the data
//! let output = engine.fit(&table)?;
//! assert_eq!(output.peers.len(), 3);
//!
//! println!("{}", output);
//! # Result::<(), PeerError>::Ok(())
//! ```
//!
//! ## Configuration Files
//!
//! [`ModelConfig`](crate::api::ModelConfig) mirrors the builder for
//! declarative setups loaded from TOML or JSON:
//!
//! ```rust
//! use la_peers::prelude::*;
//!
//! let config: ModelConfig = toml::from_str(
//!     r#"
//!     n_peers = 15
//!     las_to_remove = ["City of London", "Isles of Scilly"]
//!
//!     [[features]]
//!     name = "population"
//!     weight = 1.0
//!
//!     [[features]]
//!     name = "density"
//!     weight = 0.5
//!     transform = "log"
//!     "#,
//! )
//! .unwrap();
//!
//! let engine = config.build()?;
//! assert_eq!(engine.n_peers(), 15);
//! # Result::<(), PeerError>::Ok(())
//! ```
//!
//! ## Transforms
//!
//! Every feature passes through one power transform before
//! standardization. With [`TransformKind::Auto`](crate::math::transforms::TransformKind)
//! (the default), every admissible candidate is scored by the absolute
//! skewness of its output and the lowest score wins; an explicit kind
//! skips scoring and is applied directly, failing the fit if the column
//! violates its domain.
//!
//! | Code         | Transform               | Domain              |
//! |--------------|-------------------------|---------------------|
//! | `none`       | Identity                | all reals           |
//! | `log`        | Natural logarithm       | strictly positive   |
//! | `sqrr`       | Square root             | non-negative        |
//! | `squared`    | Square                  | all reals           |
//! | `yj`         | Yeo–Johnson (MLE λ)     | all reals           |
//! | `bc`         | Box–Cox (MLE λ)         | strictly positive   |
//! | `recip`      | Reciprocal              | strictly positive   |
//! | `recip_sqrr` | Reciprocal square root  | strictly positive   |
//!
//! ## Architecture
//!
//! The crate is organized in five layers; each depends only on the
//! layers below it:
//!
//! ```text
//! Layer 5: API         (builder, configuration)
//!   ↓
//! Layer 4: Engine      (validation, orchestration, output)
//!   ↓
//! Layer 3: Algorithms  (transform selection, weighting, ranking)
//!   ↓
//! Layer 2: Math        (moments, transforms, distances)
//!   ↓
//! Layer 1: Primitives  (errors, feature table)
//! ```

#![deny(missing_docs)]

// Layer 1: Primitives
pub mod primitives;

// Layer 2: Math
pub mod math;

// Layer 3: Algorithms
pub mod algorithms;

// Layer 4: Engine
pub mod engine;

// Layer 5: API
pub mod api;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::api::PeerModelBuilder as PeerModel;
    pub use crate::api::{ModelConfig, PeerModelBuilder, DEFAULT_N_PEERS};

    pub use crate::algorithms::ranking::PeerRecord;
    pub use crate::algorithms::selection::CandidateScore;
    pub use crate::algorithms::weighting::Feature;
    pub use crate::engine::executor::PeerEngine;
    pub use crate::engine::output::{PeerModelOutput, TransformChoice, TransformReport};
    pub use crate::math::distance::DistanceMatrix;
    pub use crate::math::transforms::TransformKind;
    pub use crate::primitives::errors::PeerError;
    pub use crate::primitives::table::FeatureTable;
}

/// White-box access to every layer, for testing and development only.
///
/// Gated behind the `dev` feature; the contents carry no stability
/// guarantees.
#[cfg(feature = "dev")]
pub mod internals {
    /// Layer 1: Primitives.
    pub mod primitives {
        pub use crate::primitives::*;
    }

    /// Layer 2: Math.
    pub mod math {
        pub use crate::math::*;
    }

    /// Layer 3: Algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }

    /// Layer 4: Engine.
    pub mod engine {
        pub use crate::engine::*;
    }

    /// Layer 5: API.
    pub mod api {
        pub use crate::api::*;
    }
}

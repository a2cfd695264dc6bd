//! # SYMBIONT
//!
//! Lineage analysis for artificial-life symbiosis experiments.
//!
//! An external simulator records every seed (organism snapshot) born over a
//! run, with its birth mechanism and parent pointers. This crate rebuilds
//! the descendant trees rooted at fusion seeds and estimates per-node path
//! statistics by Monte-Carlo sampling.
//!
//! ## Features
//!
//! - **Exact structure**: true-child adjacency, child counts and tree
//!   membership are enumerated deterministically
//! - **Sampled statistics**: visitation probability and expected leaf depth
//!   estimated from repeated random root-to-leaf descents
//! - **Reproducible**: seeded random number generation
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use symbiont::{LineageForest, PathSampler, SeedRecord};
//!
//! let records = vec![
//!     SeedRecord::random(0),
//!     SeedRecord::random(1),
//!     SeedRecord::fusion(2, 0, 1),
//!     SeedRecord::asexual(3, 2),
//! ];
//!
//! let forest = LineageForest::build(&records).unwrap();
//! let mut sampler = PathSampler::with_seed(4, 42);
//! let stats = sampler.analyze(2, &forest).unwrap();
//!
//! assert_eq!(stats[0].probability, 1.0);
//! ```

pub mod config;
pub mod forest;
pub mod report;
pub mod sampler;
pub mod seed;
pub mod selection;
pub mod storage;
pub mod tables;

// Re-export main types
pub use config::Config;
pub use forest::{ForestError, LineageForest};
pub use sampler::{NodeStatistic, PathSampler};
pub use seed::{BirthType, SeedRecord, SeedRoles};
pub use selection::{classify, TreeSelection};
pub use storage::SeedLog;
pub use tables::RoleTables;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-root result of analyzing a full record set
#[derive(Debug, Clone)]
pub struct TreeAnalysis {
    /// Fusion root ID
    pub root: u64,
    /// Node statistics, ascending by ID
    pub nodes: Vec<NodeStatistic>,
}

/// Analyze every fusion tree in one run's records.
///
/// Each root gets its own sampler with a seed derived from `seed`, so
/// results are reproducible and independent of analysis order.
pub fn analyze_records(
    records: &[SeedRecord],
    sample_exponent: u32,
    seed: u64,
) -> Result<Vec<TreeAnalysis>, ForestError> {
    let forest = LineageForest::build(records)?;
    forest
        .fusion_roots()
        .iter()
        .map(|&root| {
            let mut sampler = PathSampler::with_seed(sample_exponent, seed.wrapping_add(root));
            Ok(TreeAnalysis {
                root,
                nodes: sampler.analyze(root, &forest)?,
            })
        })
        .collect()
}

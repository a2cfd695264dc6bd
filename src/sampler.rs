//! Monte-Carlo path statistics over fusion descendant trees.
//!
//! The full space of root-to-leaf paths can grow exponentially with tree
//! depth, so per-node statistics are estimated from repeated uniform random
//! descents instead of exhaustive enumeration. Node membership and child
//! counts stay exact: a deterministic reachability pass enumerates the tree
//! before any sampling happens.

use crate::forest::{ForestError, LineageForest};
use crate::seed::BirthType;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistics for one node of a descendant tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStatistic {
    /// Seed ID
    pub id: u64,
    /// Birth mechanism of the seed
    pub birth_type: BirthType,
    /// Fraction of sampled descents that passed through this node
    pub probability: f64,
    /// Mean terminal-leaf depth, in edges from the root, over descents
    /// that passed through this node (0 if never visited)
    pub average_depth: f64,
    /// Exact number of true children
    pub num_children: usize,
}

/// Per-node accumulators for the sampling loop
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    visits: u64,
    depth_sum: u64,
}

/// Random-descent sampler for descendant trees.
///
/// Runs `10^sample_exponent` independent trials per analyzed root. Each
/// trial walks from the root to a leaf, choosing uniformly among true
/// children at every step.
pub struct PathSampler {
    sample_size: u64,
    rng: ChaCha8Rng,
    seed: u64,
}

impl PathSampler {
    /// Create a sampler with a random seed
    pub fn new(sample_exponent: u32) -> Self {
        let seed = rand::thread_rng().gen();
        Self::with_seed(sample_exponent, seed)
    }

    /// Create a sampler with a specific seed for reproducibility
    pub fn with_seed(sample_exponent: u32, seed: u64) -> Self {
        if sample_exponent == 0 {
            log::warn!("sample exponent 0: a single trial visits at most one path");
        }
        Self {
            sample_size: 10u64.pow(sample_exponent),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Number of trials per analyzed root
    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Analyze the descendant tree rooted at `root`.
    ///
    /// Returns one [`NodeStatistic`] per reachable node, sorted ascending
    /// by ID. IDs are assigned in birth order and a child is always born
    /// after its parent, so the first entry is the root and the last entry
    /// is the most recently born member of the tree.
    pub fn analyze(
        &mut self,
        root: u64,
        forest: &LineageForest,
    ) -> Result<Vec<NodeStatistic>, ForestError> {
        if !forest.contains(root) {
            return Err(ForestError::UnknownSeed(root));
        }

        // Exact reachability: every node once, with its exact child count
        let mut nodes: Vec<(u64, BirthType, usize)> = Vec::new();
        let mut to_visit = vec![root];
        while let Some(id) = to_visit.pop() {
            let birth_type = forest.birth_type(id).ok_or(ForestError::UnknownSeed(id))?;
            let children = forest.children_of(id);
            nodes.push((id, birth_type, children.len()));
            to_visit.extend_from_slice(children);
        }

        // Random descents; each trial adds its terminal leaf depth to
        // every node on the path
        let mut tallies: HashMap<u64, Tally> = HashMap::with_capacity(nodes.len());
        let mut path = Vec::new();
        for _ in 0..self.sample_size {
            path.clear();
            let mut current = root;
            path.push(current);
            loop {
                let children = forest.children_of(current);
                if children.is_empty() {
                    break;
                }
                current = children[self.rng.gen_range(0..children.len())];
                path.push(current);
            }
            let depth = (path.len() - 1) as u64;
            for &id in &path {
                let tally = tallies.entry(id).or_default();
                tally.visits += 1;
                tally.depth_sum += depth;
            }
        }

        let sample_size = self.sample_size as f64;
        let mut stats: Vec<NodeStatistic> = nodes
            .into_iter()
            .map(|(id, birth_type, num_children)| {
                let tally = tallies.get(&id).copied().unwrap_or_default();
                let average_depth = if tally.visits > 0 {
                    tally.depth_sum as f64 / tally.visits as f64
                } else {
                    0.0
                };
                NodeStatistic {
                    id,
                    birth_type,
                    probability: tally.visits as f64 / sample_size,
                    average_depth,
                    num_children,
                }
            })
            .collect();
        stats.sort_by_key(|s| s.id);

        Ok(stats)
    }
}

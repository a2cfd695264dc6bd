//! Descendant forest construction from flat parent-pointer records.
//!
//! Seeds record who their parents were; the analysis needs the opposite
//! direction. [`LineageForest::build`] converts an ordered record list into
//! a true-child adjacency keyed by seed ID, a birth-type lookup, and the
//! list of fusion roots. Only asexual births form true-child edges: random,
//! fission and fusion seeds never appear in any parent's child list, so a
//! fusion seed always starts its own independent tree.

use crate::seed::{BirthType, SeedRecord};
use std::collections::HashMap;
use std::fmt;

/// Birth types that never form true-child edges
pub const NON_LINEAGE_TYPES: [BirthType; 3] =
    [BirthType::Random, BirthType::Fission, BirthType::Fusion];

/// Errors detected while building or traversing a forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestError {
    /// A record references a parent absent from the record set
    UnknownParent { child: u64, parent: u64 },
    /// Parent pointer arity does not match the birth type
    MalformedParentage {
        id: u64,
        birth_type: BirthType,
        found: usize,
    },
    /// Two records carry the same ID
    DuplicateId(u64),
    /// A requested seed is not present in the forest
    UnknownSeed(u64),
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::UnknownParent { child, parent } => {
                write!(f, "seed {} references unknown parent {}", child, parent)
            }
            ForestError::MalformedParentage {
                id,
                birth_type,
                found,
            } => write!(
                f,
                "seed {} is {} but records {} parent(s), expected {}",
                id,
                birth_type,
                found,
                birth_type.parent_count()
            ),
            ForestError::DuplicateId(id) => write!(f, "duplicate seed ID {}", id),
            ForestError::UnknownSeed(id) => write!(f, "seed {} is not in the record set", id),
        }
    }
}

impl std::error::Error for ForestError {}

/// True-child adjacency over one run's seed records
#[derive(Clone, Debug, Default)]
pub struct LineageForest {
    /// Seed ID -> IDs of its true children, in birth order
    children: HashMap<u64, Vec<u64>>,
    /// Seed ID -> birth mechanism
    types: HashMap<u64, BirthType>,
    /// Fusion seed IDs, in order of first appearance
    fusion_roots: Vec<u64>,
}

impl LineageForest {
    /// Build a forest with the standard exclusion policy
    pub fn build(records: &[SeedRecord]) -> Result<Self, ForestError> {
        Self::build_excluding(records, &NON_LINEAGE_TYPES)
    }

    /// Build a forest, excluding the given birth types from child lists.
    ///
    /// Two passes: register every record (checking IDs and parent arity),
    /// then wire child edges. A record whose own birth type is excluded is
    /// still registered and may have children of its own; it just never
    /// appears in another seed's child list.
    pub fn build_excluding(
        records: &[SeedRecord],
        excluded: &[BirthType],
    ) -> Result<Self, ForestError> {
        let mut children: HashMap<u64, Vec<u64>> = HashMap::with_capacity(records.len());
        let mut types: HashMap<u64, BirthType> = HashMap::with_capacity(records.len());
        let mut fusion_roots = Vec::new();

        for record in records {
            let found = record.parent_count();
            if found != record.birth_type.parent_count() {
                return Err(ForestError::MalformedParentage {
                    id: record.id,
                    birth_type: record.birth_type,
                    found,
                });
            }
            if types.insert(record.id, record.birth_type).is_some() {
                return Err(ForestError::DuplicateId(record.id));
            }
            children.insert(record.id, Vec::new());
            if record.birth_type == BirthType::Fusion {
                fusion_roots.push(record.id);
            }
        }

        for record in records {
            for parent in record.parents() {
                if !types.contains_key(&parent) {
                    return Err(ForestError::UnknownParent {
                        child: record.id,
                        parent,
                    });
                }
            }
            if excluded.contains(&record.birth_type) {
                continue;
            }
            if let (Some(parent), None) = (record.parent1, record.parent2) {
                if let Some(list) = children.get_mut(&parent) {
                    list.push(record.id);
                }
            }
        }

        Ok(Self {
            children,
            types,
            fusion_roots,
        })
    }

    /// True children of a seed, in birth order (empty for unknown IDs)
    pub fn children_of(&self, id: u64) -> &[u64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Birth mechanism of a seed
    pub fn birth_type(&self, id: u64) -> Option<BirthType> {
        self.types.get(&id).copied()
    }

    /// Fusion seed IDs, each the root of an independent descendant tree
    pub fn fusion_roots(&self) -> &[u64] {
        &self.fusion_roots
    }

    /// Whether the seed is present in the forest
    pub fn contains(&self, id: u64) -> bool {
        self.types.contains_key(&id)
    }

    /// Number of seeds in the forest
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the forest holds no seeds
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

//! Seed records: the per-organism entries of a simulation run's lineage log.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mechanism by which a seed was born
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BirthType {
    /// Random initialization at the start of a run
    Random,
    /// Single-parent offspring (includes all role variants)
    Asexual,
    /// One parent split into two seeds
    Fission,
    /// Two parents merged into one seed
    Fusion,
}

impl BirthType {
    /// Number of parent pointers this mechanism records
    pub fn parent_count(&self) -> usize {
        match self {
            BirthType::Random => 0,
            BirthType::Asexual | BirthType::Fission => 1,
            BirthType::Fusion => 2,
        }
    }
}

impl fmt::Display for BirthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BirthType::Random => "random",
            BirthType::Asexual => "asexual",
            BirthType::Fission => "fission",
            BirthType::Fusion => "fusion",
        };
        write!(f, "{}", name)
    }
}

/// Role tallies captured by the simulator when the seed was recorded.
///
/// Three splits, each with member counts and accumulated growth:
/// management (managers vs workers), mutualism (outsiders vs insiders),
/// and interaction (soloists vs ensembles). The analysis never interprets
/// these beyond folding them into contingency tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRoles {
    pub managers: u32,
    pub workers: u32,
    pub manager_growth: i64,
    pub worker_growth: i64,

    pub outsiders: u32,
    pub insiders: u32,
    pub outsider_growth: i64,
    pub insider_growth: i64,

    pub soloists: u32,
    pub ensembles: u32,
    pub soloist_growth: i64,
    pub ensemble_growth: i64,
}

/// One recorded seed from a simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Unique ID, assigned in strict birth order within a run
    pub id: u64,
    /// Birth mechanism
    pub birth_type: BirthType,
    /// First parent (asexual, fission and fusion births)
    pub parent1: Option<u64>,
    /// Second parent (fusion births only)
    pub parent2: Option<u64>,
    /// Number of distinct parts (coloured regions) in the seed
    pub part_count: u32,
    /// Role tallies recorded at capture time
    pub roles: SeedRoles,
}

impl SeedRecord {
    /// Create a record with explicit parent pointers
    pub fn new(id: u64, birth_type: BirthType, parent1: Option<u64>, parent2: Option<u64>) -> Self {
        Self {
            id,
            birth_type,
            parent1,
            parent2,
            part_count: 1,
            roles: SeedRoles::default(),
        }
    }

    /// Randomly initialized founder seed
    pub fn random(id: u64) -> Self {
        Self::new(id, BirthType::Random, None, None)
    }

    /// Single-parent offspring
    pub fn asexual(id: u64, parent: u64) -> Self {
        Self::new(id, BirthType::Asexual, Some(parent), None)
    }

    /// Seed split off from a parent
    pub fn fission(id: u64, parent: u64) -> Self {
        Self::new(id, BirthType::Fission, Some(parent), None)
    }

    /// Seed merged from two parents
    pub fn fusion(id: u64, parent1: u64, parent2: u64) -> Self {
        Self::new(id, BirthType::Fusion, Some(parent1), Some(parent2))
    }

    /// Set the recorded part count
    pub fn with_parts(mut self, part_count: u32) -> Self {
        self.part_count = part_count;
        self
    }

    /// Set the recorded role tallies
    pub fn with_roles(mut self, roles: SeedRoles) -> Self {
        self.roles = roles;
        self
    }

    /// Parent pointers actually present on this record
    pub fn parents(&self) -> impl Iterator<Item = u64> + '_ {
        self.parent1.into_iter().chain(self.parent2)
    }

    /// Number of parent pointers present
    pub fn parent_count(&self) -> usize {
        self.parents().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_counts_match_birth_types() {
        assert_eq!(SeedRecord::random(0).parent_count(), 0);
        assert_eq!(SeedRecord::asexual(1, 0).parent_count(), 1);
        assert_eq!(SeedRecord::fission(2, 0).parent_count(), 1);
        assert_eq!(SeedRecord::fusion(3, 0, 1).parent_count(), 2);

        assert_eq!(BirthType::Random.parent_count(), 0);
        assert_eq!(BirthType::Asexual.parent_count(), 1);
        assert_eq!(BirthType::Fission.parent_count(), 1);
        assert_eq!(BirthType::Fusion.parent_count(), 2);
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(BirthType::Fusion.to_string(), "fusion");
        assert_eq!(BirthType::Asexual.to_string(), "asexual");
    }

    #[test]
    fn test_parents_iterator_order() {
        let record = SeedRecord::fusion(5, 2, 3);
        let parents: Vec<u64> = record.parents().collect();
        assert_eq!(parents, vec![2, 3]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let record = SeedRecord::fusion(7, 1, 2).with_parts(3);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"fusion\""));

        let back: SeedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.birth_type, BirthType::Fusion);
        assert_eq!(back.part_count, 3);
    }
}

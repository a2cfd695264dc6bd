//! Prolific and singleton classification of analyzed descendant trees.

use crate::sampler::NodeStatistic;

/// Outcome of classifying one fusion tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeSelection {
    /// The root has no true children at all
    Singleton { root: u64 },
    /// The node with the most true children in the tree
    Prolific { id: u64, num_children: usize },
}

/// Classify an analyzed tree as a singleton or find its prolific node.
///
/// `stats` must be the ascending-ID output of
/// [`PathSampler::analyze`](crate::sampler::PathSampler::analyze); since
/// every descendant is born after the root, the first entry is the root.
/// Ties on child count keep the earliest-born node, so the root wins a tie
/// against any descendant. Returns `None` for an empty list.
pub fn classify(stats: &[NodeStatistic]) -> Option<TreeSelection> {
    let root = stats.first()?;
    if root.num_children == 0 {
        return Some(TreeSelection::Singleton { root: root.id });
    }

    let mut best = root;
    for node in &stats[1..] {
        if node.num_children > best.num_children {
            best = node;
        }
    }
    Some(TreeSelection::Prolific {
        id: best.id,
        num_children: best.num_children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::BirthType;

    fn node(id: u64, num_children: usize) -> NodeStatistic {
        NodeStatistic {
            id,
            birth_type: if id == 0 {
                BirthType::Fusion
            } else {
                BirthType::Asexual
            },
            probability: 1.0,
            average_depth: 0.0,
            num_children,
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn test_singleton() {
        let stats = vec![node(0, 0)];
        assert_eq!(classify(&stats), Some(TreeSelection::Singleton { root: 0 }));
    }

    #[test]
    fn test_prolific_descendant_wins() {
        let stats = vec![node(0, 1), node(1, 3), node(2, 0)];
        assert_eq!(
            classify(&stats),
            Some(TreeSelection::Prolific {
                id: 1,
                num_children: 3
            })
        );
    }

    #[test]
    fn test_tie_keeps_earliest_born() {
        let stats = vec![node(0, 2), node(1, 2), node(2, 2)];
        assert_eq!(
            classify(&stats),
            Some(TreeSelection::Prolific {
                id: 0,
                num_children: 2
            })
        );
    }

    #[test]
    fn test_singleton_and_prolific_are_disjoint() {
        // A tree is a singleton iff the root has zero children; any tree
        // with a child yields a prolific node instead
        let singleton = vec![node(0, 0)];
        let family = vec![node(0, 1), node(1, 0)];

        assert!(matches!(
            classify(&singleton),
            Some(TreeSelection::Singleton { .. })
        ));
        assert!(matches!(
            classify(&family),
            Some(TreeSelection::Prolific { .. })
        ));
    }
}

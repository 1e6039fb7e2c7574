//! Equivalence-group assignment for transitions.

use serde::{Deserialize, Serialize};

/// Maps each transition (by its `order`) to its equivalence group.
///
/// Group ids are dense, ascending and start at 1, assigned in first-discovery
/// order over the transitions. The map is built once by the partitioner and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMap {
    groups: Vec<u32>,
}

impl GroupMap {
    /// Builds a map from group ids listed in transition order.
    ///
    /// Callers are expected to pass dense ids starting at 1; see
    /// [`is_dense`](Self::is_dense).
    pub fn from_groups(groups: Vec<u32>) -> Self {
        Self { groups }
    }

    /// Returns the group of the transition declared at `order`.
    pub fn group(&self, order: usize) -> Option<u32> {
        self.groups.get(order).copied()
    }

    /// Returns the number of transitions covered.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the map covers no transitions.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the number of distinct groups.
    pub fn group_count(&self) -> u32 {
        self.groups.iter().copied().max().unwrap_or(0)
    }

    /// Returns `(group, first order)` for each group, in ascending group order.
    pub fn representatives(&self) -> Vec<(u32, usize)> {
        let mut reps: Vec<(u32, usize)> = Vec::new();
        for (order, &group) in self.groups.iter().enumerate() {
            if !reps.iter().any(|&(g, _)| g == group) {
                reps.push((group, order));
            }
        }
        reps.sort_by_key(|&(g, _)| g);
        reps
    }

    /// Returns the orders of every transition in `group`.
    pub fn members(&self, group: u32) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g == group)
            .map(|(order, _)| order)
            .collect()
    }

    /// Checks that ids start at 1 and each new id is exactly one more than
    /// the largest seen so far.
    pub fn is_dense(&self) -> bool {
        let mut max = 0;
        for &g in &self.groups {
            if g == 0 || g > max + 1 {
                return false;
            }
            max = max.max(g);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representatives_are_first_members() {
        let map = GroupMap::from_groups(vec![1, 1, 2, 1, 3, 3, 3]);
        assert_eq!(map.representatives(), vec![(1, 0), (2, 2), (3, 4)]);
        assert_eq!(map.members(3), vec![4, 5, 6]);
        assert_eq!(map.group_count(), 3);
    }

    #[test]
    fn density() {
        assert!(GroupMap::from_groups(vec![1, 2, 1, 3]).is_dense());
        assert!(!GroupMap::from_groups(vec![1, 3]).is_dense());
        assert!(!GroupMap::from_groups(vec![0, 1]).is_dense());
        assert!(!GroupMap::from_groups(vec![2]).is_dense());
    }

    #[test]
    fn lookup() {
        let map = GroupMap::from_groups(vec![1, 2]);
        assert_eq!(map.group(1), Some(2));
        assert_eq!(map.group(2), None);
    }
}

//! Label-agnostic comparison of label buffers.
//!
//! Different labelers may number the same components differently. These
//! helpers compare buffers by the partition of indices they induce, treating
//! label `0` as background.

use std::collections::{HashMap, HashSet};

/// Renumbers labels by first occurrence, mapping background to `None`.
///
/// Two buffers describe the same partition exactly when their canonical
/// forms are equal.
///
/// # Examples
/// ```
/// use ccl_test_support::partition::canonical_partition;
///
/// assert_eq!(canonical_partition(&[0, 7, 3, 7]), vec![None, Some(0), Some(1), Some(0)]);
/// ```
#[must_use]
pub fn canonical_partition(labels: &[i32]) -> Vec<Option<usize>> {
    let mut seen: HashMap<i32, usize> = HashMap::new();
    labels
        .iter()
        .map(|&label| {
            if label == 0 {
                return None;
            }
            let next = seen.len();
            Some(*seen.entry(label).or_insert(next))
        })
        .collect()
}

/// Returns `true` when both buffers have the same background and group
/// foreground indices identically.
#[must_use]
pub fn same_partition(left: &[i32], right: &[i32]) -> bool {
    left.len() == right.len() && canonical_partition(left) == canonical_partition(right)
}

/// Counts the distinct non-zero labels.
#[must_use]
pub fn distinct_labels(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&label| label != 0)
        .collect::<HashSet<_>>()
        .len()
}

/// Returns `true` when the non-zero labels are exactly `1..=K`.
#[must_use]
pub fn is_dense(labels: &[i32]) -> bool {
    if labels.iter().any(|&label| label < 0) {
        return false;
    }
    let max = labels.iter().copied().max().unwrap_or(0);
    usize::try_from(max).is_ok_and(|max| max == distinct_labels(labels))
}

//! Frequency ranking with a deterministic tie-break.
//!
//! Items are counted in a map that remembers where each item was first seen.
//! Ordering is count-descending; equal counts keep first-occurrence order, so
//! the result depends only on the input sequence.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// An item paired with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem<T> {
    pub item: T,
    pub count: usize,
}

impl<T> RankedItem<T> {
    pub fn new(item: T, count: usize) -> Self {
        Self { item, count }
    }
}

/// Counts `items` and returns the `k` most frequent.
///
/// # Example
///
/// ```
/// use kocorpus::rank::top_k;
///
/// let ranked = top_k(["b", "a", "b", "c", "a"], 2);
/// assert_eq!(ranked[0].item, "b");
/// assert_eq!(ranked[1].item, "a");
/// assert_eq!(ranked[1].count, 2);
/// ```
pub fn top_k<T, I>(items: I, k: usize) -> Vec<RankedItem<T>>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    top_k_counted(items.into_iter().map(|item| (item, 1)), k)
}

/// Like [`top_k`], but takes pre-counted `(item, count)` pairs.
///
/// Repeated items have their counts summed; first-occurrence order is the
/// position of the first pair naming the item.
pub fn top_k_counted<T, I>(pairs: I, k: usize) -> Vec<RankedItem<T>>
where
    T: Eq + Hash,
    I: IntoIterator<Item = (T, usize)>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();

    for (item, count) in pairs {
        match positions.get(&item) {
            Some(&index) => counts[index] += count,
            None => {
                positions.insert(item, counts.len());
                counts.push(count);
            }
        }
    }

    // Recover items in first-occurrence order
    let mut slots: Vec<Option<T>> = (0..counts.len()).map(|_| None).collect();
    for (item, index) in positions {
        slots[index] = Some(item);
    }

    let mut ranked: Vec<RankedItem<T>> = slots
        .into_iter()
        .flatten()
        .zip(counts)
        .map(|(item, count)| RankedItem::new(item, count))
        .collect();

    // Stable sort keeps first-occurrence order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(k);
    ranked
}

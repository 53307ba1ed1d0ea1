// combinations.rs
use itertools::Itertools;

/// Every `k`-element subset of `items`, in lexicographic index order, each
/// materialized as the elements at those indices.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k > items.len() {
        return Vec::new();
    }
    if k == 0 {
        return vec![Vec::new()];
    }
    (0..items.len())
        .combinations(k)
        .map(|indices| indices.into_iter().map(|i| items[i].clone()).collect())
        .collect()
}

//! Slice helpers

use crate::Value;

/// Drop repeated items, keeping the first occurrence of each
pub fn unique<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

/// Split into runs of `size`; the last run may be shorter. A zero size yields nothing.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Keep only truthy values
pub fn compact(items: &[Value]) -> Vec<Value> {
    items.iter().filter(|v| v.is_truthy()).cloned().collect()
}

/// Upper bound on the values a single mixed parameter may carry. The full
/// power set is materialized, so 2^20 subsets is the practical ceiling.
pub const MAX_MIXED_VALUES: usize = 20;

/// Number of subsets of an `n`-element list: 2^n.
pub fn subset_count(n: usize) -> u128 {
    if n >= 128 {
        return u128::MAX;
    }
    1u128 << n
}

/// Tie-break weight for subsets of equal length.
///
/// `W = Σ 10^(len - p) * indices[p]` over positions `p` within the subset.
/// Lower weights sort first, so subsets whose earliest members come earlier
/// in declaration order lead.
pub fn subset_weight(indices: &[usize]) -> u128 {
    let len = indices.len() as u32;
    indices
        .iter()
        .enumerate()
        .fold(0u128, |acc, (pos, &index)| {
            let scale = 10u128.saturating_pow(len - pos as u32);
            acc.saturating_add(scale.saturating_mul(index as u128))
        })
}

/// All subsets of `0..n` as ascending index lists, in canonical order:
/// shorter subsets first, equal lengths by ascending [`subset_weight`].
///
/// Subsets are produced from bitmasks `0..2^n` (bit `i` selects index `i`)
/// and then stably sorted, so weight ties keep mask order.
///
/// # Panics
///
/// Panics if `n` does not fit a `usize` bitmask. Callers cap `n` at
/// [`MAX_MIXED_VALUES`].
pub fn subset_indices(n: usize) -> Vec<Vec<usize>> {
    let total = 1usize << n;
    let mut subsets: Vec<Vec<usize>> = (0..total)
        .map(|mask| (0..n).filter(|bit| mask & (1 << bit) != 0).collect())
        .collect();
    subsets.sort_by_key(|subset| (subset.len(), subset_weight(subset)));
    subsets
}

/// All subsets of `values`, each preserving the original relative order,
/// in the canonical order of [`subset_indices`].
///
/// Ordering depends only on positions: equal values at different indices
/// are distinct members.
pub fn enumerate_subsets<T: Clone>(values: &[T]) -> Vec<Vec<T>> {
    subset_indices(values.len())
        .into_iter()
        .map(|indices| indices.into_iter().map(|i| values[i].clone()).collect())
        .collect()
}

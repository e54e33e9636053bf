use indexmap::IndexMap;

use crate::subset::{enumerate_subsets, subset_count};

/// One merged parameter assignment: name -> encoded values, in declaration
/// order (fixed parameters first, then mixed ones).
pub type Combination = IndexMap<String, Vec<String>>;

/// A single mixed parameter's subsets, in canonical subset order.
pub type SubsetSequence = Vec<Vec<String>>;

/// Expand each mixed parameter into its ordered power set, keeping
/// declaration order of the parameters.
pub fn inflate_mixed(mixed: &IndexMap<String, Vec<String>>) -> IndexMap<String, SubsetSequence> {
    mixed
        .iter()
        .map(|(name, values)| {
            let subsets = enumerate_subsets(values);
            tracing::debug!(
                param = %name,
                values = values.len(),
                subsets = subsets.len(),
                "inflated mixed parameter"
            );
            (name.clone(), subsets)
        })
        .collect()
}

/// Number of combinations before filtering: ∏ 2^size over mixed parameter
/// sizes, or 1 when there are none. Saturates at `u128::MAX`.
pub fn total_combinations<I>(mixed_sizes: I) -> u128
where
    I: IntoIterator<Item = usize>,
{
    mixed_sizes
        .into_iter()
        .fold(1u128, |acc, size| acc.saturating_mul(subset_count(size)))
}

/// Upper bound on the raw combinations a single query may produce. Every
/// admissible combination becomes one URL held in memory before emitting.
pub const MAX_COMBINATIONS: u128 = 1 << 24;

/// Admissible combinations, counted without building any of them.
///
/// Every mixed parameter contributes its empty subset exactly once, so at
/// most one combination carries no values: the one where every mixed subset
/// is empty and no unshadowed fixed parameter has a value.
pub fn admissible_combinations(
    fixed: &Combination,
    mixed: &IndexMap<String, Vec<String>>,
    require_non_empty: bool,
) -> u128 {
    let raw = total_combinations(mixed.values().map(Vec::len));
    let all_empty_exists = fixed
        .iter()
        .filter(|(name, _)| !mixed.contains_key(*name))
        .all(|(_, values)| values.is_empty());
    if require_non_empty && all_empty_exists {
        raw.saturating_sub(1)
    } else {
        raw
    }
}

/// Odometer over the cartesian product of mixed subset sequences.
///
/// Earlier-declared parameters are the outer loops; the last-declared one
/// varies fastest. Each step yields the fixed map merged with the current
/// subset of every mixed parameter. With no mixed parameters it yields the
/// fixed map exactly once.
pub struct ProductIterator<'a> {
    fixed: &'a Combination,
    mixed: Vec<(&'a str, &'a [Vec<String>])>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl<'a> ProductIterator<'a> {
    pub fn new(fixed: &'a Combination, mixed: &'a IndexMap<String, SubsetSequence>) -> Self {
        let mixed: Vec<(&str, &[Vec<String>])> = mixed
            .iter()
            .map(|(name, subsets)| (name.as_str(), subsets.as_slice()))
            .collect();
        // A parameter without any subset empties the whole product.
        let exhausted = mixed.iter().any(|(_, subsets)| subsets.is_empty());
        Self {
            fixed,
            cursor: vec![0; mixed.len()],
            mixed,
            exhausted,
        }
    }

    fn current(&self) -> Combination {
        let mut combination = self.fixed.clone();
        for (&(name, subsets), &position) in self.mixed.iter().zip(&self.cursor) {
            // Same-named mixed entries override the fixed value in place.
            combination.insert(name.to_string(), subsets[position].clone());
        }
        combination
    }

    /// Step to the next tuple, rightmost position first.
    fn advance(&mut self) {
        for i in (0..self.cursor.len()).rev() {
            if self.cursor[i] + 1 < self.mixed[i].1.len() {
                self.cursor[i] += 1;
                // Reset all positions to the right
                for j in (i + 1)..self.cursor.len() {
                    self.cursor[j] = 0;
                }
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for ProductIterator<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let combination = self.current();
        self.advance();
        Some(combination)
    }
}

/// Materialize every merged combination in odometer order.
pub fn combine(fixed: &Combination, mixed: &IndexMap<String, SubsetSequence>) -> Vec<Combination> {
    if mixed.is_empty() {
        return vec![fixed.clone()];
    }
    ProductIterator::new(fixed, mixed).collect()
}

/// Non-empty filter. When `require_non_empty` is set, a combination is kept
/// only if at least one of its parameters carries a value.
pub fn is_admissible(combination: &Combination, require_non_empty: bool) -> bool {
    !require_non_empty || combination.values().any(|values| !values.is_empty())
}

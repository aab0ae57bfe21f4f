use std::collections::HashMap;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Frequency counting
// ---------------------------------------------------------------------------

/// Count occurrences of each distinct value.
///
/// The result is ordered by descending count. Values with equal counts
/// keep the order in which they were first encountered, which makes
/// [`mode`] pick the earliest value among ties.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut slot: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match slot.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort: ties stay in first-encountered order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value and its count, or `None` for no values.
pub fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    value_counts(values).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_descending() {
        let counts = value_counts(["b", "a", "b", "c", "b", "a"]);
        assert_eq!(counts, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn ties_resolve_to_first_encountered() {
        assert_eq!(mode(["z", "y", "y", "z"]), Some(("z", 2)));
        assert_eq!(mode([7, 3, 3, 7, 1]), Some((7, 2)));
        let counts = value_counts(["c", "a", "b"]);
        assert_eq!(counts, vec![("c", 1), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn empty_input_has_no_mode() {
        assert_eq!(mode(Vec::<u32>::new()), None);
        assert!(value_counts(Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn works_on_tuples() {
        let pairs = [("A", "B"), ("B", "A"), ("A", "B")];
        assert_eq!(mode(pairs), Some((("A", "B"), 2)));
    }
}

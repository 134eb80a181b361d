//! Sequence utilities: shuffling, checked swaps, balanced reduction and cyclic lookup.
use rand::Rng;

/// Shuffle a slice in place with a Fisher–Yates pass.
///
/// Walks the index i from len-1 down to 1, drawing a uniform j in [0, i] and
/// swapping positions i and j. Every ordering of the slice is equally likely
/// assuming a uniform `rng`. Slices of length 0 or 1 come back unchanged.
pub fn shuffle<T, R: Rng + ?Sized>(arr: &mut [T], rng: &mut R) {
    for i in (1..arr.len()).rev() {
        let j = rng.random_range(0..=i);
        arr.swap(i, j);
    }
}

/// Shuffled copy of a slice; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(arr: &[T], rng: &mut R) -> Vec<T> {
    let mut out = arr.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Exchange two positions of a slice, doing nothing when either index is out
/// of bounds.
///
/// Returns whether the exchange took place. Equal in-bounds indices count as
/// a (trivial) success.
pub fn try_swap<T>(arr: &mut [T], i: usize, j: usize) -> bool {
    if i >= arr.len() || j >= arr.len() {
        return false;
    }
    arr.swap(i, j);
    true
}

/// Reduce a sequence with a balanced pairwise fold.
///
/// Each round combines adjacent pairs into a sequence of half the length
/// (rounded up) until one element remains, giving a combination tree of
/// logarithmic depth instead of a linear fold's chain. The association order
/// therefore differs from `fold`, which matters for non-associative
/// combiners.
///
/// An unpaired trailing element is passed to the combiner with `None` as the
/// right operand, so the combiner decides how to handle it. At least one
/// round always runs: a one-element input invokes `f(x, None)` once and
/// returns its result. An empty input returns `None` without invoking `f`.
pub fn treeduce<T, F>(items: Vec<T>, mut f: F) -> Option<T>
where
    F: FnMut(T, Option<T>) -> T,
{
    if items.is_empty() {
        return None;
    }

    let mut items = items;
    loop {
        let mut next = Vec::with_capacity((items.len() + 1) / 2);
        let mut iter = items.into_iter();
        while let Some(left) = iter.next() {
            next.push(f(left, iter.next()));
        }

        if next.len() == 1 {
            return next.pop();
        }
        items = next;
    }
}

/// The element after the first occurrence of `elem`, treating the slice as
/// circular: the element after the last wraps to the first.
///
/// Returns `None` when the slice is empty or `elem` does not occur.
pub fn next_wrapping<'a, T: PartialEq>(arr: &'a [T], elem: &T) -> Option<&'a T> {
    let pos = arr.iter().position(|x| x == elem)?;
    arr.get(pos + 1).or_else(|| arr.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn shuffle_keeps_short_slices() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut single = [7];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, [7]);
    }

    #[test]
    fn shuffled_leaves_input_untouched() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let input: Vec<u32> = (0..50).collect();
        let mut out = shuffled(&input, &mut rng);
        assert_eq!(input, (0..50).collect::<Vec<_>>());

        out.sort();
        assert_eq!(out, input);
    }

    #[test]
    fn try_swap_exchanges_in_bounds() {
        let mut arr = ["a", "b"];
        assert!(try_swap(&mut arr, 0, 1));
        assert_eq!(arr, ["b", "a"]);

        assert!(try_swap(&mut arr, 1, 1));
        assert_eq!(arr, ["b", "a"]);
    }

    #[test]
    fn try_swap_rejects_out_of_bounds() {
        let mut arr = [1, 2, 3];
        assert!(!try_swap(&mut arr, 1, 3));
        assert!(!try_swap(&mut arr, 5, 0));
        assert_eq!(arr, [1, 2, 3]);
    }

    #[test]
    fn treeduce_sums() {
        let add = |a: i32, b: Option<i32>| a + b.unwrap_or(0);
        assert_eq!(treeduce(vec![], add), None);
        assert_eq!(treeduce(vec![1, 2, 3], add), Some(6));
        assert_eq!(treeduce(vec![1, 2, 3, 10], add), Some(16));
    }

    #[test]
    fn treeduce_association_order() {
        let format = |a: String, b: Option<String>| match b {
            Some(b) => format!("({}-{})", a, b),
            None => format!("({})", a),
        };
        let items = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(treeduce(items, format), Some("((1-2)-(3))".to_string()));
    }

    #[test]
    fn treeduce_single_element_invokes_combiner() {
        let result = treeduce(vec![5], |a, b| a + b.unwrap_or(100));
        assert_eq!(result, Some(105));
    }

    #[test]
    fn next_wrapping_finds_successor() {
        let arr = ["a", "b", "c"];
        assert_eq!(next_wrapping(&arr, &"a"), Some(&"b"));
        assert_eq!(next_wrapping(&arr, &"c"), Some(&"a"));
    }

    #[test]
    fn next_wrapping_absent_cases() {
        let empty: [&str; 0] = [];
        assert_eq!(next_wrapping(&empty, &"a"), None);
        assert_eq!(next_wrapping(&["a", "b", "c"], &"d"), None);
    }

    #[test]
    fn next_wrapping_uses_first_occurrence() {
        let arr = [1, 2, 1, 3];
        assert_eq!(next_wrapping(&arr, &1), Some(&2));
    }

    proptest! {
        #[test]
        fn shuffle_preserves_elements(mut v in prop::collection::vec(0..1000u32, 0..100), seed: u64) {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let mut original = v.clone();
            shuffle(&mut v, &mut rng);

            v.sort();
            original.sort();
            prop_assert_eq!(v, original);
        }

        #[test]
        fn treeduce_addition_matches_sum(v in prop::collection::vec(0..1000u64, 1..100)) {
            let total: u64 = v.iter().sum();
            prop_assert_eq!(treeduce(v, |a, b| a + b.unwrap_or(0)), Some(total));
        }
    }
}

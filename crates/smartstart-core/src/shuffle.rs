//! Order-randomizing primitive for options and cards.

use rand::Rng;

/// Return a uniformly shuffled copy of `items`, leaving the input
/// unmodified.
///
/// Fisher–Yates over the copy: iterate from the last index down to 1,
/// swapping with a uniformly chosen index in `[0, i]`. O(N).
pub fn shuffled_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    for i in (1..copy.len()).rev() {
        let j = rng.gen_range(0..=i);
        copy.swap(i, j);
    }
    copy
}

/// [`shuffled_with`] using the thread-local generator.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn output_is_a_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let out = shuffled(&input);
        assert_eq!(out.len(), input.len());
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn input_unmodified() {
        let input = vec!["a", "b", "c", "d"];
        let before = input.clone();
        let _ = shuffled(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn handles_empty_and_single() {
        assert!(shuffled::<u8>(&[]).is_empty());
        assert_eq!(shuffled(&[7]), vec![7]);
    }

    #[test]
    fn repeated_calls_produce_different_orders() {
        // 20 elements have 20! orderings; 10 identical shuffles in a
        // row means the generator is broken.
        let input: Vec<u32> = (0..20).collect();
        let changed = (0..10).any(|_| shuffled(&input) != input);
        assert!(changed, "shuffle never changed the order");
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let input: Vec<u32> = (0..10).collect();
        let a = shuffled_with(&input, &mut StdRng::seed_from_u64(42));
        let b = shuffled_with(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_elements_keep_multiset() {
        let input = vec![1, 1, 2, 2, 3, 3];
        let mut out = shuffled(&input);
        out.sort_unstable();
        assert_eq!(out, vec![1, 1, 2, 2, 3, 3]);
    }
}

// Key-seeded Fisher-Yates shuffle
//
// Ordering depends only on the key and the input order, never on item
// content, so no article can be promoted by its title or score.

use super::stable_hash;

/// Numerical Recipes linear congruential generator over u32
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MULTIPLIER: u32 = 1_664_525;
    const INCREMENT: u32 = 1_013_904_223;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from [`stable_hash`] of a semantic key
    pub fn from_key(key: &str) -> Self {
        Self::new(stable_hash(key))
    }

    /// Advance and return the new state
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }
}

/// Shuffle a slice in place, deterministically for a given key
pub fn stable_shuffle_in_place<T>(items: &mut [T], key: &str) {
    if items.len() <= 1 {
        return;
    }

    let mut lcg = Lcg::from_key(key);
    for i in (1..items.len()).rev() {
        let bound = u32::try_from(i + 1).unwrap_or(u32::MAX);
        let j = (lcg.next_u32() % bound) as usize;
        items.swap(i, j);
    }
}

/// Return a key-seeded permutation of `items`
pub fn stable_shuffle<T>(mut items: Vec<T>, key: &str) -> Vec<T> {
    stable_shuffle_in_place(&mut items, key);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_first_steps() {
        let mut lcg = Lcg::new(0);
        assert_eq!(lcg.next_u32(), 1_013_904_223);
        assert_eq!(
            lcg.next_u32(),
            1_013_904_223u32
                .wrapping_mul(1_664_525)
                .wrapping_add(1_013_904_223)
        );
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        assert!(stable_shuffle(empty, "k").is_empty());
        assert_eq!(stable_shuffle(vec!["only"], "k"), vec!["only"]);
    }

    #[test]
    fn test_shuffle_same_key_same_order() {
        let items = vec!["A", "B", "C"];
        let first = stable_shuffle(items.clone(), "OpenAI::ClusterX");
        let second = stable_shuffle(items.clone(), "OpenAI::ClusterX");
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = stable_shuffle(items.clone(), "query::cluster");
        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_two_items_follows_lcg() {
        // hash("") = 0, so the first draw is the LCG increment; 1013904223 % 2 == 1
        let shuffled = stable_shuffle(vec!['a', 'b'], "");
        assert_eq!(shuffled, vec!['a', 'b']);
    }

    #[test]
    fn test_shuffle_ignores_content() {
        // Same positions, different payloads: the index permutation must match
        let a = stable_shuffle(vec![0usize, 1, 2, 3, 4, 5], "key");
        let b = stable_shuffle(vec!["f", "e", "d", "c", "b", "a"], "key");
        let mapped: Vec<&str> = a.iter().map(|&i| ["f", "e", "d", "c", "b", "a"][i]).collect();
        assert_eq!(mapped, b);
    }

    #[test]
    fn test_some_keys_produce_different_orders() {
        let items: Vec<u32> = (0..8).collect();
        let base = stable_shuffle(items.clone(), "OpenAI::ClusterX");
        let differs = (0..20)
            .map(|n| stable_shuffle(items.clone(), &format!("OpenAI::Cluster{}", n)))
            .any(|order| order != base);
        assert!(differs);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output is always a permutation of the input
        #[test]
        fn test_permutation_property(items in proptest::collection::vec(any::<i32>(), 0..64), key in ".*") {
            let mut shuffled = stable_shuffle(items.clone(), &key);
            let mut sorted = items.clone();
            shuffled.sort_unstable();
            sorted.sort_unstable();
            prop_assert_eq!(shuffled, sorted);
        }

        /// Property: identical arguments give identical order
        #[test]
        fn test_stability_property(items in proptest::collection::vec(any::<u8>(), 0..32), key in ".{0,24}") {
            prop_assert_eq!(
                stable_shuffle(items.clone(), &key),
                stable_shuffle(items, &key)
            );
        }
    }
}

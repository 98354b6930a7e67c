//! Search state: which blocks of a puzzle are still on the board.
//!
//! Blocks never move, only disappear, so a state is a presence bitset over the
//! puzzle's block arena. Two states with the same bits hold the same occupied
//! cells, which makes the bitset itself the deduplication key.

/// Presence bitset over block indices.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct State {
    words: Box<[u64]>,
    remaining: usize,
}

impl State {
    /// A state with blocks `0..block_count` all present.
    pub fn full(block_count: usize) -> Self {
        let mut words = vec![u64::MAX; block_count.div_ceil(64)].into_boxed_slice();
        // clear the unused high bits so equal states hash equally
        if block_count % 64 != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << (block_count % 64)) - 1;
            }
        }
        Self {
            words,
            remaining: block_count,
        }
    }

    /// Returns `true` if block `index` is still on the board.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|word| word & (1u64 << (index % 64)) != 0)
    }

    /// Removes block `index` in place. Removing an absent block does nothing.
    #[inline]
    pub fn remove(&mut self, index: usize) {
        if self.contains(index) {
            self.words[index / 64] &= !(1u64 << (index % 64));
            self.remaining -= 1;
        }
    }

    /// A copy of this state with block `index` removed.
    pub fn without(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.remove(index);
        next
    }

    /// Number of blocks still on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Indices of present blocks, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let bit = bits.trailing_zeros() as usize;
                    // drop the lowest set bit
                    bits &= bits - 1;
                    Some(word_index * 64 + bit)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_state_contains_every_block() {
        let state = State::full(70);
        assert_eq!(state.len(), 70);
        assert!((0..70).all(|i| state.contains(i)));
        assert!(!state.contains(70));
        assert!(!state.contains(200));
    }

    #[test]
    fn test_empty_puzzle_state_is_empty() {
        let state = State::full(0);
        assert!(state.is_empty());
        assert_eq!(state.iter().count(), 0);
    }

    #[test]
    fn test_removal_order_does_not_matter() {
        let a = State::full(10).without(3).without(7);
        let b = State::full(10).without(7).without(3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = State::full(5);
        state.remove(2);
        state.remove(2);
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_iter_lists_present_blocks_across_words() {
        let state = State::full(130).without(0).without(64).without(129);
        let present: Vec<_> = state.iter().collect();
        assert_eq!(present.len(), 127);
        assert_eq!(present[0], 1);
        assert!(!present.contains(&64));
        assert_eq!(*present.last().unwrap(), 128);
    }
}

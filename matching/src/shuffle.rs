//! Uniform shuffling primitives.
//!
//! Both functions rely on [`SliceRandom::shuffle`], a Fisher-Yates shuffle, so
//! every permutation of the shuffled items is equally likely.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Position;

/// Return the items in a uniformly random order. Every item appears exactly once.
pub fn permutation<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Shuffle the contents of the free (non-fixed) slots among themselves.
///
/// Items at `fixed` positions are never touched. The free items are drawn into
/// a fresh permutation and written back to the free slots in ascending order.
/// Returns the number of free slots.
pub fn reshuffle_free_slots<T: Clone, R: Rng + ?Sized>(
    arrangement: &mut [T],
    fixed: &BTreeSet<Position>,
    rng: &mut R,
) -> usize {
    let free: Vec<Position> = (0..arrangement.len())
        .filter(|i| !fixed.contains(i))
        .collect();

    let mut pool: Vec<T> = free.iter().map(|&i| arrangement[i].clone()).collect();
    pool.shuffle(rng);

    for (slot, item) in free.iter().zip(pool) {
        arrangement[*slot] = item;
    }

    free.len()
}

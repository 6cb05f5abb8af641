/// Uniform shuffling helpers used by every selection step

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle a slice in place (Fisher-Yates)
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Return a shuffled copy, leaving `items` untouched
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle_in_place(&mut copy, rng);
    copy
}

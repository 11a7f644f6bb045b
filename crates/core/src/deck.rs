//! Deck module - tile kinds guaranteed to clear in triples
//!
//! The deck holds `3 * floor(total_tiles / 3)` kinds. Triplets are dealt
//! round-robin over the active kinds and then shuffled, so every kind appears
//! a multiple of three times and kind counts differ by at most one triplet.
//! A `total_tiles` remainder that does not fill a triplet is dropped.

use crate::rng::RandomSource;
use crate::types::{TileKind, MATCH_SIZE};

/// Number of tiles a deck built from `total_tiles` will contain.
pub fn deck_len(total_tiles: u32) -> usize {
    (total_tiles as usize / MATCH_SIZE) * MATCH_SIZE
}

/// The first `active_type_count` kinds, clamped into `1..=TileKind::COUNT`.
pub fn active_kinds(active_type_count: u8) -> &'static [TileKind] {
    let n = (active_type_count as usize).clamp(1, TileKind::COUNT);
    &TileKind::ALL[..n]
}

/// Build and shuffle a deck.
pub fn create_deck<R: RandomSource>(
    total_tiles: u32,
    active_type_count: u8,
    rng: &mut R,
) -> Vec<TileKind> {
    let kinds = active_kinds(active_type_count);
    let triplets = total_tiles as usize / MATCH_SIZE;

    let mut deck = Vec::with_capacity(triplets * MATCH_SIZE);
    for i in 0..triplets {
        let kind = kinds[i % kinds.len()];
        deck.extend([kind; MATCH_SIZE]);
    }

    rng.shuffle(&mut deck);
    deck
}

/// Count of each kind, indexed by [`TileKind::index`].
pub fn kind_counts(kinds: impl IntoIterator<Item = TileKind>) -> [usize; TileKind::COUNT] {
    let mut counts = [0usize; TileKind::COUNT];
    for kind in kinds {
        counts[kind.index()] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_nine_tiles_two_types() {
        let mut rng = SimpleRng::new(1);
        let deck = create_deck(9, 2, &mut rng);
        assert_eq!(deck.len(), 9);

        let counts = kind_counts(deck.iter().copied());
        assert_eq!(counts[TileKind::Sheep.index()], 6);
        assert_eq!(counts[TileKind::Carrot.index()], 3);
    }

    #[test]
    fn test_remainder_is_dropped() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(create_deck(10, 3, &mut rng).len(), 9);
        assert_eq!(create_deck(11, 3, &mut rng).len(), 9);
        assert_eq!(create_deck(2, 3, &mut rng).len(), 0);
        assert_eq!(deck_len(121), 120);
    }

    #[test]
    fn test_counts_are_multiples_of_three() {
        let mut rng = SimpleRng::new(77);
        for total in 0..130 {
            for types in 1..=10u8 {
                let deck = create_deck(total, types, &mut rng);
                assert_eq!(deck.len(), deck_len(total));

                let counts = kind_counts(deck.iter().copied());
                assert!(counts.iter().all(|c| c % 3 == 0));
                assert_eq!(counts.iter().sum::<usize>(), deck.len());
                // Inactive kinds never appear.
                assert!(counts[types as usize..].iter().all(|&c| c == 0));
            }
        }
    }

    #[test]
    fn test_round_robin_balance() {
        let mut rng = SimpleRng::new(5);
        // 8 triplets over 3 kinds: 3, 3, 2 triplets.
        let deck = create_deck(24, 3, &mut rng);
        let counts = kind_counts(deck.iter().copied());
        assert_eq!(&counts[..3], &[9, 9, 6]);
    }

    #[test]
    fn test_active_kinds_clamped() {
        assert_eq!(active_kinds(0), &[TileKind::Sheep]);
        assert_eq!(active_kinds(200).len(), TileKind::COUNT);
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = create_deck(120, 10, &mut SimpleRng::new(9));
        let b = create_deck(120, 10, &mut SimpleRng::new(9));
        assert_eq!(a, b);
    }
}

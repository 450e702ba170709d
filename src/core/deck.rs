//! Deck construction and shuffling
//!
//! A deck holds `2 * pair_count` cards: each of the first `pair_count`
//! palette symbols appears exactly twice. The prefix truncation is
//! order-stable so lower difficulty tiers always reuse the same leading
//! symbols.

use crate::core::{Card, Symbol};
use crate::{MemoryError, Result};
use rand::Rng;

/// Build a shuffled deck of `2 * pair_count` cards
///
/// Cards are dealt out by repeatedly drawing a uniformly random remaining
/// symbol with `swap_remove`, which is Fisher-Yates-equivalent and yields
/// an unbiased permutation over all `(2n)!` orderings given a fair RNG.
/// Positions are assigned in draw order (0-based, row-major on the board).
pub fn build(pair_count: usize, palette: &[Symbol], rng: &mut impl Rng) -> Result<Vec<Card>> {
    if pair_count == 0 {
        return Err(MemoryError::Configuration(
            "pair count must be at least 1".to_string(),
        ));
    }
    if pair_count > palette.len() {
        return Err(MemoryError::Configuration(format!(
            "pair count {} exceeds palette size {}",
            pair_count,
            palette.len()
        )));
    }

    let used = &palette[..pair_count];
    let mut pool: Vec<Symbol> = used.iter().chain(used.iter()).copied().collect();

    let mut cards = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        let drawn = rng.gen_range(0..pool.len());
        let symbol = pool.swap_remove(drawn);
        cards.push(Card::new(symbol, cards.len()));
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SYMBOL_PALETTE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_deck_has_each_symbol_exactly_twice() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for pair_count in [1, 2, 15, 35] {
            let deck = build(pair_count, &SYMBOL_PALETTE, &mut rng).unwrap();
            assert_eq!(deck.len(), 2 * pair_count);

            let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
            for card in &deck {
                *counts.entry(card.symbol).or_insert(0) += 1;
            }
            assert_eq!(counts.len(), pair_count);
            assert!(counts.values().all(|&count| count == 2));

            // Only the order-stable palette prefix may be used
            for symbol in counts.keys() {
                assert!(SYMBOL_PALETTE[..pair_count].contains(symbol));
            }
        }
    }

    #[test]
    fn test_positions_are_contiguous() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let deck = build(4, &SYMBOL_PALETTE, &mut rng).unwrap();
        for (expected, card) in deck.iter().enumerate() {
            assert_eq!(card.position, expected);
        }
    }

    #[test]
    fn test_rejects_zero_pairs() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        assert!(matches!(
            build(0, &SYMBOL_PALETTE, &mut rng),
            Err(MemoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_pair_count_beyond_palette() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        assert!(matches!(
            build(SYMBOL_PALETTE.len() + 1, &SYMBOL_PALETTE, &mut rng),
            Err(MemoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let deck1 = build(10, &SYMBOL_PALETTE, &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
        let deck2 = build(10, &SYMBOL_PALETTE, &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
        assert_eq!(deck1, deck2);

        let deck3 = build(10, &SYMBOL_PALETTE, &mut ChaCha12Rng::seed_from_u64(43)).unwrap();
        assert_ne!(deck1, deck3);
    }
}

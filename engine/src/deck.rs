use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::card::{Card, DECK_SIZE, NUM_RANKS, NUM_SUITS};

/// A shuffled 52-card deck with a `next_card` cursor. Cards before the
/// cursor are already dealt; the invariant `next_card <= DECK_SIZE` holds
/// for the lifetime of the deck. The deck carries its own RNG so it can
/// reshuffle itself between hands without the caller threading one through —
/// the same single continuing PRNG stream the reference server seeds once
/// at startup and draws from for every hand's shuffle.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    next_card: usize,
    rng: StdRng,
}

impl Deck {
    /// Builds a freshly shuffled deck from the given seed. The same seed
    /// always yields the same shuffle, which is what lets the server's `--seed`
    /// CLI argument reproduce a table deterministically.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = [Card::NOCARD; DECK_SIZE];
        let mut i = 0;
        for rank in 0..NUM_RANKS {
            for suit in 0..NUM_SUITS {
                cards[i] = Card::new(rank, suit);
                i += 1;
            }
        }
        let mut rng = StdRng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Deck {
            cards,
            next_card: 0,
            rng,
        }
    }

    /// Re-shuffles the existing 52 cards in place, drawing from the deck's
    /// own continuing RNG, and resets the cursor. Called at the top of every
    /// hand (`Table::start_hand`) so a table never needs a fresh `Deck`.
    pub fn reshuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.next_card = 0;
    }

    pub fn next_card_index(&self) -> usize {
        self.next_card
    }

    /// Deals the next card off the top, advancing the cursor. Panics if the
    /// deck is exhausted — a single hand never needs more than 2*6 + 5 = 17
    /// cards, well under 52, so exhaustion indicates a driver bug.
    pub fn deal(&mut self) -> Card {
        assert!(self.next_card < DECK_SIZE, "deck exhausted");
        let card = self.cards[self.next_card];
        self.next_card += 1;
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn shuffled_deck_has_52_distinct_cards() {
        let deck = Deck::shuffled(42);
        let unique: HashSet<u8> = deck.cards.iter().map(|c| c.raw()).collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert_eq!(deck.next_card_index(), 0);
    }

    #[test]
    fn same_seed_deals_same_sequence() {
        let mut a = Deck::shuffled(7);
        let mut b = Deck::shuffled(7);
        for _ in 0..10 {
            assert_eq!(a.deal().raw(), b.deal().raw());
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut a = Deck::shuffled(1);
        let mut b = Deck::shuffled(2);
        let seq_a: Vec<u8> = (0..52).map(|_| a.deal().raw()).collect();
        let seq_b: Vec<u8> = (0..52).map(|_| b.deal().raw()).collect();
        assert_ne!(seq_a, seq_b);
    }
}

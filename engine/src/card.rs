use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of distinct ranks (Two .. Ace) and suits in a standard deck.
pub const NUM_RANKS: u8 = 13;
pub const NUM_SUITS: u8 = 4;
pub const DECK_SIZE: usize = (NUM_RANKS * NUM_SUITS) as usize;

/// A single playing card packed as `rank * 4 + suit`, rank 0 (Two) .. 12 (Ace),
/// suit 0..3. [`Card::NOCARD`] is the sentinel for an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    pub const NOCARD: Card = Card(0xFF);

    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < NUM_RANKS && suit < NUM_SUITS);
        Card(rank * NUM_SUITS + suit)
    }

    pub fn is_nocard(self) -> bool {
        self.0 == Self::NOCARD.0
    }

    /// Rank in `0..13` (0 = Two, 12 = Ace). Panics on `NOCARD`.
    pub fn rank(self) -> u8 {
        assert!(!self.is_nocard(), "rank() called on NOCARD");
        self.0 / NUM_SUITS
    }

    /// Suit in `0..4`. Panics on `NOCARD`.
    pub fn suit(self) -> u8 {
        assert!(!self.is_nocard(), "suit() called on NOCARD");
        self.0 % NUM_SUITS
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn from_raw(raw: u8) -> Self {
        Card(raw)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nocard() {
            return write!(f, "--");
        }
        const RANKS: [char; 13] = [
            '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
        ];
        const SUITS: [char; 4] = ['h', 'd', 'c', 's'];
        write!(f, "{}{}", RANKS[self.rank() as usize], SUITS[self.suit() as usize])
    }
}

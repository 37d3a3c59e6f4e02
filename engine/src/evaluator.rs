use thiserror::Error;

use crate::card::Card;

/// Ascending hand-strength categories. The ordinal is what occupies the top
/// nibble of the packed [`HandValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    Trips = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    Quads = 8,
    StraightFlush = 9,
}

impl HandCategory {
    fn from_ordinal(ordinal: u64) -> Self {
        match ordinal {
            1 => HandCategory::HighCard,
            2 => HandCategory::Pair,
            3 => HandCategory::TwoPair,
            4 => HandCategory::Trips,
            5 => HandCategory::Straight,
            6 => HandCategory::Flush,
            7 => HandCategory::FullHouse,
            8 => HandCategory::Quads,
            9 => HandCategory::StraightFlush,
            other => panic!("invalid hand category ordinal {other}"),
        }
    }
}

/// A totally ordered 64-bit hand strength: category in the top nibble,
/// kickers packed in descending significance below it. Comparing two hands
/// is a single `u64` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue(u64);

impl HandValue {
    pub fn category(self) -> HandCategory {
        HandCategory::from_ordinal(self.0 >> 60)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("fewer than five real cards supplied to the evaluator")]
    TooFewCards,
}

const fn bit(rank: u8) -> u16 {
    1u16 << rank
}

/// Finds the high rank of a straight within a 13-bit rank mask, honoring the
/// wheel (A-2-3-4-5, high = Five) as a special case since it wraps around the
/// Ace bit rather than occupying five consecutive bit positions. Returns
/// `None` if no 5-in-a-row run exists.
fn straight_high(mask: u16) -> Option<u8> {
    for hi in (4..=12).rev() {
        let window = 0x1Fu16 << (hi - 4);
        if mask & window == window {
            return Some(hi);
        }
    }
    const WHEEL: u16 = bit(12) | bit(0) | bit(1) | bit(2) | bit(3);
    if mask & WHEEL == WHEEL {
        return Some(3);
    }
    None
}

/// Evaluates exactly seven cards (two hole + five community) to a totally
/// ordered [`HandValue`]. This is a single counting/bitmask pass over the
/// seven cards, not an enumeration of five-card subsets.
pub fn evaluate7(cards: &[Card; 7]) -> Result<HandValue, EvalError> {
    let real_count = cards.iter().filter(|c| !c.is_nocard()).count();
    if real_count < 5 {
        return Err(EvalError::TooFewCards);
    }

    let mut rank_counts = [0u8; 13];
    let mut suit_ranks = [0u16; 4];
    for &card in cards {
        if card.is_nocard() {
            continue;
        }
        rank_counts[card.rank() as usize] += 1;
        suit_ranks[card.suit() as usize] |= bit(card.rank());
    }

    let flush_suit = (0..4).find(|&s| suit_ranks[s].count_ones() >= 5);

    let mut ranks_mask = 0u16;
    for (rank, &count) in rank_counts.iter().enumerate() {
        if count > 0 {
            ranks_mask |= bit(rank as u8);
        }
    }

    let straight_hi = straight_high(ranks_mask);
    let sf_hi = flush_suit.and_then(|s| straight_high(suit_ranks[s]));

    let pack = |category: HandCategory, body: u64| HandValue(((category as u64) << 60) | body);

    if let Some(hi) = sf_hi {
        return Ok(pack(HandCategory::StraightFlush, hi as u64));
    }

    let mut quad = None;
    let mut trips: Vec<u8> = Vec::new();
    let mut pairs: Vec<u8> = Vec::new();
    for rank in (0..13u8).rev() {
        match rank_counts[rank as usize] {
            4 => quad = Some(rank),
            3 => trips.push(rank),
            2 => pairs.push(rank),
            _ => {}
        }
    }

    if let Some(quad_rank) = quad {
        let kicker = (0..13u8)
            .rev()
            .find(|&r| r != quad_rank && rank_counts[r as usize] > 0)
            .expect("seven cards always leave a kicker after a quad");
        return Ok(pack(
            HandCategory::Quads,
            (quad_rank as u64) << 4 | kicker as u64,
        ));
    }

    if let Some(&three) = trips.first() {
        // A second set of trips is demoted to a pair for full-house purposes.
        let two = trips.get(1).copied().or_else(|| pairs.first().copied());
        if let Some(two) = two {
            return Ok(pack(
                HandCategory::FullHouse,
                (three as u64) << 4 | two as u64,
            ));
        }
    }

    if let Some(suit) = flush_suit {
        let body = top_n_ranks(suit_ranks[suit], 5);
        return Ok(pack(HandCategory::Flush, body));
    }

    if let Some(hi) = straight_hi {
        return Ok(pack(HandCategory::Straight, hi as u64));
    }

    if let Some(&three) = trips.first() {
        let mut kickers = (0..13u8)
            .rev()
            .filter(|&r| r != three && rank_counts[r as usize] > 0);
        let k1 = kickers.next().unwrap_or(0);
        let k2 = kickers.next().unwrap_or(0);
        return Ok(pack(
            HandCategory::Trips,
            (three as u64) << 8 | (k1 as u64) << 4 | k2 as u64,
        ));
    }

    if pairs.len() >= 2 {
        let hi = pairs[0];
        let lo = pairs[1];
        let kicker = (0..13u8)
            .rev()
            .find(|&r| r != hi && r != lo && rank_counts[r as usize] > 0)
            .unwrap_or(0);
        return Ok(pack(
            HandCategory::TwoPair,
            (hi as u64) << 8 | (lo as u64) << 4 | kicker as u64,
        ));
    }

    if let Some(&pair) = pairs.first() {
        let mut kickers = (0..13u8)
            .rev()
            .filter(|&r| r != pair && rank_counts[r as usize] > 0);
        let k1 = kickers.next().unwrap_or(0);
        let k2 = kickers.next().unwrap_or(0);
        let k3 = kickers.next().unwrap_or(0);
        return Ok(pack(
            HandCategory::Pair,
            (pair as u64) << 12 | (k1 as u64) << 8 | (k2 as u64) << 4 | k3 as u64,
        ));
    }

    Ok(pack(HandCategory::HighCard, top_n_ranks(ranks_mask, 5)))
}

/// Packs the `n` highest set bits of a rank mask, most significant first,
/// four bits per rank.
fn top_n_ranks(mask: u16, n: u8) -> u64 {
    let mut value = 0u64;
    let mut count = 0;
    for rank in (0..13u8).rev() {
        if count >= n {
            break;
        }
        if mask & bit(rank) != 0 {
            value = (value << 4) | rank as u64;
            count += 1;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn c(rank: u8, suit: u8) -> Card {
        Card::new(rank, suit)
    }

    const H: u8 = 0;
    const D: u8 = 1;
    const CL: u8 = 2;
    const S: u8 = 3;

    #[test]
    fn too_few_cards_is_an_error() {
        let hand = [
            c(12, H),
            c(11, H),
            Card::NOCARD,
            Card::NOCARD,
            Card::NOCARD,
            Card::NOCARD,
            Card::NOCARD,
        ];
        assert_eq!(evaluate7(&hand), Err(EvalError::TooFewCards));
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        // A-K-Q-J-T hearts vs 9-8-7-6-5 spades
        let royal = [
            c(12, H),
            c(11, H),
            c(10, H),
            c(9, H),
            c(8, H),
            c(1, D),
            c(2, CL),
        ];
        let nine_high_sf = [
            c(7, S),
            c(6, S),
            c(5, S),
            c(4, S),
            c(3, S),
            c(1, D),
            c(2, CL),
        ];
        let r = evaluate7(&royal).unwrap();
        let s = evaluate7(&nine_high_sf).unwrap();
        assert_eq!(r.category(), HandCategory::StraightFlush);
        assert_eq!(s.category(), HandCategory::StraightFlush);
        assert!(r > s);
    }

    #[test]
    fn wheel_straight_is_five_high_not_ace_high() {
        // A-2-3-4-5 offsuit plus two dead cards
        let wheel = [c(12, H), c(0, D), c(1, CL), c(2, S), c(3, H), c(9, D), c(10, CL)];
        let value = evaluate7(&wheel).unwrap();
        assert_eq!(value.category(), HandCategory::Straight);
        assert_eq!(value.raw() & 0xF, 3); // high card rank index for Five is 3

        let six_high = [c(1, H), c(2, D), c(3, CL), c(4, S), c(0, H), c(9, D), c(10, CL)];
        let six_value = evaluate7(&six_high).unwrap();
        assert!(six_value > value, "6-high straight must beat the wheel");
    }

    #[test]
    fn quads_beats_full_house_beats_flush() {
        let quads = [c(5, H), c(5, D), c(5, CL), c(5, S), c(2, H), c(9, D), c(1, CL)];
        let full_house = [c(5, H), c(5, D), c(5, CL), c(2, H), c(2, D), c(9, S), c(1, CL)];
        let flush = [c(2, H), c(4, H), c(6, H), c(8, H), c(10, H), c(3, D), c(1, CL)];
        let qv = evaluate7(&quads).unwrap();
        let fhv = evaluate7(&full_house).unwrap();
        let flv = evaluate7(&flush).unwrap();
        assert!(qv > fhv);
        assert!(fhv > flv);
    }

    #[test]
    fn two_trips_demote_the_lower_to_a_pair() {
        let hand = [c(10, H), c(10, D), c(10, CL), c(4, H), c(4, D), c(4, CL), c(1, S)];
        let value = evaluate7(&hand).unwrap();
        assert_eq!(value.category(), HandCategory::FullHouse);
        // trips rank (Jack index 10 wait, using rank index 10 is Queen; here card rank 10 is Queen-ish,
        // just assert the packed body orders trips above pair.
        let trips_field = (value.raw() >> 4) & 0xF;
        let pair_field = value.raw() & 0xF;
        assert_eq!(trips_field, 10);
        assert_eq!(pair_field, 4);
    }

    #[rstest]
    #[case(HandCategory::HighCard)]
    #[case(HandCategory::Pair)]
    #[case(HandCategory::TwoPair)]
    #[case(HandCategory::Trips)]
    #[case(HandCategory::Straight)]
    #[case(HandCategory::Flush)]
    #[case(HandCategory::FullHouse)]
    #[case(HandCategory::Quads)]
    #[case(HandCategory::StraightFlush)]
    fn category_ordinals_round_trip(#[case] cat: HandCategory) {
        assert_eq!(HandCategory::from_ordinal(cat as u64), cat);
    }
}

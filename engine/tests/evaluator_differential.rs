//! Cross-checks the custom evaluator against `aya_poker`, a reference
//! hand-evaluation crate, the same role it plays as a dev-dependency in the
//! retrieval pack's `HiddenHand` example.

use aya_poker::base::{Card as AyaCard, Hand as AyaHand};
use aya_poker::{poker_rank, PokerRankCategory};
use holdem_engine::card::Card;
use holdem_engine::evaluator::{evaluate7, HandCategory};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn to_aya(card: Card) -> AyaCard {
    card.to_string().parse().expect("card string must parse")
}

/// `aya_poker` splits the straight-flush category into `StraightFlush` and a
/// top-case `RoyalFlush`; our evaluator treats a royal as just the best
/// straight flush, so the two collapse to the same bucket for comparison.
fn normalize(category: PokerRankCategory) -> &'static str {
    match category {
        PokerRankCategory::Ineligible => "ineligible",
        PokerRankCategory::HighCard => "highcard",
        PokerRankCategory::Pair => "pair",
        PokerRankCategory::TwoPair => "twopair",
        PokerRankCategory::ThreeOfAKind => "trips",
        PokerRankCategory::Straight => "straight",
        PokerRankCategory::Flush => "flush",
        PokerRankCategory::FullHouse => "fullhouse",
        PokerRankCategory::FourOfAKind => "quads",
        PokerRankCategory::StraightFlush | PokerRankCategory::RoyalFlush => "straightflush",
    }
}

fn ours_name(category: HandCategory) -> &'static str {
    match category {
        HandCategory::HighCard => "highcard",
        HandCategory::Pair => "pair",
        HandCategory::TwoPair => "twopair",
        HandCategory::Trips => "trips",
        HandCategory::Straight => "straight",
        HandCategory::Flush => "flush",
        HandCategory::FullHouse => "fullhouse",
        HandCategory::Quads => "quads",
        HandCategory::StraightFlush => "straightflush",
    }
}

fn random_deck(seed: u64) -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for rank in 0..13u8 {
        for suit in 0..4u8 {
            cards.push(Card::new(rank, suit));
        }
    }
    let mut rng = StdRng::seed_from_u64(seed);
    cards.shuffle(&mut rng);
    cards
}

#[test]
fn agrees_with_reference_evaluator_on_random_seven_card_hands() {
    for seed in 0..500u64 {
        let deck = random_deck(seed);
        let hand: [Card; 7] = deck[0..7].try_into().unwrap();
        let ours = evaluate7(&hand).unwrap();

        let aya_hand: AyaHand = hand.iter().copied().map(to_aya).collect();
        let theirs = poker_rank(&aya_hand);

        assert_eq!(
            ours_name(ours.category()),
            normalize(theirs.rank_category()),
            "category mismatch for seed {seed}: {hand:?}"
        );
    }
}

#[test]
fn agrees_with_reference_evaluator_on_relative_ordering() {
    for seed in 0..200u64 {
        let deck = random_deck(seed);
        let board: [Card; 5] = deck[0..5].try_into().unwrap();
        let hand_a: [Card; 7] = [board[0], board[1], board[2], board[3], board[4], deck[5], deck[6]];
        let hand_b: [Card; 7] = [board[0], board[1], board[2], board[3], board[4], deck[7], deck[8]];

        let ours_a = evaluate7(&hand_a).unwrap();
        let ours_b = evaluate7(&hand_b).unwrap();

        let aya_a: AyaHand = hand_a.iter().copied().map(to_aya).collect();
        let aya_b: AyaHand = hand_b.iter().copied().map(to_aya).collect();
        let theirs_a = poker_rank(&aya_a);
        let theirs_b = poker_rank(&aya_b);

        let our_order = ours_a.cmp(&ours_b);
        let their_order = theirs_a.cmp(&theirs_b);
        assert_eq!(our_order, their_order, "ordering mismatch for seed {seed}");
    }
}

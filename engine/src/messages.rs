use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::seat::NUM_SEATS;

/// Action a client may request during a betting street. `amount` on `Raise`
/// is the *total* chips the seat wishes to have wagered this street, not a
/// delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Check,
    Call,
    Raise(u32),
    Fold,
}

/// Domain-level outgoing messages the Hand Driver hands to a seat's outbound
/// channel. The transport layer is responsible for encoding these onto the
/// wire's fixed-size binary records (see the `server` crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutgoingMessage {
    Ack,
    Nack,
    Info(InfoPayload),
    End(EndPayload),
    Halt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoPayload {
    pub community_cards: [Card; 5],
    pub stacks: [u32; NUM_SEATS],
    /// Visible bets: the `-1` not-acted sentinel is already collapsed to 0.
    pub bets: [u32; NUM_SEATS],
    /// 0 = folded, 1 = active, 2 = other (all-in or left).
    pub statuses: [u8; NUM_SEATS],
    pub pot_size: u32,
    pub highest_bet: u32,
    pub dealer_seat: u8,
    pub current_seat: u8,
    /// The recipient's own two hole cards; `NOCARD` if none dealt.
    pub hole_cards: [Card; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndPayload {
    pub community_cards: [Card; 5],
    pub stacks: [u32; NUM_SEATS],
    pub hole_cards: [[Card; 2]; NUM_SEATS],
    pub statuses: [u8; NUM_SEATS],
    pub pot_size: u32,
    pub dealer_seat: u8,
    pub winner_seat: u8,
}

use tokio::sync::mpsc::UnboundedSender;

use crate::card::Card;
use crate::messages::OutgoingMessage;

pub const NUM_SEATS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
    Left,
}

/// Sentinel meaning "has not yet acted this street and still owes the
/// current highest bet". Kept as the spec's `-1` rather than a parallel
/// boolean so the wire mapping (`-1 -> 0`) stays a single accessor.
pub const NOT_ACTED: i32 = -1;

pub struct Seat {
    pub status: SeatStatus,
    pub stack: u32,
    pub hole_cards: [Card; 2],
    pub current_bet: i32,
    pub outbound: Option<UnboundedSender<OutgoingMessage>>,
}

impl Seat {
    pub fn empty() -> Self {
        Seat {
            status: SeatStatus::Left,
            stack: 0,
            hole_cards: [Card::NOCARD; 2],
            current_bet: NOT_ACTED,
            outbound: None,
        }
    }

    pub fn bind(starting_stack: u32, outbound: UnboundedSender<OutgoingMessage>) -> Self {
        Seat {
            status: SeatStatus::Active,
            stack: starting_stack,
            hole_cards: [Card::NOCARD; 2],
            current_bet: NOT_ACTED,
            outbound: Some(outbound),
        }
    }

    /// `current_bet` with the `-1` "not acted" sentinel collapsed to zero,
    /// as the wire's `INFO` payload and the action handler's call-amount
    /// math both want.
    pub fn current_bet_as_nonneg(&self) -> u32 {
        if self.current_bet < 0 {
            0
        } else {
            self.current_bet as u32
        }
    }

    pub fn send(&mut self, message: OutgoingMessage) {
        if let Some(tx) = &self.outbound {
            if tx.send(message).is_err() {
                self.status = SeatStatus::Left;
                self.outbound = None;
            }
        }
    }
}

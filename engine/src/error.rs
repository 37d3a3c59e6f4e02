use thiserror::Error;

/// Any precondition failure here means "no mutation happened, reply NACK,
/// re-await the same seat" — the action handler itself never sends
/// messages, it only returns this for the caller to react to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("it is not this seat's turn to act")]
    NotYourTurn,
    #[error("seat is not active")]
    SeatNotActive,
    #[error("check requires no outstanding call")]
    InvalidCheck,
    #[error("call requires an outstanding bet to match")]
    InvalidCall,
    #[error("raise must exceed the current highest bet")]
    InvalidRaise,
    #[error("insufficient chips to cover this raise")]
    InsufficientChips,
}

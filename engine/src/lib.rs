//! Pure game logic for a six-seat Texas Hold'em table: card representation,
//! hand evaluation, deck shuffling, and the table state machine that the
//! `server` crate drives over TCP. Nothing in this crate touches a socket or
//! a clock; the only non-stdlib runtime dependency is `tokio`'s `mpsc`
//! channel type used as the seat's outbound message queue.

pub mod card;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod messages;
pub mod seat;
pub mod table;

pub use card::Card;
pub use deck::Deck;
pub use error::ActionError;
pub use evaluator::{evaluate7, EvalError, HandCategory, HandValue};
pub use messages::{ActionKind, EndPayload, InfoPayload, OutgoingMessage};
pub use seat::{Seat, SeatStatus, NUM_SEATS};
pub use table::{Stage, StreetStatus, Table};

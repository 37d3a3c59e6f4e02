//! TCP transport, wire framing, and the Hand Driver wiring that drives
//! `holdem_engine::Table` against six real sockets.

pub mod driver;
pub mod wire;

//! The Hand Driver: owns the six seat connections and the `Table` state,
//! and sequences hands end to end. Runs entirely on one task — there is no
//! parallel mutation of `Table`, matching the single-control-thread model
//! the reference implementation uses.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use holdem_engine::table::StreetStatus;
use holdem_engine::{Deck, OutgoingMessage, Seat, SeatStatus, Table, NUM_SEATS};

use crate::wire::{encode_server_frame, ClientFrame, CLIENT_FRAME_SIZE};

pub const BASE_PORT: u16 = 2201;
pub const STARTING_STACK: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// A seat's read half plus the writer task's join handle. The write half
/// lives inside the spawned writer task, fed by the seat's outbound channel.
struct Connection {
    reader: Option<OwnedReadHalf>,
}

fn spawn_writer(mut write_half: OwnedWriteHalf) -> mpsc::UnboundedSender<OutgoingMessage> {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutgoingMessage>();
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let frame = encode_server_frame(&message);
            if write_half.write_all(&frame).await.is_err() {
                break;
            }
        }
    });
    tx
}

/// Reads exactly one fixed-size client frame, treating a short read or I/O
/// error as a disconnect (never as a distinct wire-level error).
async fn recv_client_frame(reader: &mut OwnedReadHalf) -> Option<ClientFrame> {
    let mut buf = [0u8; CLIENT_FRAME_SIZE];
    if reader.read_exact(&mut buf).await.is_err() {
        return None;
    }
    ClientFrame::decode(&buf).ok()
}

/// Binds the six seat ports and waits for a valid JOIN on each, multiplexing
/// over whichever seats are still unfilled so no single slow seat starves
/// the others.
async fn accept_all_seats(table: &mut Table, base_port: u16) -> Result<[Connection; NUM_SEATS], ServerError> {
    const _: () = assert!(NUM_SEATS == 6, "accept_all_seats hardcodes one select! branch per seat");
    let mut listeners = Vec::with_capacity(NUM_SEATS);
    for i in 0..NUM_SEATS {
        let port = base_port + i as u16;
        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .map_err(|source| ServerError::Bind { port, source })?;
        listeners.push(listener);
        info!(port, "listening for seat join");
    }

    let mut connections: [Connection; NUM_SEATS] = std::array::from_fn(|_| Connection { reader: None });
    let mut filled = 0usize;

    while filled < NUM_SEATS {
        let result = tokio::select! {
            r = listeners[0].accept(), if connections[0].reader.is_none() => (0usize, r),
            r = listeners[1].accept(), if connections[1].reader.is_none() => (1usize, r),
            r = listeners[2].accept(), if connections[2].reader.is_none() => (2usize, r),
            r = listeners[3].accept(), if connections[3].reader.is_none() => (3usize, r),
            r = listeners[4].accept(), if connections[4].reader.is_none() => (4usize, r),
            r = listeners[5].accept(), if connections[5].reader.is_none() => (5usize, r),
        };
        let (seat_id, accepted) = result;
        let Ok((stream, _addr)) = accepted else { continue };
        let (mut read_half, write_half) = stream.into_split();
        match recv_client_frame(&mut read_half).await {
            Some(ClientFrame::Join) => {
                let outbound = spawn_writer(write_half);
                table.seats[seat_id] = Seat::bind(STARTING_STACK, outbound);
                connections[seat_id] = Connection { reader: Some(read_half) };
                filled += 1;
                info!(seat_id, port = base_port + seat_id as u16, "seat joined");
            }
            _ => {
                warn!(seat_id, "first packet was not JOIN, dropping connection");
            }
        }
    }

    Ok(connections)
}

async fn broadcast_info(table: &mut Table) {
    for seat_id in 0..NUM_SEATS as u8 {
        if table.seats[seat_id as usize].status == SeatStatus::Left {
            continue;
        }
        let info = table.build_info(seat_id);
        table.seats[seat_id as usize].send(OutgoingMessage::Info(info));
    }
}

async fn broadcast_end(table: &mut Table, winner: u8) {
    for seat_id in 0..NUM_SEATS {
        if table.seats[seat_id].status == SeatStatus::Left {
            continue;
        }
        let end = table.build_end(winner);
        table.seats[seat_id].send(OutgoingMessage::End(end));
    }
}

async fn broadcast_halt(table: &mut Table) {
    for seat in &mut table.seats {
        if seat.status != SeatStatus::Left {
            seat.send(OutgoingMessage::Halt);
        }
    }
}

/// Sequences COLLECTING_READY for one hand: awaits each non-LEFT seat's
/// socket in turn, never multiplexing, matching the reference
/// implementation's sequential ready phase.
#[allow(clippy::needless_range_loop)] // indexes both `table.seats` and `connections` in lockstep
async fn collecting_ready(table: &mut Table, connections: &mut [Connection; NUM_SEATS]) {
    for seat_id in 0..NUM_SEATS {
        if table.seats[seat_id].status == SeatStatus::Left {
            continue;
        }
        let Some(reader) = connections[seat_id].reader.as_mut() else {
            table.seats[seat_id].status = SeatStatus::Left;
            continue;
        };
        match recv_client_frame(reader).await {
            Some(ClientFrame::Ready) => {
                table.seats[seat_id].status = SeatStatus::Active;
            }
            Some(ClientFrame::Leave) | None => {
                table.seats[seat_id].status = SeatStatus::Left;
                connections[seat_id].reader = None;
            }
            Some(_) => {
                table.seats[seat_id].status = SeatStatus::Left;
                connections[seat_id].reader = None;
            }
        }
    }
}

async fn betting_street(table: &mut Table, connections: &mut [Connection; NUM_SEATS]) -> StreetStatus {
    loop {
        match table.street_status() {
            StreetStatus::Continue => {}
            done => return done,
        }

        let seat_id = table.current_seat as usize;
        let Some(reader) = connections[seat_id].reader.as_mut() else {
            table.fold_current_on_disconnect();
            broadcast_info(table).await;
            continue;
        };

        match recv_client_frame(reader).await {
            None => {
                table.fold_current_on_disconnect();
                connections[seat_id].reader = None;
                broadcast_info(table).await;
            }
            Some(ClientFrame::Leave) => {
                table.leave_current();
                connections[seat_id].reader = None;
                broadcast_info(table).await;
            }
            Some(frame) => match frame.action_kind() {
                Some(kind) => match table.apply_action(seat_id as u8, kind) {
                    Ok(()) => {
                        table.seats[seat_id].send(OutgoingMessage::Ack);
                        broadcast_info(table).await;
                    }
                    Err(_) => {
                        table.seats[seat_id].send(OutgoingMessage::Nack);
                    }
                },
                None => {
                    table.seats[seat_id].send(OutgoingMessage::Nack);
                }
            },
        }
    }
}

/// Runs the table forever: binds all six seats, then plays hands until
/// COLLECTING_READY finds fewer than two ACTIVE seats.
pub async fn run(seed: u64) -> Result<(), ServerError> {
    run_on(seed, BASE_PORT).await
}

/// Same as [`run`] but against an explicit base port, so tests can bind to
/// an ephemeral range instead of the production ports.
pub async fn run_on(seed: u64, base_port: u16) -> Result<(), ServerError> {
    let mut table = Table::new();
    let mut connections = accept_all_seats(&mut table, base_port).await?;
    info!("all six seats joined, starting table");

    let mut deck = Deck::shuffled(seed);

    loop {
        collecting_ready(&mut table, &mut connections).await;

        if table.active_count() < 2 {
            info!("fewer than two active seats, halting table");
            broadcast_halt(&mut table).await;
            return Ok(());
        }

        table.start_hand(&mut deck);
        info!(dealer = table.dealer_seat, "hand started");
        broadcast_info(&mut table).await;

        let winner = loop {
            match betting_street(&mut table, &mut connections).await {
                StreetStatus::StreetDone => {
                    if table.stage == holdem_engine::table::Stage::River {
                        break table.run_showdown();
                    }
                    table.advance_street(&mut deck);
                    broadcast_info(&mut table).await;
                }
                StreetStatus::HandOverEarly => {
                    break table.run_showdown();
                }
                StreetStatus::Continue => unreachable!("betting_street only returns on completion"),
            }
        };

        info!(winner, pot = table.pot_size, "hand complete");
        broadcast_end(&mut table, winner).await;
    }
}

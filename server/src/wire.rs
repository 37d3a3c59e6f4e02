//! Fixed-size binary wire records. Every frame this crate sends or receives
//! is a single plain byte array — there is no variable-length or
//! self-describing encoding, matching the fixed-size binary record contract
//! of the system this adapter fronts. Multi-byte integers are little-endian.

use holdem_engine::{ActionKind, Card, EndPayload, InfoPayload, OutgoingMessage};

pub const CLIENT_FRAME_SIZE: usize = 5;
pub const SERVER_FRAME_SIZE: usize = 1 + 5 + 24 + 24 + 6 + 4 + 4 + 1 + 1 + 2 + 12 + 6 + 4 + 1 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFrame {
    Join,
    Ready,
    Leave,
    Check,
    Call,
    Raise(u32),
    Fold,
}

#[derive(Debug)]
pub struct BadFrame;

impl ClientFrame {
    pub fn decode(buf: &[u8; CLIENT_FRAME_SIZE]) -> Result<Self, BadFrame> {
        let amount = u32::from_le_bytes(buf[1..5].try_into().unwrap());
        match buf[0] {
            0 => Ok(ClientFrame::Join),
            1 => Ok(ClientFrame::Ready),
            2 => Ok(ClientFrame::Leave),
            3 => Ok(ClientFrame::Check),
            4 => Ok(ClientFrame::Call),
            5 => Ok(ClientFrame::Raise(amount)),
            6 => Ok(ClientFrame::Fold),
            _ => Err(BadFrame),
        }
    }

    pub fn action_kind(self) -> Option<ActionKind> {
        match self {
            ClientFrame::Check => Some(ActionKind::Check),
            ClientFrame::Call => Some(ActionKind::Call),
            ClientFrame::Raise(amount) => Some(ActionKind::Raise(amount)),
            ClientFrame::Fold => Some(ActionKind::Fold),
            ClientFrame::Join | ClientFrame::Ready | ClientFrame::Leave => None,
        }
    }
}

#[cfg(test)]
impl ClientFrame {
    pub fn encode(self) -> [u8; CLIENT_FRAME_SIZE] {
        let mut buf = [0u8; CLIENT_FRAME_SIZE];
        let (tag, amount) = match self {
            ClientFrame::Join => (0, 0),
            ClientFrame::Ready => (1, 0),
            ClientFrame::Leave => (2, 0),
            ClientFrame::Check => (3, 0),
            ClientFrame::Call => (4, 0),
            ClientFrame::Raise(amount) => (5, amount),
            ClientFrame::Fold => (6, 0),
        };
        buf[0] = tag;
        buf[1..5].copy_from_slice(&amount.to_le_bytes());
        buf
    }
}

fn put_cards(buf: &mut Vec<u8>, cards: &[Card]) {
    for card in cards {
        buf.push(card.raw());
    }
}

fn put_u32s(buf: &mut Vec<u8>, values: &[u32]) {
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Encodes any outgoing message into the server's fixed-size frame, padding
/// unused tail bytes with zero — the same tagged-union shape the reference
/// implementation's `server_packet_t` uses, generalized to a Rust enum with
/// an explicit `encode`/`decode` pair instead of a raw union.
pub fn encode_server_frame(message: &OutgoingMessage) -> [u8; SERVER_FRAME_SIZE] {
    let mut buf = Vec::with_capacity(SERVER_FRAME_SIZE);
    match message {
        OutgoingMessage::Ack => buf.push(0),
        OutgoingMessage::Nack => buf.push(1),
        OutgoingMessage::Info(info) => {
            buf.push(2);
            encode_info(&mut buf, info);
        }
        OutgoingMessage::End(end) => {
            buf.push(3);
            encode_end(&mut buf, end);
        }
        OutgoingMessage::Halt => buf.push(4),
    }
    buf.resize(SERVER_FRAME_SIZE, 0);
    buf.try_into().expect("frame padded to fixed size")
}

fn encode_info(buf: &mut Vec<u8>, info: &InfoPayload) {
    put_cards(buf, &info.community_cards);
    put_u32s(buf, &info.stacks);
    put_u32s(buf, &info.bets);
    buf.extend_from_slice(&info.statuses);
    put_u32s(buf, &[info.pot_size, info.highest_bet]);
    buf.push(info.dealer_seat);
    buf.push(info.current_seat);
    put_cards(buf, &info.hole_cards);
}

fn encode_end(buf: &mut Vec<u8>, end: &EndPayload) {
    put_cards(buf, &end.community_cards);
    put_u32s(buf, &end.stacks);
    for pair in &end.hole_cards {
        put_cards(buf, pair);
    }
    buf.extend_from_slice(&end.statuses);
    put_u32s(buf, &[end.pot_size]);
    buf.push(end.dealer_seat);
    buf.push(end.winner_seat);
}

#[cfg(test)]
fn decode_cards<const N: usize>(buf: &[u8], offset: &mut usize) -> [Card; N] {
    let mut out = [Card::NOCARD; N];
    for slot in &mut out {
        *slot = Card::from_raw(buf[*offset]);
        *offset += 1;
    }
    out
}

#[cfg(test)]
fn decode_u32s<const N: usize>(buf: &[u8], offset: &mut usize) -> [u32; N] {
    let mut out = [0u32; N];
    for slot in &mut out {
        *slot = u32::from_le_bytes(buf[*offset..*offset + 4].try_into().unwrap());
        *offset += 4;
    }
    out
}

/// Test-only decoder for the server-bound frame, used to assert encode/decode
/// round-trips; production code only ever encodes these (the server never
/// parses its own outgoing frames).
#[cfg(test)]
pub fn decode_server_frame(buf: &[u8; SERVER_FRAME_SIZE]) -> OutgoingMessage {
    let mut offset = 1;
    match buf[0] {
        0 => OutgoingMessage::Ack,
        1 => OutgoingMessage::Nack,
        2 => {
            let community_cards = decode_cards::<5>(buf, &mut offset);
            let stacks = decode_u32s::<6>(buf, &mut offset);
            let bets = decode_u32s::<6>(buf, &mut offset);
            let statuses: [u8; 6] = buf[offset..offset + 6].try_into().unwrap();
            offset += 6;
            let [pot_size, highest_bet] = decode_u32s::<2>(buf, &mut offset);
            let dealer_seat = buf[offset];
            offset += 1;
            let current_seat = buf[offset];
            offset += 1;
            let hole_cards = decode_cards::<2>(buf, &mut offset);
            OutgoingMessage::Info(InfoPayload {
                community_cards,
                stacks,
                bets,
                statuses,
                pot_size,
                highest_bet,
                dealer_seat,
                current_seat,
                hole_cards,
            })
        }
        3 => {
            let community_cards = decode_cards::<5>(buf, &mut offset);
            let stacks = decode_u32s::<6>(buf, &mut offset);
            let mut hole_cards = [[Card::NOCARD; 2]; 6];
            for pair in &mut hole_cards {
                *pair = decode_cards::<2>(buf, &mut offset);
            }
            let statuses: [u8; 6] = buf[offset..offset + 6].try_into().unwrap();
            offset += 6;
            let [pot_size] = decode_u32s::<1>(buf, &mut offset);
            let dealer_seat = buf[offset];
            offset += 1;
            let winner_seat = buf[offset];
            OutgoingMessage::End(EndPayload {
                community_cards,
                stacks,
                hole_cards,
                statuses,
                pot_size,
                dealer_seat,
                winner_seat,
            })
        }
        4 => OutgoingMessage::Halt,
        other => panic!("unknown server frame discriminator {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ClientFrame::Join)]
    #[case(ClientFrame::Ready)]
    #[case(ClientFrame::Leave)]
    #[case(ClientFrame::Check)]
    #[case(ClientFrame::Call)]
    #[case(ClientFrame::Raise(42))]
    #[case(ClientFrame::Fold)]
    fn client_frame_round_trips(#[case] frame: ClientFrame) {
        let encoded = frame.encode();
        let decoded = ClientFrame::decode(&encoded).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn bad_discriminator_is_rejected() {
        let buf = [200, 0, 0, 0, 0];
        assert!(ClientFrame::decode(&buf).is_err());
    }

    #[test]
    fn info_frame_round_trips() {
        let info = InfoPayload {
            community_cards: [Card::new(0, 0), Card::new(1, 1), Card::NOCARD, Card::NOCARD, Card::NOCARD],
            stacks: [100, 90, 80, 70, 60, 50],
            bets: [0, 10, 0, 0, 0, 0],
            statuses: [1, 1, 0, 2, 1, 1],
            pot_size: 10,
            highest_bet: 10,
            dealer_seat: 3,
            current_seat: 4,
            hole_cards: [Card::new(12, 3), Card::new(11, 2)],
        };
        let msg = OutgoingMessage::Info(info);
        let encoded = encode_server_frame(&msg);
        let decoded = decode_server_frame(&encoded);
        match decoded {
            OutgoingMessage::Info(back) => {
                assert_eq!(back.stacks, [100, 90, 80, 70, 60, 50]);
                assert_eq!(back.dealer_seat, 3);
                assert_eq!(back.current_seat, 4);
            }
            other => panic!("expected Info, got {other:?}"),
        }
    }

    #[test]
    fn end_frame_round_trips() {
        let end = EndPayload {
            community_cards: [Card::new(5, 0); 5],
            stacks: [100, 0, 0, 0, 0, 0],
            hole_cards: [[Card::new(1, 1), Card::new(2, 2)]; 6],
            statuses: [1, 0, 0, 0, 0, 0],
            pot_size: 0,
            dealer_seat: 1,
            winner_seat: 0,
        };
        let msg = OutgoingMessage::End(end);
        let encoded = encode_server_frame(&msg);
        let decoded = decode_server_frame(&encoded);
        match decoded {
            OutgoingMessage::End(back) => {
                assert_eq!(back.winner_seat, 0);
                assert_eq!(back.stacks[0], 100);
            }
            other => panic!("expected End, got {other:?}"),
        }
    }
}

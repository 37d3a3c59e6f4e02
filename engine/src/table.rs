use crate::card::Card;
use crate::deck::Deck;
use crate::error::ActionError;
use crate::evaluator::evaluate7;
use crate::messages::{ActionKind, EndPayload, InfoPayload};
use crate::seat::{Seat, SeatStatus, NOT_ACTED, NUM_SEATS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Result of the street-completion predicate (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetStatus {
    Continue,
    StreetDone,
    HandOverEarly,
}

/// The authoritative, single-writer table state. Owned exclusively by the
/// Hand Driver; nothing else mutates it, so no locking is required.
pub struct Table {
    pub seats: [Seat; NUM_SEATS],
    pub community_cards: [Card; 5],
    pub pot_size: u32,
    pub highest_bet: u32,
    pub dealer_seat: u8,
    pub current_seat: u8,
    pub stage: Stage,
    hand_started: bool,
}

impl Table {
    pub fn new() -> Self {
        Table {
            seats: std::array::from_fn(|_| Seat::empty()),
            community_cards: [Card::NOCARD; 5],
            pot_size: 0,
            highest_bet: 0,
            dealer_seat: 0,
            current_seat: 0,
            stage: Stage::Init,
            hand_started: false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status == SeatStatus::Active)
            .count()
    }

    pub fn non_left_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status != SeatStatus::Left)
            .count()
    }

    /// Finds the first seat, walking clockwise starting one seat after
    /// `from`, whose status is ACTIVE. Returns `from` unchanged if none
    /// exists (the caller is expected to check `active_count()` first).
    fn first_active_clockwise_of(&self, from: u8) -> u8 {
        for offset in 1..=NUM_SEATS {
            let candidate = (from as usize + offset) % NUM_SEATS;
            if self.seats[candidate].status == SeatStatus::Active {
                return candidate as u8;
            }
        }
        from
    }

    fn first_non_left_clockwise_of(&self, from: u8) -> u8 {
        for offset in 1..=NUM_SEATS {
            let candidate = (from as usize + offset) % NUM_SEATS;
            if self.seats[candidate].status != SeatStatus::Left {
                return candidate as u8;
            }
        }
        from
    }

    /// DEALING: reshuffle the deck, reset per-hand state, rotate the
    /// dealer, deal hole cards, and set the first seat to act.
    pub fn start_hand(&mut self, deck: &mut Deck) {
        deck.reshuffle();
        self.community_cards = [Card::NOCARD; 5];
        self.pot_size = 0;
        self.highest_bet = 0;
        for seat in &mut self.seats {
            if seat.status == SeatStatus::Active {
                seat.current_bet = NOT_ACTED;
                seat.hole_cards = [Card::NOCARD; 2];
            }
        }

        if self.hand_started {
            self.dealer_seat = self.first_non_left_clockwise_of(self.dealer_seat);
        }
        self.hand_started = true;

        for offset in 1..=NUM_SEATS {
            let seat_id = (self.dealer_seat as usize + offset) % NUM_SEATS;
            if self.seats[seat_id].status == SeatStatus::Active {
                self.seats[seat_id].hole_cards = [deck.deal(), deck.deal()];
            }
        }

        self.current_seat = self.first_active_clockwise_of(self.dealer_seat);
        self.stage = Stage::Preflop;
    }

    /// Applies one validated player action (§4.2). On success, advances
    /// `current_seat`. Does not send any messages itself.
    pub fn apply_action(&mut self, seat_id: u8, action: ActionKind) -> Result<(), ActionError> {
        if seat_id != self.current_seat {
            return Err(ActionError::NotYourTurn);
        }
        let idx = seat_id as usize;
        if self.seats[idx].status != SeatStatus::Active {
            return Err(ActionError::SeatNotActive);
        }

        let current_bet_nonneg = self.seats[idx].current_bet_as_nonneg();
        let call_amount = self.highest_bet.saturating_sub(current_bet_nonneg);

        match action {
            ActionKind::Check => {
                if call_amount != 0 {
                    return Err(ActionError::InvalidCheck);
                }
                if self.seats[idx].current_bet == NOT_ACTED {
                    self.seats[idx].current_bet = 0;
                }
            }
            ActionKind::Call => {
                if call_amount == 0 {
                    return Err(ActionError::InvalidCall);
                }
                let seat = &mut self.seats[idx];
                if seat.stack <= call_amount {
                    self.pot_size += seat.stack;
                    seat.current_bet += seat.stack as i32;
                    seat.stack = 0;
                    seat.status = SeatStatus::AllIn;
                } else {
                    seat.stack -= call_amount;
                    seat.current_bet += call_amount as i32;
                    self.pot_size += call_amount;
                }
            }
            ActionKind::Raise(amount) => {
                if amount <= self.highest_bet || amount <= current_bet_nonneg {
                    return Err(ActionError::InvalidRaise);
                }
                let diff = amount - current_bet_nonneg;
                if self.seats[idx].stack < diff {
                    return Err(ActionError::InsufficientChips);
                }
                self.seats[idx].stack -= diff;
                self.seats[idx].current_bet = amount as i32;
                self.highest_bet = amount;
                self.pot_size += diff;
                for (i, seat) in self.seats.iter_mut().enumerate() {
                    if i != idx && seat.status == SeatStatus::Active {
                        seat.current_bet = NOT_ACTED;
                    }
                }
            }
            ActionKind::Fold => {
                self.seats[idx].status = SeatStatus::Folded;
                self.seats[idx].current_bet = 0;
            }
        }

        // A seat left ACTIVE or ALLIN after its own action is pinned to the
        // current high so the `-1` sentinel disappears the instant it acts
        // and is caught up.
        if matches!(
            self.seats[idx].status,
            SeatStatus::Active | SeatStatus::AllIn
        ) {
            self.seats[idx].current_bet = self.highest_bet as i32;
        }

        self.advance_turn();
        Ok(())
    }

    fn advance_turn(&mut self) {
        for offset in 1..=NUM_SEATS {
            let candidate = (self.current_seat as usize + offset) % NUM_SEATS;
            if self.seats[candidate].status == SeatStatus::Active {
                self.current_seat = candidate as u8;
                return;
            }
        }
        // No other ACTIVE seat: leave current_seat unchanged. The next
        // street-completion check will return HandOverEarly.
    }

    /// Marks the current seat FOLDED after a disconnect and advances the
    /// turn (§4.3 BETTING, disconnect branch).
    pub fn fold_current_on_disconnect(&mut self) {
        let idx = self.current_seat as usize;
        self.seats[idx].status = SeatStatus::Folded;
        self.seats[idx].current_bet = 0;
        self.advance_turn();
    }

    /// Marks the current seat LEFT after a LEAVE packet and advances the
    /// turn (§4.3 BETTING, LEAVE branch).
    pub fn leave_current(&mut self) {
        let idx = self.current_seat as usize;
        self.seats[idx].status = SeatStatus::Left;
        self.seats[idx].outbound = None;
        self.advance_turn();
    }

    /// §4.4: the street-completion predicate.
    pub fn street_status(&self) -> StreetStatus {
        let contenders: Vec<&Seat> = self
            .seats
            .iter()
            .filter(|s| matches!(s.status, SeatStatus::Active | SeatStatus::AllIn))
            .collect();

        if contenders.len() <= 1 {
            return StreetStatus::HandOverEarly;
        }

        let all_matched = self
            .seats
            .iter()
            .filter(|s| s.status == SeatStatus::Active)
            .all(|s| s.current_bet != NOT_ACTED && s.current_bet_as_nonneg() == self.highest_bet);

        if all_matched {
            StreetStatus::StreetDone
        } else {
            StreetStatus::Continue
        }
    }

    /// TRANSITION: reveal community cards for the next street, reset bets,
    /// and set the first seat to act. No-op (besides the stage bump) once
    /// already at River — the caller is expected to route to SHOWDOWN
    /// instead of calling this again.
    pub fn advance_street(&mut self, deck: &mut Deck) {
        match self.stage {
            Stage::Preflop => {
                for slot in &mut self.community_cards[0..3] {
                    *slot = deck.deal();
                }
                self.stage = Stage::Flop;
            }
            Stage::Flop => {
                self.community_cards[3] = deck.deal();
                self.stage = Stage::Turn;
            }
            Stage::Turn => {
                self.community_cards[4] = deck.deal();
                self.stage = Stage::River;
            }
            Stage::River | Stage::Init | Stage::Showdown => {
                self.stage = Stage::Showdown;
                return;
            }
        }

        for seat in &mut self.seats {
            if seat.status == SeatStatus::Active {
                seat.current_bet = NOT_ACTED;
            }
        }
        self.highest_bet = 0;
        self.current_seat = self.first_active_clockwise_of(self.dealer_seat);
    }

    /// SHOWDOWN: evaluates every ACTIVE/ALLIN seat's best seven cards and
    /// awards the pot to the highest value, lowest seat_id breaking ties
    /// (§9 — strictly-greater comparison, no split pots).
    ///
    /// When a single contender remains (everyone else folded before the
    /// board was fully revealed), the pot goes straight to that seat without
    /// calling the evaluator — the board may still have `NOCARD` slots at
    /// that point, which `evaluate7` treats as fewer than five real cards.
    pub fn run_showdown(&mut self) -> u8 {
        self.stage = Stage::Showdown;
        let contenders: Vec<u8> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s.status, SeatStatus::Active | SeatStatus::AllIn))
            .map(|(i, _)| i as u8)
            .collect();

        let winner = if let [only] = contenders[..] {
            only
        } else {
            let mut best_seat = None;
            let mut best_value = None;
            for &i in &contenders {
                let seat = &self.seats[i as usize];
                let seven = [
                    seat.hole_cards[0],
                    seat.hole_cards[1],
                    self.community_cards[0],
                    self.community_cards[1],
                    self.community_cards[2],
                    self.community_cards[3],
                    self.community_cards[4],
                ];
                let value = evaluate7(&seven).expect("full board by river showdown");
                if best_value.is_none_or(|best| value > best) {
                    best_value = Some(value);
                    best_seat = Some(i);
                }
            }
            best_seat.expect("showdown requires at least one contender")
        };

        self.seats[winner as usize].stack += self.pot_size;
        self.pot_size = 0;
        winner
    }

    pub fn build_info(&self, viewer: u8) -> InfoPayload {
        let mut stacks = [0u32; NUM_SEATS];
        let mut bets = [0u32; NUM_SEATS];
        let mut statuses = [2u8; NUM_SEATS];
        for (i, seat) in self.seats.iter().enumerate() {
            stacks[i] = seat.stack;
            bets[i] = seat.current_bet_as_nonneg();
            statuses[i] = match seat.status {
                SeatStatus::Folded => 0,
                SeatStatus::Active => 1,
                SeatStatus::AllIn | SeatStatus::Left => 2,
            };
        }
        InfoPayload {
            community_cards: self.community_cards,
            stacks,
            bets,
            statuses,
            pot_size: self.pot_size,
            highest_bet: self.highest_bet,
            dealer_seat: self.dealer_seat,
            current_seat: self.current_seat,
            hole_cards: self.seats[viewer as usize].hole_cards,
        }
    }

    pub fn build_end(&self, winner_seat: u8) -> EndPayload {
        let mut stacks = [0u32; NUM_SEATS];
        let mut hole_cards = [[Card::NOCARD; 2]; NUM_SEATS];
        let mut statuses = [2u8; NUM_SEATS];
        for (i, seat) in self.seats.iter().enumerate() {
            stacks[i] = seat.stack;
            hole_cards[i] = seat.hole_cards;
            statuses[i] = match seat.status {
                SeatStatus::Folded => 0,
                SeatStatus::Active => 1,
                SeatStatus::AllIn | SeatStatus::Left => 2,
            };
        }
        EndPayload {
            community_cards: self.community_cards,
            stacks,
            hole_cards,
            statuses,
            pot_size: self.pot_size,
            dealer_seat: self.dealer_seat,
            winner_seat,
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

use std::borrow::BorrowMut;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{card_code, Card};
use crate::deck::Deck;
use crate::errors::{EngineError, Result};
use crate::events::{EventSink, NullSink, SessionEvent};
use crate::game::{GameVariant, HandOutcome, PaytableRow};
use crate::hand::{Hand, CARDS_PER_HAND};
use crate::ledger::Ledger;
use crate::logger::{RoundLogger, RoundRecord};
use crate::pacing::{NoPacing, RevealPacer};
use crate::rules::{validate_hand_count, Bet};

/// Index of the hand the player holds cards in.
pub const PRIMARY_HAND: usize = 0;

const FULL_DECK: usize = 52;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cards are committed to the player; the next `deal_draw` deals.
    Idle,
    /// The primary hand is dealt and holds may change; the next `deal_draw` draws.
    AwaitingDraw,
}

/// Final state of one hand after the draw.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand: usize,
    pub cards: [Card; CARDS_PER_HAND],
    pub held: [bool; CARDS_PER_HAND],
    pub outcome: HandOutcome,
}

/// Everything a settled round produced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based count of rounds settled by this session
    pub round: u64,
    pub bet: Bet,
    pub hands: Vec<HandResult>,
    pub total_payout: u32,
    /// Ledger balance once every hand was paid
    pub balance: u32,
}

/// Result of a `deal_draw` call.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DealOutcome {
    /// Cards were dealt to the primary hand and the session awaits the draw.
    Dealt,
    /// The ledger couldn't cover `bet × hands`; nothing changed.
    Declined { required: u32, available: u32 },
    /// The draw completed and every hand was paid.
    Settled(RoundSummary),
}

#[derive(Debug, Clone)]
struct Seat {
    deck: Deck,
    hand: Hand,
}

/// Configures and builds a [`Session`].
///
/// # Examples
///
/// ```
/// use vidpoker_engine::engine::{DealOutcome, SessionBuilder};
/// use vidpoker_engine::game::GameVariant;
/// use vidpoker_engine::ledger::Ledger;
///
/// let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
///     .hands(3)
///     .seed(7)
///     .build(Ledger::with_balance(100))
///     .unwrap();
///
/// assert_eq!(session.deal_draw().unwrap(), DealOutcome::Dealt);
/// session.hold(0, true).unwrap();
/// assert!(matches!(session.deal_draw().unwrap(), DealOutcome::Settled(_)));
/// ```
pub struct SessionBuilder {
    variant: GameVariant,
    hands: usize,
    bet: Bet,
    seed: Option<u64>,
    sink: Box<dyn EventSink + Send>,
    pacer: Box<dyn RevealPacer + Send>,
    history: Option<RoundLogger>,
}

impl SessionBuilder {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            hands: 1,
            bet: Bet::MIN,
            seed: None,
            sink: Box::new(NullSink),
            pacer: Box::new(NoPacing),
            history: None,
        }
    }

    /// Number of simultaneous hands, primary included.
    pub fn hands(mut self, hands: usize) -> Self {
        self.hands = hands;
        self
    }

    pub fn bet(mut self, bet: Bet) -> Self {
        self.bet = bet;
        self
    }

    /// Seeds every deck deterministically. Without a seed each deck draws its
    /// own from the thread RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sink(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn pacer(mut self, pacer: impl RevealPacer + Send + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn history(mut self, logger: RoundLogger) -> Self {
        self.history = Some(logger);
        self
    }

    pub fn build<L: BorrowMut<Ledger>>(self, ledger: L) -> Result<Session<L>> {
        let hands = validate_hand_count(self.hands)?;
        let seats = (0..hands)
            .map(|i| Seat {
                deck: match self.seed {
                    Some(seed) => Deck::new_with_seed(seed.wrapping_add(i as u64)),
                    None => Deck::new(),
                },
                hand: Hand::new(),
            })
            .collect();
        tracing::debug!(
            variant = %self.variant,
            hands,
            bet = self.bet.credits(),
            seeded = self.seed.is_some(),
            "session created"
        );
        Ok(Session {
            variant: self.variant,
            seats,
            ledger,
            bet: self.bet,
            round_bet: self.bet,
            in_progress: false,
            seed: self.seed,
            rounds_played: 0,
            last_round: None,
            sink: self.sink,
            pacer: self.pacer,
            history: self.history,
        })
    }
}

/// The deal/hold/draw/settle state machine for one primary hand and any
/// number of secondary hands that copy its holds.
///
/// Each hand owns its deck. Holding a primary card pulls that card out of
/// every secondary deck and shows it in the same slot of every secondary hand;
/// releasing it puts it back. Secondary decks are shuffled right before they
/// draw, after all hold changes for the round.
///
/// Not reentrant: callers serialize every command on a session.
pub struct Session<L = Ledger> {
    variant: GameVariant,
    seats: Vec<Seat>,
    ledger: L,
    /// bet for the next deal
    bet: Bet,
    /// bet paid for the round in progress
    round_bet: Bet,
    in_progress: bool,
    seed: Option<u64>,
    rounds_played: u64,
    last_round: Option<RoundSummary>,
    sink: Box<dyn EventSink + Send>,
    pacer: Box<dyn RevealPacer + Send>,
    history: Option<RoundLogger>,
}

impl<L> fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("variant", &self.variant)
            .field("hands", &self.seats.len())
            .field("bet", &self.bet)
            .field("in_progress", &self.in_progress)
            .field("rounds_played", &self.rounds_played)
            .finish_non_exhaustive()
    }
}

impl<L: BorrowMut<Ledger>> Session<L> {
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn paytable(&self) -> &'static [PaytableRow] {
        self.variant.paytable()
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    pub fn hand_count(&self) -> usize {
        self.seats.len()
    }

    pub fn hand(&self, index: usize) -> Result<&Hand> {
        self.seats
            .get(index)
            .map(|s| &s.hand)
            .ok_or(EngineError::NoSuchHand { index })
    }

    pub fn deck(&self, index: usize) -> Result<&Deck> {
        self.seats
            .get(index)
            .map(|s| &s.deck)
            .ok_or(EngineError::NoSuchHand { index })
    }

    pub fn state(&self) -> SessionState {
        if self.in_progress {
            SessionState::AwaitingDraw
        } else {
            SessionState::Idle
        }
    }

    pub fn is_awaiting_draw(&self) -> bool {
        self.in_progress
    }

    pub fn balance(&self) -> u32 {
        self.ledger().balance()
    }

    pub fn ledger(&self) -> &Ledger {
        self.ledger.borrow()
    }

    fn ledger_mut(&mut self) -> &mut Ledger {
        self.ledger.borrow_mut()
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// Changes the bet for the next deal. A round already dealt settles at the
    /// bet it was paid for.
    pub fn set_bet(&mut self, credits: u8) -> Result<()> {
        self.bet = Bet::new(credits)?;
        self.emit(SessionEvent::BetChanged { bet: self.bet });
        Ok(())
    }

    pub fn cycle_bet(&mut self) {
        self.bet = self.bet.cycled();
        self.emit(SessionEvent::BetChanged { bet: self.bet });
    }

    pub fn bet_max(&mut self) {
        self.bet = Bet::MAX;
        self.emit(SessionEvent::BetChanged { bet: self.bet });
    }

    pub fn set_balance(&mut self, amount: u32) {
        self.ledger_mut().set_balance(amount);
        tracing::info!(balance = amount, "balance overridden");
        self.emit_balance();
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.ledger_mut().add(amount);
        self.emit_balance();
    }

    /// Deals when idle, draws and settles when awaiting the draw.
    pub fn deal_draw(&mut self) -> Result<DealOutcome> {
        if self.in_progress {
            self.draw()
        } else {
            self.deal()
        }
    }

    /// Sets the hold on a primary card and mirrors it into every secondary
    /// hand. Ignored unless a round is awaiting the draw.
    pub fn hold(&mut self, idx: usize, can_hold: bool) -> Result<()> {
        if !self.in_progress {
            tracing::debug!(slot = idx, "hold ignored: no hand in progress");
            return Ok(());
        }
        let primary = &mut self.seats[PRIMARY_HAND].hand;
        if primary.card_held(idx)? == can_hold {
            return Ok(());
        }
        let card = primary.card_at(idx)?.ok_or(EngineError::HandIncomplete)?;
        primary.hold_card(idx, can_hold)?;
        tracing::debug!(slot = idx, card = %card_code(&card), held = can_hold, "hold changed");
        self.emit(SessionEvent::HoldChanged {
            hand: PRIMARY_HAND,
            slot: idx,
            held: can_hold,
        });

        for hand in 1..self.seats.len() {
            let seat = &mut self.seats[hand];
            if can_hold {
                seat.deck.remove_card(&card);
                seat.hand.set_slot(idx, Some(card), true)?;
                self.pacer.pause(hand, idx);
                self.emit(SessionEvent::CardRevealed {
                    hand,
                    slot: idx,
                    card,
                });
            } else {
                seat.hand.set_slot(idx, None, false)?;
                seat.deck.add_card(card);
                self.emit(SessionEvent::SlotCleared { hand, slot: idx });
            }
            self.emit(SessionEvent::HoldChanged {
                hand,
                slot: idx,
                held: can_hold,
            });
        }
        debug_assert_eq!(self.verify_accounting(), Ok(()));
        Ok(())
    }

    pub fn toggle_hold(&mut self, idx: usize) -> Result<()> {
        if !self.in_progress {
            return Ok(());
        }
        let held = self.seats[PRIMARY_HAND].hand.card_held(idx)?;
        self.hold(idx, !held)
    }

    /// Checks that no card is both visible in a hand and still dealable from
    /// that hand's deck, and that no secondary deck can deal a card held in
    /// the primary hand. Secondary hands must also account for all 52 cards
    /// between what they show and what their deck can still deal.
    pub fn verify_accounting(&self) -> Result<()> {
        let primary_held: Vec<Card> = self.seats[PRIMARY_HAND]
            .hand
            .slots()
            .iter()
            .filter(|s| s.held)
            .filter_map(|s| s.card)
            .collect();
        for (hand, seat) in self.seats.iter().enumerate() {
            let mut seen = HashSet::with_capacity(FULL_DECK);
            let shown = seat.hand.to_vector().into_iter().flatten();
            for card in shown.chain(seat.deck.eligible()) {
                if !seen.insert(card) {
                    return Err(EngineError::DuplicateCard { card, hand });
                }
            }
            // primary discards stay drawn until the next deal
            if hand == PRIMARY_HAND {
                continue;
            }
            if seen.len() != FULL_DECK {
                return Err(EngineError::MissingCards {
                    hand,
                    accounted: seen.len(),
                });
            }
            if let Some(&card) = primary_held.iter().find(|c| seat.deck.eligible().any(|e| e == **c)) {
                return Err(EngineError::DuplicateCard { card, hand });
            }
        }
        Ok(())
    }

    fn deal(&mut self) -> Result<DealOutcome> {
        let cost = match self.funds_for_round() {
            Ok(cost) => cost,
            Err(declined) => return Ok(declined),
        };
        self.reset_seats();
        let deck = &mut self.seats[PRIMARY_HAND].deck;
        deck.shuffle();
        let mut cards = Vec::with_capacity(CARDS_PER_HAND);
        for _ in 0..CARDS_PER_HAND {
            cards.push(deck.draw_card()?);
        }
        self.commit_deal(cost, cards)
    }

    /// Deals `cards` to the primary hand in place of a random deal.
    #[cfg(any(test, feature = "test-util"))]
    pub(crate) fn deal_fixed(&mut self, cards: [Card; CARDS_PER_HAND]) -> Result<DealOutcome> {
        if self.in_progress {
            return self.draw();
        }
        let cost = match self.funds_for_round() {
            Ok(cost) => cost,
            Err(declined) => return Ok(declined),
        };
        self.reset_seats();
        for card in cards {
            self.seats[PRIMARY_HAND].deck.mark_drawn(card)?;
        }
        self.commit_deal(cost, cards.to_vec())
    }

    fn funds_for_round(&mut self) -> std::result::Result<u32, DealOutcome> {
        let required = self.bet.cost(self.seats.len());
        let available = self.balance();
        if available < required {
            tracing::warn!(required, available, "insufficient funds to play a game");
            self.emit(SessionEvent::InsufficientFunds {
                required,
                available,
            });
            return Err(DealOutcome::Declined {
                required,
                available,
            });
        }
        Ok(required)
    }

    /// Returns held cards to the secondary decks and empties every hand.
    fn reset_seats(&mut self) {
        for hand in 0..self.seats.len() {
            let seat = &mut self.seats[hand];
            if hand != PRIMARY_HAND {
                let held: Vec<Card> = seat
                    .hand
                    .slots()
                    .iter()
                    .filter(|s| s.held)
                    .filter_map(|s| s.card)
                    .collect();
                for card in held {
                    seat.deck.add_card(card);
                }
            }
            seat.deck.reset();
            seat.hand.reset();
            self.emit(SessionEvent::HandCleared { hand });
        }
    }

    fn commit_deal(&mut self, cost: u32, cards: Vec<Card>) -> Result<DealOutcome> {
        if !self.ledger_mut().withdraw(cost) {
            // funds_for_round checked the same balance
            let available = self.balance();
            return Ok(DealOutcome::Declined {
                required: cost,
                available,
            });
        }
        self.emit_balance();
        self.round_bet = self.bet;

        for (slot, card) in cards.into_iter().enumerate() {
            self.seats[PRIMARY_HAND].hand.add_card(card)?;
            self.pacer.pause(PRIMARY_HAND, slot);
            self.emit(SessionEvent::CardRevealed {
                hand: PRIMARY_HAND,
                slot,
                card,
            });
        }
        let dealt: Vec<String> = self.seats[PRIMARY_HAND]
            .hand
            .to_vector()
            .iter()
            .flatten()
            .map(card_code)
            .collect();
        tracing::debug!(cost, cards = ?dealt, "dealt primary hand");
        self.set_in_progress(true);
        Ok(DealOutcome::Dealt)
    }

    fn draw(&mut self) -> Result<DealOutcome> {
        // every replacement has to be available before anything moves
        for (hand, seat) in self.seats.iter().enumerate() {
            let needed = seat.hand.unheld().count();
            let remaining = seat.deck.remaining();
            if remaining < needed {
                tracing::error!(hand, needed, remaining, "deck cannot cover the draw");
                return Err(EngineError::DeckExhausted);
            }
        }

        let bet = self.round_bet;
        let mut total = 0u32;
        let mut results = Vec::with_capacity(self.seats.len());
        for hand in 0..self.seats.len() {
            if hand != PRIMARY_HAND {
                self.seats[hand].deck.shuffle();
            }
            let slots: Vec<usize> = self.seats[hand].hand.unheld().collect();
            if !slots.is_empty() {
                self.emit(SessionEvent::RedrawPending {
                    hand,
                    slots: slots.clone(),
                });
            }
            for slot in slots {
                let seat = &mut self.seats[hand];
                let card = seat.deck.draw_card()?;
                seat.hand.replace_card(slot, card)?;
                self.pacer.pause(hand, slot);
                self.emit(SessionEvent::CardRevealed { hand, slot, card });
            }

            let result = self.settle_hand(hand, bet)?;
            total = total.saturating_add(result.outcome.payout);
            self.emit(SessionEvent::RunningTotal { total });
            results.push(result);
        }
        self.set_in_progress(false);
        self.rounds_played += 1;

        let summary = RoundSummary {
            round: self.rounds_played,
            bet,
            hands: results,
            total_payout: total,
            balance: self.balance(),
        };
        tracing::info!(
            round = summary.round,
            hands = summary.hands.len(),
            bet = bet.credits(),
            total_payout = total,
            balance = summary.balance,
            "round settled"
        );
        self.record_history(&summary);
        debug_assert_eq!(self.verify_accounting(), Ok(()));
        self.last_round = Some(summary.clone());
        Ok(DealOutcome::Settled(summary))
    }

    fn settle_hand(&mut self, hand: usize, bet: Bet) -> Result<HandResult> {
        let final_hand = &self.seats[hand].hand;
        let cards = final_hand.to_cards()?;
        let held = final_hand.holds();
        let outcome = self.variant.score(&cards, bet);
        if outcome.payout > 0 {
            self.ledger_mut().add(outcome.payout);
        }
        tracing::debug!(
            hand,
            label = %outcome.label,
            payout = outcome.payout,
            "hand settled"
        );
        self.emit(SessionEvent::HandSettled {
            hand,
            label: outcome.label.clone(),
            payout: outcome.payout,
        });
        if outcome.payout > 0 {
            self.emit_balance();
        }
        Ok(HandResult {
            hand,
            cards,
            held,
            outcome,
        })
    }

    fn record_history(&mut self, summary: &RoundSummary) {
        let Some(logger) = self.history.as_mut() else {
            return;
        };
        let round_id = logger.next_id();
        let record = RoundRecord::from_summary(round_id, self.variant, self.seed, summary);
        if let Err(e) = logger.write(&record) {
            tracing::warn!(error = %e, round_id = %record.round_id, "failed to append round history");
        }
    }

    fn set_in_progress(&mut self, in_progress: bool) {
        self.in_progress = in_progress;
        self.emit(SessionEvent::InProgressChanged { in_progress });
    }

    fn emit_balance(&mut self) {
        let balance = self.balance();
        self.emit(SessionEvent::BalanceChanged { balance });
    }

    fn emit(&mut self, event: SessionEvent) {
        tracing::trace!(event = ?event, "session event");
        self.sink.publish(event);
    }
}

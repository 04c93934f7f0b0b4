//! Deals chosen cards instead of shuffled ones, for tests.
//!
//! The bet is still withdrawn through the ledger, so balances behave exactly
//! as in a random deal.

use std::borrow::BorrowMut;

use crate::cards::Card;
use crate::engine::{DealOutcome, Session};
use crate::errors::Result;
use crate::hand::CARDS_PER_HAND;
use crate::ledger::Ledger;

/// Deals `cards` to the primary hand with nothing held.
///
/// Behaves like `deal_draw` otherwise: it declines when funds are short and
/// draws when a round is already awaiting the draw.
pub fn deal<L: BorrowMut<Ledger>>(
    session: &mut Session<L>,
    cards: [Card; CARDS_PER_HAND],
) -> Result<DealOutcome> {
    session.deal_fixed(cards)
}

/// Deals `cards` and holds all of them, so the next draw settles exactly
/// this hand.
pub fn deal_held<L: BorrowMut<Ledger>>(
    session: &mut Session<L>,
    cards: [Card; CARDS_PER_HAND],
) -> Result<DealOutcome> {
    let outcome = session.deal_fixed(cards)?;
    if outcome == DealOutcome::Dealt {
        for slot in 0..CARDS_PER_HAND {
            session.hold(slot, true)?;
        }
    }
    Ok(outcome)
}

/// Parses five card codes such as `["Ah", "Kh", "Qh", "Jh", "Th"]`.
///
/// Panics on a malformed code; fixtures are written by hand.
pub fn hand(codes: [&str; CARDS_PER_HAND]) -> [Card; CARDS_PER_HAND] {
    codes.map(|code| match code.parse() {
        Ok(card) => card,
        Err(e) => panic!("bad fixture card {code:?}: {e}"),
    })
}

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{EngineError, Result};

/// Every video poker hand has five cards.
pub const CARDS_PER_HAND: usize = 5;

/// One position of a hand: the card shown there (if dealt) and whether the
/// player is keeping it through the draw.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub card: Option<Card>,
    pub held: bool,
}

/// Five card slots with independent hold flags.
///
/// A fresh or reset hand has every slot empty and nothing held. `add_card`
/// fills the next empty slot during the deal; afterwards only `replace_card`
/// and `hold_card` change it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    slots: [Slot; CARDS_PER_HAND],
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: [Card; CARDS_PER_HAND]) -> Self {
        let mut hand = Self::new();
        for (slot, card) in hand.slots.iter_mut().zip(cards) {
            slot.card = Some(card);
        }
        hand
    }

    pub fn add_card(&mut self, card: Card) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.card.is_none())
            .ok_or(EngineError::HandFull)?;
        slot.card = Some(card);
        Ok(())
    }

    pub fn hold_card(&mut self, idx: usize, hold: bool) -> Result<()> {
        if !self.is_complete() {
            return Err(EngineError::HandIncomplete);
        }
        self.slot_mut(idx)?.held = hold;
        Ok(())
    }

    pub fn card_held(&self, idx: usize) -> Result<bool> {
        Ok(self.slot(idx)?.held)
    }

    pub fn card_at(&self, idx: usize) -> Result<Option<Card>> {
        Ok(self.slot(idx)?.card)
    }

    /// Overwrites a slot whatever its hold flag says; callers skip held slots.
    pub fn replace_card(&mut self, idx: usize, card: Card) -> Result<()> {
        self.slot_mut(idx)?.card = Some(card);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.slots = [Slot::default(); CARDS_PER_HAND];
    }

    pub fn slots(&self) -> &[Slot; CARDS_PER_HAND] {
        &self.slots
    }

    /// Snapshot of the five slots in deal order.
    pub fn to_vector(&self) -> [Option<Card>; CARDS_PER_HAND] {
        self.slots.map(|s| s.card)
    }

    /// The five cards for ranking, or `HandIncomplete` if any slot is empty.
    pub fn to_cards(&self) -> Result<[Card; CARDS_PER_HAND]> {
        let cards = self
            .slots
            .iter()
            .map(|s| s.card.ok_or(EngineError::HandIncomplete))
            .collect::<Result<Vec<Card>>>()?;
        cards.try_into().map_err(|_| EngineError::HandIncomplete)
    }

    pub fn holds(&self) -> [bool; CARDS_PER_HAND] {
        self.slots.map(|s| s.held)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.card.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.card.is_none())
    }

    /// Indices of slots the draw will replace.
    pub fn unheld(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.held)
            .map(|(i, _)| i)
    }

    /// Writes a slot and its hold flag together. Secondary hands use this to
    /// mirror the primary hand before they are complete.
    pub(crate) fn set_slot(&mut self, idx: usize, card: Option<Card>, held: bool) -> Result<()> {
        *self.slot_mut(idx)? = Slot { card, held };
        Ok(())
    }

    fn slot(&self, idx: usize) -> Result<&Slot> {
        self.slots
            .get(idx)
            .ok_or(EngineError::IndexOutOfRange { index: idx })
    }

    fn slot_mut(&mut self, idx: usize) -> Result<&mut Slot> {
        self.slots
            .get_mut(idx)
            .ok_or(EngineError::IndexOutOfRange { index: idx })
    }
}

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::{EngineError, Result};

/// A pool of playing cards dealt without replacement.
///
/// The draw order comes from a ChaCha stream. A deck built with `new` reseeds
/// that stream from the thread RNG on every `shuffle`. A deck built with
/// `new_with_seed` keeps the one stream it was given, so a seeded session
/// replays the same rounds. This is fine for a recreational simulator; it is
/// not a certified gaming RNG.
///
/// `reset` only forgets which cards were drawn. Membership changes made with
/// `remove_card`/`add_card` survive it and are undone by whoever made them.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: HashSet<Card>,
    rng: ChaCha20Rng,
    /// false when every shuffle draws a fresh seed
    seeded: bool,
    needs_shuffle: bool,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            seeded: false,
            ..Self::new_with_seed(rand::random())
        }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            drawn: HashSet::with_capacity(52),
            rng,
            seeded: true,
            needs_shuffle: false,
        }
    }

    pub fn shuffle(&mut self) {
        if !self.seeded {
            self.rng = ChaCha20Rng::seed_from_u64(rand::random());
        }
        self.cards.shuffle(&mut self.rng);
        self.needs_shuffle = false;
    }

    /// Deals the next card in shuffled order that has not been drawn since the
    /// last `reset`.
    pub fn draw_card(&mut self) -> Result<Card> {
        if self.needs_shuffle {
            tracing::warn!(
                remaining = self.remaining(),
                "drawing from a deck that was refilled without a reshuffle"
            );
        }
        let card = self
            .cards
            .iter()
            .copied()
            .find(|c| !self.drawn.contains(c))
            .ok_or(EngineError::DeckExhausted)?;
        self.drawn.insert(card);
        Ok(card)
    }

    /// Takes `card` out of the pool so it can never be dealt. Returns whether
    /// it was present.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                self.drawn.remove(card);
                true
            }
            None => false,
        }
    }

    /// Puts `card` back into the pool. The deck must be shuffled before the
    /// next draw, otherwise the returned card sits at a predictable position.
    /// A card already in the pool is left alone.
    pub fn add_card(&mut self, card: Card) -> bool {
        if self.cards.contains(&card) {
            return false;
        }
        self.cards.push(card);
        self.needs_shuffle = true;
        true
    }

    pub fn reset(&mut self) {
        self.drawn.clear();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.drawn.len()
    }

    /// Number of cards in the pool, drawn or not.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn needs_shuffle(&self) -> bool {
        self.needs_shuffle
    }

    /// Cards that a `draw_card` could still return.
    pub fn eligible(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards
            .iter()
            .copied()
            .filter(|c| !self.drawn.contains(c))
    }

    /// Marks `card` as dealt without drawing it. Used when a hand is placed
    /// directly instead of being drawn.
    #[cfg(any(test, feature = "test-util"))]
    pub(crate) fn mark_drawn(&mut self, card: Card) -> Result<()> {
        if !self.contains(&card) || !self.drawn.insert(card) {
            return Err(EngineError::DeckExhausted);
        }
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

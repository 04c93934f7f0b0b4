use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid bet: {credits} credits (must be 1 to 5)")]
    InvalidBet { credits: u32 },
    #[error("No available cards in deck")]
    DeckExhausted,
    #[error("Card index {index} is outside the hand")]
    IndexOutOfRange { index: usize },
    #[error("Hand is not fully filled")]
    HandIncomplete,
    #[error("Adding card will exceed hand limit")]
    HandFull,
    #[error("Invalid hand count: {requested} (must be 1 to {max})")]
    InvalidHandCount { requested: usize, max: usize },
    #[error("Requested hand {index} was out of range")]
    NoSuchHand { index: usize },
    #[error("Card {card} is accounted for twice in hand {hand}")]
    DuplicateCard { card: Card, hand: usize },
    #[error("Hand {hand} accounts for {accounted} of 52 cards")]
    MissingCards { hand: usize, accounted: usize },
}

impl EngineError {
    /// Declines are reported as `DealOutcome::Declined`, so every error here is
    /// caller misuse except the ones that mean the engine's own bookkeeping broke.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            EngineError::DeckExhausted
                | EngineError::DuplicateCard { .. }
                | EngineError::MissingCards { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

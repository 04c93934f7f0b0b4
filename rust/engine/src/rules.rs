use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// Fewest credits a hand may be played for.
pub const MIN_BET: u8 = 1;
/// Most credits a hand may be played for; also the number of paytable columns.
pub const MAX_BET: u8 = 5;
/// Largest number of simultaneous hands a session will allocate.
pub const MAX_HANDS: usize = 100;

/// Credits wagered per hand, always within `MIN_BET..=MAX_BET`.
///
/// # Examples
///
/// ```
/// use vidpoker_engine::rules::Bet;
/// use vidpoker_engine::errors::EngineError;
///
/// let bet = Bet::new(3).unwrap();
/// assert_eq!(bet.credits(), 3);
/// assert_eq!(bet.cycled().credits(), 4);
/// assert_eq!(Bet::MAX.cycled(), Bet::MIN);
///
/// assert!(matches!(Bet::new(6), Err(EngineError::InvalidBet { credits: 6 })));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bet(u8);

impl Bet {
    pub const MIN: Bet = Bet(MIN_BET);
    pub const MAX: Bet = Bet(MAX_BET);

    pub fn new(credits: u8) -> Result<Self> {
        if (MIN_BET..=MAX_BET).contains(&credits) {
            Ok(Bet(credits))
        } else {
            Err(EngineError::InvalidBet {
                credits: credits.into(),
            })
        }
    }

    pub fn credits(self) -> u8 {
        self.0
    }

    /// Zero-based paytable column for this bet.
    pub fn column(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The bet-one button: 1 → 2 → 3 → 4 → 5 → 1.
    pub fn cycled(self) -> Bet {
        if self.0 >= MAX_BET {
            Bet::MIN
        } else {
            Bet(self.0 + 1)
        }
    }

    /// Credits needed to play `hands` hands at this bet.
    pub fn cost(self, hands: usize) -> u32 {
        u32::from(self.0).saturating_mul(u32::try_from(hands).unwrap_or(u32::MAX))
    }
}

impl Default for Bet {
    fn default() -> Self {
        Bet::MIN
    }
}

impl TryFrom<u8> for Bet {
    type Error = EngineError;

    fn try_from(credits: u8) -> Result<Self> {
        Bet::new(credits)
    }
}

impl From<Bet> for u8 {
    fn from(bet: Bet) -> u8 {
        bet.0
    }
}

/// Rejects hand counts the session can't allocate.
pub fn validate_hand_count(hands: usize) -> Result<usize> {
    if (1..=MAX_HANDS).contains(&hands) {
        Ok(hands)
    } else {
        Err(EngineError::InvalidHandCount {
            requested: hands,
            max: MAX_HANDS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_bets() {
        assert_eq!(Bet::new(0), Err(EngineError::InvalidBet { credits: 0 }));
        assert_eq!(Bet::new(6), Err(EngineError::InvalidBet { credits: 6 }));
        for credits in MIN_BET..=MAX_BET {
            assert_eq!(Bet::new(credits).unwrap().column(), usize::from(credits - 1));
        }
    }

    #[test]
    fn cost_scales_with_hands() {
        assert_eq!(Bet::MAX.cost(1), 5);
        assert_eq!(Bet::new(2).unwrap().cost(10), 20);
    }

    #[test]
    fn hand_count_limits() {
        assert!(validate_hand_count(0).is_err());
        assert_eq!(validate_hand_count(1), Ok(1));
        assert_eq!(validate_hand_count(MAX_HANDS), Ok(MAX_HANDS));
        assert!(validate_hand_count(MAX_HANDS + 1).is_err());
    }

    #[test]
    fn bet_deserializes_with_validation() {
        let ok: Bet = serde_json::from_str("4").unwrap();
        assert_eq!(ok.credits(), 4);
        assert!(serde_json::from_str::<Bet>("9").is_err());
    }
}

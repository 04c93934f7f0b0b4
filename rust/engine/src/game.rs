use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::errors::Result;
use crate::hand::Hand;
use crate::ranking::{quad_rank, rank_hand, Category, FiveCards};
use crate::rules::{Bet, MAX_BET};

/// One paytable line: the label shown to the player and the payout for each
/// bet from 1 to 5 credits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct PaytableRow {
    pub label: &'static str,
    pub payouts: [u32; MAX_BET as usize],
}

impl PaytableRow {
    pub fn payout(&self, bet: Bet) -> u32 {
        self.payouts[bet.column()]
    }
}

/// What a settled hand won.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub category: Category,
    /// Paytable label; empty when nothing was won.
    pub label: String,
    pub payout: u32,
}

const fn row(label: &'static str, payouts: [u32; 5]) -> PaytableRow {
    PaytableRow { label, payouts }
}

const NO_WIN: PaytableRow = row("", [0, 0, 0, 0, 0]);

/// 9/6 Jacks or Better.
const JACKS_OR_BETTER: [PaytableRow; 10] = [
    row("Royal Flush", [250, 500, 750, 1000, 4000]),
    row("Straight Flush", [50, 100, 150, 200, 250]),
    row("4 of a Kind", [25, 50, 75, 100, 125]),
    row("Full House", [9, 18, 27, 36, 45]),
    row("Flush", [6, 12, 18, 24, 30]),
    row("Straight", [4, 8, 12, 16, 20]),
    row("3 of a Kind", [3, 6, 9, 12, 15]),
    row("2 Pair", [2, 4, 6, 8, 10]),
    row("Jacks or Better", [1, 2, 3, 4, 5]),
    NO_WIN,
];

const BONUS_POKER: [PaytableRow; 12] = [
    row("Royal Flush", [800, 1600, 2400, 3200, 4000]),
    row("Straight Flush", [50, 100, 150, 200, 250]),
    row("4 of a Kind (Aces)", [80, 160, 240, 320, 400]),
    row("4 of a Kind (2, 3, 4)", [40, 80, 120, 160, 200]),
    row("4 of a Kind (5 to K)", [25, 50, 75, 100, 125]),
    row("Full House", [6, 12, 18, 24, 30]),
    row("Flush", [5, 10, 15, 20, 25]),
    row("Straight", [4, 8, 12, 16, 20]),
    row("3 of a Kind", [3, 6, 9, 12, 15]),
    row("2 Pair", [2, 4, 6, 8, 10]),
    row("Jacks or Better", [1, 2, 3, 4, 5]),
    NO_WIN,
];

/// The closed set of supported games. Each is a paytable plus the rule that
/// picks a row for a ranked hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameVariant {
    #[default]
    JacksOrBetter,
    /// Jacks or Better with four of a kind split into Aces, 2-4 and 5-K.
    BonusPoker,
}

impl GameVariant {
    pub const ALL: [GameVariant; 2] = [GameVariant::JacksOrBetter, GameVariant::BonusPoker];

    pub fn name(self) -> &'static str {
        match self {
            GameVariant::JacksOrBetter => "Jacks or Better",
            GameVariant::BonusPoker => "Bonus Poker",
        }
    }

    /// Rows best to worst, ending in the all-zero "no win" row.
    pub fn paytable(self) -> &'static [PaytableRow] {
        match self {
            GameVariant::JacksOrBetter => &JACKS_OR_BETTER,
            GameVariant::BonusPoker => &BONUS_POKER,
        }
    }

    /// The `(label, payout)` column for a single bet, for paytable displays.
    pub fn payouts_for_bet(self, credits: u8) -> Result<Vec<(&'static str, u32)>> {
        let bet = Bet::new(credits)?;
        Ok(self
            .paytable()
            .iter()
            .map(|row| (row.label, row.payout(bet)))
            .collect())
    }

    /// Ranks a full hand and looks up its payout for a bet of `credits`.
    pub fn evaluate(self, hand: &Hand, credits: u8) -> Result<HandOutcome> {
        let bet = Bet::new(credits)?;
        let cards = hand.to_cards()?;
        Ok(self.score(&cards, bet))
    }

    pub fn score(self, cards: &FiveCards, bet: Bet) -> HandOutcome {
        let category = rank_hand(cards);
        let row = &self.paytable()[self.row_index(category, cards)];
        HandOutcome {
            category,
            label: row.label.to_string(),
            payout: row.payout(bet),
        }
    }

    fn row_index(self, category: Category, cards: &FiveCards) -> usize {
        match self {
            GameVariant::JacksOrBetter => category.position(),
            GameVariant::BonusPoker => match category {
                Category::RoyalFlush | Category::StraightFlush => category.position(),
                Category::FourOfAKind => match quad_rank(cards) {
                    Some(Rank::Ace) => 2,
                    Some(Rank::Two | Rank::Three | Rank::Four) => 3,
                    _ => 4,
                },
                // the split quad rows push everything below down by two
                other => other.position() + 2,
            },
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game variant: {0:?}")]
pub struct UnknownVariant(pub String);

impl FromStr for GameVariant {
    type Err = UnknownVariant;

    /// Accepts the display name or the kebab-case config key, ignoring case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        GameVariant::ALL
            .into_iter()
            .find(|v| v.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

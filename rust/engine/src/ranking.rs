//! Stateless five-card predicates and the single best-to-worst order every
//! game variant applies.
//!
//! None of the predicates assume the slice is sorted. Several categories
//! overlap (a straight flush is also a flush and a straight), so callers
//! should go through [`rank_hand`] instead of testing predicates in their own
//! order.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::hand::CARDS_PER_HAND;

pub type FiveCards = [Card; CARDS_PER_HAND];

/// Paying categories in evaluation order, best first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Category {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    JacksOrBetter,
    Nothing,
}

impl Category {
    /// Every category, best to worst.
    pub const ORDER: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::JacksOrBetter,
        Category::Nothing,
    ];

    /// Zero for a royal flush, growing as hands get worse.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn is_win(self) -> bool {
        self != Category::Nothing
    }

    pub fn matches(self, cards: &FiveCards) -> bool {
        match self {
            Category::RoyalFlush => royal_flush(cards),
            Category::StraightFlush => straight_flush(cards),
            Category::FourOfAKind => four_of_a_kind(cards),
            Category::FullHouse => full_house(cards),
            Category::Flush => flush(cards),
            Category::Straight => straight(cards),
            Category::ThreeOfAKind => three_of_a_kind(cards),
            Category::TwoPair => two_pair(cards),
            Category::JacksOrBetter => jacks_or_better_pair(cards),
            Category::Nothing => true,
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    /// Better hands compare greater.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.position().cmp(&self.position())
    }
}

/// Walks [`Category::ORDER`] and returns the first category the hand meets.
pub fn rank_hand(cards: &FiveCards) -> Category {
    Category::ORDER
        .into_iter()
        .find(|c| c.matches(cards))
        .unwrap_or(Category::Nothing)
}

pub fn royal_flush(cards: &FiveCards) -> bool {
    flush(cards)
        && sorted_values(cards)
            == [
                Rank::Ten.value(),
                Rank::Jack.value(),
                Rank::Queen.value(),
                Rank::King.value(),
                Rank::Ace.value(),
            ]
}

pub fn straight_flush(cards: &FiveCards) -> bool {
    straight(cards) && flush(cards)
}

pub fn four_of_a_kind(cards: &FiveCards) -> bool {
    n_of_a_kind(4, cards) == 1
}

pub fn full_house(cards: &FiveCards) -> bool {
    n_of_a_kind(3, cards) == 1 && n_of_a_kind(2, cards) == 1
}

pub fn flush(cards: &FiveCards) -> bool {
    let first: Suit = cards[0].suit;
    cards.iter().all(|c| c.suit == first)
}

/// Five consecutive ranks. A-2-3-4-5 counts, with the ace playing low.
pub fn straight(cards: &FiveCards) -> bool {
    let v = sorted_values(cards);
    let consecutive = v.windows(2).all(|w| w[1] == w[0] + 1);
    consecutive || v == WHEEL
}

pub fn three_of_a_kind(cards: &FiveCards) -> bool {
    n_of_a_kind(3, cards) == 1
}

pub fn two_pair(cards: &FiveCards) -> bool {
    n_of_a_kind(2, cards) == 2
}

/// A pair of jacks, queens, kings or aces.
pub fn jacks_or_better_pair(cards: &FiveCards) -> bool {
    let counts = rank_counts(cards);
    (Rank::Jack.value()..=Rank::Ace.value()).any(|r| counts[r as usize] == 2)
}

/// How many ranks appear exactly `n` times.
pub fn n_of_a_kind(n: u8, cards: &FiveCards) -> usize {
    rank_counts(cards).iter().filter(|&&c| c == n).count()
}

/// The rank of the quad, when the hand holds four of a kind.
pub fn quad_rank(cards: &FiveCards) -> Option<Rank> {
    let counts = rank_counts(cards);
    (2..=14u8)
        .rev()
        .find(|&r| counts[r as usize] == 4)
        .and_then(Rank::from_u8)
}

const WHEEL: [u8; CARDS_PER_HAND] = [2, 3, 4, 5, 14];

fn rank_counts(cards: &FiveCards) -> [u8; 15] {
    let mut counts = [0u8; 15]; // 2..14 used
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

fn sorted_values(cards: &FiveCards) -> [u8; CARDS_PER_HAND] {
    let mut v = cards.map(|c| c.rank.value());
    v.sort_unstable();
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: [&str; 5]) -> FiveCards {
        codes.map(|c| c.parse().unwrap())
    }

    #[test]
    fn category_order_puts_royal_on_top() {
        assert!(Category::RoyalFlush > Category::StraightFlush);
        assert!(Category::TwoPair > Category::JacksOrBetter);
        assert!(Category::JacksOrBetter > Category::Nothing);
        let mut sorted = Category::ORDER.to_vec();
        sorted.sort();
        sorted.reverse();
        assert_eq!(sorted, Category::ORDER.to_vec());
    }

    #[test]
    fn overlapping_predicates_resolve_to_best() {
        let sf = hand(["9d", "8d", "6d", "7d", "5d"]);
        assert!(flush(&sf) && straight(&sf));
        assert_eq!(rank_hand(&sf), Category::StraightFlush);

        let fh = hand(["Tc", "Td", "Th", "5s", "5c"]);
        assert!(three_of_a_kind(&fh));
        assert_eq!(rank_hand(&fh), Category::FullHouse);
    }

    #[test]
    fn wheel_is_a_straight_but_not_royal() {
        let wheel = hand(["Ah", "2c", "3d", "4s", "5h"]);
        assert!(straight(&wheel));
        assert_eq!(rank_hand(&wheel), Category::Straight);

        let steel = hand(["Ah", "2h", "3h", "4h", "5h"]);
        assert_eq!(rank_hand(&steel), Category::StraightFlush);

        let wrap = hand(["Qh", "Kc", "Ad", "2s", "3h"]);
        assert!(!straight(&wrap));
    }

    #[test]
    fn quad_rank_reports_the_quad() {
        let quads = hand(["4c", "4s", "4h", "4d", "Kc"]);
        assert_eq!(quad_rank(&quads), Some(Rank::Four));
        assert_eq!(quad_rank(&hand(["4c", "4s", "4h", "Kd", "Kc"])), None);
    }
}

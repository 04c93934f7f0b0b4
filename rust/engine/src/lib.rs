//! # vidpoker-engine: Video Poker Session Engine
//!
//! Draw-poker machine logic with no display attached: deals a five-card
//! primary hand, lets the player hold cards, redraws, ranks and pays the
//! result from the selected paytable. A session can play up to
//! [`rules::MAX_HANDS`] hands at once; secondary hands copy the primary
//! hand's holds and draw from their own decks.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and short codes
//! - [`deck`] - Deck with ChaCha20 shuffles, per-round draw tracking
//! - [`hand`] - Five slots with hold flags
//! - [`ranking`] - Hand categories and the predicates behind them
//! - [`game`] - Game variants and paytables
//! - [`rules`] - Bet limits and hand-count limits
//! - [`ledger`] - Credit balance
//! - [`engine`] - The deal/hold/draw session state machine
//! - [`events`] - Notifications for display adapters
//! - [`pacing`] - Optional delay between card reveals
//! - [`logger`] - JSONL round history
//! - [`config`] - Session settings from TOML and environment
//! - [`logging`] - tracing subscriber setup
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use vidpoker_engine::engine::{DealOutcome, SessionBuilder};
//! use vidpoker_engine::game::GameVariant;
//! use vidpoker_engine::ledger::Ledger;
//!
//! let mut ledger = Ledger::with_balance(100);
//! let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
//!     .seed(42)
//!     .build(&mut ledger)
//!     .unwrap();
//!
//! session.bet_max();
//! assert_eq!(session.deal_draw().unwrap(), DealOutcome::Dealt);
//! session.hold(0, true).unwrap();
//! session.hold(1, true).unwrap();
//!
//! match session.deal_draw().unwrap() {
//!     DealOutcome::Settled(summary) => {
//!         println!("{} paid {}", summary.hands[0].outcome.label, summary.total_payout);
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! drop(session);
//! assert!(ledger.balance() >= 95);
//! ```
//!
//! ## Ranking a Hand
//!
//! ```rust
//! use vidpoker_engine::cards::Card;
//! use vidpoker_engine::game::GameVariant;
//! use vidpoker_engine::rules::Bet;
//!
//! let cards: [Card; 5] = ["9d", "8d", "6d", "7d", "5d"].map(|c| c.parse().unwrap());
//! let outcome = GameVariant::JacksOrBetter.score(&cards, Bet::MIN);
//! assert_eq!(outcome.label, "Straight Flush");
//! assert_eq!(outcome.payout, 50);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
#[cfg(any(test, feature = "test-util"))]
pub mod fixture;
pub mod game;
pub mod hand;
pub mod ledger;
pub mod logger;
pub mod logging;
pub mod pacing;
pub mod ranking;
pub mod rules;

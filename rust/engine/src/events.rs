//! Outbound notifications for display and input adapters.
//!
//! The session pushes one [`SessionEvent`] per visible state change into an
//! [`EventSink`]. Sinks never feed back into the engine.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::Bet;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Every slot of a hand was emptied for a new round.
    HandCleared { hand: usize },
    /// A card became visible in a slot.
    CardRevealed { hand: usize, slot: usize, card: Card },
    /// A secondary hand gave a released card back to its deck.
    SlotCleared { hand: usize, slot: usize },
    HoldChanged { hand: usize, slot: usize, held: bool },
    /// These slots are about to be replaced by the draw.
    RedrawPending { hand: usize, slots: Vec<usize> },
    HandSettled { hand: usize, label: String, payout: u32 },
    /// Sum of payouts over the hands settled so far this round.
    RunningTotal { total: u32 },
    BalanceChanged { balance: u32 },
    BetChanged { bet: Bet },
    InProgressChanged { in_progress: bool },
    /// A deal was declined because the ledger can't cover it.
    InsufficientFunds { required: u32, available: u32 },
}

pub trait EventSink {
    fn publish(&mut self, event: SessionEvent);
}

/// Discards everything. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: SessionEvent) {}
}

impl EventSink for mpsc::Sender<SessionEvent> {
    fn publish(&mut self, event: SessionEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!(event = ?e.0, "event receiver dropped");
        }
    }
}

/// Shared recorder; clone it, hand one clone to the session and read the other.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.lock().clone()
    }

    /// Returns everything recorded so far and starts over.
    pub fn take(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SessionEvent>> {
        // a panicking publisher can't leave the Vec half-written
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: SessionEvent) {
        self.lock().push(event);
    }
}

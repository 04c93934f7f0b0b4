use serde::{Deserialize, Serialize};

/// A player's credit balance. It outlives any single session: a session
/// borrows it (or owns it and hands it back with `Session::into_ledger`).
///
/// There is no internal locking; whoever drives the session serializes
/// access to it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// All or nothing: returns `false` and leaves the balance untouched when
    /// `amount` is more than the balance.
    pub fn withdraw(&mut self, amount: u32) -> bool {
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }

    pub fn add(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Administrative override, e.g. zeroing the account or loading test credits.
    pub fn set_balance(&mut self, amount: u32) {
        self.balance = amount;
    }
}

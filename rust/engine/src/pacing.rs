use std::time::Duration;

/// Cosmetic pause between card reveals. The engine calls it once per card
/// it shows; the default does nothing so tests stay instant.
pub trait RevealPacer {
    fn pause(&mut self, hand: usize, slot: usize);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl RevealPacer for NoPacing {
    fn pause(&mut self, _hand: usize, _slot: usize) {}
}

/// Sleeps the calling thread for a fixed delay per card.
#[derive(Debug, Clone, Copy)]
pub struct FixedPacing {
    delay: Duration,
}

impl FixedPacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl RevealPacer for FixedPacing {
    fn pause(&mut self, _hand: usize, _slot: usize) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

use rand::rngs::StdRng;

use lw_core::World;

use crate::clock::SimClock;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable view of the engine handed to the tick processor and dispatcher.
///
/// `R` is the randomness source; any [`rand::Rng`] works, which lets tests
/// drive the engine with a seeded generator of their choosing.
pub struct SimContext<'a, R: ?Sized = StdRng> {
    /// The world being advanced.
    pub world: &'a mut World,
    /// The tick clock.
    pub clock: &'a mut SimClock,
    /// Where events are recorded.
    pub events: &'a mut EventLog,
    /// The randomness source.
    pub rng: &'a mut R,
}

impl<R: ?Sized> SimContext<'_, R> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }
}

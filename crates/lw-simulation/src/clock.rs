/// Monotonic tick counter used to stamp events.
///
/// Separate from the world's `time_remaining`, which bonuses can push back up.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    tick: u64,
}

impl SimClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step to the next tick and return it.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Ticks started so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

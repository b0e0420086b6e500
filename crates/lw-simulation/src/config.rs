use crate::generator::KindPool;

/// Engine settings that sit outside the world snapshot.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic replay.
    pub seed: u64,
    /// Event log cap; the oldest entries go first. 0 keeps everything.
    pub max_events: usize,
    /// Weights used to pick the kind of each new passenger.
    pub kind_pool: KindPool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: 0,
            kind_pool: KindPool::default(),
        }
    }
}

impl SimConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the event log (0 keeps everything).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Replace the passenger kind pool.
    pub fn with_kind_pool(mut self, pool: KindPool) -> Self {
        self.kind_pool = pool;
        self
    }
}

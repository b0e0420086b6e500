use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::elevator::Elevator;
use crate::error::LwResult;
use crate::floor::Floor;

/// The authoritative game snapshot.
///
/// One `World` is built when the game is configured and then mutated in
/// place by every tick and command. Floor index 0 is the ground floor; the
/// highest index is the pit, the only floor where elevators may be dumped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// The parameters the world was built from.
    pub config: WorldConfig,
    /// Points earned so far. Can go negative.
    pub score: i64,
    /// Set once time runs out. Callers stop ticking when they see it.
    pub failed: bool,
    /// Ticks left on the clock.
    pub time_remaining: i64,
    /// Floors by index.
    pub floors: Vec<Floor>,
    /// Elevators by index.
    pub elevators: Vec<Elevator>,
}

impl World {
    /// Build a fresh world: empty floors, every elevator at floor 0 with
    /// doors open.
    pub fn new(config: WorldConfig) -> LwResult<Self> {
        config.validate()?;
        let floors = (0..config.num_floors).map(|_| Floor::new()).collect();
        let elevators = (0..config.num_elevators)
            .map(|_| Elevator::new(config.elevator_capacity))
            .collect();
        Ok(Self {
            score: 0,
            failed: false,
            time_remaining: config.starting_time,
            floors,
            elevators,
            config,
        })
    }

    /// Number of floors.
    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    /// Number of elevators.
    pub fn num_elevators(&self) -> usize {
        self.elevators.len()
    }

    /// Index of the pit floor.
    pub fn pit_floor(&self) -> usize {
        self.floors.len().saturating_sub(1)
    }

    /// Passengers waiting on floors plus passengers riding elevators.
    pub fn passenger_count(&self) -> usize {
        let waiting: usize = self.floors.iter().map(Floor::len).sum();
        let riding: usize = self.elevators.iter().map(|e| e.onboard.len()).sum();
        waiting + riding
    }
}

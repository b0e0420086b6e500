use serde::{Deserialize, Serialize};

use crate::error::{LwError, LwResult};

/// Parameters a world is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of floors. Must be at least 2.
    pub num_floors: usize,
    /// Number of elevators. Must be at least 1.
    pub num_elevators: usize,
    /// Probability of a passenger arriving on any given tick, in `[0, 1]`.
    pub arrival_rate: f64,
    /// Time on the clock when the game begins. Must be positive.
    pub starting_time: i64,
    /// Passengers each elevator can hold. Must be at least 1.
    pub elevator_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            num_floors: 6,
            num_elevators: 2,
            arrival_rate: 0.3,
            starting_time: 100,
            elevator_capacity: 4,
        }
    }
}

impl WorldConfig {
    /// Set the number of floors.
    pub fn with_floors(mut self, floors: usize) -> Self {
        self.num_floors = floors;
        self
    }

    /// Set the number of elevators.
    pub fn with_elevators(mut self, elevators: usize) -> Self {
        self.num_elevators = elevators;
        self
    }

    /// Set the per-tick arrival probability.
    pub fn with_arrival_rate(mut self, rate: f64) -> Self {
        self.arrival_rate = rate;
        self
    }

    /// Set the starting time.
    pub fn with_starting_time(mut self, time: i64) -> Self {
        self.starting_time = time;
        self
    }

    /// Set the elevator capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.elevator_capacity = capacity;
        self
    }

    /// Check every field against its bounds.
    pub fn validate(&self) -> LwResult<()> {
        if self.num_floors < 2 {
            return Err(invalid("num_floors", "must be at least 2"));
        }
        if self.num_elevators < 1 {
            return Err(invalid("num_elevators", "must be at least 1"));
        }
        if !self.arrival_rate.is_finite() || !(0.0..=1.0).contains(&self.arrival_rate) {
            return Err(invalid("arrival_rate", "must be between 0 and 1"));
        }
        if self.starting_time <= 0 {
            return Err(invalid("starting_time", "must be positive"));
        }
        if self.elevator_capacity < 1 {
            return Err(invalid("elevator_capacity", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> LwResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> LwResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(field: &'static str, reason: &str) -> LwError {
    LwError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

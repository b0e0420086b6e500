pub mod auto;
pub mod config;
pub mod play;

use std::fs;
use std::path::PathBuf;

use clap::Args;

use lw_core::WorldConfig;
use lw_simulation::{SimConfig, Simulation};

/// World and engine settings shared by every game-running subcommand.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// JSON file with world settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of floors (the top floor is the pit)
    #[arg(long)]
    pub floors: Option<usize>,

    /// Number of elevators
    #[arg(long)]
    pub elevators: Option<usize>,

    /// Chance of a new passenger each tick, between 0 and 1
    #[arg(long)]
    pub arrival_rate: Option<f64>,

    /// Starting time on the clock
    #[arg(long)]
    pub time: Option<i64>,

    /// Passengers per elevator
    #[arg(long)]
    pub capacity: Option<usize>,

    /// RNG seed for a reproducible game
    #[arg(short, long, default_value = "42")]
    pub seed: u64,
}

impl GameArgs {
    /// Resolve the world configuration: defaults, then file, then flags.
    pub fn world_config(&self) -> Result<WorldConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                WorldConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?
            }
            None => WorldConfig::default(),
        };

        if let Some(floors) = self.floors {
            config = config.with_floors(floors);
        }
        if let Some(elevators) = self.elevators {
            config = config.with_elevators(elevators);
        }
        if let Some(rate) = self.arrival_rate {
            config = config.with_arrival_rate(rate);
        }
        if let Some(time) = self.time {
            config = config.with_starting_time(time);
        }
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        Ok(config)
    }

    /// Build a ready-to-play simulation.
    pub fn build(&self) -> Result<Simulation, String> {
        let config = self.world_config()?;
        Simulation::new(config, SimConfig::default().with_seed(self.seed)).map_err(|e| e.to_string())
    }
}

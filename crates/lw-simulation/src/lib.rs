//! Tick-based elevator dispatch simulation for Liftwerk.
//!
//! Drives a [`lw_core::World`] one tick at a time: elevators move, board,
//! and unload; new passengers arrive at random; the clock runs down until
//! the game is over. Player commands are parsed and validated here too,
//! and every outcome is recorded in a human-readable [`EventLog`].
//!
//! Bad player input is never an error: it is logged as a rejected command
//! and leaves the world untouched. [`SimError`] is reserved for a broken
//! engine configuration.

/// Tick counter used to stamp events.
pub mod clock;
/// Command parsing and command errors.
pub mod command;
/// Engine configuration.
pub mod config;
/// Mutable context passed to the tick processor and dispatcher.
pub mod context;
/// Automated controllers that plan commands.
pub mod controller;
/// Validation and application of player commands.
pub mod dispatch;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Weighted random passenger generation.
pub mod generator;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The per-tick elevator state machine.
pub mod tick;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-exports of [`command::Command`], [`command::CommandError`], and [`command::parse_command`].
pub use command::{Command, CommandError, parse_command};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`controller::Autopilot`] and [`controller::Controller`].
pub use controller::{Autopilot, Controller};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`generator::KindPool`].
pub use generator::KindPool;
/// Re-exports of [`simulation::Outcome`], [`simulation::Simulation`], and [`simulation::Snapshot`].
pub use simulation::{Outcome, Simulation, Snapshot};

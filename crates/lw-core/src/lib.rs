//! Core types for Liftwerk: passengers, floors, elevators, and the world model.
//!
//! This crate defines the authoritative snapshot that the simulation engine
//! threads through every tick and command. It carries no game rules of its
//! own beyond construction-time validation; the tick processor and command
//! dispatcher in `lw-simulation` maintain its invariants.

/// World construction parameters.
pub mod config;
/// Elevator cars: position, doors, destination queue, and onboard stack.
pub mod elevator;
/// Error types used throughout the crate.
pub mod error;
/// Floors and their waiting queues.
pub mod floor;
/// Passengers and passenger kinds.
pub mod passenger;
/// The world aggregate that owns floors, elevators, score, and clock.
pub mod world;

/// Re-export of [`config::WorldConfig`].
pub use config::WorldConfig;
/// Re-export of [`elevator::Elevator`].
pub use elevator::Elevator;
/// Re-export error types.
pub use error::{LwError, LwResult};
/// Re-export of [`floor::Floor`].
pub use floor::Floor;
/// Re-export passenger types.
pub use passenger::{Passenger, PassengerKind};
/// Re-export of [`world::World`].
pub use world::World;

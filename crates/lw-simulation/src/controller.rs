//! Automated dispatch.
//!
//! A controller looks at the world between ticks and proposes commands.
//! Its commands go through the same dispatcher as a human player's, so a
//! controller can never do anything a player could not.

use std::collections::HashSet;

use lw_core::{PassengerKind, World};

use crate::command::Command;

/// Something that plans commands from the current world.
pub trait Controller: std::fmt::Debug {
    /// Human-readable name for this controller.
    fn name(&self) -> &str;

    /// Commands to submit before the next tick.
    fn plan(&mut self, world: &World) -> Vec<Command>;
}

/// A simple greedy controller.
///
/// Idle elevators with riders head for the door-side rider's floor, since
/// only that rider can get out. Empty idle elevators head for the nearest
/// floor with people waiting that no other elevator was just sent to.
/// Bricks are hauled to the pit and dumped.
#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Create an autopilot.
    pub fn new() -> Self {
        Self
    }
}

impl Controller for Autopilot {
    fn name(&self) -> &str {
        "autopilot"
    }

    fn plan(&mut self, world: &World) -> Vec<Command> {
        let pit = world.pit_floor();
        let mut commands = Vec::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        for (index, elevator) in world.elevators.iter().enumerate() {
            if !elevator.is_idle() {
                continue;
            }
            let carrying_brick = elevator
                .onboard
                .iter()
                .any(|p| p.kind == PassengerKind::Brick);

            if carrying_brick && elevator.floor == pit {
                commands.push(Command::Dump { elevator: index });
            } else if let Some(front) = elevator.onboard.front() {
                let floor = if front.kind == PassengerKind::Brick {
                    pit
                } else {
                    front.target_floor
                };
                commands.push(Command::Go {
                    elevator: index,
                    floor,
                });
            } else if let Some(floor) = nearest_waiting(world, elevator.floor, &claimed) {
                claimed.insert(floor);
                commands.push(Command::Go {
                    elevator: index,
                    floor,
                });
            }
        }
        commands
    }
}

/// Closest floor with waiting passengers, lower index on ties.
fn nearest_waiting(world: &World, from: usize, claimed: &HashSet<usize>) -> Option<usize> {
    world
        .floors
        .iter()
        .enumerate()
        .filter(|(i, floor)| !floor.is_empty() && !claimed.contains(i))
        .map(|(i, _)| i)
        .min_by_key(|&i| (i.abs_diff(from), i))
}

//! Validation and application of player commands.
//!
//! Every operation checks all of its constraints before touching the world.
//! On failure the world is left exactly as it was and the caller logs a
//! single rejection event via [`reject`].

use lw_core::World;
use tracing::debug;

use crate::command::CommandError;
use crate::context::SimContext;
use crate::event::SimEventKind;

/// Queue `floor` at the back of `elevator`'s destination list.
pub fn go<R: ?Sized>(
    ctx: &mut SimContext<'_, R>,
    elevator: usize,
    floor: usize,
) -> Result<(), CommandError> {
    check_elevator(ctx.world, elevator)?;
    check_floor(ctx.world, floor)?;

    ctx.world.elevators[elevator].queue_destination(floor);
    ctx.emit(
        SimEventKind::DestinationQueued { elevator, floor },
        format!("Elevator {elevator} will visit floor {floor}."),
    );
    Ok(())
}

/// Discard every passenger aboard `elevator`. Only allowed at the pit.
pub fn dump<R: ?Sized>(ctx: &mut SimContext<'_, R>, elevator: usize) -> Result<(), CommandError> {
    check_elevator(ctx.world, elevator)?;
    let pit = ctx.world.pit_floor();
    let car = &mut ctx.world.elevators[elevator];
    if car.floor != pit {
        return Err(CommandError::NotAtPit {
            elevator,
            floor: car.floor,
            pit,
        });
    }

    let count = car.onboard.len();
    car.onboard.clear();
    ctx.emit(
        SimEventKind::Dumped { elevator, count },
        format!("Elevator {elevator} dumps {count} passenger(s) into the pit."),
    );
    Ok(())
}

/// Shut `elevator`'s doors immediately, whatever it was doing.
pub fn close<R: ?Sized>(ctx: &mut SimContext<'_, R>, elevator: usize) -> Result<(), CommandError> {
    check_elevator(ctx.world, elevator)?;

    ctx.world.elevators[elevator].doors_open = false;
    ctx.emit(
        SimEventKind::DoorsForced { elevator },
        format!("Elevator {elevator} doors forced closed."),
    );
    Ok(())
}

/// Log a refused command.
pub fn reject<R: ?Sized>(ctx: &mut SimContext<'_, R>, error: &CommandError) {
    debug!(tick = ctx.tick(), %error, "command rejected");
    ctx.emit(SimEventKind::CommandRejected, format!("Command failed: {error}."));
}

fn check_elevator(world: &World, elevator: usize) -> Result<(), CommandError> {
    let count = world.num_elevators();
    if elevator >= count {
        return Err(CommandError::NoSuchElevator {
            elevator,
            max: count.saturating_sub(1),
        });
    }
    Ok(())
}

fn check_floor(world: &World, floor: usize) -> Result<(), CommandError> {
    let count = world.num_floors();
    if floor >= count {
        return Err(CommandError::NoSuchFloor {
            floor,
            max: count.saturating_sub(1),
        });
    }
    Ok(())
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lw_core::{Elevator, Passenger, PassengerKind, World};
use lw_simulation::command::HELP_LINES;
use lw_simulation::{SimEvent, SimEventKind, Snapshot};

/// Print the status line, the building, and any pending events.
pub fn snapshot(snapshot: &Snapshot<'_>) {
    let world = snapshot.world;
    let time = if world.time_remaining <= 10 {
        world.time_remaining.to_string().red().bold()
    } else {
        world.time_remaining.to_string().normal()
    };
    println!(
        "  {} {}   {} {}   {} {}",
        "Tick".bold(),
        snapshot.tick,
        "Time".bold(),
        time,
        "Score".bold(),
        world.score
    );
    println!("{}", building(world));
    events(snapshot.events);
    println!();
}

/// One row per floor, top floor first, with a column per elevator.
pub fn building(world: &World) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Floor".to_string(), "Waiting".to_string()];
    header.extend((0..world.num_elevators()).map(|i| format!("Elevator {i}")));
    table.set_header(header);

    for (index, floor) in world.floors.iter().enumerate().rev() {
        let label = if index == world.pit_floor() {
            format!("{index} (pit)")
        } else {
            index.to_string()
        };
        let waiting: Vec<String> = floor.waiting.iter().map(passenger_glyph).collect();

        let mut row = vec![label, waiting.join(" ")];
        row.extend(world.elevators.iter().map(|car| {
            if car.floor == index {
                elevator_cell(car)
            } else {
                String::new()
            }
        }));
        table.add_row(row);
    }
    table
}

fn elevator_cell(car: &Elevator) -> String {
    let doors = if car.doors_open { "open" } else { "closed" };
    let riders: Vec<String> = car.onboard.iter().map(passenger_glyph).collect();
    let mut cell = format!("[{}/{}] {doors}", car.onboard.len(), car.capacity);
    if !riders.is_empty() {
        cell.push_str(&format!("\n{}", riders.join(" ")));
    }
    if !car.destinations.is_empty() {
        let queued: Vec<String> = car.destinations.iter().map(|f| f.to_string()).collect();
        cell.push_str(&format!("\n-> {}", queued.join(", ")));
    }
    cell
}

/// Kind initial plus target floor, e.g. `p3` or `V0`.
fn passenger_glyph(passenger: &Passenger) -> String {
    let initial = match passenger.kind {
        PassengerKind::Passenger => "p",
        PassengerKind::Brick => "B",
        PassengerKind::Vip => "V",
        PassengerKind::Mechanic => "M",
    };
    format!("{initial}{}", passenger.target_floor)
}

/// One coloured line per event, tick label first.
pub fn events(events: &[SimEvent]) {
    for event in events {
        let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
        println!("  {tick_label} {}", colorize_event(&event.kind, &event.description));
    }
}

/// The command reference.
pub fn help() {
    println!("  {}", "Commands".bold().underline());
    for line in HELP_LINES {
        println!("  {line}");
    }
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::GameOver { .. } => description.red().bold(),
        SimEventKind::Penalty { .. } | SimEventKind::CommandRejected => description.red(),
        SimEventKind::BonusScore { .. } | SimEventKind::TimeBonus { .. } => description.green().bold(),
        SimEventKind::DroppedOff { .. } => description.green(),
        SimEventKind::ElevatorFull { .. } | SimEventKind::PushedBack { .. } => description.yellow(),
        SimEventKind::Arrival { .. } => description.cyan(),
        SimEventKind::Dumped { .. } | SimEventKind::DoorsForced { .. } => description.magenta(),
        SimEventKind::Boarded { .. }
        | SimEventKind::DoorsOpened { .. }
        | SimEventKind::ReadyToMove { .. }
        | SimEventKind::DestinationQueued { .. } => description.blue(),
    }
}

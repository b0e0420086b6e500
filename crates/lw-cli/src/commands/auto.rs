use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lw_simulation::{Autopilot, Controller, SimEventKind};

use super::GameArgs;
use crate::render;

/// Let the autopilot dispatch every tick and report how it fared.
pub fn run(game: &GameArgs, ticks: u64, verbose: bool) -> Result<(), String> {
    let mut sim = game.build()?;
    let mut autopilot = Autopilot::new();

    let mut commands_issued = 0;
    let mut delivered = 0;
    let mut dumped = 0;

    while sim.current_tick() < ticks && !sim.is_failed() {
        sim.clear_events();
        commands_issued += sim
            .consult(&mut autopilot)
            .map_err(|e| format!("autopilot error: {e}"))?;
        sim.tick().map_err(|e| format!("simulation error: {e}"))?;

        let log = sim.events();
        delivered += log.count(|k| matches!(k, SimEventKind::DroppedOff { .. }));
        dumped += log
            .events()
            .iter()
            .map(|e| match e.kind {
                SimEventKind::Dumped { count, .. } => count,
                _ => 0,
            })
            .sum::<usize>();

        if verbose {
            render::events(log.events());
        }
    }

    let world = sim.world();
    let riding: usize = world.elevators.iter().map(|car| car.onboard.len()).sum();
    let waiting: usize = world.floors.iter().map(|floor| floor.len()).sum();

    if verbose {
        println!();
    }
    println!(
        "  {} {}",
        "Autopilot".bold(),
        format!("({}, seed={})", autopilot.name(), game.seed).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Ticks".to_string(), sim.current_tick().to_string()]);
    table.add_row(vec!["Score".to_string(), world.score.to_string()]);
    table.add_row(vec![
        "Time remaining".to_string(),
        world.time_remaining.to_string(),
    ]);
    table.add_row(vec!["Delivered".to_string(), delivered.to_string()]);
    table.add_row(vec!["Dumped".to_string(), dumped.to_string()]);
    table.add_row(vec!["Riding".to_string(), riding.to_string()]);
    table.add_row(vec!["Waiting".to_string(), waiting.to_string()]);
    table.add_row(vec![
        "Commands issued".to_string(),
        commands_issued.to_string(),
    ]);
    println!("{table}");
    println!();

    if sim.is_failed() {
        println!("  {} time ran out", "GAME OVER".red().bold());
    } else {
        println!("  {} still running after {ticks} ticks", "OK".green().bold());
    }
    Ok(())
}

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use colored::Colorize;

use lw_simulation::{Outcome, Simulation};

use super::GameArgs;
use crate::render;

/// Run the read-eval-render loop until input ends, the player quits, or
/// the clock runs out.
pub fn run(game: &GameArgs, script: Option<&Path>, json: bool) -> Result<(), String> {
    let mut sim = game.build()?;

    let interactive = script.is_none() && io::stdin().is_terminal();
    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    show(&sim, json)?;
    if interactive && !json {
        println!(
            "  {}",
            "Type 'help' for commands. An empty line advances the clock.".dimmed()
        );
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;

        let outcome = sim
            .process(&line)
            .map_err(|e| format!("simulation error: {e}"))?;
        match outcome {
            Outcome::Quit => break,
            Outcome::Help => {
                if !json {
                    render::help();
                }
                continue;
            }
            Outcome::Applied | Outcome::Rejected | Outcome::Ticked => {}
        }

        show(&sim, json)?;
        if outcome == Outcome::Ticked {
            sim.clear_events();
        }
        if sim.is_failed() {
            break;
        }
    }

    if !json {
        let world = sim.world();
        let verdict = if sim.is_failed() {
            "Game over".red().bold()
        } else {
            "Stopped".yellow().bold()
        };
        println!(
            "  {verdict} after {} ticks with a score of {}.",
            sim.current_tick(),
            world.score
        );
    }
    Ok(())
}

fn show(sim: &Simulation, json: bool) -> Result<(), String> {
    let snapshot = sim.snapshot();
    if json {
        let line = serde_json::to_string(&snapshot).map_err(|e| e.to_string())?;
        println!("{line}");
    } else {
        render::snapshot(&snapshot);
    }
    Ok(())
}

//! Command parsing for player and script input.
//!
//! Parsing only checks shape: verb, argument count, and that arguments are
//! non-negative integers. Whether an elevator or floor actually exists is
//! checked against the live world by the dispatcher.

use std::num::{IntErrorKind, ParseIntError};

use strsim::jaro_winkler;

/// Minimum similarity for suggesting a verb on a typo.
const SUGGEST_THRESHOLD: f64 = 0.8;

/// Usage line for `go`.
pub const GO_USAGE: &str = "go <elevator> <floor>";
/// Usage line for `dump`.
pub const DUMP_USAGE: &str = "dump <elevator>";
/// Usage line for `close`.
pub const CLOSE_USAGE: &str = "close <elevator>";

/// One line per command, for help output.
pub const HELP_LINES: &[&str] = &[
    "go <elevator> <floor>   queue a floor for an elevator to visit",
    "dump <elevator>         empty an elevator standing at the pit (top floor)",
    "close <elevator>        force an elevator's doors shut",
    "<empty line> | tick     advance the clock by one tick",
    "help                    show this list",
    "quit                    leave the game",
];

/// A parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Queue `floor` on `elevator`'s destination list.
    Go {
        /// The elevator index.
        elevator: usize,
        /// The floor index to visit.
        floor: usize,
    },
    /// Discard everyone aboard `elevator`. Only allowed at the pit.
    Dump {
        /// The elevator index.
        elevator: usize,
    },
    /// Force `elevator`'s doors shut.
    Close {
        /// The elevator index.
        elevator: usize,
    },
    /// Advance one tick.
    Tick,
    /// Show the command list.
    Help,
    /// Stop playing.
    Quit,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Go { elevator, floor } => write!(f, "go {elevator} {floor}"),
            Self::Dump { elevator } => write!(f, "dump {elevator}"),
            Self::Close { elevator } => write!(f, "close {elevator}"),
            Self::Tick => write!(f, "tick"),
            Self::Help => write!(f, "help"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

/// Why a command was refused. Always recoverable: the world is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The verb is not one we know.
    #[error("unknown command '{verb}'{}", did_you_mean(.suggestion))]
    UnknownCommand {
        /// The verb as typed.
        verb: String,
        /// A close known verb, if any.
        suggestion: Option<&'static str>,
    },

    /// Wrong number of arguments.
    #[error("expected {usage} but got {given} argument(s)")]
    Usage {
        /// The expected shape.
        usage: &'static str,
        /// How many arguments were given.
        given: usize,
    },

    /// An argument is not a non-negative integer.
    #[error("'{arg}' is not a non-negative integer; expected {usage}")]
    NotANumber {
        /// The offending argument.
        arg: String,
        /// The expected shape.
        usage: &'static str,
    },

    /// An argument is a whole number too large to be any index.
    #[error("'{arg}' is out of range; expected {usage}")]
    OutOfRange {
        /// The offending argument.
        arg: String,
        /// The expected shape.
        usage: &'static str,
    },

    /// The elevator index is out of range.
    #[error("there is no elevator {elevator}; elevators are numbered 0 to {max}")]
    NoSuchElevator {
        /// The requested index.
        elevator: usize,
        /// The highest valid index.
        max: usize,
    },

    /// The floor index is out of range.
    #[error("there is no floor {floor}; floors are numbered 0 to {max}")]
    NoSuchFloor {
        /// The requested index.
        floor: usize,
        /// The highest valid index.
        max: usize,
    },

    /// `dump` was issued away from the pit.
    #[error("elevator {elevator} is at floor {floor}; it can only be dumped at the pit (floor {pit})")]
    NotAtPit {
        /// The elevator index.
        elevator: usize,
        /// Where the elevator is.
        floor: usize,
        /// The pit floor.
        pit: usize,
    },
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(verb) => format!("; did you mean '{verb}'?"),
        None => String::new(),
    }
}

const GO_VERBS: &[&str] = &["go", "g"];
const DUMP_VERBS: &[&str] = &["dump", "d"];
const CLOSE_VERBS: &[&str] = &["close", "c"];
const TICK_VERBS: &[&str] = &["tick", "t", "wait"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Verbs worth suggesting on a typo.
const KNOWN_VERBS: &[&str] = &["go", "dump", "close", "tick", "wait", "help", "quit", "exit"];

/// Parse one line of input. An empty line advances the clock.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Ok(Command::Tick);
    };
    let verb = first.to_lowercase();
    let args = &words[1..];

    if GO_VERBS.contains(&verb.as_str()) {
        let [elevator, floor] = expect_args::<2>(args, GO_USAGE)?;
        return Ok(Command::Go { elevator, floor });
    }
    if DUMP_VERBS.contains(&verb.as_str()) {
        let [elevator] = expect_args::<1>(args, DUMP_USAGE)?;
        return Ok(Command::Dump { elevator });
    }
    if CLOSE_VERBS.contains(&verb.as_str()) {
        let [elevator] = expect_args::<1>(args, CLOSE_USAGE)?;
        return Ok(Command::Close { elevator });
    }
    if TICK_VERBS.contains(&verb.as_str()) {
        return Ok(Command::Tick);
    }
    if HELP_VERBS.contains(&verb.as_str()) {
        return Ok(Command::Help);
    }
    if QUIT_VERBS.contains(&verb.as_str()) {
        return Ok(Command::Quit);
    }

    Err(CommandError::UnknownCommand {
        suggestion: suggest_verb(&verb),
        verb,
    })
}

/// Parse exactly `N` integer arguments.
fn expect_args<const N: usize>(
    args: &[&str],
    usage: &'static str,
) -> Result<[usize; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Usage {
            usage,
            given: args.len(),
        });
    }
    let mut parsed = [0usize; N];
    for (slot, arg) in parsed.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|err: ParseIntError| {
            let arg = (*arg).to_string();
            match err.kind() {
                IntErrorKind::PosOverflow => CommandError::OutOfRange { arg, usage },
                _ => CommandError::NotANumber { arg, usage },
            }
        })?;
    }
    Ok(parsed)
}

/// The closest known verb, if it is close enough to be a typo.
fn suggest_verb(verb: &str) -> Option<&'static str> {
    KNOWN_VERBS
        .iter()
        .map(|known| (*known, jaro_winkler(verb, known)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(known, _)| known)
}

use lw_core::PassengerKind;
use serde::Serialize;

/// Everything the engine can report, one variant per happening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEventKind {
    // Arrivals
    /// A new passenger appeared on a floor.
    Arrival {
        /// The floor the passenger is waiting on.
        floor: usize,
        /// The floor the passenger wants to reach.
        target: usize,
        /// The passenger's kind.
        kind: PassengerKind,
    },

    // Boarding
    /// A passenger stepped into an elevator.
    Boarded {
        /// The elevator boarded.
        elevator: usize,
        /// The floor boarded from.
        floor: usize,
    },
    /// Boarding filled an elevator to capacity.
    ElevatorFull {
        /// The elevator that is now full.
        elevator: usize,
    },
    /// A passenger who could not exit was put back on the floor.
    PushedBack {
        /// The elevator the passenger left.
        elevator: usize,
        /// The floor the passenger now waits on.
        floor: usize,
        /// Where the passenger actually wanted to go.
        target: usize,
    },
    /// A passenger reached their floor and left the elevator.
    DroppedOff {
        /// The elevator delivering the passenger.
        elevator: usize,
        /// The delivery floor.
        floor: usize,
        /// The passenger's kind.
        kind: PassengerKind,
    },

    // Scoring
    /// A delivery earned extra points.
    BonusScore {
        /// The elevator that made the delivery.
        elevator: usize,
        /// Points awarded.
        points: i64,
    },
    /// A delivery added time to the clock.
    TimeBonus {
        /// The elevator that made the delivery.
        elevator: usize,
        /// Time added.
        time: i64,
    },
    /// A delivery cost points.
    Penalty {
        /// The elevator that made the delivery.
        elevator: usize,
        /// Points deducted.
        points: i64,
    },

    // Movement
    /// Doors closed with nowhere queued; the elevator awaits orders.
    ReadyToMove {
        /// The waiting elevator.
        elevator: usize,
    },
    /// An elevator reached a queued destination and opened its doors.
    DoorsOpened {
        /// The elevator that arrived.
        elevator: usize,
        /// The floor it arrived at.
        floor: usize,
    },

    // Commands
    /// A destination was queued by a `go` command.
    DestinationQueued {
        /// The commanded elevator.
        elevator: usize,
        /// The queued floor.
        floor: usize,
    },
    /// Passengers were discarded by a `dump` command.
    Dumped {
        /// The dumped elevator.
        elevator: usize,
        /// How many passengers were discarded.
        count: usize,
    },
    /// Doors were shut by a `close` command.
    DoorsForced {
        /// The commanded elevator.
        elevator: usize,
    },
    /// A command was refused; the world is unchanged.
    CommandRejected,

    // Lifecycle
    /// Time ran out.
    GameOver {
        /// The final score.
        score: i64,
    },
}

impl SimEventKind {
    /// The elevator this event concerns, if any.
    pub fn elevator(&self) -> Option<usize> {
        match self {
            Self::Boarded { elevator, .. }
            | Self::ElevatorFull { elevator }
            | Self::PushedBack { elevator, .. }
            | Self::DroppedOff { elevator, .. }
            | Self::BonusScore { elevator, .. }
            | Self::TimeBonus { elevator, .. }
            | Self::Penalty { elevator, .. }
            | Self::ReadyToMove { elevator }
            | Self::DoorsOpened { elevator, .. }
            | Self::DestinationQueued { elevator, .. }
            | Self::Dumped { elevator, .. }
            | Self::DoorsForced { elevator } => Some(*elevator),
            Self::Arrival { .. } | Self::CommandRejected | Self::GameOver { .. } => None,
        }
    }
}

/// One logged happening, stamped with the tick it happened on.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    /// Tick number at the time of the event; commands log at the current tick.
    pub tick: u64,
    /// Structured detail.
    pub kind: SimEventKind,
    /// The sentence shown to the player.
    pub description: String,
}

impl SimEvent {
    /// Stamp an event.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Events since the caller last cleared the log.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// An empty log keeping at most `max_events` entries (0 keeps everything).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Record an event. Past the cap, the oldest entries fall off the front.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events == 0 {
            return;
        }
        let excess = self.events.len().saturating_sub(self.max_events);
        if excess > 0 {
            self.events.drain(..excess);
        }
    }

    /// Events in the order they were logged.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Iterate over the human-readable descriptions, oldest first.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }

    /// Events stamped with `tick`.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|event| event.tick == tick).collect()
    }

    /// Return all events concerning the given elevator.
    pub fn events_for_elevator(&self, elevator: usize) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.elevator() == Some(elevator))
            .collect()
    }

    /// Count events matching a predicate on their kind.
    pub fn count(&self, pred: impl Fn(&SimEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Number of logged events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been logged since the last clear.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every logged event. The cap is kept.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

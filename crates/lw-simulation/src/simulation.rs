use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use lw_core::{World, WorldConfig};

use crate::clock::SimClock;
use crate::command::{Command, CommandError, parse_command};
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::controller::Controller;
use crate::dispatch;
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent};
use crate::generator::KindPool;
use crate::tick;

/// What happened to a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command changed the world.
    Applied,
    /// The command was refused and logged; the world is unchanged.
    Rejected,
    /// One tick was advanced.
    Ticked,
    /// The player asked for the command list.
    Help,
    /// The player asked to stop.
    Quit,
}

/// Everything a renderer needs after a command or tick.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// Ticks advanced so far.
    pub tick: u64,
    /// The world as it stands.
    pub world: &'a World,
    /// Events since the log was last cleared.
    pub events: &'a [SimEvent],
}

/// The game engine.
///
/// Owns the world, tick clock, RNG, and event log. Callers clear the log,
/// submit any number of commands, then advance one tick, and repeat until
/// [`Simulation::is_failed`] reports the game is over. The engine itself
/// keeps accepting work after that; stopping is up to the caller.
pub struct Simulation {
    world: World,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    kind_pool: KindPool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("time_remaining", &self.world.time_remaining)
            .field("score", &self.world.score)
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Build a fresh world from `config` and wrap it in an engine.
    pub fn new(config: WorldConfig, sim: SimConfig) -> SimResult<Self> {
        let world = World::new(config)?;
        Ok(Self::from_world(world, sim))
    }

    /// Wrap an existing world, seeding the RNG from `sim.seed`.
    pub fn from_world(world: World, sim: SimConfig) -> Self {
        let rng = StdRng::seed_from_u64(sim.seed);
        Self::with_rng(world, sim, rng)
    }

    /// Wrap an existing world with a caller-supplied RNG. `sim.seed` is ignored.
    pub fn with_rng(world: World, sim: SimConfig, rng: StdRng) -> Self {
        Self {
            world,
            clock: SimClock::new(),
            rng,
            events: EventLog::new(sim.max_events),
            kind_pool: sim.kind_pool,
        }
    }

    /// Parse and apply one line of input. Unparseable input is logged as a
    /// rejected command.
    pub fn process(&mut self, input: &str) -> SimResult<Outcome> {
        match parse_command(input) {
            Ok(command) => self.apply(command),
            Err(err) => {
                dispatch::reject(&mut self.ctx(), &err);
                Ok(Outcome::Rejected)
            }
        }
    }

    /// Apply a parsed command.
    pub fn apply(&mut self, command: Command) -> SimResult<Outcome> {
        let result = match command {
            Command::Go { elevator, floor } => self.go(elevator, floor),
            Command::Dump { elevator } => self.dump(elevator),
            Command::Close { elevator } => self.close(elevator),
            Command::Tick => {
                self.tick()?;
                return Ok(Outcome::Ticked);
            }
            Command::Help => return Ok(Outcome::Help),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(match result {
            Ok(()) => Outcome::Applied,
            Err(_) => Outcome::Rejected,
        })
    }

    /// Queue `floor` on `elevator`. Refusals are logged and returned.
    pub fn go(&mut self, elevator: usize, floor: usize) -> Result<(), CommandError> {
        self.command(|ctx| dispatch::go(ctx, elevator, floor))
    }

    /// Dump everyone aboard `elevator`. Refusals are logged and returned.
    pub fn dump(&mut self, elevator: usize) -> Result<(), CommandError> {
        self.command(|ctx| dispatch::dump(ctx, elevator))
    }

    /// Force `elevator`'s doors shut. Refusals are logged and returned.
    pub fn close(&mut self, elevator: usize) -> Result<(), CommandError> {
        self.command(|ctx| dispatch::close(ctx, elevator))
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> SimResult<()> {
        let Self {
            world,
            clock,
            rng,
            events,
            kind_pool,
        } = self;
        let mut ctx = SimContext {
            world,
            clock,
            events,
            rng,
        };
        tick::advance(&mut ctx, kind_pool)
    }

    /// Advance the simulation by up to `n` ticks, stopping early once the
    /// game is over. Returns the number of ticks run.
    pub fn run(&mut self, n: u64) -> SimResult<u64> {
        let mut ran = 0;
        while ran < n && !self.world.failed {
            self.tick()?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Ask `controller` for commands and apply them. Returns how many were
    /// accepted.
    pub fn consult(&mut self, controller: &mut dyn Controller) -> SimResult<usize> {
        let mut accepted = 0;
        for command in controller.plan(&self.world) {
            if self.apply(command)? == Outcome::Applied {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Forget all logged events. Callers do this before each batch.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// The current world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for setting up scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Events since the log was last cleared.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Ticks advanced so far.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Whether time has run out.
    pub fn is_failed(&self) -> bool {
        self.world.failed
    }

    /// A serialisable view of the world and the current event log.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.clock.tick(),
            world: &self.world,
            events: self.events.events(),
        }
    }

    fn ctx(&mut self) -> SimContext<'_> {
        SimContext {
            world: &mut self.world,
            clock: &mut self.clock,
            events: &mut self.events,
            rng: &mut self.rng,
        }
    }

    fn command(
        &mut self,
        op: impl FnOnce(&mut SimContext<'_>) -> Result<(), CommandError>,
    ) -> Result<(), CommandError> {
        let mut ctx = self.ctx();
        let result = op(&mut ctx);
        if let Err(err) = &result {
            dispatch::reject(&mut ctx, err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Autopilot;
    use crate::error::SimError;
    use crate::event::SimEventKind;
    use lw_core::{Passenger, PassengerKind};
    use proptest::prelude::*;

    fn quiet(floors: usize, elevators: usize, capacity: usize) -> Simulation {
        let config = WorldConfig::default()
            .with_floors(floors)
            .with_elevators(elevators)
            .with_capacity(capacity)
            .with_arrival_rate(0.0)
            .with_starting_time(50);
        Simulation::new(config, SimConfig::default()).unwrap()
    }

    #[test]
    fn invalid_world_config_is_an_error() {
        let result = Simulation::new(WorldConfig::default().with_floors(1), SimConfig::default());
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn process_routes_each_command() {
        let mut sim = quiet(5, 2, 2);
        assert_eq!(sim.process("go 1 3").unwrap(), Outcome::Applied);
        assert_eq!(sim.process("close 0").unwrap(), Outcome::Applied);
        assert_eq!(sim.process("").unwrap(), Outcome::Ticked);
        assert_eq!(sim.process("help").unwrap(), Outcome::Help);
        assert_eq!(sim.process("quit").unwrap(), Outcome::Quit);
        assert_eq!(sim.current_tick(), 1);
        assert_eq!(sim.world().time_remaining, 49);
    }

    #[test]
    fn malformed_input_logs_one_failure_and_changes_nothing() {
        let mut sim = quiet(5, 2, 2);
        let before = sim.world().clone();
        for input in ["go 1", "go x 2", "go 5 1", "go 0 9", "dump 0", "close 7", "fly 2"] {
            sim.clear_events();
            assert_eq!(sim.process(input).unwrap(), Outcome::Rejected, "{input}");
            assert_eq!(sim.events().len(), 1, "{input}");
            assert!(matches!(
                sim.events().events()[0].kind,
                SimEventKind::CommandRejected
            ));
        }
        assert_eq!(sim.world(), &before);
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn close_takes_effect_without_a_tick() {
        let mut sim = quiet(4, 1, 1);
        assert!(sim.world().elevators[0].doors_open);
        sim.close(0).unwrap();
        assert!(!sim.world().elevators[0].doors_open);
        assert_eq!(sim.events().len(), 1);
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn close_interrupts_boarding_on_next_tick() {
        let mut sim = quiet(4, 1, 2);
        sim.world_mut().floors[0].enqueue(Passenger::ordinary(3));
        sim.close(0).unwrap();
        sim.tick().unwrap();
        assert!(sim.world().elevators[0].onboard.is_empty());
        assert_eq!(sim.world().floors[0].len(), 1);
    }

    #[test]
    fn direct_calls_return_the_refusal() {
        let mut sim = quiet(4, 1, 1);
        assert_eq!(
            sim.dump(0),
            Err(CommandError::NotAtPit {
                elevator: 0,
                floor: 0,
                pit: 3
            })
        );
        assert_eq!(sim.events().len(), 1);
    }

    #[test]
    fn run_stops_when_time_is_up() {
        let config = WorldConfig::default()
            .with_arrival_rate(0.0)
            .with_starting_time(5);
        let mut sim = Simulation::new(config, SimConfig::default()).unwrap();
        assert_eq!(sim.run(100).unwrap(), 5);
        assert!(sim.is_failed());
        assert_eq!(sim.world().time_remaining, 0);
    }

    #[test]
    fn engine_keeps_ticking_after_failure() {
        let config = WorldConfig::default()
            .with_arrival_rate(0.0)
            .with_starting_time(1);
        let mut sim = Simulation::new(config, SimConfig::default()).unwrap();
        sim.tick().unwrap();
        assert!(sim.is_failed());
        sim.tick().unwrap();
        assert_eq!(sim.world().time_remaining, -1);
    }

    #[test]
    fn delivery_script_event_log() {
        let mut sim = quiet(4, 1, 1);
        sim.world_mut().floors[0].enqueue(Passenger::new(PassengerKind::Vip, 2));
        sim.process("go 0 2").unwrap();
        for _ in 0..6 {
            sim.process("").unwrap();
        }
        let log = sim
            .events()
            .events()
            .iter()
            .map(|e| format!("[{}] {}", e.tick, e.description))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(log, @r"
        [0] Elevator 0 will visit floor 2.
        [1] Elevator 0 picks up a passenger at floor 0.
        [1] Elevator 0 is now full.
        [4] Elevator 0 arrives at floor 2 and opens its doors.
        [5] Elevator 0 drops off a VIP at floor 2.
        [5] VIP delivered: +11 points.
        [6] Elevator 0 closes its doors and is ready to move.
        ");
        assert_eq!(sim.world().score, 11);
        assert_eq!(sim.world().time_remaining, 44);
    }

    #[test]
    fn same_seed_same_game() {
        let play = |seed| {
            let config = WorldConfig::default().with_arrival_rate(0.8);
            let mut sim = Simulation::new(config, SimConfig::default().with_seed(seed)).unwrap();
            let mut autopilot = Autopilot::new();
            for _ in 0..40 {
                sim.consult(&mut autopilot).unwrap();
                sim.tick().unwrap();
            }
            sim.events().descriptions().map(String::from).collect::<Vec<_>>()
        };
        assert_eq!(play(9), play(9));
        assert_ne!(play(9), play(10));
    }

    #[test]
    fn autopilot_delivers_passengers() {
        let config = WorldConfig::default()
            .with_arrival_rate(0.3)
            .with_starting_time(200);
        let mut sim = Simulation::new(config, SimConfig::default().with_seed(3)).unwrap();
        let mut autopilot = Autopilot::new();
        for _ in 0..150 {
            sim.clear_events();
            sim.consult(&mut autopilot).unwrap();
            sim.tick().unwrap();
            assert_eq!(
                sim.events()
                    .count(|k| matches!(k, SimEventKind::CommandRejected)),
                0
            );
        }
        assert!(sim.world().score > 0);
    }

    #[test]
    fn snapshot_serializes_world_and_events() {
        let mut sim = quiet(3, 1, 1);
        sim.process("go 0 2").unwrap();
        let json = serde_json::to_value(sim.snapshot()).unwrap();
        assert_eq!(json["tick"], 0);
        assert_eq!(json["world"]["time_remaining"], 50);
        assert_eq!(json["world"]["elevators"][0]["destinations"][0], 2);
        assert_eq!(json["events"][0]["kind"]["type"], "destination_queued");
    }

    #[test]
    fn max_events_caps_the_log() {
        let config = WorldConfig::default().with_arrival_rate(0.0);
        let mut sim = Simulation::new(config, SimConfig::default().with_max_events(2)).unwrap();
        for floor in 0..5 {
            sim.go(0, floor).unwrap();
        }
        assert_eq!(sim.events().len(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick,
        Input(String),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Tick),
            2 => (0usize..3, 0usize..6).prop_map(|(e, f)| Op::Input(format!("go {e} {f}"))),
            1 => (0usize..3).prop_map(|e| Op::Input(format!("close {e}"))),
            1 => (0usize..3).prop_map(|e| Op::Input(format!("dump {e}"))),
        ]
    }

    proptest! {
        #[test]
        fn passengers_are_conserved_and_clock_runs_down(
            seed in any::<u64>(),
            ops in prop::collection::vec(op(), 1..80),
        ) {
            let config = WorldConfig::default()
                .with_floors(5)
                .with_elevators(2)
                .with_capacity(2)
                .with_arrival_rate(0.5)
                .with_starting_time(30);
            let mut sim = Simulation::new(config, SimConfig::default().with_seed(seed)).unwrap();
            let mut created = 0usize;
            let mut removed = 0usize;

            for op in ops {
                sim.clear_events();
                let before = sim.world().time_remaining;
                let was_failed = sim.is_failed();
                match op {
                    Op::Tick => {
                        prop_assert_eq!(sim.process("").unwrap(), Outcome::Ticked);
                        let bonus: i64 = sim
                            .events()
                            .events()
                            .iter()
                            .filter_map(|e| match e.kind {
                                SimEventKind::TimeBonus { time, .. } => Some(time),
                                _ => None,
                            })
                            .sum();
                        let after = sim.world().time_remaining;
                        prop_assert_eq!(after, before - 1 + bonus);
                        // Failure latches: set once the clock hits zero, never cleared.
                        prop_assert_eq!(sim.is_failed(), was_failed || after <= 0);
                    }
                    Op::Input(input) => {
                        sim.process(&input).unwrap();
                        prop_assert_eq!(sim.world().time_remaining, before);
                    }
                }

                for event in sim.events().events() {
                    match event.kind {
                        SimEventKind::Arrival { .. } => created += 1,
                        SimEventKind::DroppedOff { .. } => removed += 1,
                        SimEventKind::Dumped { count, .. } => removed += count,
                        _ => {}
                    }
                }
                prop_assert_eq!(sim.world().passenger_count(), created - removed);
                for car in &sim.world().elevators {
                    prop_assert!(car.onboard.len() <= car.capacity);
                    prop_assert!(car.floor < 5);
                }
            }
        }
    }
}

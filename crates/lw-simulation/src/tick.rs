//! The per-tick state machine.
//!
//! One call to [`advance`] moves the world forward by exactly one tick:
//! the clock drops by one, every elevator takes one step in index order,
//! the arrival trial runs, and the game ends if time has run out.
//!
//! Each elevator is either doors-open (unloading, then loading, then
//! closing) or doors-closed (travelling one floor per tick toward the head
//! of its destination queue). Only the passenger nearest the door may ever
//! step out; if someone further back wants this floor, the door-side
//! passenger is turned out onto the floor queue to make way.

use lw_core::{PassengerKind, World};
use rand::Rng;
use tracing::{debug, info, trace};

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::generator::{KindPool, roll_arrival};

/// Points for delivering an ordinary passenger.
pub const DELIVERY_POINTS: i64 = 1;
/// Points for delivering a VIP.
pub const VIP_BONUS: i64 = 11;
/// Time added for delivering a mechanic.
pub const MECHANIC_TIME_BONUS: i64 = 20;
/// Points lost for delivering a brick.
pub const BRICK_PENALTY: i64 = 5;

/// Advance the world by one tick.
///
/// Errors only when passenger generation hits a broken kind pool; the world
/// has already been partially advanced in that case and should be discarded.
pub fn advance<R: Rng + ?Sized>(ctx: &mut SimContext<'_, R>, pool: &KindPool) -> SimResult<()> {
    let tick = ctx.clock.advance();
    ctx.world.time_remaining -= 1;

    for index in 0..ctx.world.elevators.len() {
        step_elevator(ctx, index);
    }

    let arrival = roll_arrival(
        ctx.world.config.arrival_rate,
        ctx.world.num_floors(),
        pool,
        &mut *ctx.rng,
    )?;
    if let Some(arrival) = arrival {
        ctx.world.floors[arrival.origin].enqueue(arrival.passenger);
        let kind = arrival.passenger.kind;
        ctx.emit(
            SimEventKind::Arrival {
                floor: arrival.origin,
                target: arrival.passenger.target_floor,
                kind,
            },
            format!(
                "{} arrives at floor {}, heading for floor {}.",
                capitalize(kind.with_article()),
                arrival.origin,
                arrival.passenger.target_floor
            ),
        );
    }

    if ctx.world.time_remaining <= 0 {
        ctx.world.failed = true;
        let score = ctx.world.score;
        info!(tick, score, "time is up");
        ctx.emit(
            SimEventKind::GameOver { score },
            format!("Time is up! Final score: {score}."),
        );
    }

    debug!(
        tick,
        time_remaining = ctx.world.time_remaining,
        score = ctx.world.score,
        "tick advanced"
    );
    Ok(())
}

/// What a doors-open elevator did this tick.
enum DoorsOpenStep {
    Delivered { floor: usize, kind: PassengerKind },
    PushedBack { floor: usize, target: usize },
    Boarded { floor: usize, full: bool },
    Closed { ready: bool },
}

/// Run one step for a single elevator.
pub fn step_elevator<R: ?Sized>(ctx: &mut SimContext<'_, R>, index: usize) {
    if ctx.world.elevators[index].doors_open {
        let step = doors_open_step(ctx.world, index);
        record_doors_open(ctx, index, step);
    } else if let Some(floor) = doors_closed_step(ctx.world, index) {
        ctx.emit(
            SimEventKind::DoorsOpened {
                elevator: index,
                floor,
            },
            format!("Elevator {index} arrives at floor {floor} and opens its doors."),
        );
    }
}

fn doors_open_step(world: &mut World, index: usize) -> DoorsOpenStep {
    let elevator = &mut world.elevators[index];
    let floor = elevator.floor;
    let waiting = &mut world.floors[floor];

    // Only the door-side passenger can get out, matching or not.
    let leaving = if elevator.has_rider_for_current_floor() {
        elevator.unload_front()
    } else {
        None
    };
    if let Some(front) = leaving {
        if front.target_floor == floor {
            return DoorsOpenStep::Delivered {
                floor,
                kind: front.kind,
            };
        }
        waiting.reinsert(front);
        return DoorsOpenStep::PushedBack {
            floor,
            target: front.target_floor,
        };
    }

    let boarding = if elevator.is_full() {
        None
    } else {
        waiting.take_next()
    };
    if let Some(passenger) = boarding {
        elevator.board(passenger);
        return DoorsOpenStep::Boarded {
            floor,
            full: elevator.is_full(),
        };
    }

    elevator.doors_open = false;
    DoorsOpenStep::Closed {
        ready: elevator.destinations.is_empty(),
    }
}

/// Move one floor toward the head of the queue. Returns the floor if the
/// elevator has reached it and opened its doors.
///
/// Arriving at the head destination and opening the doors happen in the
/// same tick.
fn doors_closed_step(world: &mut World, index: usize) -> Option<usize> {
    let elevator = &mut world.elevators[index];
    let next = *elevator.destinations.front()?;

    if next < elevator.floor {
        elevator.floor -= 1;
    } else if next > elevator.floor {
        elevator.floor += 1;
    }
    trace!(elevator = index, floor = elevator.floor, next, "elevator moved");

    if elevator.floor == next {
        elevator.destinations.pop_front();
        elevator.doors_open = true;
        Some(next)
    } else {
        None
    }
}

fn record_doors_open<R: ?Sized>(ctx: &mut SimContext<'_, R>, index: usize, step: DoorsOpenStep) {
    match step {
        DoorsOpenStep::Delivered { floor, kind } => {
            ctx.emit(
                SimEventKind::DroppedOff {
                    elevator: index,
                    floor,
                    kind,
                },
                format!(
                    "Elevator {index} drops off {} at floor {floor}.",
                    kind.with_article()
                ),
            );
            score_delivery(ctx, index, kind);
        }
        DoorsOpenStep::PushedBack { floor, target } => ctx.emit(
            SimEventKind::PushedBack {
                elevator: index,
                floor,
                target,
            },
            format!(
                "A passenger for floor {target} steps off elevator {index} at floor {floor} to let others out."
            ),
        ),
        DoorsOpenStep::Boarded { floor, full } => {
            ctx.emit(
                SimEventKind::Boarded {
                    elevator: index,
                    floor,
                },
                format!("Elevator {index} picks up a passenger at floor {floor}."),
            );
            if full {
                ctx.emit(
                    SimEventKind::ElevatorFull { elevator: index },
                    format!("Elevator {index} is now full."),
                );
            }
        }
        DoorsOpenStep::Closed { ready } => {
            if ready {
                ctx.emit(
                    SimEventKind::ReadyToMove { elevator: index },
                    format!("Elevator {index} closes its doors and is ready to move."),
                );
            }
        }
    }
}

/// Apply the reward for delivering a passenger of `kind`.
fn score_delivery<R: ?Sized>(ctx: &mut SimContext<'_, R>, index: usize, kind: PassengerKind) {
    match kind {
        PassengerKind::Vip => {
            ctx.world.score += VIP_BONUS;
            ctx.emit(
                SimEventKind::BonusScore {
                    elevator: index,
                    points: VIP_BONUS,
                },
                format!("VIP delivered: +{VIP_BONUS} points."),
            );
        }
        PassengerKind::Mechanic => {
            ctx.world.time_remaining += MECHANIC_TIME_BONUS;
            ctx.emit(
                SimEventKind::TimeBonus {
                    elevator: index,
                    time: MECHANIC_TIME_BONUS,
                },
                format!("Mechanic delivered: +{MECHANIC_TIME_BONUS} time."),
            );
        }
        PassengerKind::Brick => {
            ctx.world.score -= BRICK_PENALTY;
            ctx.emit(
                SimEventKind::Penalty {
                    elevator: index,
                    points: BRICK_PENALTY,
                },
                format!("Brick delivered: -{BRICK_PENALTY} points."),
            );
        }
        PassengerKind::Passenger => ctx.world.score += DELIVERY_POINTS,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimClock;
    use crate::event::EventLog;
    use lw_core::{Passenger, WorldConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Harness {
        world: World,
        clock: SimClock,
        events: EventLog,
        rng: StdRng,
        pool: KindPool,
    }

    impl Harness {
        fn new(config: WorldConfig) -> Self {
            Self {
                world: World::new(config).unwrap(),
                clock: SimClock::new(),
                events: EventLog::new(0),
                rng: StdRng::seed_from_u64(42),
                pool: KindPool::default(),
            }
        }

        /// Quiet building: no random arrivals.
        fn quiet(floors: usize, elevators: usize, capacity: usize) -> Self {
            Self::new(
                WorldConfig::default()
                    .with_floors(floors)
                    .with_elevators(elevators)
                    .with_capacity(capacity)
                    .with_arrival_rate(0.0)
                    .with_starting_time(100),
            )
        }

        fn tick(&mut self) {
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &mut self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            advance(&mut ctx, &self.pool).unwrap();
        }

        fn count(&self, pred: impl Fn(&SimEventKind) -> bool) -> usize {
            self.events.count(pred)
        }
    }

    #[test]
    fn clock_runs_down_and_ends_game() {
        let mut h = Harness::new(
            WorldConfig::default()
                .with_arrival_rate(0.0)
                .with_starting_time(3),
        );
        h.tick();
        h.tick();
        assert_eq!(h.world.time_remaining, 1);
        assert!(!h.world.failed);
        h.tick();
        assert_eq!(h.world.time_remaining, 0);
        assert!(h.world.failed);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::GameOver { score: 0 })), 1);
        assert_eq!(h.clock.tick(), 3);
    }

    #[test]
    fn boarding_fills_single_seat_elevator() {
        let mut h = Harness::quiet(3, 1, 1);
        h.world.floors[0].enqueue(Passenger::ordinary(2));
        h.tick();
        let elevator = &h.world.elevators[0];
        assert_eq!(elevator.onboard.len(), 1);
        assert!(elevator.doors_open);
        assert!(h.world.floors[0].is_empty());
        assert_eq!(h.count(|k| matches!(k, SimEventKind::ElevatorFull { elevator: 0 })), 1);
    }

    #[test]
    fn boarding_with_room_left_is_not_full() {
        let mut h = Harness::quiet(3, 1, 2);
        h.world.floors[0].enqueue(Passenger::ordinary(2));
        h.tick();
        assert_eq!(h.world.elevators[0].onboard.len(), 1);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::ElevatorFull { .. })), 0);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::Boarded { .. })), 1);
    }

    #[test]
    fn boarding_takes_front_of_floor_queue_onto_door_side() {
        let mut h = Harness::quiet(5, 1, 3);
        h.world.floors[0].enqueue(Passenger::ordinary(2));
        h.world.floors[0].enqueue(Passenger::ordinary(4));
        h.tick();
        h.tick();
        let onboard: Vec<_> = h.world.elevators[0]
            .onboard
            .iter()
            .map(|p| p.target_floor)
            .collect();
        assert_eq!(onboard, vec![4, 2]);
    }

    #[test]
    fn travels_one_floor_per_tick_and_opens_on_arrival() {
        let mut h = Harness::quiet(5, 1, 1);
        let elevator = &mut h.world.elevators[0];
        elevator.doors_open = false;
        elevator.queue_destination(3);

        h.tick();
        assert_eq!(h.world.elevators[0].floor, 1);
        h.tick();
        assert_eq!(h.world.elevators[0].floor, 2);
        assert!(!h.world.elevators[0].doors_open);
        h.tick();

        let elevator = &h.world.elevators[0];
        assert_eq!(elevator.floor, 3);
        assert!(elevator.doors_open);
        assert!(elevator.destinations.is_empty());
        assert_eq!(
            h.count(|k| matches!(k, SimEventKind::DoorsOpened { floor: 3, .. })),
            1
        );
    }

    #[test]
    fn travels_down() {
        let mut h = Harness::quiet(5, 1, 1);
        let elevator = &mut h.world.elevators[0];
        elevator.floor = 4;
        elevator.doors_open = false;
        elevator.queue_destination(2);
        h.tick();
        assert_eq!(h.world.elevators[0].floor, 3);
        h.tick();
        assert_eq!(h.world.elevators[0].floor, 2);
        assert!(h.world.elevators[0].doors_open);
    }

    #[test]
    fn destination_at_current_floor_opens_in_place() {
        let mut h = Harness::quiet(4, 1, 1);
        let elevator = &mut h.world.elevators[0];
        elevator.floor = 2;
        elevator.doors_open = false;
        elevator.queue_destination(2);
        elevator.queue_destination(0);
        h.tick();
        let elevator = &h.world.elevators[0];
        assert_eq!(elevator.floor, 2);
        assert!(elevator.doors_open);
        assert_eq!(elevator.destinations, [0]);
    }

    #[test]
    fn idle_elevator_stays_put() {
        let mut h = Harness::quiet(4, 1, 1);
        h.world.elevators[0].doors_open = false;
        let before = h.world.elevators[0].clone();
        h.tick();
        assert_eq!(h.world.elevators[0], before);
        assert!(h.events.events_for_elevator(0).is_empty());
    }

    #[test]
    fn empty_floor_closes_doors() {
        let mut h = Harness::quiet(4, 2, 1);
        h.world.elevators[1].queue_destination(3);
        h.tick();
        assert!(!h.world.elevators[0].doors_open);
        assert!(!h.world.elevators[1].doors_open);
        // Only the elevator with nowhere to go reports ready.
        let ready: Vec<_> = h
            .events
            .events()
            .iter()
            .filter_map(|e| match e.kind {
                SimEventKind::ReadyToMove { elevator } => Some(elevator),
                _ => None,
            })
            .collect();
        assert_eq!(ready, vec![0]);
    }

    #[test]
    fn full_elevator_closes_instead_of_boarding() {
        let mut h = Harness::quiet(4, 1, 1);
        h.world.elevators[0].board(Passenger::ordinary(3));
        h.world.floors[0].enqueue(Passenger::ordinary(2));
        h.tick();
        assert!(!h.world.elevators[0].doors_open);
        assert_eq!(h.world.floors[0].len(), 1);
    }

    #[test]
    fn vip_delivery_scores_bonus() {
        let mut h = Harness::quiet(4, 1, 2);
        h.world.elevators[0].floor = 2;
        h.world.elevators[0].board(Passenger::new(PassengerKind::Vip, 2));
        h.tick();
        assert_eq!(h.world.score, VIP_BONUS);
        assert!(h.world.elevators[0].onboard.is_empty());
        assert_eq!(h.count(|k| matches!(k, SimEventKind::BonusScore { points: 11, .. })), 1);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::DroppedOff { .. })), 1);
    }

    #[test]
    fn mechanic_delivery_adds_time() {
        let mut h = Harness::quiet(4, 1, 2);
        h.world.elevators[0].board(Passenger::new(PassengerKind::Mechanic, 0));
        h.tick();
        assert_eq!(h.world.time_remaining, 100 - 1 + MECHANIC_TIME_BONUS);
        assert_eq!(h.world.score, 0);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::TimeBonus { time: 20, .. })), 1);
    }

    #[test]
    fn mechanic_on_last_tick_saves_the_game() {
        let mut h = Harness::new(
            WorldConfig::default()
                .with_arrival_rate(0.0)
                .with_starting_time(1),
        );
        h.world.elevators[0].board(Passenger::new(PassengerKind::Mechanic, 0));
        h.tick();
        assert_eq!(h.world.time_remaining, MECHANIC_TIME_BONUS);
        assert!(!h.world.failed);
    }

    #[test]
    fn brick_delivery_costs_points() {
        let mut h = Harness::quiet(4, 1, 2);
        h.world.elevators[0].board(Passenger::new(PassengerKind::Brick, 0));
        h.tick();
        assert_eq!(h.world.score, -BRICK_PENALTY);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::Penalty { points: 5, .. })), 1);
    }

    #[test]
    fn ordinary_delivery_scores_one_without_bonus_events() {
        let mut h = Harness::quiet(4, 1, 2);
        h.world.elevators[0].board(Passenger::ordinary(0));
        h.tick();
        assert_eq!(h.world.score, DELIVERY_POINTS);
        assert_eq!(h.events.len(), 1);
        assert!(matches!(
            h.events.events()[0].kind,
            SimEventKind::DroppedOff {
                kind: PassengerKind::Passenger,
                ..
            }
        ));
    }

    #[test]
    fn only_door_side_passenger_may_exit() {
        let mut h = Harness::quiet(5, 1, 3);
        h.world.elevators[0].floor = 1;
        h.world.floors[1].enqueue(Passenger::ordinary(0));
        // Boarded first, so deepest in the car.
        h.world.elevators[0].board(Passenger::ordinary(1));
        h.world.elevators[0].board(Passenger::ordinary(4));

        h.tick();
        let elevator = &h.world.elevators[0];
        assert_eq!(elevator.onboard.len(), 1);
        assert_eq!(elevator.onboard[0].target_floor, 1);
        // Pushed-back rider jumps ahead of the existing queue.
        let queue: Vec<_> = h.world.floors[1].waiting.iter().map(|p| p.target_floor).collect();
        assert_eq!(queue, vec![4, 0]);
        assert_eq!(h.world.score, 0);
        assert_eq!(h.count(|k| matches!(k, SimEventKind::PushedBack { target: 4, .. })), 1);

        h.tick();
        assert!(h.world.elevators[0].onboard.is_empty());
        assert_eq!(h.world.score, DELIVERY_POINTS);
    }

    #[test]
    fn rider_with_no_match_is_not_evicted() {
        let mut h = Harness::quiet(5, 1, 3);
        h.world.elevators[0].board(Passenger::ordinary(3));
        h.tick();
        assert_eq!(h.world.elevators[0].onboard.len(), 1);
        assert!(!h.world.elevators[0].doors_open);
    }

    #[test]
    fn elevators_step_in_index_order() {
        let mut h = Harness::quiet(4, 3, 1);
        h.tick();
        let order: Vec<_> = h
            .events
            .events()
            .iter()
            .filter_map(|e| e.kind.elevator())
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn arrival_joins_back_of_origin_queue() {
        let mut h = Harness::new(
            WorldConfig::default()
                .with_floors(3)
                .with_elevators(1)
                .with_arrival_rate(1.0),
        );
        // Park the elevator so it does not board anyone.
        h.world.elevators[0].doors_open = false;
        let marker = Passenger::new(PassengerKind::Brick, 99);
        for floor in &mut h.world.floors {
            floor.enqueue(marker);
        }
        h.tick();

        let arrivals: Vec<_> = h
            .events
            .events()
            .iter()
            .filter_map(|e| match e.kind {
                SimEventKind::Arrival { floor, .. } => Some(floor),
                _ => None,
            })
            .collect();
        assert_eq!(arrivals.len(), 1);
        let queue = &h.world.floors[arrivals[0]].waiting;
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0], marker);
        assert_ne!(queue[1].target_floor, arrivals[0]);
    }

    #[test]
    fn broken_pool_surfaces_as_error() {
        let mut h = Harness::new(WorldConfig::default().with_arrival_rate(1.0));
        h.pool = KindPool::new(vec![(PassengerKind::Passenger, 0)]);
        let mut ctx = SimContext {
            world: &mut h.world,
            clock: &mut h.clock,
            events: &mut h.events,
            rng: &mut h.rng,
        };
        let result = advance(&mut ctx, &h.pool);
        assert!(matches!(result, Err(crate::SimError::EmptyKindPool)));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("a VIP"), "A VIP");
        assert_eq!(capitalize(""), "");
    }
}

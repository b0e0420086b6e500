use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::passenger::Passenger;

/// A single elevator car.
///
/// `onboard` is a stack: index 0 is the passenger nearest the door, i.e. the
/// most recently boarded one and the only one allowed to step out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// Current floor index.
    pub floor: usize,
    /// Whether the doors are open.
    pub doors_open: bool,
    /// Queued floors to visit, in order. Duplicates are allowed.
    pub destinations: VecDeque<usize>,
    /// Maximum number of passengers onboard.
    pub capacity: usize,
    /// Passengers inside, door side first.
    pub onboard: VecDeque<Passenger>,
}

impl Elevator {
    /// An empty elevator parked at floor 0 with its doors open.
    pub fn new(capacity: usize) -> Self {
        Self {
            floor: 0,
            doors_open: true,
            destinations: VecDeque::new(),
            capacity,
            onboard: VecDeque::new(),
        }
    }

    /// Returns `true` if no more passengers fit.
    pub fn is_full(&self) -> bool {
        self.onboard.len() >= self.capacity
    }

    /// Returns `true` if doors are closed and nothing is queued.
    pub fn is_idle(&self) -> bool {
        !self.doors_open && self.destinations.is_empty()
    }

    /// Whether any onboard passenger wants the current floor.
    pub fn has_rider_for_current_floor(&self) -> bool {
        self.onboard.iter().any(|p| p.target_floor == self.floor)
    }

    /// Board a passenger on the door side.
    pub fn board(&mut self, passenger: Passenger) {
        self.onboard.push_front(passenger);
    }

    /// Remove the passenger nearest the door.
    pub fn unload_front(&mut self) -> Option<Passenger> {
        self.onboard.pop_front()
    }

    /// Append a floor to the destination queue.
    pub fn queue_destination(&mut self, floor: usize) {
        self.destinations.push_back(floor);
    }
}

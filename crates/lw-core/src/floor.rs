use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::passenger::Passenger;

/// A floor and the passengers queued on it.
///
/// New arrivals join at the back. Passengers turned out of an elevator are
/// put back at the front, ahead of everyone already waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Waiting passengers, front of the queue first.
    pub waiting: VecDeque<Passenger>,
}

impl Floor {
    /// An empty floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly arrived passenger at the back of the queue.
    pub fn enqueue(&mut self, passenger: Passenger) {
        self.waiting.push_back(passenger);
    }

    /// Put a displaced passenger back at the front of the queue.
    pub fn reinsert(&mut self, passenger: Passenger) {
        self.waiting.push_front(passenger);
    }

    /// Take the passenger at the front of the queue.
    pub fn take_next(&mut self) -> Option<Passenger> {
        self.waiting.pop_front()
    }

    /// Number of waiting passengers.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Returns `true` if nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

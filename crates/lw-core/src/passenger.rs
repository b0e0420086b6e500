//! Passengers and the kinds that determine their value on delivery.

use serde::{Deserialize, Serialize};

/// What kind of rider a passenger is. The kind decides the delivery reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerKind {
    /// An ordinary rider, worth one point.
    Passenger,
    /// Dead weight. Delivering one costs points.
    Brick,
    /// A valued rider worth a large bonus.
    Vip,
    /// Extends the remaining time when delivered.
    Mechanic,
}

impl PassengerKind {
    /// The kind's name prefixed with an indefinite article, for event text.
    pub fn with_article(self) -> &'static str {
        match self {
            Self::Passenger => "a passenger",
            Self::Brick => "a brick",
            Self::Vip => "a VIP",
            Self::Mechanic => "a mechanic",
        }
    }
}

impl std::fmt::Display for PassengerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passenger => write!(f, "passenger"),
            Self::Brick => write!(f, "brick"),
            Self::Vip => write!(f, "VIP"),
            Self::Mechanic => write!(f, "mechanic"),
        }
    }
}

/// A single rider. Fields never change after creation; only the container
/// holding the passenger does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// The passenger's kind.
    pub kind: PassengerKind,
    /// The floor index the passenger wants to reach.
    pub target_floor: usize,
}

impl Passenger {
    /// Create a passenger of the given kind bound for `target_floor`.
    pub fn new(kind: PassengerKind, target_floor: usize) -> Self {
        Self { kind, target_floor }
    }

    /// An ordinary passenger bound for `target_floor`.
    pub fn ordinary(target_floor: usize) -> Self {
        Self::new(PassengerKind::Passenger, target_floor)
    }
}

//! Weighted random passenger generation.
//!
//! Each tick runs one Bernoulli trial at the world's arrival rate. On
//! success a passenger is created on a uniformly chosen floor, bound for a
//! uniformly chosen *different* floor, with a kind picked from a weighted
//! pool.

use lw_core::{Passenger, PassengerKind};
use rand::Rng;

use crate::error::{SimError, SimResult};

/// Weighted pool that passenger kinds are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindPool {
    entries: Vec<(PassengerKind, u32)>,
}

impl Default for KindPool {
    /// Ordinary 10, brick 0, VIP 3, mechanic 1.
    fn default() -> Self {
        Self::new(vec![
            (PassengerKind::Passenger, 10),
            (PassengerKind::Brick, 0),
            (PassengerKind::Vip, 3),
            (PassengerKind::Mechanic, 1),
        ])
    }
}

impl KindPool {
    /// Build a pool from `(kind, weight)` entries, walked in the given order.
    pub fn new(entries: Vec<(PassengerKind, u32)>) -> Self {
        Self { entries }
    }

    /// The pool entries in walk order.
    pub fn entries(&self) -> &[(PassengerKind, u32)] {
        &self.entries
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|(_, w)| *w).sum()
    }

    /// Combined weight of every entry for `kind`.
    pub fn weight_of(&self, kind: PassengerKind) -> u32 {
        self.entries
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, w)| *w)
            .sum()
    }

    /// Draw one kind with probability proportional to its weight.
    ///
    /// A zero total weight, or a walk that selects nothing, is an engine
    /// error rather than a player error.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<PassengerKind> {
        let total = self.total_weight();
        if total == 0 {
            return Err(SimError::EmptyKindPool);
        }
        let roll = rng.random_range(0..total);
        self.select(roll)
            .ok_or(SimError::WeightedDrawMissed { roll, total })
    }

    /// Walk the pool, subtracting weights until `roll` falls inside an entry.
    pub(crate) fn select(&self, roll: u32) -> Option<PassengerKind> {
        let mut remaining = roll;
        for &(kind, weight) in &self.entries {
            if remaining < weight {
                return Some(kind);
            }
            remaining -= weight;
        }
        None
    }
}

/// A freshly generated passenger and the floor they appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// Where the passenger starts waiting.
    pub origin: usize,
    /// The new passenger.
    pub passenger: Passenger,
}

/// Generate one passenger for a building with `num_floors` floors.
///
/// The target is drawn from the `num_floors - 1` floors other than the
/// origin, then shifted up past the origin.
pub fn generate_arrival<R: Rng + ?Sized>(
    num_floors: usize,
    pool: &KindPool,
    rng: &mut R,
) -> SimResult<Arrival> {
    if num_floors < 2 {
        return Err(SimError::NoDestination { floors: num_floors });
    }
    let origin = rng.random_range(0..num_floors);
    let mut target = rng.random_range(0..num_floors - 1);
    if target >= origin {
        target += 1;
    }
    let kind = pool.draw(rng)?;
    Ok(Arrival {
        origin,
        passenger: Passenger::new(kind, target),
    })
}

/// Run the per-tick arrival trial and generate a passenger on success.
pub fn roll_arrival<R: Rng + ?Sized>(
    arrival_rate: f64,
    num_floors: usize,
    pool: &KindPool,
    rng: &mut R,
) -> SimResult<Option<Arrival>> {
    let p = if arrival_rate.is_nan() {
        0.0
    } else {
        arrival_rate.clamp(0.0, 1.0)
    };
    if !rng.random_bool(p) {
        return Ok(None);
    }
    generate_arrival(num_floors, pool, rng).map(Some)
}

use super::Location;
use std::hash::{Hash, Hasher};

/// Damage at which a protagonist dies or a hostage turns.
pub const LETHAL_DAMAGE: i32 = 100;

/// Damage from which a hostage is one passive step away from turning.
pub const CRITICAL_DAMAGE: i32 = 98;

/// The rescuer. Capacity moves by one per carry or drop and never leaves
/// `0..=original_capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Protagonist {
    pub location: Location,
    damage: i32,
    capacity: usize,
    original_capacity: usize,
}

impl Protagonist {
    pub fn new(location: Location, capacity: usize) -> Self {
        Protagonist {
            location,
            damage: 0,
            capacity,
            original_capacity: capacity,
        }
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Apply a damage delta, clamped at zero on the low end.
    pub fn adjust_damage(&mut self, delta: i32) {
        self.damage = (self.damage + delta).max(0);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn original_capacity(&self) -> usize {
        self.original_capacity
    }

    pub fn can_carry(&self) -> bool {
        self.capacity > 0
    }

    pub fn is_dead(&self) -> bool {
        self.damage >= LETHAL_DAMAGE
    }

    pub(crate) fn take_one(&mut self) {
        debug_assert!(self.capacity > 0, "carry with no capacity left");
        self.capacity = self.capacity.saturating_sub(1);
    }

    pub(crate) fn release_one(&mut self) {
        debug_assert!(self.capacity < self.original_capacity, "drop beyond capacity");
        self.capacity = (self.capacity + 1).min(self.original_capacity);
    }
}

/// A hostage with a stable id.
///
/// Equality ignores the exact damage and only looks at the
/// alive/dead bucket, so two states that differ only in how hurt a hostage
/// is collapse into one during deduplication.
#[derive(Debug, Clone)]
pub struct Hostage {
    id: usize,
    pub location: Location,
    pub damage: i32,
    pub carried: bool,
}

impl Hostage {
    pub fn new(id: usize, location: Location, damage: i32) -> Self {
        Hostage {
            id,
            location,
            damage,
            carried: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.damage < LETHAL_DAMAGE
    }

    pub fn is_critical(&self) -> bool {
        self.damage >= CRITICAL_DAMAGE
    }
}

impl PartialEq for Hostage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.location == other.location
            && self.carried == other.carried
            && self.is_alive() == other.is_alive()
    }
}

impl Eq for Hostage {}

impl Hash for Hostage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.location.hash(state);
        self.carried.hash(state);
        self.is_alive().hash(state);
    }
}

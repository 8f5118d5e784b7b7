//! Fixed-capacity path of directions through nested 3×3 grids.

use std::fmt;

use super::direction::Direction;
use super::types::{NormalizedRegion, Vec2};

/// Deepest survey an address tracks relative to its front slot.
pub const MAX_SURVEY: usize = 2;

/// Number of slots in a [`DirectionAddress`].
pub const CAPACITY: usize = MAX_SURVEY + 1;

/// A left-packed window of at most [`CAPACITY`] directions.
///
/// Defined slots always occupy the front of the array contiguously. The
/// front slot is processed first by [`area`](Self::area), so it receives
/// the coarsest subdivision; each following slot divides by three again.
///
/// [`detail`](Self::detail) pushes onto the front and [`reduce`](Self::reduce)
/// pops from the front, so the pair undo each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionAddress {
    slots: [Option<Direction>; CAPACITY],
}

impl DirectionAddress {
    /// An empty address (the whole map).
    pub const fn new() -> Self {
        Self {
            slots: [None; CAPACITY],
        }
    }

    /// Build an address from directions listed front to back.
    ///
    /// Returns `None` if more than [`CAPACITY`] directions are given.
    pub fn from_slice(directions: &[Direction]) -> Option<Self> {
        if directions.len() > CAPACITY {
            return None;
        }
        let mut address = Self::new();
        for (slot, d) in address.slots.iter_mut().zip(directions) {
            *slot = Some(*d);
        }
        Some(address)
    }

    /// Reset every slot.
    pub fn clear(&mut self) {
        self.slots = [None; CAPACITY];
    }

    /// Number of defined slots.
    pub fn survey(&self) -> usize {
        self.slots.iter().take_while(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.slots[CAPACITY - 1].is_some()
    }

    /// The front slot, if any.
    pub fn front(&self) -> Option<Direction> {
        self.slots[0]
    }

    /// Defined directions, front to back.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.slots.iter().map_while(|s| *s)
    }

    /// Push a direction onto the front, shifting the others back.
    ///
    /// Returns `false` without touching the address when the back slot is
    /// already taken.
    pub fn detail(&mut self, d: Direction) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots.copy_within(0..CAPACITY - 1, 1);
        self.slots[0] = Some(d);
        true
    }

    /// Pop the front direction, shifting the others forward.
    ///
    /// Returns `None` (and changes nothing) for an empty address.
    pub fn reduce(&mut self) -> Option<Direction> {
        let front = self.slots[0];
        self.slots.copy_within(1..CAPACITY, 0);
        self.slots[CAPACITY - 1] = None;
        front
    }

    /// Detail a direction, discarding the back slot first when full.
    ///
    /// Used to follow an unbounded descent while keeping only the most
    /// recent [`CAPACITY`] steps.
    pub fn advance(&mut self, d: Direction) {
        if self.is_full() {
            self.slots[CAPACITY - 1] = None;
        }
        let pushed = self.detail(d);
        debug_assert!(pushed);
    }

    /// Address holding only the front direction.
    ///
    /// Its [`area`](Self::area) is the cell of the last step relative to
    /// the parent it was taken from.
    pub fn step(&self) -> Self {
        let mut step = Self::new();
        step.slots[0] = self.slots[0];
        step
    }

    /// Normalized area of the whole map addressed by this path.
    pub fn area(&self) -> NormalizedRegion {
        self.area_from(Vec2::ZERO, 1.0)
    }

    /// Normalized area starting from an arbitrary square.
    ///
    /// An empty address returns the start square unchanged. Otherwise the
    /// front direction selects one ninth of the start square and the rest
    /// of the address is resolved inside it.
    pub fn area_from(&self, start_center: Vec2, start_size: f64) -> NormalizedRegion {
        debug_assert!((-1.0..=1.0).contains(&start_center.x));
        debug_assert!((-1.0..=1.0).contains(&start_center.y));
        debug_assert!(start_size > 0.0 && start_size <= 1.0);

        let mut rest = *self;
        let Some(d) = rest.reduce() else {
            return NormalizedRegion::new(start_center, start_size);
        };

        let size = start_size / 3.0;
        let center = start_center + d.shift_vector() * size;
        rest.area_from(center, size)
    }

    /// Decimal path id: the code of slot `i` is digit `i`, least
    /// significant first. An empty address is `-1`.
    pub fn path_id(&self) -> i64 {
        if self.is_empty() {
            return -1;
        }
        self.iter()
            .zip(std::iter::successors(Some(1_i64), |p| Some(p * 10)))
            .map(|(d, pow)| i64::from(d.code()) * pow)
            .sum()
    }
}

impl From<Direction> for DirectionAddress {
    fn from(d: Direction) -> Self {
        let mut address = Self::new();
        address.slots[0] = Some(d);
        address
    }
}

impl From<DirectionAddress> for i64 {
    fn from(address: DirectionAddress) -> Self {
        address.path_id()
    }
}

impl fmt::Display for DirectionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

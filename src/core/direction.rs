//! Direction of travel for a completed transition.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Classification of a completed transition.
///
/// Every machine starts out `Forward`. After that the value is recomputed
/// only when a transition is actually applied, by asking the new state how
/// it relates to the state it replaced.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Direction;
///
/// assert_eq!(Direction::between(&3, &1), Direction::Forward);
/// assert_eq!(Direction::between(&1, &3), Direction::Back);
/// assert_eq!(Direction::between(&2, &2), Direction::Idle);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Moved ahead (e.g. the next step of a wizard).
    #[default]
    Forward,

    /// Moved backwards.
    Back,

    /// No real movement: same position, or states with no relative order.
    Idle,
}

impl Direction {
    /// Map the ordering of `new` relative to `previous` onto a direction.
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Forward,
            Ordering::Less => Self::Back,
            Ordering::Equal => Self::Idle,
        }
    }

    /// Direction for totally ordered positions, where higher is further ahead.
    pub fn between<T: Ord + ?Sized>(new: &T, previous: &T) -> Self {
        Self::from_ordering(new.cmp(previous))
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }

    pub fn is_back(self) -> bool {
        matches!(self, Self::Back)
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

//! Core State trait for machine states.
//!
//! The engine imposes no structure on states beyond equality, cloning and
//! the ability to say which way a transition went.

use super::direction::Direction;
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: the machine keeps both the current and the previous state
/// - `PartialEq`: states must be distinguishable from one another
/// - `Debug`: states appear in diagnostics
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Direction, State};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Step {
///     Welcome,
///     Account,
///     Done,
///     Help,
/// }
///
/// impl Step {
///     fn index(&self) -> Option<u8> {
///         match self {
///             Self::Welcome => Some(0),
///             Self::Account => Some(1),
///             Self::Done => Some(2),
///             Self::Help => None,
///         }
///     }
/// }
///
/// impl State for Step {
///     fn determine_direction(&self, previous: &Self) -> Direction {
///         match (self.index(), previous.index()) {
///             (Some(new), Some(old)) => Direction::between(&new, &old),
///             _ => Direction::Idle,
///         }
///     }
/// }
///
/// assert_eq!(Step::Account.determine_direction(&Step::Welcome), Direction::Forward);
/// assert_eq!(Step::Help.determine_direction(&Step::Account), Direction::Idle);
/// ```
pub trait State: Clone + PartialEq + Debug {
    /// Classify a transition that arrived at `self` from `previous`.
    ///
    /// Must be pure: the machine calls it once per applied transition with
    /// the new state as receiver and the replaced state as argument.
    fn determine_direction(&self, previous: &Self) -> Direction;
}

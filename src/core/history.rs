//! In-memory transition history.
//!
//! A machine only records history when asked to (`Machine::with_history`).
//! Records are kept in memory for the lifetime of the machine.

use super::direction::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Direction, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: 1,
///     to: 2,
///     direction: Direction::Forward,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Direction reported by the new state
    pub direction: Direction,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl<S> TransitionRecord<S> {
    /// Record a transition applied now.
    pub fn now(from: S, to: S, direction: Direction) -> Self {
        Self {
            from,
            to,
            direction,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Direction, StateHistory, TransitionRecord};
///
/// let mut history = StateHistory::new();
/// history.record(TransitionRecord::now("start", "middle", Direction::Forward));
/// history.record(TransitionRecord::now("middle", "end", Direction::Forward));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&"start", &"middle", &"end"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory<S> {
    transitions: Vec<TransitionRecord<S>>,
}

impl<S> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: TransitionRecord<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first record, then the `to` state of
    /// every record in order. Empty when nothing has been recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.last()
    }

    /// Get all transitions in the order they were applied.
    pub fn transitions(&self) -> &[TransitionRecord<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Forget every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

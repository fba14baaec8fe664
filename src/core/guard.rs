//! Guard predicates for declarative transition rules.
//!
//! Guards are pure boolean functions over the current state and the incoming
//! event. They let a single `(state, event)` pair map to different rules
//! without pushing branching into the effect.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a rule applies.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Guard;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// // Only let a "close" request through when the door is open
/// let closable = Guard::new(|state: &Door, force: &bool| *state == Door::Open || *force);
///
/// assert!(closable.check(&Door::Open, &false));
/// assert!(!closable.check(&Door::Closed, &false));
/// assert!(closable.check(&Door::Closed, &true));
/// ```
pub struct Guard<S, E> {
    predicate: Arc<dyn Fn(&S, &E) -> bool + Send + Sync>,
}

impl<S, E> Guard<S, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe, since schemas
    /// built from guards are shared between machines.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that only looks at the state.
    pub fn on_state<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
        S: 'static,
        E: 'static,
    {
        Self::new(move |state, _| predicate(state))
    }

    /// Check whether the guard lets `event` through while in `state`.
    pub fn check(&self, state: &S, event: &E) -> bool {
        (self.predicate)(state, event)
    }
}

impl<S, E> Clone for Guard<S, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, E> fmt::Debug for Guard<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

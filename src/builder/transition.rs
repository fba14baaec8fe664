//! Builder for declarative transition rules.

use crate::builder::error::BuildError;
use crate::core::Guard;
use std::fmt;
use std::sync::Arc;

/// Shared action computing the next state from the interactor.
pub type TransitionAction<S, I> = Arc<dyn Fn(&I) -> S + Send + Sync>;

/// One row of a transition table: in state `from`, on `event`, if `guard`
/// allows it, run `action`.
pub struct Transition<S, E, I: ?Sized> {
    pub from: S,
    pub event: E,
    pub guard: Option<Guard<S, E>>,
    pub action: TransitionAction<S, I>,
}

impl<S: PartialEq, E: PartialEq, I: ?Sized> Transition<S, E, I> {
    /// Check if this rule applies to the pair (pure).
    pub fn can_execute(&self, state: &S, event: &E) -> bool {
        if *state != self.from || *event != self.event {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(state, event))
    }
}

impl<S: Clone, E: Clone, I: ?Sized> Clone for Transition<S, E, I> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            guard: self.guard.clone(),
            action: Arc::clone(&self.action),
        }
    }
}

impl<S: fmt::Debug, E: fmt::Debug, I: ?Sized> fmt::Debug for Transition<S, E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, E, I: ?Sized> {
    from: Option<S>,
    event: Option<E>,
    guard: Option<Guard<S, E>>,
    action: Option<TransitionAction<S, I>>,
}

impl<S, E, I: ?Sized> TransitionBuilder<S, E, I> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Move to a fixed state without consulting the interactor.
    pub fn to(self, state: S) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.action(move |_: &I| state.clone())
    }

    /// Compute the target state from the interactor.
    ///
    /// The action runs once per applied transition and may have side effects
    /// on the interactor.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&I) -> S + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<S, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E, I>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let action = self.action.ok_or(BuildError::MissingTarget)?;

        Ok(Transition {
            from,
            event,
            guard: self.guard,
            action,
        })
    }
}

impl<S, E, I: ?Sized> Default for TransitionBuilder<S, E, I> {
    fn default() -> Self {
        Self::new()
    }
}

//! Immutable transition schemas.
//!
//! A schema pairs an initial state with a transition function. The function
//! is only a lookup: given the current state and an event it says whether a
//! transition exists, and if so hands back the [`Effect`] that computes the
//! next state from the interactor. All side effects belong to the effect.

use std::fmt;
use std::sync::Arc;

/// Deferred work for one transition: consumes the interactor's borrow and
/// yields the next state. Invoked at most once.
pub type Effect<S, I> = Box<dyn FnOnce(&I) -> S>;

/// Lookup from `(state, event)` to an optional effect.
pub type TransitionLogic<S, E, I> = dyn Fn(&S, &E) -> Option<Effect<S, I>> + Send + Sync;

/// Effect that moves to `state` without touching the interactor.
///
/// # Example
///
/// ```rust
/// use waypoint::schema::{goto, Schema};
///
/// let schema: Schema<u8, char, ()> = Schema::new(0, |state, event| match (state, event) {
///     (0, 'n') => goto(1),
///     _ => None,
/// });
/// assert!(schema.defines(&0, &'n'));
/// ```
pub fn goto<S: 'static, I: ?Sized>(state: S) -> Option<Effect<S, I>> {
    Some(Box::new(move |_: &I| state))
}

/// Effect computed from the interactor.
pub fn effect<S, I, F>(f: F) -> Option<Effect<S, I>>
where
    I: ?Sized,
    F: FnOnce(&I) -> S + 'static,
{
    Some(Box::new(f))
}

/// Immutable description of a machine's behavior.
///
/// Cloning is cheap: the transition function is shared, only the initial
/// state is copied. No validation happens at construction; pairs the
/// function does not cover are simply ignored by machines at runtime.
///
/// # Example
///
/// ```rust
/// use waypoint::schema::{goto, Schema};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Turnstile { Locked, Unlocked }
///
/// enum Input { Coin, Push }
///
/// let schema: Schema<Turnstile, Input, ()> =
///     Schema::new(Turnstile::Locked, |state, event| match (state, event) {
///         (Turnstile::Locked, Input::Coin) => goto(Turnstile::Unlocked),
///         (Turnstile::Unlocked, Input::Push) => goto(Turnstile::Locked),
///         _ => None,
///     });
///
/// assert_eq!(schema.initial_state(), &Turnstile::Locked);
/// assert!(!schema.defines(&Turnstile::Locked, &Input::Push));
/// ```
pub struct Schema<S, E, I: ?Sized> {
    initial_state: S,
    logic: Arc<TransitionLogic<S, E, I>>,
}

impl<S, E, I: ?Sized> Schema<S, E, I> {
    pub fn new<F>(initial_state: S, transition_logic: F) -> Self
    where
        F: Fn(&S, &E) -> Option<Effect<S, I>> + Send + Sync + 'static,
    {
        Self {
            initial_state,
            logic: Arc::new(transition_logic),
        }
    }

    /// Build from an already shared transition function.
    pub fn from_shared(initial_state: S, transition_logic: Arc<TransitionLogic<S, E, I>>) -> Self {
        Self {
            initial_state,
            logic: transition_logic,
        }
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Look up the effect for `event` in `state`.
    pub fn transition(&self, state: &S, event: &E) -> Option<Effect<S, I>> {
        (self.logic)(state, event)
    }

    /// Whether a transition exists for the pair. The effect is not run.
    pub fn defines(&self, state: &S, event: &E) -> bool {
        self.transition(state, event).is_some()
    }

    /// Same transitions, different starting point.
    pub fn with_initial_state(&self, initial_state: S) -> Self {
        Self {
            initial_state,
            logic: Arc::clone(&self.logic),
        }
    }
}

impl<S: Clone, E, I: ?Sized> Clone for Schema<S, E, I> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
            logic: Arc::clone(&self.logic),
        }
    }
}

impl<S: fmt::Debug, E, I: ?Sized> fmt::Debug for Schema<S, E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

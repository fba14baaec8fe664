//! Builder for table-driven schemas.

use crate::builder::error::BuildError;
use crate::builder::transition::{Transition, TransitionBuilder};
use crate::schema::{Effect, Schema};
use std::fmt::Debug;
use std::sync::Arc;

/// Builder for constructing schemas from a list of transitions.
///
/// Rules are consulted in the order they were added; the first one whose
/// source state, event and guard all match supplies the effect.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::{SchemaBuilder, TransitionBuilder};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Turnstile { Locked, Unlocked }
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Input { Coin, Push }
///
/// let schema = SchemaBuilder::<Turnstile, Input, ()>::new()
///     .initial(Turnstile::Locked)
///     .transition(
///         TransitionBuilder::new()
///             .from(Turnstile::Locked)
///             .on(Input::Coin)
///             .to(Turnstile::Unlocked),
///     )?
///     .transition(
///         TransitionBuilder::new()
///             .from(Turnstile::Unlocked)
///             .on(Input::Push)
///             .to(Turnstile::Locked),
///     )?
///     .build()?;
///
/// assert!(schema.defines(&Turnstile::Locked, &Input::Coin));
/// assert!(!schema.defines(&Turnstile::Locked, &Input::Push));
/// # Ok::<(), waypoint::builder::BuildError>(())
/// ```
pub struct SchemaBuilder<S, E, I: ?Sized> {
    initial: Option<S>,
    transitions: Vec<Transition<S, E, I>>,
}

impl<S, E, I> SchemaBuilder<S, E, I>
where
    S: PartialEq + Debug + Send + Sync + 'static,
    E: PartialEq + Debug + Send + Sync + 'static,
    I: ?Sized + 'static,
{
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E, I>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E, I>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, E, I>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the schema.
    ///
    /// Fails if the initial state is missing or if a rule sits behind an
    /// earlier unguarded rule for the same state and event.
    pub fn build(self) -> Result<Schema<S, E, I>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        check_shadowing(&self.transitions)?;

        let transitions = self.transitions;
        Ok(Schema::new(initial, move |state, event| {
            let transition = transitions.iter().find(|t| t.can_execute(state, event))?;
            let action = Arc::clone(&transition.action);
            Some(Box::new(move |interactor: &I| action(interactor)) as Effect<S, I>)
        }))
    }
}

impl<S, E, I> Default for SchemaBuilder<S, E, I>
where
    S: PartialEq + Debug + Send + Sync + 'static,
    E: PartialEq + Debug + Send + Sync + 'static,
    I: ?Sized + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn check_shadowing<S, E, I>(transitions: &[Transition<S, E, I>]) -> Result<(), BuildError>
where
    S: PartialEq + Debug,
    E: PartialEq + Debug,
    I: ?Sized,
{
    for (index, later) in transitions.iter().enumerate() {
        let shadowed = transitions[..index].iter().any(|earlier| {
            earlier.guard.is_none() && earlier.from == later.from && earlier.event == later.event
        });
        if shadowed {
            return Err(BuildError::ShadowedTransition {
                from: format!("{:?}", later.from),
                event: format!("{:?}", later.event),
            });
        }
    }
    Ok(())
}

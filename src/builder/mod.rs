//! Builder API for table-driven schemas.
//!
//! Writing the transition function by hand is the most flexible way to make
//! a [`Schema`](crate::schema::Schema). This module offers the declarative
//! alternative: list the transitions, let the builder compile them into a
//! transition function.

pub mod error;
pub mod macros;
pub mod schema;
pub mod transition;

pub use error::BuildError;
pub use schema::SchemaBuilder;
pub use transition::{Transition, TransitionAction, TransitionBuilder};

use crate::core::Guard;
use std::sync::Arc;

/// Create an unconditional transition to a fixed state.
///
/// # Example
///
/// ```
/// use waypoint::builder::simple_transition;
/// use waypoint::ordered_states;
///
/// ordered_states! {
///     enum Step {
///         Start,
///         End,
///     }
/// }
///
/// let transition = simple_transition::<Step, char, ()>(Step::Start, 'n', Step::End);
/// assert!(transition.can_execute(&Step::Start, &'n'));
/// ```
pub fn simple_transition<S, E, I>(from: S, event: E, to: S) -> Transition<S, E, I>
where
    S: Clone + Send + Sync + 'static,
    I: ?Sized,
{
    Transition {
        from,
        event,
        guard: None,
        action: Arc::new(move |_: &I| to.clone()),
    }
}

/// Create a transition to a fixed state that only fires when `guard` holds.
///
/// # Example
///
/// ```
/// use waypoint::builder::guarded_transition;
/// use waypoint::ordered_states;
///
/// ordered_states! {
///     enum Step {
///         Start,
///         Middle,
///     }
/// }
///
/// let transition = guarded_transition::<Step, u32, (), _>(
///     Step::Start,
///     3,
///     Step::Middle,
///     |_, attempts| *attempts < 5,
/// );
/// assert!(transition.can_execute(&Step::Start, &3));
/// ```
pub fn guarded_transition<S, E, I, F>(from: S, event: E, to: S, guard: F) -> Transition<S, E, I>
where
    S: Clone + Send + Sync + 'static,
    I: ?Sized,
    F: Fn(&S, &E) -> bool + Send + Sync + 'static,
{
    Transition {
        from,
        event,
        guard: Some(Guard::new(guard)),
        action: Arc::new(move |_: &I| to.clone()),
    }
}

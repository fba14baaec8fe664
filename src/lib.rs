//! Waypoint: a small schema-driven finite state machine engine
//!
//! Behavior is described once, in an immutable [`Schema`]: an initial state
//! plus a transition function from `(state, event)` to an optional effect.
//! Any number of [`Machine`]s can then be driven through the same schema,
//! each bound to its own interactor (the external context effects act on).
//!
//! # Core Concepts
//!
//! - **State**: caller-defined values implementing the `State` trait, which
//!   classifies every transition as forward, back or idle
//! - **Schema**: shared, immutable transition logic
//! - **Binding**: how a machine reaches its interactor; weak bindings turn the
//!   machine inert once the interactor is dropped
//! - **Observer**: optional hook called after every applied transition
//!
//! Events without a transition, and events arriving after a weakly bound
//! interactor is gone, are silently ignored.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::cell::Cell;
//! use waypoint::core::Direction;
//! use waypoint::{ordered_states, schema, Machine, Schema};
//!
//! ordered_states! {
//!     enum Step {
//!         Intro,
//!         Details,
//!         Finish,
//!     }
//! }
//!
//! enum Nav {
//!     Next,
//!     Back,
//! }
//!
//! struct Controller {
//!     saves: Cell<u32>,
//! }
//!
//! let schema: Schema<Step, Nav, Controller> = Schema::new(Step::Intro, |state, event| {
//!     match (state, event) {
//!         (Step::Intro, Nav::Next) => schema::goto(Step::Details),
//!         (Step::Details, Nav::Next) => schema::effect(|c: &Controller| {
//!             c.saves.set(c.saves.get() + 1);
//!             Step::Finish
//!         }),
//!         (Step::Details, Nav::Back) => schema::goto(Step::Intro),
//!         _ => None,
//!     }
//! });
//!
//! let controller = Rc::new(Controller { saves: Cell::new(0) });
//! let mut machine = Machine::new_weak(schema, &controller, None);
//!
//! machine.handle_event(Nav::Next);
//! machine.handle_event(Nav::Next);
//! assert_eq!(machine.current_state(), &Step::Finish);
//! assert_eq!(machine.transition_direction(), Direction::Forward);
//! assert_eq!(controller.saves.get(), 1);
//!
//! drop(controller);
//! machine.handle_event(Nav::Back);
//! assert_eq!(machine.current_state(), &Step::Finish);
//! ```

pub mod binding;
pub mod builder;
pub mod core;
pub mod machine;
pub mod schema;

// Re-export commonly used types
pub use binding::{Binding, Strong, Unbound};
pub use builder::{BuildError, SchemaBuilder, TransitionBuilder};
pub use crate::core::{Direction, Guard, State, StateHistory, TransitionRecord};
pub use machine::{Machine, Observer};
pub use schema::{Effect, Schema};

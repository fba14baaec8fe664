//! Core value types.
//!
//! This module contains the pure pieces the engine is built from:
//! - Direction classification via `Direction`
//! - State definitions via the `State` trait
//! - Guard predicates for declarative rules
//! - In-memory transition history
//!
//! Nothing in here holds machine state or calls user effects.

mod direction;
mod guard;
mod history;
mod state;

pub use direction::Direction;
pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::State;

//! Build errors for schema and transition builders.

use thiserror::Error;

/// Errors that can occur when building schemas and transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target not specified. Call .to(state) or .action(f)")]
    MissingTarget,

    #[error("Transition from {from} on {event} can never fire: an earlier unguarded transition handles the same pair")]
    ShadowedTransition { from: String, event: String },
}

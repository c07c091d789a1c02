//! Structured, pattern-matchable errors for the lifecycle layer.
//!
//! A rejected transition is an ordinary outcome, not a panic: the caller gets
//! [`ServiceError::Rejected`] carrying the criterion name and reason code, so
//! tests and upstream services can assert on *which* rule failed instead of
//! grepping logs.

use thiserror::Error;

use crate::core::EntityId;
use crate::processor::ProcessError;

/// Errors surfaced by the platform service contract.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: String, id: EntityId },

    #[error("no state machine registered for kind '{0}'")]
    UnknownKind(String),

    #[error("transition '{transition}' is not defined for kind '{kind}'")]
    UnknownTransition { kind: String, transition: String },

    #[error("transition '{transition}' is not permitted from state '{state}'")]
    NotPermitted { transition: String, state: String },

    /// A gating criterion returned a failing outcome. The transition did not
    /// fire and the entity's stored state is unchanged.
    #[error("transition '{transition}' rejected by {criterion} ({code}): {detail}")]
    Rejected {
        transition: String,
        criterion: String,
        code: String,
        detail: String,
    },

    /// The transition's processor failed. The transition aborted and the
    /// stored document was left untouched; side effects already issued by the
    /// processor are not compensated.
    #[error("processor {processor} failed: {source}")]
    ProcessorFailed {
        processor: String,
        #[source]
        source: Box<ProcessError>,
    },

    #[error("payload for kind '{kind}' failed to decode")]
    Decode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload for kind '{kind}' failed to encode")]
    Encode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while registering a state machine definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("machine for kind '{kind}' declares no states")]
    NoStates { kind: String },

    #[error("initial state '{state}' of kind '{kind}' is not a declared state")]
    UndeclaredInitial { kind: String, state: String },

    #[error(
        "transition '{transition}' of kind '{kind}' references undeclared state '{state}'"
    )]
    UndeclaredState {
        kind: String,
        transition: String,
        state: String,
    },

    #[error("transition '{transition}' of kind '{kind}' has an empty source-state set")]
    EmptyFrom { kind: String, transition: String },

    #[error("duplicate transition '{transition}' for kind '{kind}'")]
    DuplicateTransition { kind: String, transition: String },

    #[error("a machine for kind '{0}' is already registered")]
    DuplicateKind(String),
}

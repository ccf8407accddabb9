//! Graph mutation errors.

use super::state::StateId;
use super::transition::TransitionId;
use thiserror::Error;

/// Reasons a graph mutation was skipped.
///
/// Every variant means the graph was left exactly as it was, so callers that
/// discard the error get the plain no-op behavior.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("Unknown state '{0}'")]
    UnknownState(StateId),

    #[error("Unknown transition '{0}'")]
    UnknownTransition(TransitionId),

    #[error("Transition '{0}' already exists")]
    DuplicateTransition(TransitionId),

    #[error("'{0}' is neither a state nor a transition")]
    UnknownOwner(String),

    #[error("No instance {instance} on '{owner}'")]
    UnknownInstance { owner: String, instance: u32 },
}

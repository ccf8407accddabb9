//! Build errors for the machine builder.

use thiserror::Error;

/// A transition spec that cannot be turned into a transition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpecViolation {
    #[error("Transition spec #{spec}: source index {index} out of range ({states} states)")]
    SourceOutOfRange {
        spec: usize,
        index: usize,
        states: usize,
    },

    #[error("Transition spec #{spec}: target index {index} out of range ({states} states)")]
    TargetOutOfRange {
        spec: usize,
        index: usize,
        states: usize,
    },

    #[error("Transition spec #{spec}: {from} -> {to} is already connected")]
    DuplicatePair { spec: usize, from: usize, to: usize },
}

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{} invalid transition spec(s)", .0.len())]
    InvalidTransitions(Vec<SpecViolation>),
}

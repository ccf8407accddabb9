//! Transitions (directed diagram edges) and their specs.

use super::state::StateId;
use crate::catalog::{TriggerId, TriggerInstance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transition identifier, derived from the endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(String);

impl TransitionId {
    pub fn new(id: impl Into<String>) -> Self {
        TransitionId(id.into())
    }

    /// The id a transition between `source` and `target` receives.
    pub fn between(source: &StateId, target: &StateId) -> Self {
        TransitionId(format!("edge-{source}-{target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransitionId {
    fn from(id: &str) -> Self {
        TransitionId(id.to_string())
    }
}

/// A directed edge between two states, carrying its own trigger instances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub(crate) id: TransitionId,
    pub(crate) source: StateId,
    pub(crate) target: StateId,
    pub(crate) triggers: Vec<TriggerInstance>,
}

impl Transition {
    pub fn id(&self) -> &TransitionId {
        &self.id
    }

    pub fn source(&self) -> &StateId {
        &self.source
    }

    pub fn target(&self) -> &StateId {
        &self.target
    }

    pub fn triggers(&self) -> &[TriggerInstance] {
        &self.triggers
    }

    /// Whether `trigger` is armed on this transition.
    ///
    /// An unarmed instance with the same id does not count.
    pub fn is_armed_for(&self, trigger: TriggerId) -> bool {
        self.triggers.iter().any(|t| t.active && t.id == trigger)
    }

    pub fn touches(&self, state: &StateId) -> bool {
        self.source == *state || self.target == *state
    }
}

/// Index-based transition description used at construction time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub source: usize,
    pub target: usize,
    /// Triggers to arm on the freshly cloned instance set.
    pub armed: Vec<TriggerId>,
}

impl TransitionSpec {
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            armed: Vec::new(),
        }
    }

    pub fn arm(mut self, trigger: TriggerId) -> Self {
        self.armed.push(trigger);
        self
    }
}

/// Id-based connection request, as produced by the editor's connect gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub source: StateId,
    pub target: StateId,
}

impl Connection {
    pub fn new(source: impl Into<StateId>, target: impl Into<StateId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

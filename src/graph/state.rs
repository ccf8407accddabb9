//! States (diagram nodes) and the specs they are created from.

use crate::catalog::{ActionId, ActionInstance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable state identifier, assigned by the store when the state is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        StateId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        StateId(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        StateId(id)
    }
}

/// Diagram coordinate of a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node of the machine.
///
/// Fields are readable by anyone holding a reference, but only the
/// [`Graph`](super::Graph) can hand out mutable access, which keeps the
/// single-active invariant in one place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    pub(crate) id: StateId,
    pub(crate) label: String,
    pub(crate) position: Position,
    pub(crate) active: bool,
    pub(crate) actions: Vec<ActionInstance>,
}

impl State {
    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn actions(&self) -> &[ActionInstance] {
        &self.actions
    }

    /// Ids of the armed actions, in stored order and without deduplication.
    pub fn armed_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.iter().filter(|a| a.active).map(|a| a.id)
    }
}

/// Host-side description of a state to create.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub label: String,
    /// Explicit position; the grid layout is used when absent.
    pub position: Option<Position>,
    /// Actions to arm on the freshly cloned instance set.
    pub armed: Vec<ActionId>,
}

impl StateSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            position: None,
            armed: Vec::new(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn arm(mut self, action: ActionId) -> Self {
        self.armed.push(action);
        self
    }
}

impl From<&str> for StateSpec {
    fn from(label: &str) -> Self {
        StateSpec::new(label)
    }
}

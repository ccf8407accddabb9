//! Trigger/action catalog and the per-site instance cloner.
//!
//! The host supplies the catalog once. Every state receives its own clone of
//! the action templates and every transition its own clone of the trigger
//! templates, so arming an instance is always local to its owner.
//!
//! Template ids are expected to be unique within their kind. This is a
//! precondition, not something the catalog checks: duplicate ids produce
//! duplicate matches downstream.

mod instance;
mod template;

pub use instance::{clone_templates, ActionInstance, Instance, TriggerInstance};
pub use template::{ActionId, ActionTemplate, Icon, Template, TriggerId, TriggerTemplate};

use serde::{Deserialize, Serialize};

/// The host-provided, read-only lists of available triggers and actions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub triggers: Vec<TriggerTemplate>,
    pub actions: Vec<ActionTemplate>,
}

impl Catalog {
    pub fn new(triggers: Vec<TriggerTemplate>, actions: Vec<ActionTemplate>) -> Self {
        Self { triggers, actions }
    }

    /// Fresh action instances for one state.
    pub fn action_instances(&self, armed: &[ActionId]) -> Vec<ActionInstance> {
        clone_templates(&self.actions, armed)
    }

    /// Fresh trigger instances for one transition.
    pub fn trigger_instances(&self, armed: &[TriggerId]) -> Vec<TriggerInstance> {
        clone_templates(&self.triggers, armed)
    }
}

//! Structural editing of a graph owned by a [`Machine`](super::Machine).

use super::history::{Activation, ActivationHistory};
use crate::catalog::{ActionId, TriggerId, TriggerInstance};
use crate::graph::{
    Connection, Graph, GraphError, Position, State, StateId, StateSpec, Transition, TransitionId,
};
use chrono::Utc;

/// Mutable view of a machine's graph without direct activation.
///
/// Activation goes through [`Machine::set_state_active`](super::Machine::set_state_active)
/// so entry actions and history are never skipped. When an edit hands the
/// active marker to another state (removing the active state, or adding a
/// state to an empty graph), the handover is recorded with no trigger and no
/// actions are dispatched.
pub struct GraphEditor<'a> {
    graph: &'a mut Graph,
    history: &'a mut ActivationHistory,
}

impl<'a> GraphEditor<'a> {
    pub(crate) fn new(graph: &'a mut Graph, history: &'a mut ActivationHistory) -> Self {
        Self { graph, history }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn add_state(&mut self, spec: StateSpec) -> &State {
        let was_empty = self.graph.is_empty();
        let id = self.graph.add_state(spec).id().clone();
        if was_empty {
            self.handover(None, &id);
        }
        // Just added, so the lookup cannot miss.
        &self.graph.states()[self.graph.states().len() - 1]
    }

    pub fn remove_state(&mut self, id: &StateId) -> Result<State, GraphError> {
        let removed = self.graph.remove_state(id)?;
        if removed.is_active() {
            if let Some(next) = self.graph.active_state().map(|s| s.id().clone()) {
                self.handover(Some(removed.id().clone()), &next);
            }
        }
        Ok(removed)
    }

    pub fn add_transition(&mut self, connection: Connection) -> Result<&Transition, GraphError> {
        self.graph.add_transition(connection)
    }

    pub fn add_transition_with(
        &mut self,
        connection: Connection,
        triggers: Vec<TriggerInstance>,
    ) -> Result<&Transition, GraphError> {
        self.graph.add_transition_with(connection, triggers)
    }

    pub fn remove_transition(&mut self, id: &TransitionId) -> Result<Transition, GraphError> {
        self.graph.remove_transition(id)
    }

    pub fn rename_state(
        &mut self,
        id: &StateId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.graph.rename_state(id, label)
    }

    pub fn move_state(&mut self, id: &StateId, position: Position) -> Result<(), GraphError> {
        self.graph.move_state(id, position)
    }

    pub fn set_action_active(
        &mut self,
        state: &StateId,
        action: ActionId,
        active: bool,
    ) -> Result<(), GraphError> {
        self.graph.set_action_active(state, action, active)
    }

    pub fn set_trigger_active(
        &mut self,
        transition: &TransitionId,
        trigger: TriggerId,
        active: bool,
    ) -> Result<(), GraphError> {
        self.graph.set_trigger_active(transition, trigger, active)
    }

    pub fn toggle_action(&mut self, state: &StateId, action: ActionId) -> Result<bool, GraphError> {
        self.graph.toggle_action(state, action)
    }

    pub fn toggle_trigger(
        &mut self,
        transition: &TransitionId,
        trigger: TriggerId,
    ) -> Result<bool, GraphError> {
        self.graph.toggle_trigger(transition, trigger)
    }

    pub fn toggle_instance_active(
        &mut self,
        owner: &str,
        instance: u32,
    ) -> Result<bool, GraphError> {
        self.graph.toggle_instance_active(owner, instance)
    }

    fn handover(&mut self, from: Option<StateId>, to: &StateId) {
        tracing::debug!(to = %to, "active state handed over by edit");
        self.history.record(Activation {
            from,
            to: to.clone(),
            trigger: None,
            via: None,
            timestamp: Utc::now(),
        });
    }
}

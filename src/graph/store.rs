//! The graph store: the single owner of states and transitions.

use super::error::GraphError;
use super::layout::GridLayout;
use super::state::{Position, State, StateId, StateSpec};
use super::transition::{Connection, Transition, TransitionId, TransitionSpec};
use crate::catalog::{ActionId, Catalog, Instance, TriggerId, TriggerInstance};
use serde::Serialize;

/// Owned, read-only copy of the graph for the rendering layer.
#[derive(Clone, Debug, Serialize)]
pub struct GraphSnapshot {
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
}

/// States and transitions plus the catalog new sites are cloned from.
///
/// Every mutation either applies completely or returns an error and leaves
/// the graph untouched. After any call, a non-empty graph has exactly one
/// active state, an empty graph has none, and every transition references
/// two existing states.
#[derive(Clone, Debug)]
pub struct Graph {
    states: Vec<State>,
    transitions: Vec<Transition>,
    catalog: Catalog,
    layout: GridLayout,
    next_id: u64,
}

impl Graph {
    /// Empty graph over `catalog`.
    pub fn new(catalog: Catalog, layout: GridLayout) -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            catalog,
            layout,
            next_id: 0,
        }
    }

    /// Build the initial graph from host specs.
    ///
    /// State `i` gets id `"i"` and a grid position; state 0 starts active.
    /// Transition specs with an out-of-range index are dropped. A spec
    /// repeating an earlier `(source, target)` pair arms its triggers on the
    /// transition already built for that pair.
    pub fn initialize(
        states: &[StateSpec],
        transitions: &[TransitionSpec],
        catalog: Catalog,
        layout: GridLayout,
    ) -> Self {
        let built: Vec<State> = states
            .iter()
            .enumerate()
            .map(|(index, spec)| State {
                id: StateId::new(index.to_string()),
                label: spec.label.clone(),
                position: spec.position.unwrap_or_else(|| layout.position(index)),
                active: index == 0,
                actions: catalog.action_instances(&spec.armed),
            })
            .collect();

        let mut edges: Vec<Transition> = Vec::new();
        for spec in transitions {
            let (Some(source), Some(target)) = (built.get(spec.source), built.get(spec.target))
            else {
                tracing::warn!(
                    source = spec.source,
                    target = spec.target,
                    states = built.len(),
                    "dropping transition spec with out-of-range index"
                );
                continue;
            };
            let id = TransitionId::between(&source.id, &target.id);
            if let Some(existing) = edges.iter_mut().find(|t| t.id == id) {
                tracing::debug!(transition = %id, "merging repeated transition spec");
                for trigger in &mut existing.triggers {
                    if spec.armed.contains(&trigger.id) {
                        trigger.active = true;
                    }
                }
                continue;
            }
            edges.push(Transition {
                id,
                source: source.id.clone(),
                target: target.id.clone(),
                triggers: catalog.trigger_instances(&spec.armed),
            });
        }

        Self {
            next_id: built.len() as u64,
            states: built,
            transitions: edges,
            catalog,
            layout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: &StateId) -> Option<&State> {
        self.states.iter().find(|s| s.id == *id)
    }

    pub fn transition(&self, id: &TransitionId) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == *id)
    }

    pub fn active_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.active)
    }

    /// Transitions leaving `state`, in stored order.
    pub fn outgoing<'a>(&'a self, state: &'a StateId) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter().filter(move |t| t.source == *state)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            states: self.states.clone(),
            transitions: self.transitions.clone(),
        }
    }

    /// Append a state with fresh action instances.
    ///
    /// The new state is active only if the graph was empty.
    pub fn add_state(&mut self, spec: StateSpec) -> &State {
        let id = StateId::new(self.next_id.to_string());
        self.next_id += 1;

        let state = State {
            id,
            position: spec
                .position
                .unwrap_or_else(|| self.layout.position(self.states.len())),
            label: spec.label,
            active: self.states.is_empty(),
            actions: self.catalog.action_instances(&spec.armed),
        };
        tracing::debug!(state = %state.id, active = state.active, "state added");

        let index = self.states.len();
        self.states.push(state);
        &self.states[index]
    }

    /// Remove a state and every transition touching it.
    ///
    /// If the removed state was active, the first remaining state takes over.
    pub fn remove_state(&mut self, id: &StateId) -> Result<State, GraphError> {
        let index = self
            .states
            .iter()
            .position(|s| s.id == *id)
            .ok_or_else(|| GraphError::UnknownState(id.clone()))?;

        let mut states = self.states.clone();
        let removed = states.remove(index);
        if removed.active {
            if let Some(first) = states.first_mut() {
                first.active = true;
            }
        }
        let transitions: Vec<Transition> = self
            .transitions
            .iter()
            .filter(|t| !t.touches(id))
            .cloned()
            .collect();

        tracing::debug!(
            state = %id,
            cascaded = self.transitions.len() - transitions.len(),
            "state removed"
        );
        self.states = states;
        self.transitions = transitions;
        Ok(removed)
    }

    /// Connect two existing states with a fresh, unarmed trigger set.
    pub fn add_transition(&mut self, connection: Connection) -> Result<&Transition, GraphError> {
        let triggers = self.catalog.trigger_instances(&[]);
        self.add_transition_with(connection, triggers)
    }

    /// Connect two existing states with a caller-specified trigger set.
    pub fn add_transition_with(
        &mut self,
        connection: Connection,
        triggers: Vec<TriggerInstance>,
    ) -> Result<&Transition, GraphError> {
        for endpoint in [&connection.source, &connection.target] {
            if self.state(endpoint).is_none() {
                return Err(GraphError::UnknownState(endpoint.clone()));
            }
        }
        let id = TransitionId::between(&connection.source, &connection.target);
        if self.transition(&id).is_some() {
            return Err(GraphError::DuplicateTransition(id));
        }

        tracing::debug!(transition = %id, "transition added");
        let index = self.transitions.len();
        self.transitions.push(Transition {
            id,
            source: connection.source,
            target: connection.target,
            triggers,
        });
        Ok(&self.transitions[index])
    }

    pub fn remove_transition(&mut self, id: &TransitionId) -> Result<Transition, GraphError> {
        let index = self
            .transitions
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| GraphError::UnknownTransition(id.clone()))?;
        tracing::debug!(transition = %id, "transition removed");
        Ok(self.transitions.remove(index))
    }

    /// Make `id` the only active state. Returns the previously active state.
    pub fn activate(&mut self, id: &StateId) -> Result<Option<StateId>, GraphError> {
        if self.state(id).is_none() {
            return Err(GraphError::UnknownState(id.clone()));
        }
        let previous = self.active_state().map(|s| s.id.clone());
        for state in &mut self.states {
            state.active = state.id == *id;
        }
        Ok(previous)
    }

    pub fn rename_state(
        &mut self,
        id: &StateId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.state_mut(id)?.label = label.into();
        Ok(())
    }

    pub fn move_state(&mut self, id: &StateId, position: Position) -> Result<(), GraphError> {
        self.state_mut(id)?.position = position;
        Ok(())
    }

    /// Arm or disarm an action on one state.
    pub fn set_action_active(
        &mut self,
        state: &StateId,
        action: ActionId,
        active: bool,
    ) -> Result<(), GraphError> {
        let owner = self.state_mut(state)?;
        find_instance(&mut owner.actions, action, state.as_str(), action.0)?.active = active;
        Ok(())
    }

    /// Arm or disarm a trigger on one transition.
    pub fn set_trigger_active(
        &mut self,
        transition: &TransitionId,
        trigger: TriggerId,
        active: bool,
    ) -> Result<(), GraphError> {
        let owner = self.transition_mut(transition)?;
        find_instance(&mut owner.triggers, trigger, transition.as_str(), trigger.0)?.active =
            active;
        Ok(())
    }

    pub fn toggle_action(&mut self, state: &StateId, action: ActionId) -> Result<bool, GraphError> {
        let owner = self.state_mut(state)?;
        let instance = find_instance(&mut owner.actions, action, state.as_str(), action.0)?;
        instance.active = !instance.active;
        Ok(instance.active)
    }

    pub fn toggle_trigger(
        &mut self,
        transition: &TransitionId,
        trigger: TriggerId,
    ) -> Result<bool, GraphError> {
        let owner = self.transition_mut(transition)?;
        let instance = find_instance(&mut owner.triggers, trigger, transition.as_str(), trigger.0)?;
        instance.active = !instance.active;
        Ok(instance.active)
    }

    /// Flip the first instance with `instance` id on the state or transition
    /// named `owner`. States are looked up before transitions.
    ///
    /// Returns the new armed flag.
    pub fn toggle_instance_active(
        &mut self,
        owner: &str,
        instance: u32,
    ) -> Result<bool, GraphError> {
        let state = StateId::from(owner);
        if self.state(&state).is_some() {
            return self.toggle_action(&state, ActionId(instance));
        }
        let transition = TransitionId::from(owner);
        if self.transition(&transition).is_some() {
            return self.toggle_trigger(&transition, TriggerId(instance));
        }
        Err(GraphError::UnknownOwner(owner.to_string()))
    }

    fn state_mut(&mut self, id: &StateId) -> Result<&mut State, GraphError> {
        self.states
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or_else(|| GraphError::UnknownState(id.clone()))
    }

    fn transition_mut(&mut self, id: &TransitionId) -> Result<&mut Transition, GraphError> {
        self.transitions
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| GraphError::UnknownTransition(id.clone()))
    }
}

fn find_instance<'a, I: PartialEq>(
    instances: &'a mut [Instance<I>],
    id: I,
    owner: &str,
    raw: u32,
) -> Result<&'a mut Instance<I>, GraphError> {
    instances
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| GraphError::UnknownInstance {
            owner: owner.to_string(),
            instance: raw,
        })
}

//! The runtime machine: trigger firing, activation and dispatch.

use super::dispatch::{dispatch, ActionHandler, NoopHandler, TriggerQueue};
use super::editor::GraphEditor;
use super::history::{Activation, ActivationHistory};
use crate::catalog::TriggerId;
use crate::graph::{Graph, GraphError, GridLayout, State, StateId, Transition, TransitionId};
use chrono::Utc;

/// Result of firing a trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerOutcome {
    /// The active marker moved along `transition`.
    Transitioned {
        from: StateId,
        to: StateId,
        transition: TransitionId,
    },

    /// The graph is empty.
    NoActiveState,

    /// No outgoing transition of the active state has the trigger armed.
    NoMatch,
}

impl TriggerOutcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Runtime settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineConfig {
    /// Placement for states created without a position.
    pub layout: GridLayout,
    /// How many queued follow-up triggers one top-level call may fire.
    pub max_chained_triggers: usize,
    /// Reject invalid transition specs at build time instead of dropping them.
    pub strict: bool,
    /// Most recent activations kept in the history; `None` keeps all.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            max_chained_triggers: 64,
            strict: false,
            history_limit: Some(1024),
        }
    }
}

/// First outgoing transition of `source`, in stored order, with `trigger` armed.
///
/// Stored order is whatever prior adds and removes left behind; it is not a
/// priority.
pub fn select_transition<'a>(
    graph: &'a Graph,
    source: &'a StateId,
    trigger: TriggerId,
) -> Option<&'a Transition> {
    graph.outgoing(source).find(|t| t.is_armed_for(trigger))
}

/// A graph store driven by triggers, notifying `H` on every state entry.
///
/// All operations run to completion synchronously. The handler is owned by
/// the machine and only ever sees a [`TriggerQueue`], so it cannot re-enter
/// [`trigger_transition`](Machine::trigger_transition) while a dispatch is in
/// progress.
pub struct Machine<H: ActionHandler = NoopHandler> {
    graph: Graph,
    handler: H,
    history: ActivationHistory,
    config: MachineConfig,
}

impl<H: ActionHandler> Machine<H> {
    /// Take ownership of `graph` and enter its active state, dispatching the
    /// armed actions of that state.
    pub fn start(graph: Graph, handler: H, config: MachineConfig) -> Self {
        let mut machine = Self {
            graph,
            handler,
            history: ActivationHistory::with_limit(config.history_limit),
            config,
        };

        let initial = machine.graph.active_state().map(|s| s.id().clone());
        if let Some(initial) = initial {
            let mut queue = TriggerQueue::new();
            machine.arrive(None, &initial, None, None, &mut queue);
            machine.run_queue(queue);
        }
        machine
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Structural editing of the owned graph.
    ///
    /// Activation is not available here; use
    /// [`set_state_active`](Machine::set_state_active).
    pub fn edit(&mut self) -> GraphEditor<'_> {
        GraphEditor::new(&mut self.graph, &mut self.history)
    }

    pub fn active_state(&self) -> Option<&State> {
        self.graph.active_state()
    }

    pub fn history(&self) -> &ActivationHistory {
        &self.history
    }

    /// Hand the recorded activations to the caller and start a fresh log.
    pub fn take_history(&mut self) -> ActivationHistory {
        let fresh = ActivationHistory::with_limit(self.config.history_limit);
        std::mem::replace(&mut self.history, fresh)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_parts(self) -> (Graph, H) {
        (self.graph, self.handler)
    }

    /// Fire `trigger` from the active state.
    ///
    /// Picks the first outgoing transition with `trigger` armed, moves the
    /// active marker to its target and dispatches the target's armed actions.
    /// Triggers queued by the handler run afterwards. An unarmed or unknown
    /// trigger is a no-op.
    pub fn trigger_transition(&mut self, trigger: TriggerId) -> TriggerOutcome {
        let mut queue = TriggerQueue::new();
        let outcome = self.fire(trigger, &mut queue);
        self.run_queue(queue);
        outcome
    }

    /// Move the active marker to `id` and dispatch its armed actions.
    ///
    /// Unknown ids leave the machine untouched.
    pub fn set_state_active(&mut self, id: &StateId) -> Result<(), GraphError> {
        let mut queue = TriggerQueue::new();
        self.enter(id, None, None, &mut queue)?;
        self.run_queue(queue);
        Ok(())
    }

    fn fire(&mut self, trigger: TriggerId, queue: &mut TriggerQueue) -> TriggerOutcome {
        let Some(active) = self.graph.active_state() else {
            tracing::debug!(trigger = %trigger, "trigger ignored: graph is empty");
            return TriggerOutcome::NoActiveState;
        };
        let Some(transition) = select_transition(&self.graph, active.id(), trigger) else {
            tracing::debug!(trigger = %trigger, state = %active.id(), "trigger ignored: not armed");
            return TriggerOutcome::NoMatch;
        };

        let from = transition.source().clone();
        let to = transition.target().clone();
        let via = transition.id().clone();

        match self.enter(&to, Some(trigger), Some(via.clone()), queue) {
            Ok(_) => {
                tracing::info!(trigger = %trigger, from = %from, to = %to, "transition fired");
                TriggerOutcome::Transitioned {
                    from,
                    to,
                    transition: via,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, transition = %via, "transition target missing");
                TriggerOutcome::NoMatch
            }
        }
    }

    fn enter(
        &mut self,
        to: &StateId,
        trigger: Option<TriggerId>,
        via: Option<TransitionId>,
        queue: &mut TriggerQueue,
    ) -> Result<(), GraphError> {
        let from = self.graph.activate(to)?;
        self.arrive(from, to, trigger, via, queue);
        Ok(())
    }

    /// Record the activation of `to` and dispatch its armed actions.
    fn arrive(
        &mut self,
        from: Option<StateId>,
        to: &StateId,
        trigger: Option<TriggerId>,
        via: Option<TransitionId>,
        queue: &mut TriggerQueue,
    ) {
        self.history.record(Activation {
            from,
            to: to.clone(),
            trigger,
            via,
            timestamp: Utc::now(),
        });
        if let Some(state) = self.graph.state(to) {
            dispatch(state, &mut self.handler, queue);
        }
    }

    fn run_queue(&mut self, mut queue: TriggerQueue) {
        let mut chained = 0;
        while let Some(trigger) = queue.pop() {
            if chained >= self.config.max_chained_triggers {
                tracing::warn!(
                    limit = self.config.max_chained_triggers,
                    dropped = queue.len() + 1,
                    "chained trigger limit reached, discarding queued triggers"
                );
                break;
            }
            chained += 1;
            let outcome = self.fire(trigger, &mut queue);
            tracing::debug!(
                trigger = %trigger,
                fired = outcome.is_transitioned(),
                "chained trigger"
            );
        }
    }
}

//! Action dispatch on state entry.

use crate::catalog::{ActionId, TriggerId};
use crate::graph::State;
use std::collections::VecDeque;

/// Triggers requested by an action handler while a dispatch is running.
///
/// Handlers cannot re-enter the machine; they queue follow-up triggers here
/// instead and the machine fires them, in order, once the current dispatch
/// has finished.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    pending: VecDeque<TriggerId>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `trigger` to fire after the current dispatch.
    pub fn fire(&mut self, trigger: TriggerId) {
        self.pending.push_back(trigger);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn pop(&mut self) -> Option<TriggerId> {
        self.pending.pop_front()
    }
}

/// Host callback invoked once per armed action of a newly entered state.
///
/// Any `FnMut(ActionId)` closure is a handler; implement the trait directly to
/// get access to the [`TriggerQueue`].
pub trait ActionHandler {
    fn on_action(&mut self, action: ActionId, queue: &mut TriggerQueue);
}

impl<F> ActionHandler for F
where
    F: FnMut(ActionId),
{
    fn on_action(&mut self, action: ActionId, _queue: &mut TriggerQueue) {
        self(action)
    }
}

/// Handler that ignores every action.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl ActionHandler for NoopHandler {
    fn on_action(&mut self, _action: ActionId, _queue: &mut TriggerQueue) {}
}

/// Invoke `handler` for each armed action of `state`, in stored order.
///
/// Duplicate ids are not collapsed. Returns the number of invocations.
pub(crate) fn dispatch<H: ActionHandler + ?Sized>(
    state: &State,
    handler: &mut H,
    queue: &mut TriggerQueue,
) -> usize {
    let mut fired = 0;
    for action in state.armed_actions() {
        tracing::debug!(state = %state.id(), action = %action, "dispatching action");
        handler.on_action(action, queue);
        fired += 1;
    }
    fired
}

//! Builder API for machine construction.
//!
//! [`MachineBuilder`] collects the initial states, transitions, catalog and
//! configuration, then builds the graph and enters its first state.
//! Transition specs pointing outside the state list are dropped unless
//! strict mode is on, in which case every offending spec is reported.

pub mod error;
pub mod machine;
pub mod validation;

pub use error::{BuildError, SpecViolation};
pub use machine::MachineBuilder;
pub use validation::validate_transitions;

use crate::catalog::TriggerId;
use crate::graph::TransitionSpec;

/// Specs connecting each state index to the next, all armed with `trigger`.
///
/// # Example
///
/// ```
/// use quickfsm::builder::{chain, MachineBuilder};
/// use quickfsm::catalog::{TriggerId, TriggerTemplate};
///
/// let mut machine = MachineBuilder::new()
///     .states(["Red", "Green", "Yellow"])
///     .transitions(chain(3, TriggerId(0)))
///     .trigger(TriggerTemplate::new(TriggerId(0), "next", "#ffffff"))
///     .build()
///     .unwrap();
///
/// machine.trigger_transition(TriggerId(0));
/// assert_eq!(machine.active_state().unwrap().label(), "Green");
/// ```
pub fn chain(states: usize, trigger: TriggerId) -> Vec<TransitionSpec> {
    (1..states)
        .map(|target| TransitionSpec::new(target - 1, target).arm(trigger))
        .collect()
}

//! QuickFSM: runtime model for interactively edited finite-state machines
//!
//! A diagram editor lets a user draw states and transitions, arm triggers on
//! transitions and actions on states. This crate is the model behind that
//! diagram: it keeps the graph consistent under editing and executes it.
//! Firing a trigger moves the active marker along the first matching
//! transition and notifies the host of the entered state's armed actions.
//!
//! # Core Concepts
//!
//! - **Catalog**: immutable trigger/action templates supplied by the host
//! - **Instances**: per-state and per-transition clones carrying the armed flag
//! - **Graph**: states and transitions, with exactly one active state
//! - **Machine**: fires triggers, activates states and dispatches actions
//!
//! Rendering, dragging and selection widgets live outside this crate; they
//! read [`graph::GraphSnapshot`]s and call the graph's editing operations.
//!
//! # Example
//!
//! ```rust
//! use quickfsm::builder::MachineBuilder;
//! use quickfsm::catalog::{ActionId, ActionTemplate, TriggerId, TriggerTemplate};
//! use quickfsm::graph::{StateSpec, TransitionSpec};
//!
//! let mut entered = Vec::new();
//! let mut machine = MachineBuilder::new()
//!     .states([StateSpec::new("One"), StateSpec::new("Two").arm(ActionId(0))])
//!     .transition(TransitionSpec::new(0, 1).arm(TriggerId(0)))
//!     .trigger(TriggerTemplate::new(TriggerId(0), "T0", "#66ff33"))
//!     .action(ActionTemplate::new(ActionId(0), "A0", "#66ff33"))
//!     .on_action(|id: ActionId| entered.push(id))
//!     .build()
//!     .unwrap();
//!
//! assert!(machine.trigger_transition(TriggerId(0)).is_transitioned());
//! assert_eq!(machine.active_state().unwrap().label(), "Two");
//!
//! // Nothing is armed on state "Two"'s outgoing transitions.
//! assert!(!machine.trigger_transition(TriggerId(0)).is_transitioned());
//!
//! drop(machine);
//! assert_eq!(entered, vec![ActionId(0)]);
//! ```

pub mod builder;
pub mod catalog;
pub mod engine;
pub mod graph;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use catalog::{ActionId, Catalog, TriggerId};
pub use engine::{ActionHandler, Machine, MachineConfig, TriggerOutcome, TriggerQueue};
pub use graph::{Graph, GraphError, StateId, TransitionId};

//! Trigger-driven execution of a [`Graph`](crate::graph::Graph).
//!
//! - **Machine**: owns the graph, fires triggers and records activations
//! - **Dispatch**: notifies the host of armed actions on state entry
//! - **Editor**: structural edits to a running machine's graph
//! - **History**: ordered, timestamped record of recent activations
//!
//! Everything here is synchronous. Action handlers run inside the firing
//! call and may only request follow-up triggers through a [`TriggerQueue`].

mod dispatch;
mod editor;
mod history;
mod machine;

pub use dispatch::{ActionHandler, NoopHandler, TriggerQueue};
pub use editor::GraphEditor;
pub use history::{Activation, ActivationHistory};
pub use machine::{select_transition, Machine, MachineConfig, TriggerOutcome};

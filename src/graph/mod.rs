//! The graph store and the active-state tracker.
//!
//! [`Graph`] is the only owner of states and transitions. It exposes
//! invariant-preserving operations only:
//!
//! - a non-empty graph has exactly one active state, an empty graph none
//! - every transition references two existing states
//! - removing a state removes every transition touching it
//!
//! Operations that reference unknown ids return a [`GraphError`] and leave
//! the graph as it was.

mod error;
mod layout;
mod state;
mod store;
mod transition;

pub use error::GraphError;
pub use layout::GridLayout;
pub use state::{Position, State, StateId, StateSpec};
pub use store::{Graph, GraphSnapshot};
pub use transition::{Connection, Transition, TransitionId, TransitionSpec};

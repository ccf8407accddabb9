//! Three states, one transition, two trigger buttons
//!
//! Mirrors the editor's demo host: states One/Two/Three, a single
//! transition One -> Two, triggers T0/T1 and actions A0..A2. T0 is armed on
//! the transition and A1 on state Two, so pressing T0 once moves the marker
//! and reports A1; pressing it again does nothing.
//!
//! Run with: RUST_LOG=debug cargo run --example quick_fsm

use quickfsm::builder::MachineBuilder;
use quickfsm::catalog::{ActionId, ActionTemplate, TriggerId, TriggerTemplate};
use quickfsm::engine::{ActionHandler, Machine};
use quickfsm::graph::{Connection, StateSpec, TransitionSpec};
use tracing_subscriber::EnvFilter;

fn active_label<H: ActionHandler>(machine: &Machine<H>) -> String {
    machine
        .active_state()
        .map(|s| s.label().to_string())
        .unwrap_or_default()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== QuickFSM Demo ===\n");

    let mut machine = MachineBuilder::new()
        .states([
            StateSpec::new("One"),
            StateSpec::new("Two").arm(ActionId(1)),
            StateSpec::new("Three"),
        ])
        .transition(TransitionSpec::new(0, 1).arm(TriggerId(0)))
        .triggers([
            TriggerTemplate::new(TriggerId(0), "T0", "#66ff33"),
            TriggerTemplate::new(TriggerId(1), "T1", "#33ccff"),
        ])
        .actions([
            ActionTemplate::new(ActionId(0), "A0", "#66ff33"),
            ActionTemplate::new(ActionId(1), "A1", "#33ccff"),
            ActionTemplate::new(ActionId(2), "A2", "#ff66cc"),
        ])
        .on_action(|id: ActionId| println!("  action callback: {id}"))
        .build()
        .expect("demo specs are valid");

    println!("Active: {}", active_label(&machine));

    println!("\nPress T0");
    println!("  outcome: {:?}", machine.trigger_transition(TriggerId(0)));
    println!("Active: {}", active_label(&machine));

    println!("\nPress T0 again (nothing armed out of Two)");
    println!("  outcome: {:?}", machine.trigger_transition(TriggerId(0)));
    println!("Active: {}", active_label(&machine));

    println!("\nConnect Two -> Three and arm T1 on it");
    let edge = machine
        .edit()
        .add_transition(Connection::new("1", "2"))
        .expect("both states exist")
        .id()
        .clone();
    machine
        .edit()
        .set_trigger_active(&edge, TriggerId(1), true)
        .expect("T1 is in the catalog");

    println!("\nPress T1");
    println!("  outcome: {:?}", machine.trigger_transition(TriggerId(1)));
    println!("Active: {}", active_label(&machine));

    println!("\nRemove the active state");
    machine
        .edit()
        .remove_state(&"2".into())
        .expect("state exists");
    println!("Active: {}", active_label(&machine));
    println!("Transitions left: {}", machine.graph().transitions().len());

    println!("\n=== Demo Complete ===");
}

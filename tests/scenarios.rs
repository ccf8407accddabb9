//! End-to-end scenarios: build, edit and fire.

use quickfsm::builder::MachineBuilder;
use quickfsm::catalog::{ActionId, ActionTemplate, TriggerId, TriggerTemplate};
use quickfsm::engine::{ActionHandler, Machine, TriggerOutcome, TriggerQueue};
use quickfsm::graph::{Connection, StateSpec, TransitionSpec};

#[derive(Default)]
struct Recorder {
    fired: Vec<ActionId>,
}

impl ActionHandler for Recorder {
    fn on_action(&mut self, action: ActionId, _queue: &mut TriggerQueue) {
        self.fired.push(action);
    }
}

fn triggers() -> Vec<TriggerTemplate> {
    vec![
        TriggerTemplate::new(TriggerId(0), "T0", "#66ff33"),
        TriggerTemplate::new(TriggerId(1), "T1", "#33ccff"),
    ]
}

fn actions() -> Vec<ActionTemplate> {
    vec![
        ActionTemplate::new(ActionId(0), "A0", "#66ff33"),
        ActionTemplate::new(ActionId(1), "A1", "#33ccff"),
        ActionTemplate::new(ActionId(2), "A2", "#ff66cc"),
        ActionTemplate::new(ActionId(3), "A3", "#ffcc00"),
    ]
}

fn one_two_three() -> Machine<Recorder> {
    MachineBuilder::new()
        .states(["One", "Two", "Three"])
        .transition(TransitionSpec::new(0, 1).arm(TriggerId(0)))
        .triggers(triggers())
        .actions(actions())
        .on_action(Recorder::default())
        .build()
        .unwrap()
}

fn active(machine: &Machine<Recorder>) -> String {
    machine.active_state().unwrap().id().to_string()
}

#[test]
fn fire_then_stall_in_second_state() {
    let mut machine = one_two_three();
    assert_eq!(active(&machine), "0");

    assert!(machine.trigger_transition(TriggerId(0)).is_transitioned());
    assert_eq!(active(&machine), "1");

    assert_eq!(machine.trigger_transition(TriggerId(0)), TriggerOutcome::NoMatch);
    assert_eq!(active(&machine), "1");
}

#[test]
fn removing_active_state_hands_over_and_cascades() {
    let mut machine = one_two_three();
    machine.trigger_transition(TriggerId(0));
    machine
        .edit()
        .add_transition(Connection::new("1", "2"))
        .unwrap();

    machine.edit().remove_state(&"1".into()).unwrap();

    let graph = machine.graph();
    assert_eq!(graph.states().len(), 2);
    assert_eq!(graph.states().iter().filter(|s| s.is_active()).count(), 1);
    assert!(graph.transitions().is_empty());
}

#[test]
fn dispatch_fires_only_armed_actions_in_order() {
    let mut machine = MachineBuilder::new()
        .states([
            StateSpec::new("Idle"),
            StateSpec::new("Busy")
                .arm(ActionId(1))
                .arm(ActionId(3)),
        ])
        .transition(TransitionSpec::new(0, 1).arm(TriggerId(1)))
        .triggers(triggers())
        .actions(vec![
            ActionTemplate::new(ActionId(1), "A1", "#33ccff"),
            ActionTemplate::new(ActionId(2), "A2", "#ff66cc"),
            ActionTemplate::new(ActionId(3), "A3", "#ffcc00"),
        ])
        .on_action(Recorder::default())
        .build()
        .unwrap();

    machine.trigger_transition(TriggerId(1));

    assert_eq!(machine.handler().fired, vec![ActionId(1), ActionId(3)]);
}

#[test]
fn arming_after_construction_enables_transition() {
    let mut machine = MachineBuilder::new()
        .states(["One", "Two"])
        .transition(TransitionSpec::new(0, 1))
        .triggers(triggers())
        .actions(actions())
        .on_action(Recorder::default())
        .build()
        .unwrap();

    assert_eq!(machine.trigger_transition(TriggerId(1)), TriggerOutcome::NoMatch);

    machine
        .edit()
        .toggle_instance_active("edge-0-1", 1)
        .unwrap();
    machine.edit().toggle_instance_active("1", 2).unwrap();

    assert!(machine.trigger_transition(TriggerId(1)).is_transitioned());
    assert_eq!(active(&machine), "1");
    assert_eq!(machine.handler().fired, vec![ActionId(2)]);
}

#[test]
fn interactive_editing_round() {
    let mut machine = one_two_three();

    let new_id = machine.edit().add_state(StateSpec::new("Four")).id().clone();
    assert_eq!(new_id.as_str(), "3");
    assert!(!machine.graph().state(&new_id).unwrap().is_active());

    let edge = machine
        .edit()
        .add_transition(Connection::new("0", "3"))
        .unwrap()
        .id()
        .clone();
    machine
        .edit()
        .set_trigger_active(&edge, TriggerId(1), true)
        .unwrap();

    assert!(machine.trigger_transition(TriggerId(1)).is_transitioned());
    assert_eq!(active(&machine), "3");

    machine.edit().remove_transition(&edge).unwrap();
    assert_eq!(machine.graph().transitions().len(), 1);
    assert_eq!(active(&machine), "3");
}

#[test]
fn removing_every_state_empties_the_machine() {
    let mut machine = one_two_three();
    for id in ["2", "0", "1"] {
        machine.edit().remove_state(&id.into()).unwrap();
    }

    assert!(machine.graph().is_empty());
    assert!(machine.active_state().is_none());
    assert_eq!(
        machine.trigger_transition(TriggerId(0)),
        TriggerOutcome::NoActiveState
    );

    let id = machine.edit().add_state("Fresh".into()).id().clone();
    assert!(machine.graph().state(&id).unwrap().is_active());
}

#[test]
fn history_tracks_the_walk() {
    let mut machine = MachineBuilder::new()
        .states(["A", "B", "C"])
        .transitions([
            TransitionSpec::new(0, 1).arm(TriggerId(0)),
            TransitionSpec::new(1, 2).arm(TriggerId(1)),
            TransitionSpec::new(2, 0).arm(TriggerId(0)),
        ])
        .triggers(triggers())
        .build()
        .unwrap();

    machine.trigger_transition(TriggerId(0));
    machine.trigger_transition(TriggerId(1));
    machine.trigger_transition(TriggerId(0));

    let path: Vec<String> = machine
        .history()
        .path()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(path, vec!["0", "1", "2", "0"]);
    assert!(machine.history().duration().is_some());
}

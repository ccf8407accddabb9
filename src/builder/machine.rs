//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::validation::validate_transitions;
use crate::catalog::{ActionTemplate, Catalog, TriggerTemplate};
use crate::engine::{ActionHandler, Machine, MachineConfig, NoopHandler};
use crate::graph::{Graph, GridLayout, StateSpec, TransitionSpec};
use stillwater::validation::Validation;

/// Builder for constructing machines with a fluent API.
///
/// `build` creates the initial graph (state 0 active) and enters it, so the
/// handler already sees the initial state's armed actions.
pub struct MachineBuilder<H: ActionHandler = NoopHandler> {
    states: Vec<StateSpec>,
    transitions: Vec<TransitionSpec>,
    catalog: Catalog,
    config: MachineConfig,
    handler: H,
}

impl MachineBuilder<NoopHandler> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            catalog: Catalog::default(),
            config: MachineConfig::default(),
            handler: NoopHandler,
        }
    }
}

impl Default for MachineBuilder<NoopHandler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ActionHandler> MachineBuilder<H> {
    /// Add one initial state. Its index is its position in the state list.
    pub fn state(mut self, spec: impl Into<StateSpec>) -> Self {
        self.states.push(spec.into());
        self
    }

    pub fn states<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateSpec>,
    {
        self.states.extend(specs.into_iter().map(Into::into));
        self
    }

    /// Add one initial transition between state indices.
    pub fn transition(mut self, spec: TransitionSpec) -> Self {
        self.transitions.push(spec);
        self
    }

    pub fn transitions(mut self, specs: impl IntoIterator<Item = TransitionSpec>) -> Self {
        self.transitions.extend(specs);
        self
    }

    pub fn trigger(mut self, template: TriggerTemplate) -> Self {
        self.catalog.triggers.push(template);
        self
    }

    pub fn triggers(mut self, templates: impl IntoIterator<Item = TriggerTemplate>) -> Self {
        self.catalog.triggers.extend(templates);
        self
    }

    pub fn action(mut self, template: ActionTemplate) -> Self {
        self.catalog.actions.push(template);
        self
    }

    pub fn actions(mut self, templates: impl IntoIterator<Item = ActionTemplate>) -> Self {
        self.catalog.actions.extend(templates);
        self
    }

    /// Replace the whole catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn layout(mut self, layout: GridLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn max_chained_triggers(mut self, limit: usize) -> Self {
        self.config.max_chained_triggers = limit;
        self
    }

    /// Keep at most `limit` activations in the history; `None` keeps all.
    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Fail `build` on out-of-range or repeated transition specs instead of
    /// dropping or merging them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Set the action handler.
    pub fn on_action<G: ActionHandler>(self, handler: G) -> MachineBuilder<G> {
        MachineBuilder {
            states: self.states,
            transitions: self.transitions,
            catalog: self.catalog,
            config: self.config,
            handler,
        }
    }

    /// Build and start the machine.
    pub fn build(self) -> Result<Machine<H>, BuildError> {
        if self.config.strict {
            if let Validation::Failure(errors) =
                validate_transitions(self.states.len(), &self.transitions)
            {
                return Err(BuildError::InvalidTransitions(
                    errors.iter().cloned().collect(),
                ));
            }
        }

        let graph = Graph::initialize(
            &self.states,
            &self.transitions,
            self.catalog,
            self.config.layout,
        );
        tracing::debug!(
            states = graph.states().len(),
            transitions = graph.transitions().len(),
            "machine built"
        );
        Ok(Machine::start(graph, self.handler, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SpecViolation;
    use crate::catalog::{ActionId, TriggerId};
    use crate::engine::TriggerQueue;

    #[derive(Default)]
    struct Recorder {
        fired: Vec<ActionId>,
    }

    impl ActionHandler for Recorder {
        fn on_action(&mut self, action: ActionId, _queue: &mut TriggerQueue) {
            self.fired.push(action);
        }
    }

    fn demo() -> MachineBuilder {
        MachineBuilder::new()
            .states(["One", "Two", "Three"])
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
    }

    #[test]
    fn builds_initial_graph() {
        let machine = demo().build().unwrap();
        let graph = machine.graph();

        assert_eq!(graph.states().len(), 3);
        assert_eq!(graph.transitions().len(), 1);
        assert_eq!(graph.catalog().triggers.len(), 2);
        assert_eq!(machine.active_state().unwrap().label(), "One");
    }

    #[test]
    fn empty_builder_gives_empty_machine() {
        let machine = MachineBuilder::default().build().unwrap();
        assert!(machine.graph().is_empty());
    }

    #[test]
    fn permissive_build_drops_invalid_specs() {
        let machine = demo()
            .transition(TransitionSpec::new(2, 7))
            .build()
            .unwrap();

        assert_eq!(machine.graph().transitions().len(), 1);
    }

    #[test]
    fn strict_build_reports_every_invalid_spec() {
        let result = demo()
            .transition(TransitionSpec::new(2, 7))
            .transition(TransitionSpec::new(0, 1))
            .strict(true)
            .build();

        match result {
            Err(BuildError::InvalidTransitions(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&SpecViolation::TargetOutOfRange {
                    spec: 1,
                    index: 7,
                    states: 3
                }));
                assert!(violations.contains(&SpecViolation::DuplicatePair {
                    spec: 2,
                    from: 0,
                    to: 1
                }));
            }
            Ok(_) => panic!("Expected strict build to fail"),
        }
    }

    #[test]
    fn history_limit_reaches_machine() {
        let machine = demo().history_limit(Some(2)).build().unwrap();
        assert_eq!(machine.config().history_limit, Some(2));
        assert_eq!(machine.history().limit(), Some(2));
    }

    #[test]
    fn strict_build_accepts_valid_specs() {
        assert!(demo().strict(true).build().is_ok());
    }

    #[test]
    fn handler_receives_initial_dispatch() {
        let machine = demo()
            .state(StateSpec::new("Four").arm(ActionId(1)))
            .on_action(Recorder::default())
            .build()
            .unwrap();

        // State 0 is entered, not state 3.
        assert!(machine.handler().fired.is_empty());

        let machine = MachineBuilder::new()
            .state(StateSpec::new("Start").arm(ActionId(1)))
            .action(ActionTemplate::new(ActionId(1), "A1", "#33ccff"))
            .on_action(Recorder::default())
            .build()
            .unwrap();
        assert_eq!(machine.handler().fired, vec![ActionId(1)]);
    }

    #[test]
    fn config_settings_are_applied() {
        let layout = GridLayout {
            columns: 2,
            spacing: 50.0,
            origin: 0.0,
        };
        let machine = demo().layout(layout).max_chained_triggers(8).build().unwrap();

        assert_eq!(machine.config().max_chained_triggers, 8);
        assert_eq!(machine.config().layout, layout);
        assert_eq!(machine.graph().states()[2].position().y, 50.0);
    }
}

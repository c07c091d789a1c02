//! Transition and state machine definitions.
//!
//! A transition is a named edge: a source-state set, a target state, an
//! ordered list of gating criteria, and an optional processor. A state
//! machine declares one entity kind's full state set and its transitions;
//! `build()` rejects definitions that reference undeclared states, so a typo
//! in a state name fails at wiring time instead of silently never matching.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::criterion::Criterion;
use crate::error::DefinitionError;
use crate::processor::Processor;

/// Named edge in an entity kind's state machine.
pub struct Transition<E, D> {
    name: &'static str,
    from: Vec<&'static str>,
    to: &'static str,
    criteria: Vec<Arc<dyn Criterion<E, D>>>,
    processor: Option<Arc<dyn Processor<E, D>>>,
}

impl<E, D> Transition<E, D> {
    pub fn new(name: &'static str, to: &'static str) -> Self {
        Self {
            name,
            from: Vec::new(),
            to,
            criteria: Vec::new(),
            processor: None,
        }
    }

    /// Source states this transition may fire from.
    pub fn from(mut self, states: &[&'static str]) -> Self {
        self.from.extend_from_slice(states);
        self
    }

    /// Append a gating criterion. Criteria are evaluated in the order they
    /// were appended, short-circuiting on the first failure.
    pub fn criterion<C: Criterion<E, D> + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(Arc::new(criterion));
        self
    }

    /// Set the transition's action processor.
    pub fn processor<P: Processor<E, D> + 'static>(mut self, processor: P) -> Self {
        self.processor = Some(Arc::new(processor));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn from_states(&self) -> &[&'static str] {
        &self.from
    }

    pub fn to_state(&self) -> &'static str {
        self.to
    }

    pub fn criteria(&self) -> &[Arc<dyn Criterion<E, D>>] {
        &self.criteria
    }

    pub fn processor_ref(&self) -> Option<&Arc<dyn Processor<E, D>>> {
        self.processor.as_ref()
    }
}

/// One entity kind's complete lifecycle definition.
pub struct StateMachine<E, D> {
    initial_state: &'static str,
    states: Vec<&'static str>,
    transitions: Vec<Transition<E, D>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, D> std::fmt::Debug for StateMachine<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .field(
                "transitions",
                &self.transitions.iter().map(|t| t.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<E, D> StateMachine<E, D> {
    pub fn builder() -> StateMachineBuilder<E, D> {
        StateMachineBuilder {
            initial_state: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn initial_state(&self) -> &'static str {
        self.initial_state
    }

    pub fn states(&self) -> &[&'static str] {
        &self.states
    }

    pub fn find(&self, transition: &str) -> Option<&Transition<E, D>> {
        self.transitions.iter().find(|t| t.name == transition)
    }
}

pub struct StateMachineBuilder<E, D> {
    initial_state: Option<&'static str>,
    states: Vec<&'static str>,
    transitions: Vec<Transition<E, D>>,
}

impl<E, D> StateMachineBuilder<E, D> {
    /// Declare the full state set.
    pub fn states(mut self, states: &[&'static str]) -> Self {
        self.states.extend_from_slice(states);
        self
    }

    /// Declare the state entities are created in.
    pub fn initial(mut self, state: &'static str) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn transition(mut self, transition: Transition<E, D>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Validate and finish the definition. `kind` is used only for error
    /// reporting; registration keys machines by the entity type's own KIND.
    pub fn build(self, kind: &'static str) -> Result<StateMachine<E, D>, DefinitionError> {
        if self.states.is_empty() {
            return Err(DefinitionError::NoStates {
                kind: kind.to_string(),
            });
        }

        let initial = self.initial_state.unwrap_or(self.states[0]);
        if !self.states.contains(&initial) {
            return Err(DefinitionError::UndeclaredInitial {
                kind: kind.to_string(),
                state: initial.to_string(),
            });
        }

        let mut seen = Vec::new();
        for t in &self.transitions {
            if seen.contains(&t.name) {
                return Err(DefinitionError::DuplicateTransition {
                    kind: kind.to_string(),
                    transition: t.name.to_string(),
                });
            }
            seen.push(t.name);

            if t.from.is_empty() {
                return Err(DefinitionError::EmptyFrom {
                    kind: kind.to_string(),
                    transition: t.name.to_string(),
                });
            }
            for state in t.from.iter().chain(std::iter::once(&t.to)) {
                if !self.states.contains(state) {
                    return Err(DefinitionError::UndeclaredState {
                        kind: kind.to_string(),
                        transition: t.name.to_string(),
                        state: state.to_string(),
                    });
                }
            }
        }

        Ok(StateMachine {
            initial_state: initial,
            states: self.states,
            transitions: self.transitions,
            _entity: PhantomData,
        })
    }
}

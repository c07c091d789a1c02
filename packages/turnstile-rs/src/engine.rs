//! Transition execution: the contract the workflow platform honors.
//!
//! For each requested transition the engine evaluates the gating criteria in
//! declaration order with short-circuit, then runs the processor, then hands
//! the applied result back to the platform for persistence. Two hard rules:
//!
//! - **Fail-closed guards**: a criterion that panics is treated as a failing
//!   check, never as a pass and never as an engine crash.
//! - **Abort-on-error actions**: a processor error (or panic) aborts the
//!   transition; the entity mutation is discarded. Side effects the processor
//!   already issued are not compensated.
//!
//! Machines are held type-erased so one registry can span every entity kind;
//! the typed payload is decoded exactly once per invocation at this boundary.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::core::{Document, EntityId, LifecycleEntity};
use crate::criterion::{CheckContext, CheckOutcome};
use crate::error::{DefinitionError, ServiceError};
use crate::processor::{ProcessContext, ProcessError, SecondaryAttempt};
use crate::service::EntityService;
use crate::transition::StateMachine;

/// Result of a successfully executed transition, before persistence.
pub struct Applied {
    pub to_state: &'static str,
    pub data: serde_json::Value,
    pub secondary: Vec<SecondaryAttempt>,
}

/// Type-erased state machine, so machines for different entity types can
/// share one registry.
#[async_trait]
pub trait AnyMachine<D: Send + Sync>: Send + Sync {
    fn kind(&self) -> &'static str;

    fn initial_state(&self) -> &'static str;

    /// Decode-and-validate a payload at the save boundary, returning the
    /// entity's own identifier.
    fn extract_id(&self, data: &serde_json::Value) -> Result<EntityId, ServiceError>;

    async fn run_transition(
        &self,
        doc: &Document,
        transition: &str,
        params: &serde_json::Value,
        deps: &D,
        service: &Arc<dyn EntityService>,
    ) -> Result<Applied, ServiceError>;
}

#[async_trait]
impl<E, D> AnyMachine<D> for StateMachine<E, D>
where
    E: LifecycleEntity,
    D: Send + Sync + 'static,
{
    fn kind(&self) -> &'static str {
        E::KIND
    }

    fn initial_state(&self) -> &'static str {
        StateMachine::initial_state(self)
    }

    fn extract_id(&self, data: &serde_json::Value) -> Result<EntityId, ServiceError> {
        let entity: E =
            serde_json::from_value(data.clone()).map_err(|source| ServiceError::Decode {
                kind: E::KIND.to_string(),
                source,
            })?;
        Ok(entity.technical_id())
    }

    async fn run_transition(
        &self,
        doc: &Document,
        transition: &str,
        params: &serde_json::Value,
        deps: &D,
        service: &Arc<dyn EntityService>,
    ) -> Result<Applied, ServiceError> {
        let t = self
            .find(transition)
            .ok_or_else(|| ServiceError::UnknownTransition {
                kind: E::KIND.to_string(),
                transition: transition.to_string(),
            })?;

        if !t.from_states().iter().any(|s| *s == doc.meta.state) {
            return Err(ServiceError::NotPermitted {
                transition: transition.to_string(),
                state: doc.meta.state.clone(),
            });
        }

        let entity: E = doc.decode()?;

        let check_ctx = CheckContext { deps, params };
        for criterion in t.criteria() {
            let outcome = match AssertUnwindSafe(criterion.check(&entity, &check_ctx))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!(
                        kind = E::KIND,
                        id = %doc.meta.id,
                        criterion = criterion.name(),
                        "Criterion panicked; treating as failed check"
                    );
                    CheckOutcome::fail("criterion_panicked", "internal error during check")
                }
            };

            match outcome {
                CheckOutcome::Pass { warnings } => {
                    for warning in warnings {
                        warn!(
                            kind = E::KIND,
                            id = %doc.meta.id,
                            criterion = criterion.name(),
                            "{warning}"
                        );
                    }
                }
                CheckOutcome::Fail { code, detail } => {
                    warn!(
                        kind = E::KIND,
                        id = %doc.meta.id,
                        transition,
                        criterion = criterion.name(),
                        code = %code,
                        "Transition rejected: {detail}"
                    );
                    return Err(ServiceError::Rejected {
                        transition: transition.to_string(),
                        criterion: criterion.name().to_string(),
                        code,
                        detail,
                    });
                }
            }
        }

        let Some(processor) = t.processor_ref() else {
            debug!(
                kind = E::KIND,
                id = %doc.meta.id,
                transition,
                to = t.to_state(),
                "Transition has no processor; committing state change only"
            );
            return Ok(Applied {
                to_state: t.to_state(),
                data: doc.data.clone(),
                secondary: Vec::new(),
            });
        };

        let process_ctx = ProcessContext::new(deps, params, service);
        let result = match AssertUnwindSafe(processor.process(entity, &process_ctx))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                error!(
                    kind = E::KIND,
                    id = %doc.meta.id,
                    processor = processor.name(),
                    "Processor panicked; aborting transition"
                );
                Err(ProcessError::Internal("processor panicked".to_string()))
            }
        };

        match result {
            Ok(outcome) => {
                let data = serde_json::to_value(&outcome.entity).map_err(|source| {
                    ServiceError::Encode {
                        kind: E::KIND.to_string(),
                        source,
                    }
                })?;
                Ok(Applied {
                    to_state: t.to_state(),
                    data,
                    secondary: outcome.secondary,
                })
            }
            Err(e) => {
                error!(
                    kind = E::KIND,
                    id = %doc.meta.id,
                    transition,
                    processor = processor.name(),
                    error = %e,
                    "Processor failed; transition aborted"
                );
                Err(ServiceError::ProcessorFailed {
                    processor: processor.name().to_string(),
                    source: Box::new(e),
                })
            }
        }
    }
}

/// Registry of one type-erased machine per entity kind.
pub struct MachineRegistry<D: Send + Sync> {
    machines: DashMap<&'static str, Arc<dyn AnyMachine<D>>>,
}

impl<D: Send + Sync + 'static> MachineRegistry<D> {
    pub fn new() -> Self {
        Self {
            machines: DashMap::new(),
        }
    }

    pub fn register<E: LifecycleEntity>(
        &self,
        machine: StateMachine<E, D>,
    ) -> Result<(), DefinitionError> {
        if self.machines.contains_key(E::KIND) {
            return Err(DefinitionError::DuplicateKind(E::KIND.to_string()));
        }
        self.machines.insert(E::KIND, Arc::new(machine));
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn AnyMachine<D>>> {
        self.machines.get(kind).map(|entry| entry.value().clone())
    }
}

impl<D: Send + Sync + 'static> Default for MachineRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

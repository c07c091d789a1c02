//! In-memory platform implementing the [`EntityService`] contract.
//!
//! Backs integration tests and local seed runs: documents live in a
//! concurrent map, transitions run through the real engine, and every
//! attempted transition lands in an inspectable audit trail. This is a
//! stand-in for the external workflow platform, not a persistence layer;
//! it keeps no locks across awaits (documents are cloned out, mutated, and
//! written back), which also reproduces the platform's non-atomic
//! cross-entity semantics.

use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::core::{
    Document, DocumentMeta, EntityId, LifecycleEntity, RecordedOutcome, TransitionReceipt,
    TransitionRecord,
};
use crate::engine::MachineRegistry;
use crate::error::ServiceError;
use crate::service::{Condition, EntityService};
use crate::transition::StateMachine;

/// Builder wiring deps and machines before the platform goes live.
pub struct PlatformBuilder<D: Send + Sync + 'static> {
    deps: D,
    registry: MachineRegistry<D>,
}

impl<D: Send + Sync + 'static> PlatformBuilder<D> {
    pub fn new(deps: D) -> Self {
        Self {
            deps,
            registry: MachineRegistry::new(),
        }
    }

    /// Register an entity kind's state machine. A malformed definition is a
    /// wiring bug, so it panics here rather than surfacing mid-test.
    pub fn machine<E: LifecycleEntity>(self, machine: StateMachine<E, D>) -> Self {
        self.registry
            .register(machine)
            .expect("valid state machine definition");
        self
    }

    pub fn build(self) -> Arc<InMemoryPlatform<D>> {
        Arc::new_cyclic(|weak| InMemoryPlatform {
            deps: self.deps,
            registry: self.registry,
            store: dashmap::DashMap::new(),
            audit: Mutex::new(Vec::new()),
            weak: weak.clone(),
        })
    }
}

/// In-memory entity store plus engine, posing as the external platform.
pub struct InMemoryPlatform<D: Send + Sync + 'static> {
    deps: D,
    registry: MachineRegistry<D>,
    store: dashmap::DashMap<(String, EntityId), Document>,
    audit: Mutex<Vec<TransitionRecord>>,
    weak: Weak<InMemoryPlatform<D>>,
}

impl<D: Send + Sync + 'static> InMemoryPlatform<D> {
    pub fn builder(deps: D) -> PlatformBuilder<D> {
        PlatformBuilder::new(deps)
    }

    pub fn deps(&self) -> &D {
        &self.deps
    }

    /// The platform as the injected service collaborator.
    pub fn service(&self) -> Arc<dyn EntityService> {
        self.as_service()
    }

    /// Snapshot of every attempted transition, in order.
    pub fn audit_trail(&self) -> Vec<TransitionRecord> {
        self.audit.lock().expect("audit lock").clone()
    }

    /// Audit entries for one entity, in order.
    pub fn audit_for(&self, id: EntityId) -> Vec<TransitionRecord> {
        self.audit_trail()
            .into_iter()
            .filter(|r| r.entity_id == id)
            .collect()
    }

    fn record(&self, record: TransitionRecord) {
        self.audit.lock().expect("audit lock").push(record);
    }

    fn as_service(&self) -> Arc<dyn EntityService> {
        let platform = self.weak.upgrade().expect("platform still alive");
        platform
    }
}

#[async_trait]
impl<D: Send + Sync + 'static> EntityService for InMemoryPlatform<D> {
    async fn get_by_id(
        &self,
        kind: &str,
        id: EntityId,
    ) -> Result<Option<Document>, ServiceError> {
        Ok(self
            .store
            .get(&(kind.to_string(), id))
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        kind: &str,
        data: serde_json::Value,
    ) -> Result<DocumentMeta, ServiceError> {
        let machine = self
            .registry
            .get(kind)
            .ok_or_else(|| ServiceError::UnknownKind(kind.to_string()))?;

        // Decode-and-validate at the boundary; the payload's own id becomes
        // the document id.
        let id = machine.extract_id(&data)?;
        let meta = DocumentMeta {
            id,
            version: 1,
            state: machine.initial_state().to_string(),
        };
        debug!(kind, %id, state = %meta.state, "Saved entity");
        self.store.insert(
            (kind.to_string(), id),
            Document {
                meta: meta.clone(),
                data,
            },
        );
        Ok(meta)
    }

    async fn update(
        &self,
        kind: &str,
        id: EntityId,
        data: serde_json::Value,
    ) -> Result<Document, ServiceError> {
        let machine = self
            .registry
            .get(kind)
            .ok_or_else(|| ServiceError::UnknownKind(kind.to_string()))?;
        machine.extract_id(&data)?;

        let key = (kind.to_string(), id);
        let existing = self
            .store
            .get(&key)
            .map(|entry| entry.value().meta.clone())
            .ok_or_else(|| ServiceError::NotFound {
                kind: kind.to_string(),
                id,
            })?;

        let doc = Document {
            meta: DocumentMeta {
                id,
                version: existing.version + 1,
                state: existing.state,
            },
            data,
        };
        self.store.insert(key, doc.clone());
        Ok(doc)
    }

    async fn execute_transition(
        &self,
        kind: &str,
        id: EntityId,
        transition: &str,
        params: serde_json::Value,
    ) -> Result<TransitionReceipt, ServiceError> {
        let machine = self
            .registry
            .get(kind)
            .ok_or_else(|| ServiceError::UnknownKind(kind.to_string()))?;

        let key = (kind.to_string(), id);
        let doc = self
            .store
            .get(&key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::NotFound {
                kind: kind.to_string(),
                id,
            })?;

        let service = self.as_service();
        let result = machine
            .run_transition(&doc, transition, &params, &self.deps, &service)
            .await;

        match result {
            Ok(applied) => {
                let meta = DocumentMeta {
                    id,
                    version: doc.meta.version + 1,
                    state: applied.to_state.to_string(),
                };
                self.store.insert(
                    key,
                    Document {
                        meta: meta.clone(),
                        data: applied.data,
                    },
                );
                self.record(TransitionRecord {
                    entity_kind: kind.to_string(),
                    entity_id: id,
                    transition: transition.to_string(),
                    from_state: doc.meta.state.clone(),
                    outcome: RecordedOutcome::Committed {
                        to_state: meta.state.clone(),
                    },
                    secondary: applied.secondary.clone(),
                    at: Utc::now(),
                });
                Ok(TransitionReceipt {
                    meta,
                    transition: transition.to_string(),
                    secondary: applied.secondary,
                })
            }
            Err(e) => {
                let outcome = match &e {
                    ServiceError::Rejected {
                        criterion, code, ..
                    } => RecordedOutcome::Rejected {
                        criterion: criterion.clone(),
                        code: code.clone(),
                    },
                    other => RecordedOutcome::Aborted {
                        error: other.to_string(),
                    },
                };
                self.record(TransitionRecord {
                    entity_kind: kind.to_string(),
                    entity_id: id,
                    transition: transition.to_string(),
                    from_state: doc.meta.state.clone(),
                    outcome,
                    secondary: Vec::new(),
                    at: Utc::now(),
                });
                Err(e)
            }
        }
    }

    async fn find_all(&self, kind: &str) -> Result<Vec<Document>, ServiceError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| entry.key().0 == kind)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn search(
        &self,
        kind: &str,
        condition: &Condition,
    ) -> Result<Vec<Document>, ServiceError> {
        Ok(self
            .find_all(kind)
            .await?
            .into_iter()
            .filter(|doc| condition.matches(&doc.data))
            .collect())
    }
}

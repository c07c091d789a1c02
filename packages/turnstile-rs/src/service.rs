//! The platform service contract consumed by processors and exposed to tests.
//!
//! In production the implementation is the external entity/workflow platform;
//! in this repository the [`crate::testing::InMemoryPlatform`] implements the
//! same contract so flows are executable end-to-end. All reads and writes of
//! any entity go through this trait; no snapshot caching is kept between
//! calls, so staleness is bounded by call latency only.

use async_trait::async_trait;

use crate::core::{Document, DocumentMeta, EntityId, LifecycleEntity, TransitionReceipt};
use crate::error::ServiceError;

/// Minimal search condition over entity payload fields.
///
/// This layer never relies on cursor or streaming semantics; every reported
/// use materializes the full result set.
#[derive(Debug, Clone)]
pub enum Condition {
    All(Vec<Condition>),
    Eq {
        field: String,
        value: serde_json::Value,
    },
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::All(conditions)
    }

    /// Evaluate against a payload. Missing fields never match.
    pub fn matches(&self, data: &serde_json::Value) -> bool {
        match self {
            Self::All(conditions) => conditions.iter().all(|c| c.matches(data)),
            Self::Eq { field, value } => data.get(field) == Some(value),
        }
    }
}

/// The injected collaborator every criterion and processor works against.
#[async_trait]
pub trait EntityService: Send + Sync {
    async fn get_by_id(&self, kind: &str, id: EntityId)
        -> Result<Option<Document>, ServiceError>;

    /// Persist a new entity in its machine's initial state. The payload must
    /// decode as the registered kind; the entity's own identifier becomes the
    /// document id.
    async fn save(&self, kind: &str, data: serde_json::Value)
        -> Result<DocumentMeta, ServiceError>;

    /// Replace an existing entity's payload without moving its state.
    async fn update(
        &self,
        kind: &str,
        id: EntityId,
        data: serde_json::Value,
    ) -> Result<Document, ServiceError>;

    /// Run a named transition: evaluate its criteria in order, execute its
    /// processor, commit the target state. Fails if the current state does
    /// not permit the transition or a gating criterion rejects it.
    async fn execute_transition(
        &self,
        kind: &str,
        id: EntityId,
        transition: &str,
        params: serde_json::Value,
    ) -> Result<TransitionReceipt, ServiceError>;

    async fn find_all(&self, kind: &str) -> Result<Vec<Document>, ServiceError>;

    async fn search(
        &self,
        kind: &str,
        condition: &Condition,
    ) -> Result<Vec<Document>, ServiceError>;
}

/// Typed conveniences over the raw JSON contract.
#[async_trait]
pub trait EntityServiceExt: EntityService {
    /// Fetch and decode an entity in one step.
    async fn get_entity<E: LifecycleEntity>(
        &self,
        id: EntityId,
    ) -> Result<Option<(DocumentMeta, E)>, ServiceError> {
        match self.get_by_id(E::KIND, id).await? {
            Some(doc) => {
                let entity = doc.decode::<E>()?;
                Ok(Some((doc.meta, entity)))
            }
            None => Ok(None),
        }
    }

    /// Encode and persist a new typed entity.
    async fn save_entity<E: LifecycleEntity>(
        &self,
        entity: &E,
    ) -> Result<DocumentMeta, ServiceError> {
        let data = serde_json::to_value(entity).map_err(|source| ServiceError::Encode {
            kind: E::KIND.to_string(),
            source,
        })?;
        self.save(E::KIND, data).await
    }

    /// Execute a transition with an empty parameter bag.
    async fn transition(
        &self,
        kind: &str,
        id: EntityId,
        transition: &str,
    ) -> Result<TransitionReceipt, ServiceError> {
        self.execute_transition(kind, id, transition, serde_json::Value::Null)
            .await
    }
}

#[async_trait]
impl<T: EntityService + ?Sized> EntityServiceExt for T {}

//! Processor trait, process outcomes, and the processor error taxonomy.
//!
//! A processor runs the side effects of a transition in a fixed step order:
//! local mutation first, then optional external calls, then optional
//! cross-entity transition requests, then log-only notifications. It returns
//! the mutated entity together with a record of every cross-entity attempt it
//! issued, so partial failure is observable instead of living only in logs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinator::RelatedEntity;
use crate::core::EntityId;
use crate::error::ServiceError;
use crate::service::EntityService;

/// How a single cross-entity transition request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    Succeeded,
    Failed { error: String },
}

/// Record of one transition requested on another entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryAttempt {
    pub target_kind: String,
    pub target_id: EntityId,
    pub transition: String,
    pub outcome: AttemptOutcome,
}

impl SecondaryAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Succeeded)
    }
}

/// Successful result of a processor run: the mutated entity plus the
/// secondary attempts issued along the way.
#[derive(Debug, Clone)]
pub struct ProcessOutcome<E> {
    pub entity: E,
    pub secondary: Vec<SecondaryAttempt>,
}

impl<E> ProcessOutcome<E> {
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            secondary: Vec::new(),
        }
    }

    pub fn with_secondary(entity: E, secondary: Vec<SecondaryAttempt>) -> Self {
        Self { entity, secondary }
    }
}

/// Why a processor aborted its transition.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A business precondition on the critical path failed (e.g. the
    /// referenced pet is not available when placing an order).
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("related {kind} {id} not found")]
    RelatedNotFound { kind: String, id: EntityId },

    #[error("related {kind} {id} is in state '{actual}', expected one of {expected:?}")]
    RelatedState {
        kind: String,
        id: EntityId,
        actual: String,
        expected: Vec<String>,
    },

    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    /// A critical-path external call failed. Non-critical calls are absorbed
    /// at the call site with a fallback value instead of raising this.
    #[error("external service failure: {0}")]
    External(#[from] anyhow::Error),

    #[error("internal processor failure: {0}")]
    Internal(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Context handed to processors: injected deps, the caller's parameter bag,
/// and the entity service for lookups, saves, and cross-entity transitions.
pub struct ProcessContext<'a, D> {
    pub deps: &'a D,
    pub params: &'a serde_json::Value,
    service: &'a Arc<dyn EntityService>,
}

impl<'a, D> ProcessContext<'a, D> {
    pub fn new(
        deps: &'a D,
        params: &'a serde_json::Value,
        service: &'a Arc<dyn EntityService>,
    ) -> Self {
        Self {
            deps,
            params,
            service,
        }
    }

    pub fn service(&self) -> &Arc<dyn EntityService> {
        self.service
    }

    /// Start the fixed cross-entity protocol against a related entity:
    /// lookup, state verification, then a named transition request.
    pub fn related(&self, kind: &str, id: EntityId) -> RelatedEntity<'_> {
        RelatedEntity::new(self.service, kind, id)
    }
}

/// A transition action: mutates the owning entity and may trigger transitions
/// on other entities. An `Err` aborts the transition; the engine discards the
/// entity mutation and persists nothing.
#[async_trait]
pub trait Processor<E, D>: Send + Sync {
    /// Name used in logs, abort errors, and the audit trail.
    fn name(&self) -> &'static str;

    async fn process(
        &self,
        entity: E,
        ctx: &ProcessContext<'_, D>,
    ) -> Result<ProcessOutcome<E>, ProcessError>;
}

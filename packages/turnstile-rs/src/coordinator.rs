//! Cross-entity coordination protocol.
//!
//! Every processor that touches a second entity follows the same fixed shape:
//! look the entity up by id, verify it is in an expected state, then request a
//! named transition on it. What differs per call site is only whether the
//! related action is on the critical path:
//!
//! - [`Mode::Primary`]: a failure propagates and aborts the owning transition
//!   (order placement depends on pet availability).
//! - [`Mode::BestEffort`]: a failure is logged and recorded as a failed
//!   [`SecondaryAttempt`], and the owning transition still commits (pet-status
//!   sync after delivery). Secondary failures never roll back the primary.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{Document, EntityId, LifecycleEntity};
use crate::processor::{AttemptOutcome, ProcessError, SecondaryAttempt};
use crate::service::EntityService;

/// Whether a related-entity action may abort the owning transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Primary,
    BestEffort,
}

/// Fluent handle over one related entity.
pub struct RelatedEntity<'a> {
    service: &'a Arc<dyn EntityService>,
    kind: String,
    id: EntityId,
}

impl<'a> RelatedEntity<'a> {
    pub fn new(service: &'a Arc<dyn EntityService>, kind: &str, id: EntityId) -> Self {
        Self {
            service,
            kind: kind.to_string(),
            id,
        }
    }

    /// Fetch the related document, failing with `RelatedNotFound` if absent.
    pub async fn fetch(&self) -> Result<Document, ProcessError> {
        self.service
            .get_by_id(&self.kind, self.id)
            .await?
            .ok_or_else(|| ProcessError::RelatedNotFound {
                kind: self.kind.clone(),
                id: self.id,
            })
    }

    /// Fetch and decode the related entity's payload.
    pub async fn fetch_as<E: LifecycleEntity>(&self) -> Result<E, ProcessError> {
        let doc = self.fetch().await?;
        Ok(doc.decode::<E>()?)
    }

    /// Fetch the related document and verify its workflow state is one of
    /// `expected`, failing with `RelatedState` otherwise.
    pub async fn expect_state(&self, expected: &[&str]) -> Result<Document, ProcessError> {
        let doc = self.fetch().await?;
        if expected.iter().any(|s| *s == doc.meta.state) {
            Ok(doc)
        } else {
            Err(ProcessError::RelatedState {
                kind: self.kind.clone(),
                id: self.id,
                actual: doc.meta.state.clone(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    /// Request a named transition on the related entity.
    ///
    /// The attempt is always appended to `attempts`. In `Primary` mode a
    /// failure is returned to the caller; in `BestEffort` mode it is logged
    /// at `warn` and swallowed.
    pub async fn transition(
        &self,
        name: &str,
        mode: Mode,
        attempts: &mut Vec<SecondaryAttempt>,
    ) -> Result<(), ProcessError> {
        debug!(
            kind = %self.kind,
            id = %self.id,
            transition = name,
            ?mode,
            "Requesting transition on related entity"
        );

        let result = self
            .service
            .execute_transition(&self.kind, self.id, name, serde_json::Value::Null)
            .await;

        match result {
            Ok(_) => {
                attempts.push(SecondaryAttempt {
                    target_kind: self.kind.clone(),
                    target_id: self.id,
                    transition: name.to_string(),
                    outcome: AttemptOutcome::Succeeded,
                });
                Ok(())
            }
            Err(e) => {
                attempts.push(SecondaryAttempt {
                    target_kind: self.kind.clone(),
                    target_id: self.id,
                    transition: name.to_string(),
                    outcome: AttemptOutcome::Failed {
                        error: e.to_string(),
                    },
                });
                match mode {
                    Mode::Primary => Err(ProcessError::Service(e)),
                    Mode::BestEffort => {
                        warn!(
                            kind = %self.kind,
                            id = %self.id,
                            transition = name,
                            error = %e,
                            "Best-effort related transition failed; primary transition continues"
                        );
                        Ok(())
                    }
                }
            }
        }
    }
}

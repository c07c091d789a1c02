//! Core types shared across the lifecycle layer.
//!
//! An entity lives in the platform as a [`Document`]: an envelope holding the
//! workflow metadata (id, version, current state) plus the typed payload as
//! JSON. Criteria and processors never see the envelope's state field as
//! something they can write; state only changes when the engine commits a
//! transition.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::processor::SecondaryAttempt;

/// Opaque entity identifier.
///
/// Always present on every entity payload and every document envelope.
/// There is no "unknown id" fallback anywhere in this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A typed entity payload managed by the lifecycle layer.
///
/// Implementors are plain serde structs. The platform stores them as JSON and
/// decodes them back at the orchestration boundary, so a wrong-shaped payload
/// surfaces as an explicit decode error instead of a silently mis-cast object.
pub trait LifecycleEntity:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Stable entity-kind tag (e.g. `"pet"`, `"order"`). One state machine is
    /// registered per kind.
    const KIND: &'static str;

    /// The entity's identifier. Required, never defaulted.
    fn technical_id(&self) -> EntityId;
}

/// Workflow metadata carried alongside every stored payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: EntityId,
    pub version: u32,
    pub state: String,
}

/// A stored entity: metadata envelope plus the payload as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub meta: DocumentMeta,
    pub data: serde_json::Value,
}

impl Document {
    /// Decode the payload into its concrete entity type.
    pub fn decode<E: LifecycleEntity>(&self) -> Result<E, ServiceError> {
        serde_json::from_value(self.data.clone()).map_err(|source| ServiceError::Decode {
            kind: E::KIND.to_string(),
            source,
        })
    }
}

/// Result of a committed transition, returned to the caller.
#[derive(Debug, Clone)]
pub struct TransitionReceipt {
    pub meta: DocumentMeta,
    pub transition: String,
    /// Cross-entity transition attempts issued by the processor, in order.
    pub secondary: Vec<SecondaryAttempt>,
}

/// How an attempted transition ended up, as recorded in the audit trail.
#[derive(Debug, Clone)]
pub enum RecordedOutcome {
    Committed { to_state: String },
    Rejected { criterion: String, code: String },
    Aborted { error: String },
}

/// One audit-trail entry per attempted transition.
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    pub entity_kind: String,
    pub entity_id: EntityId,
    pub transition: String,
    pub from_state: String,
    pub outcome: RecordedOutcome,
    pub secondary: Vec<SecondaryAttempt>,
    pub at: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn committed(&self) -> bool {
        matches!(self.outcome, RecordedOutcome::Committed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        id: EntityId,
        label: String,
    }

    impl LifecycleEntity for Widget {
        const KIND: &'static str = "widget";

        fn technical_id(&self) -> EntityId {
            self.id
        }
    }

    #[test]
    fn document_decodes_into_concrete_type() {
        let widget = Widget {
            id: EntityId::new(),
            label: "crate".into(),
        };
        let doc = Document {
            meta: DocumentMeta {
                id: widget.technical_id(),
                version: 1,
                state: "initial_state".into(),
            },
            data: serde_json::to_value(&widget).unwrap(),
        };

        let decoded: Widget = doc.decode().unwrap();
        assert_eq!(decoded.label, "crate");
        assert_eq!(decoded.technical_id(), widget.technical_id());
    }

    #[test]
    fn decode_of_wrong_shape_is_an_explicit_error() {
        let doc = Document {
            meta: DocumentMeta {
                id: EntityId::new(),
                version: 1,
                state: "initial_state".into(),
            },
            data: serde_json::json!({ "label": 42 }),
        };

        let err = doc.decode::<Widget>().unwrap_err();
        assert!(matches!(err, ServiceError::Decode { .. }));
    }
}

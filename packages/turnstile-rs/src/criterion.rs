//! Criterion trait and check outcomes.
//!
//! A criterion is an ordered battery of sub-checks over one entity snapshot:
//! required fields, then formats and ranges, then cross-field consistency,
//! then state-correlated business rules. The first hard failure wins and
//! carries a stable reason code. Advisory findings ride along on a passing
//! outcome as warnings and never fail the check.
//!
//! Criteria receive a decoded copy of the entity, so they cannot mutate the
//! stored document even by accident. The engine evaluates them fail-closed:
//! a panicking criterion counts as a failure, never as a pass and never as a
//! crash of the engine.

use async_trait::async_trait;

/// Outcome of a criterion check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// All hard sub-checks passed. `warnings` holds advisory findings that
    /// were logged but intentionally do not block the transition.
    Pass { warnings: Vec<String> },
    /// A hard sub-check failed. `code` is stable and test-assertable;
    /// `detail` is for humans and logs.
    Fail { code: String, detail: String },
}

impl CheckOutcome {
    pub fn pass() -> Self {
        Self::Pass {
            warnings: Vec::new(),
        }
    }

    pub fn pass_with_warnings(warnings: Vec<String>) -> Self {
        Self::Pass { warnings }
    }

    pub fn fail(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Fail {
            code: code.into(),
            detail: detail.into(),
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }
}

/// Read-only context handed to criteria.
///
/// `params` is the open, caller-defined parameter bag for the transition
/// (e.g. `payment_data`, `health_data`). Its shape is not checked here.
pub struct CheckContext<'a, D> {
    pub deps: &'a D,
    pub params: &'a serde_json::Value,
}

/// A transition guard: an async predicate over one entity snapshot.
#[async_trait]
pub trait Criterion<E, D>: Send + Sync {
    /// Name used in logs, rejection errors, and the audit trail.
    fn name(&self) -> &'static str;

    async fn check(&self, entity: &E, ctx: &CheckContext<'_, D>) -> CheckOutcome;
}

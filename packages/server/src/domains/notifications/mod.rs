//! Notification domain: queued email with bounded retry.
//!
//! ```text
//! queued --dispatch--> dispatched --retry_send--> dispatched (loop)
//! ```
//!
//! Delivery progress (pending / sent / failed) is an attribute; `retry_send`
//! loops on the dispatched state and is gated by the retry criterion.

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{EmailRetryCriterion, ValidEmailCriterion};
use models::{states, EmailNotification};
use processors::DispatchEmailProcessor;

pub fn state_machine() -> Result<StateMachine<EmailNotification, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[states::QUEUED, states::DISPATCHED])
        .initial(states::QUEUED)
        .transition(
            Transition::new("dispatch", states::DISPATCHED)
                .from(&[states::QUEUED])
                .criterion(ValidEmailCriterion)
                .processor(DispatchEmailProcessor),
        )
        .transition(
            Transition::new("retry_send", states::DISPATCHED)
                .from(&[states::DISPATCHED])
                .criterion(EmailRetryCriterion)
                .processor(DispatchEmailProcessor),
        )
        .build(EmailNotification::KIND)
}

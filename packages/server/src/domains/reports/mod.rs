//! Performance report domain: aggregate, render, deliver by email.
//!
//! ```text
//! requested --aggregate--> aggregated --render--> rendered
//!     rendered --deliver--> delivered --retry_delivery--> delivered (loop)
//! ```
//!
//! Delivery progress (pending / sent / failed) is an attribute with retry
//! bookkeeping; a failed email is absorbed by the delivery processor and the
//! retry transition is gated by the retry criterion.

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{
    ReportContentCriterion, ReportRetryCriterion, ReportStatisticsCriterion,
    ValidReportPeriodCriterion,
};
use models::{states, PerformanceReport};
use processors::{DeliverReportProcessor, GenerateReportProcessor, RenderReportHtmlProcessor};

pub fn state_machine() -> Result<StateMachine<PerformanceReport, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[
            states::REQUESTED,
            states::AGGREGATED,
            states::RENDERED,
            states::DELIVERED,
        ])
        .initial(states::REQUESTED)
        .transition(
            Transition::new("aggregate", states::AGGREGATED)
                .from(&[states::REQUESTED])
                .criterion(ValidReportPeriodCriterion)
                .processor(GenerateReportProcessor),
        )
        .transition(
            Transition::new("render", states::RENDERED)
                .from(&[states::AGGREGATED])
                .criterion(ReportStatisticsCriterion)
                .processor(RenderReportHtmlProcessor),
        )
        .transition(
            Transition::new("deliver", states::DELIVERED)
                .from(&[states::RENDERED])
                .criterion(ReportContentCriterion)
                .processor(DeliverReportProcessor),
        )
        .transition(
            Transition::new("retry_delivery", states::DELIVERED)
                .from(&[states::DELIVERED])
                .criterion(ReportRetryCriterion)
                .processor(DeliverReportProcessor),
        )
        .build(PerformanceReport::KIND)
}

//! # Turnstile
//!
//! A typed lifecycle coordination layer: criteria gate transitions,
//! processors execute them, and the platform owns state.
//!
//! ## Core Concepts
//!
//! - [`Criterion`] = Guard (an async predicate over one entity snapshot)
//! - [`Processor`] = Action (mutates the owning entity, may trigger
//!   transitions on other entities)
//! - [`Transition`] = Named edge: source-state set, target state, ordered
//!   criteria, optional processor
//! - [`EntityService`] = The injected platform collaborator every processor
//!   works against
//!
//! ## Key Invariants
//!
//! 1. **Criteria are fail-closed**: a panicking or erroring check counts as
//!    a failing check, never as a pass.
//! 2. **Criteria never mutate**: they receive a decoded copy; stored state
//!    changes only when the engine commits.
//! 3. **Processor errors abort**: the entity mutation is discarded, and side
//!    effects already issued are not compensated.
//! 4. **Secondary effects are best-effort by declaration**: a cross-entity
//!    transition marked [`Mode::BestEffort`] may fail without rolling back
//!    the primary transition, and the failure is recorded, not hidden.
//!
//! ## Example
//!
//! ```ignore
//! use turnstile::{
//!     CheckContext, CheckOutcome, Criterion, LifecycleEntity, ProcessContext,
//!     ProcessOutcome, Processor, StateMachine, Transition,
//! };
//!
//! let machine = StateMachine::<Pet, Deps>::builder()
//!     .states(&["initial_state", "available", "pending", "sold"])
//!     .initial("initial_state")
//!     .transition(
//!         Transition::new("reserve", "pending")
//!             .from(&["available"])
//!             .criterion(PetAvailableCriterion)
//!             .processor(ReservePetProcessor),
//!     )
//!     .build("pet")?;
//!
//! let platform = InMemoryPlatform::builder(deps).machine(machine).build();
//! let service = platform.service();
//! let meta = service.save_entity(&pet).await?;
//! service.transition("pet", meta.id, "reserve").await?;
//! ```

mod coordinator;
mod core;
mod criterion;
mod engine;
mod error;
mod processor;
mod retry;
mod service;
mod transition;

// In-memory platform: always compiled (the seed binary uses it), exported
// prominently for tests.
pub mod testing;


pub use crate::core::{
    Document, DocumentMeta, EntityId, LifecycleEntity, RecordedOutcome, TransitionReceipt,
    TransitionRecord,
};

pub use crate::criterion::{CheckContext, CheckOutcome, Criterion};

pub use crate::processor::{
    AttemptOutcome, ProcessContext, ProcessError, ProcessOutcome, Processor, SecondaryAttempt,
};

pub use crate::coordinator::{Mode, RelatedEntity};

pub use crate::error::{DefinitionError, ServiceError};

pub use crate::retry::RetryState;

pub use crate::service::{Condition, EntityService, EntityServiceExt};

pub use crate::transition::{StateMachine, StateMachineBuilder, Transition};

pub use crate::engine::{AnyMachine, Applied, MachineRegistry};

// Re-export commonly used external types
pub use async_trait::async_trait;

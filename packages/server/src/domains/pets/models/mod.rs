mod pet;

pub use pet::{states, AdoptionStatus, HealthStatus, Pet};

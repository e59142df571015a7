//! Service layer: business logic orchestration.
//!
//! [`WagerService`] coordinates store mutations, persistence, stats
//! computation, and event emission through the [`super::domain::EventBus`].

pub mod wager_service;

pub use wager_service::{Persistence, WagerService};

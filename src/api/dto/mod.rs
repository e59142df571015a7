//! Data Transfer Objects for REST request/response serialization.

pub mod common_dto;
pub mod stats_dto;
pub mod wager_dto;

pub use common_dto::*;
pub use stats_dto::*;
pub use wager_dto::*;

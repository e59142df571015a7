//! Persistence layer: wager list stored in a local SQLite key/value slot.
//!
//! The whole collection is serialized as one JSON document under a single
//! slot key. Loading is forgiving: a missing or unreadable slot yields an
//! empty collection, so the stats engine always receives well-formed data.

pub mod models;
pub mod sqlite;

pub use models::StoredSlot;
pub use sqlite::SqliteSlotStore;

//! Database models for the key/value slot table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row from the `kv_slots` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSlot {
    /// Slot key (e.g. `"wager_tracker_wagers"`).
    pub slot: String,
    /// Serialized payload.
    pub value: String,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
}

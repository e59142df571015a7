//! In-memory wager collection with copy-on-write snapshots.
//!
//! [`WagerStore`] owns the ordered wager list behind a
//! [`tokio::sync::RwLock`]. Readers get an [`Arc`] snapshot that stays
//! valid and unchanged while writers build the next version, so stats are
//! always computed over one consistent collection.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::wager::{NewWager, Wager, WagerDefaults};
use super::{BetResult, WagerId};
use crate::error::TrackerError;

/// Immutable view of the collection at one point in time.
pub type Snapshot = Arc<Vec<Wager>>;

/// Result of a store mutation: the affected wager plus the collection as
/// it stands right after the mutation.
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    /// The wager that was added, resolved or removed.
    pub wager: Wager,
    /// Collection immediately after the mutation.
    pub snapshot: Snapshot,
}

/// Result of a batch insert: the added wagers in submission order, the
/// collection after the insert, and the collection before it.
#[derive(Debug, Clone)]
pub struct BatchUpdate {
    /// Wagers added, in submission order.
    pub wagers: Vec<Wager>,
    /// Collection immediately after the insert.
    pub snapshot: Snapshot,
    /// Collection immediately before the insert.
    pub previous: Snapshot,
}

/// Owner of the wager collection.
///
/// Wagers are kept newest-created first. Every mutation happens under the
/// write lock and produces a fresh snapshot.
#[derive(Debug)]
pub struct WagerStore {
    wagers: RwLock<Snapshot>,
    defaults: WagerDefaults,
}

impl WagerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(defaults: WagerDefaults) -> Self {
        Self::with_wagers(Vec::new(), defaults)
    }

    /// Creates a store seeded with previously persisted wagers.
    ///
    /// Voided records are dropped on load.
    #[must_use]
    pub fn with_wagers(wagers: Vec<Wager>, defaults: WagerDefaults) -> Self {
        let wagers: Vec<Wager> = wagers
            .into_iter()
            .filter(|w| w.result != BetResult::Void)
            .collect();
        Self {
            wagers: RwLock::new(Arc::new(wagers)),
            defaults,
        }
    }

    /// Returns the defaults applied to partial wagers.
    #[must_use]
    pub fn defaults(&self) -> &WagerDefaults {
        &self.defaults
    }

    /// Returns the current snapshot without copying the collection.
    pub async fn snapshot(&self) -> Snapshot {
        Arc::clone(&*self.wagers.read().await)
    }

    /// Returns all wagers, newest-created first.
    pub async fn list(&self) -> Vec<Wager> {
        self.wagers.read().await.as_ref().clone()
    }

    /// Returns a single wager.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`] if no wager has this ID.
    pub async fn get(&self, id: WagerId) -> Result<Wager, TrackerError> {
        self.wagers
            .read()
            .await
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(TrackerError::WagerNotFound(*id.as_uuid()))
    }

    /// Logs a new wager, assigning its ID and timestamps.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`Wager::from_new`].
    pub async fn add(&self, new: NewWager) -> Result<StoreUpdate, TrackerError> {
        let wager = Wager::from_new(new, &self.defaults)?;
        let mut guard = self.wagers.write().await;
        Arc::make_mut(&mut *guard).insert(0, wager.clone());
        Ok(StoreUpdate {
            wager,
            snapshot: Arc::clone(&*guard),
        })
    }

    /// Logs several wagers in one mutation. Every entry is validated first;
    /// if any fails, nothing is added.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidRequest`] naming the index of the
    /// first invalid entry.
    pub async fn add_batch(&self, batch: Vec<NewWager>) -> Result<BatchUpdate, TrackerError> {
        let wagers = batch
            .into_iter()
            .enumerate()
            .map(|(index, new)| {
                Wager::from_new(new, &self.defaults).map_err(|e| {
                    TrackerError::InvalidRequest(format!("wager at index {index}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut guard = self.wagers.write().await;
        let previous = Arc::clone(&*guard);
        let list = Arc::make_mut(&mut *guard);
        for wager in &wagers {
            list.insert(0, wager.clone());
        }
        Ok(BatchUpdate {
            wagers,
            snapshot: Arc::clone(&*guard),
            previous,
        })
    }

    /// Replaces the whole collection with `snapshot`.
    pub async fn restore(&self, snapshot: Snapshot) {
        *self.wagers.write().await = snapshot;
    }

    /// Resolves a pending wager. Resolving as [`BetResult::Void`] removes
    /// the wager; the returned record then carries `result = void`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`] for an unknown ID and
    /// [`TrackerError::InvalidStateTransition`] if the wager is not pending
    /// or `result` is `pending`.
    pub async fn resolve(
        &self,
        id: WagerId,
        result: BetResult,
    ) -> Result<StoreUpdate, TrackerError> {
        let mut guard = self.wagers.write().await;
        let position = guard
            .iter()
            .position(|w| w.id == id)
            .ok_or(TrackerError::WagerNotFound(*id.as_uuid()))?;

        let current = guard
            .get(position)
            .map(|w| w.result)
            .ok_or_else(|| TrackerError::Internal("wager index out of range".to_string()))?;
        current.transition(result)?;

        let wagers = Arc::make_mut(&mut *guard);
        let wager = if result == BetResult::Void {
            let mut removed = wagers.remove(position);
            removed.settle(result)?;
            removed
        } else {
            let slot = wagers
                .get_mut(position)
                .ok_or_else(|| TrackerError::Internal("wager index out of range".to_string()))?;
            slot.settle(result)?;
            slot.clone()
        };

        Ok(StoreUpdate {
            wager,
            snapshot: Arc::clone(&*guard),
        })
    }

    /// Deletes a wager regardless of its state.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`] if no wager has this ID.
    pub async fn remove(&self, id: WagerId) -> Result<StoreUpdate, TrackerError> {
        let mut guard = self.wagers.write().await;
        let position = guard
            .iter()
            .position(|w| w.id == id)
            .ok_or(TrackerError::WagerNotFound(*id.as_uuid()))?;
        let wager = Arc::make_mut(&mut *guard).remove(position);
        Ok(StoreUpdate {
            wager,
            snapshot: Arc::clone(&*guard),
        })
    }

    /// Returns the number of wagers in the store.
    pub async fn len(&self) -> usize {
        self.wagers.read().await.len()
    }

    /// Returns `true` if the store holds no wagers.
    pub async fn is_empty(&self) -> bool {
        self.wagers.read().await.is_empty()
    }
}

impl Default for WagerStore {
    fn default() -> Self {
        Self::new(WagerDefaults::default())
    }
}

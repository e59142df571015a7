//! Wager service: orchestrates store mutations, persistence and events.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    BetResult, EventBus, NewWager, Snapshot, StoreUpdate, Wager, WagerEvent, WagerFilter,
    WagerId, WagerStore,
};
use crate::error::TrackerError;
use crate::persistence::SqliteSlotStore;
use crate::stats::{
    DashboardStats, ExposureSummary, WeekBreakdown, compute_exposure, compute_stats_with,
    compute_week_breakdown,
};

/// Where and whether the collection is persisted after each mutation.
#[derive(Debug, Clone)]
pub struct Persistence {
    store: SqliteSlotStore,
    slot: String,
}

impl Persistence {
    /// Persists into `slot` of the given store.
    #[must_use]
    pub fn new(store: SqliteSlotStore, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// Loads the wager list from the configured slot, falling back to an
    /// empty list when the slot is missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] if the database cannot
    /// be read at all.
    pub async fn load(&self) -> Result<Vec<Wager>, TrackerError> {
        self.store.load_wagers(&self.slot).await
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), TrackerError> {
        self.store.save_wagers(&self.slot, snapshot).await
    }
}

/// Orchestration layer for all wager operations.
///
/// Every mutation follows the pattern: take the commit lock → mutate the
/// [`WagerStore`] → persist the resulting snapshot → publish the wager
/// event and a [`WagerEvent::StatsUpdated`] computed from that same
/// snapshot → return.
#[derive(Debug, Clone)]
pub struct WagerService {
    store: Arc<WagerStore>,
    event_bus: EventBus,
    persistence: Option<Persistence>,
    recent_limit: usize,
    commit: Arc<Mutex<()>>,
}

impl WagerService {
    /// Creates a new `WagerService`.
    #[must_use]
    pub fn new(
        store: Arc<WagerStore>,
        event_bus: EventBus,
        persistence: Option<Persistence>,
        recent_limit: usize,
    ) -> Self {
        Self {
            store,
            event_bus,
            persistence,
            recent_limit,
            commit: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`WagerStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<WagerStore> {
        &self.store
    }

    /// Logs a new wager.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError`] if validation or persistence fails.
    pub async fn add_wager(&self, new: NewWager) -> Result<Wager, TrackerError> {
        let _guard = self.commit.lock().await;
        let update = self.store.add(new).await?;
        let wager = update.wager.clone();
        tracing::info!(
            wager_id = %wager.id,
            league = %wager.league,
            odds = %wager.odds,
            stake = wager.stake,
            "wager added"
        );

        self.commit(update, created_event(&wager)).await?;
        Ok(wager)
    }

    /// Logs several wagers in one commit. Either all are added or none:
    /// validation runs over every entry before the store changes, and a
    /// failed save rolls the store back to its previous contents.
    ///
    /// # Errors
    ///
    /// Returns the first validation error (with its index) or a
    /// [`TrackerError::PersistenceError`]; in both cases nothing is added.
    pub async fn add_batch(&self, batch: Vec<NewWager>) -> Result<Vec<Wager>, TrackerError> {
        let _guard = self.commit.lock().await;
        let update = self.store.add_batch(batch).await?;

        if let Err(e) = self.persist(&update.snapshot).await {
            self.store.restore(update.previous).await;
            tracing::warn!(count = update.wagers.len(), "batch rolled back");
            return Err(e);
        }
        tracing::info!(count = update.wagers.len(), "batch added");

        for wager in &update.wagers {
            let _ = self.event_bus.publish(created_event(wager));
        }
        self.publish_stats(&update.snapshot);
        Ok(update.wagers)
    }

    /// Resolves a pending wager. Voiding removes it from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`],
    /// [`TrackerError::InvalidStateTransition`], or a persistence error.
    pub async fn resolve_wager(
        &self,
        wager_id: WagerId,
        result: BetResult,
    ) -> Result<Wager, TrackerError> {
        let _guard = self.commit.lock().await;
        let update = self.store.resolve(wager_id, result).await?;
        let wager = update.wager.clone();

        let event = if result == BetResult::Void {
            tracing::info!(%wager_id, "wager voided");
            WagerEvent::WagerVoided {
                wager_id,
                league: wager.league,
                timestamp: wager.updated_at,
            }
        } else {
            tracing::info!(%wager_id, %result, pnl = wager.pnl, "wager resolved");
            WagerEvent::WagerResolved {
                wager_id,
                league: wager.league,
                result,
                pnl: wager.pnl,
                timestamp: wager.updated_at,
            }
        };

        self.commit(update, event).await?;
        Ok(wager)
    }

    /// Deletes a wager.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`] or a persistence error.
    pub async fn remove_wager(&self, wager_id: WagerId) -> Result<(), TrackerError> {
        let _guard = self.commit.lock().await;
        let update = self.store.remove(wager_id).await?;
        let league = update.wager.league;
        tracing::info!(%wager_id, "wager removed");

        self.commit(
            update,
            WagerEvent::WagerRemoved {
                wager_id,
                league,
                timestamp: Utc::now(),
            },
        )
        .await
    }

    /// Returns a single wager.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::WagerNotFound`] if it does not exist.
    pub async fn get_wager(&self, wager_id: WagerId) -> Result<Wager, TrackerError> {
        self.store.get(wager_id).await
    }

    /// Returns all wagers matching `filter`, newest-created first.
    pub async fn list_wagers(&self, filter: &WagerFilter) -> Vec<Wager> {
        let snapshot = self.store.snapshot().await;
        filter.apply(&snapshot).into_iter().cloned().collect()
    }

    /// Computes dashboard stats over the current snapshot.
    pub async fn stats(&self) -> DashboardStats {
        self.stats_with(self.recent_limit).await
    }

    /// Computes dashboard stats with a custom recent-results window.
    pub async fn stats_with(&self, recent_limit: usize) -> DashboardStats {
        compute_stats_with(&self.store.snapshot().await, recent_limit)
    }

    /// Computes open exposure over pending wagers.
    pub async fn exposure(&self) -> ExposureSummary {
        compute_exposure(&self.store.snapshot().await)
    }

    /// Computes the weekly breakdown for the week containing `any_day`.
    pub async fn week_breakdown(&self, any_day: NaiveDate) -> WeekBreakdown {
        compute_week_breakdown(&self.store.snapshot().await, any_day)
    }

    /// Persists the post-mutation snapshot, then publishes the mutation
    /// event and fresh stats. Events are published even when persisting
    /// fails, since the in-memory mutation has already happened.
    async fn commit(&self, update: StoreUpdate, event: WagerEvent) -> Result<(), TrackerError> {
        let saved = self.persist(&update.snapshot).await;
        let _ = self.event_bus.publish(event);
        self.publish_stats(&update.snapshot);
        saved
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), TrackerError> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };
        let saved = persistence.save(snapshot).await;
        if let Err(e) = &saved {
            tracing::error!(error = %e, "failed to persist wagers");
        }
        saved
    }

    fn publish_stats(&self, snapshot: &Snapshot) {
        let _ = self.event_bus.publish(WagerEvent::StatsUpdated {
            stats: Box::new(compute_stats_with(snapshot, self.recent_limit)),
            timestamp: Utc::now(),
        });
    }
}

fn created_event(wager: &Wager) -> WagerEvent {
    WagerEvent::WagerCreated {
        wager_id: wager.id,
        league: wager.league,
        stake: wager.stake,
        odds: wager.odds.get(),
        timestamp: wager.created_at,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{League, WagerDefaults, round2};

    fn make_service() -> WagerService {
        WagerService::new(
            Arc::new(WagerStore::new(WagerDefaults::default())),
            EventBus::new(64),
            None,
            10,
        )
    }

    fn nba(odds: i32, stake: f64) -> NewWager {
        NewWager {
            league: Some(League::Nba),
            odds: Some(odds),
            stake: Some(stake),
            ..NewWager::default()
        }
    }

    #[tokio::test]
    async fn add_emits_created_then_stats() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let Ok(wager) = service.add_wager(nba(-110, 1.0)).await else {
            panic!("add failed");
        };

        let Ok(first) = rx.recv().await else {
            panic!("expected created event");
        };
        assert_eq!(first.event_type_str(), "wager_created");
        assert_eq!(first.wager_id(), Some(wager.id));

        let Ok(second) = rx.recv().await else {
            panic!("expected stats event");
        };
        assert_eq!(second.event_type_str(), "stats_updated");
    }

    #[tokio::test]
    async fn resolve_updates_stats() {
        let service = make_service();
        let Ok(w1) = service.add_wager(nba(-110, 1.0)).await else {
            panic!("add failed");
        };
        let Ok(w2) = service.add_wager(nba(150, 2.0)).await else {
            panic!("add failed");
        };
        assert!(service.resolve_wager(w1.id, BetResult::Win).await.is_ok());
        assert!(service.resolve_wager(w2.id, BetResult::Loss).await.is_ok());

        let stats = service.stats().await;
        assert_eq!(stats.total_bets, 2);
        assert_eq!(round2(stats.total_pnl), -1.09);
        assert_eq!(round2(stats.roi), -36.36);
        assert_eq!(round2(stats.win_rate), 50.0);
    }

    #[tokio::test]
    async fn stats_event_reflects_post_mutation_snapshot() {
        let service = make_service();
        let Ok(wager) = service.add_wager(nba(100, 1.0)).await else {
            panic!("add failed");
        };
        let mut rx = service.event_bus().subscribe();
        assert!(service.resolve_wager(wager.id, BetResult::Win).await.is_ok());

        let _resolved = rx.recv().await;
        let Ok(WagerEvent::StatsUpdated { stats, .. }) = rx.recv().await else {
            panic!("expected stats event");
        };
        assert_eq!(stats.wins, 1);
        assert_eq!(round2(stats.total_pnl), 1.0);
    }

    #[tokio::test]
    async fn void_removes_from_list_and_stats() {
        let service = make_service();
        let Ok(wager) = service.add_wager(nba(-110, 1.0)).await else {
            panic!("add failed");
        };
        let Ok(voided) = service.resolve_wager(wager.id, BetResult::Void).await else {
            panic!("void failed");
        };
        assert_eq!(voided.result, BetResult::Void);

        assert!(service.list_wagers(&WagerFilter::default()).await.is_empty());
        assert!(service.get_wager(wager.id).await.is_err());
        assert_eq!(service.stats().await.total_bets, 0);
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let service = make_service();
        let batch = vec![nba(-110, 1.0), nba(20, 1.0)];
        let Err(err) = service.add_batch(batch).await else {
            panic!("batch with bad odds must fail");
        };
        assert!(err.to_string().contains("index 1"));
        assert!(service.store().is_empty().await);

        let Ok(added) = service.add_batch(vec![nba(-110, 1.0), nba(120, 2.0)]).await else {
            panic!("valid batch failed");
        };
        assert_eq!(added.len(), 2);
        assert_eq!(service.store().len().await, 2);
    }

    #[tokio::test]
    async fn batch_rolls_back_when_save_fails() {
        // No schema: every save errors.
        let Ok(pool) = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
        else {
            panic!("sqlite should open");
        };
        let persistence = Persistence::new(SqliteSlotStore::new(pool), "bets");
        let service = WagerService::new(
            Arc::new(WagerStore::default()),
            EventBus::new(16),
            Some(persistence),
            10,
        );
        let mut rx = service.event_bus().subscribe();

        let batch = vec![nba(-110, 1.0), nba(120, 2.0), nba(-105, 1.5)];
        let Err(err) = service.add_batch(batch).await else {
            panic!("save without schema must fail");
        };
        assert!(matches!(err, TrackerError::PersistenceError(_)));
        assert!(service.store().is_empty().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn batch_emits_one_stats_update() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();
        let Ok(added) = service.add_batch(vec![nba(-110, 1.0), nba(120, 2.0)]).await else {
            panic!("valid batch failed");
        };

        let mut created = Vec::new();
        let mut stats_updates = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                WagerEvent::StatsUpdated { .. } => stats_updates += 1,
                other => created.extend(other.wager_id()),
            }
        }
        assert_eq!(stats_updates, 1);
        assert_eq!(created, added.iter().map(|w| w.id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn remove_emits_event() {
        let service = make_service();
        let Ok(wager) = service.add_wager(nba(-110, 1.0)).await else {
            panic!("add failed");
        };
        let mut rx = service.event_bus().subscribe();
        assert!(service.remove_wager(wager.id).await.is_ok());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "wager_removed");
        assert!(service.remove_wager(wager.id).await.is_err());
    }

    #[tokio::test]
    async fn persists_after_each_mutation() {
        let Ok(slot_store) = SqliteSlotStore::connect(
            "sqlite::memory:",
            1,
            std::time::Duration::from_secs(5),
        )
        .await
        else {
            panic!("sqlite should open");
        };
        let persistence = Persistence::new(slot_store, "bets");
        let service = WagerService::new(
            Arc::new(WagerStore::default()),
            EventBus::new(16),
            Some(persistence.clone()),
            10,
        );

        let Ok(wager) = service.add_wager(nba(-110, 1.0)).await else {
            panic!("add failed");
        };
        assert!(service.resolve_wager(wager.id, BetResult::Loss).await.is_ok());

        let Ok(stored) = persistence.load().await else {
            panic!("load failed");
        };
        assert_eq!(stored.len(), 1);
        assert!(stored.iter().all(|w| w.result == BetResult::Loss));
    }
}

//! Per-connection subscription manager.
//!
//! Tracks which leagues a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::BTreeSet;

use crate::domain::{League, WagerEvent};

/// Manages the set of league subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed leagues. If `subscribe_all` is true, this set is ignored.
    leagues: BTreeSet<League>,
    /// Whether the client subscribes to all leagues (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds leagues to the subscription set. `wildcard` enables all leagues.
    pub fn subscribe(&mut self, leagues: &[League], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.leagues.extend(leagues.iter().copied());
    }

    /// Removes leagues from the subscription set. `wildcard` turns the
    /// all-leagues subscription off.
    pub fn unsubscribe(&mut self, leagues: &[League], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for league in leagues {
            self.leagues.remove(league);
        }
    }

    /// Returns `true` if events for `league` pass the filter.
    #[must_use]
    pub fn matches(&self, league: League) -> bool {
        self.subscribe_all || self.leagues.contains(&league)
    }

    /// Returns `true` if `event` should be forwarded. Stats updates are not
    /// tied to a league and reach every connection with any subscription.
    #[must_use]
    pub fn accepts(&self, event: &WagerEvent) -> bool {
        match event.league() {
            Some(league) => self.matches(league),
            None => self.is_active(),
        }
    }

    /// Returns `true` if anything is subscribed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscribe_all || !self.leagues.is_empty()
    }

    /// Returns the explicitly subscribed leagues in display order.
    pub fn leagues(&self) -> impl Iterator<Item = League> + '_ {
        self.leagues.iter().copied()
    }

    /// Returns the number of explicitly subscribed leagues.
    #[must_use]
    pub fn count(&self) -> usize {
        self.leagues.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::WagerId;
    use crate::stats::DashboardStats;

    fn removed(league: League) -> WagerEvent {
        WagerEvent::WagerRemoved {
            wager_id: WagerId::new(),
            league,
            timestamp: Utc::now(),
        }
    }

    fn stats_event() -> WagerEvent {
        WagerEvent::StatsUpdated {
            stats: Box::new(DashboardStats::default()),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(League::Nba));
        assert!(!mgr.accepts(&stats_event()));
    }

    #[test]
    fn subscribe_specific_league() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[League::Nba], false);
        assert!(mgr.accepts(&removed(League::Nba)));
        assert!(!mgr.accepts(&removed(League::Nfl)));
        assert!(mgr.accepts(&stats_event()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(League::ALL.iter().all(|l| mgr.matches(*l)));
    }

    #[test]
    fn unsubscribe_removes_league() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[League::Nhl, League::Mlb], false);
        mgr.unsubscribe(&[League::Nhl], false);
        assert!(!mgr.matches(League::Nhl));
        assert_eq!(mgr.leagues().collect::<Vec<_>>(), vec![League::Mlb]);
    }

    #[test]
    fn unsubscribe_wildcard_keeps_explicit() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[League::Soccer], true);
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(mgr.matches(League::Soccer));
        assert!(!mgr.matches(League::Tennis));
        assert_eq!(mgr.count(), 1);
    }
}

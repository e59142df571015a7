//! Domain events reflecting wager collection mutations.
//!
//! Every mutation emits one or more [`WagerEvent`]s through the
//! [`super::EventBus`]; WebSocket connections forward them to clients.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BetResult, League, WagerId};
use crate::stats::DashboardStats;

/// Domain event emitted after every mutation of the wager collection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum WagerEvent {
    /// A wager was logged.
    WagerCreated {
        /// Wager identifier.
        wager_id: WagerId,
        /// League of the wager.
        league: League,
        /// Stake in units.
        stake: f64,
        /// Raw odds.
        odds: i32,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A pending wager was settled as win, loss or push.
    WagerResolved {
        /// Wager identifier.
        wager_id: WagerId,
        /// League of the wager.
        league: League,
        /// Terminal result.
        result: BetResult,
        /// Frozen profit or loss.
        pnl: f64,
        /// Resolution timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A pending wager was voided and dropped from the collection.
    WagerVoided {
        /// Wager identifier.
        wager_id: WagerId,
        /// League of the wager.
        league: League,
        /// Void timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A wager was deleted.
    WagerRemoved {
        /// Wager identifier.
        wager_id: WagerId,
        /// League of the wager.
        league: League,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Dashboard stats recomputed over the post-mutation collection.
    StatsUpdated {
        /// Fresh aggregate.
        stats: Box<DashboardStats>,
        /// Computation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl WagerEvent {
    /// Returns the wager this event concerns, if any.
    #[must_use]
    pub fn wager_id(&self) -> Option<WagerId> {
        match self {
            Self::WagerCreated { wager_id, .. }
            | Self::WagerResolved { wager_id, .. }
            | Self::WagerVoided { wager_id, .. }
            | Self::WagerRemoved { wager_id, .. } => Some(*wager_id),
            Self::StatsUpdated { .. } => None,
        }
    }

    /// Returns the league this event concerns. `None` for collection-wide
    /// events.
    #[must_use]
    pub fn league(&self) -> Option<League> {
        match self {
            Self::WagerCreated { league, .. }
            | Self::WagerResolved { league, .. }
            | Self::WagerVoided { league, .. }
            | Self::WagerRemoved { league, .. } => Some(*league),
            Self::StatsUpdated { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::WagerCreated { .. } => "wager_created",
            Self::WagerResolved { .. } => "wager_resolved",
            Self::WagerVoided { .. } => "wager_voided",
            Self::WagerRemoved { .. } => "wager_removed",
            Self::StatsUpdated { .. } => "stats_updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;

    #[test]
    fn resolved_event_serializes_with_tag() {
        let event = WagerEvent::WagerResolved {
            wager_id: WagerId::new(),
            league: League::Nba,
            result: BetResult::Win,
            pnl: 0.91,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"wager_resolved\""));
        assert!(json.contains("\"league\":\"NBA\""));
        assert!(json.contains("\"result\":\"win\""));
    }

    #[test]
    fn accessors() {
        let id = WagerId::new();
        let event = WagerEvent::WagerRemoved {
            wager_id: id,
            league: League::Nhl,
            timestamp: Utc::now(),
        };
        assert_eq!(event.wager_id(), Some(id));
        assert_eq!(event.league(), Some(League::Nhl));
        assert_eq!(event.event_type_str(), "wager_removed");
    }

    #[test]
    fn stats_event_has_no_league() {
        let event = WagerEvent::StatsUpdated {
            stats: Box::new(compute_stats(&[])),
            timestamp: Utc::now(),
        };
        assert_eq!(event.league(), None);
        assert_eq!(event.wager_id(), None);
        assert_eq!(event.event_type_str(), "stats_updated");
    }
}

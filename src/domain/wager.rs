//! Wager record and the partial form used to log a new one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::payout::realized_pnl;
use super::{AmericanOdds, BetResult, League, WagerId};
use crate::error::TrackerError;

/// One leg of a parlay. Stored for reference only; legs are never settled
/// individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParlayLeg {
    /// Event description (e.g. `"Lakers vs Celtics"`).
    pub matchup: String,
    /// Side taken on this leg.
    pub selection: String,
    /// League of this leg.
    pub league: League,
    /// Odds of this leg.
    pub odds: AmericanOdds,
}

/// A logged wager.
///
/// Everything except `result`, `pnl` and `updated_at` is fixed at
/// creation. `pnl` is zero while pending and frozen once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wager {
    /// Unique identifier (immutable after creation).
    pub id: WagerId,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Event description.
    pub matchup: String,
    /// Side taken.
    pub selection: String,
    /// League the wager is filed under.
    pub league: League,
    /// American odds at placement.
    pub odds: AmericanOdds,
    /// Stake in units. Always positive.
    #[serde(deserialize_with = "positive_stake")]
    pub stake: f64,
    /// Current outcome.
    pub result: BetResult,
    /// Realized profit or loss in units.
    pub pnl: f64,
    /// Whether this wager is a parlay.
    #[serde(default)]
    pub is_parlay: bool,
    /// Parlay legs, empty for straight wagers.
    #[serde(default)]
    pub parlay_legs: Vec<ParlayLeg>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl Wager {
    /// Builds a wager from a partial description, filling gaps from
    /// `defaults`.
    ///
    /// The result defaults to [`BetResult::Pending`]. A wager may be logged
    /// already settled (e.g. batch imports), in which case its P&L is
    /// computed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidOdds`] or [`TrackerError::InvalidStake`]
    /// for out-of-range inputs, and [`TrackerError::InvalidRequest`] when
    /// the initial result is `void`.
    pub fn from_new(new: NewWager, defaults: &WagerDefaults) -> Result<Self, TrackerError> {
        let odds = match new.odds {
            Some(raw) => AmericanOdds::new(raw)?,
            None => defaults.odds,
        };
        let stake = validate_stake(new.stake.unwrap_or(defaults.stake))?;
        let result = new.result.unwrap_or_default();
        if result == BetResult::Void {
            return Err(TrackerError::InvalidRequest(
                "a wager cannot be logged as void".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: WagerId::new(),
            date: new.date.unwrap_or_else(|| now.date_naive()),
            matchup: new.matchup.unwrap_or_default(),
            selection: new.selection.unwrap_or_default(),
            league: new.league.unwrap_or_default(),
            odds,
            stake,
            result,
            pnl: realized_pnl(odds.get(), stake, result),
            is_parlay: new.is_parlay || !new.parlay_legs.is_empty(),
            parlay_legs: new.parlay_legs,
            notes: new.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a resolution, computing and freezing the P&L.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidStateTransition`] unless the wager is
    /// pending and `to` is a terminal result.
    pub fn settle(&mut self, to: BetResult) -> Result<(), TrackerError> {
        self.result = self.result.transition(to)?;
        self.pnl = realized_pnl(self.odds.get(), self.stake, self.result);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns `true` while the wager awaits a result.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.result == BetResult::Pending
    }

    /// Profit this wager would return on a win.
    #[must_use]
    pub fn potential_payout(&self) -> f64 {
        self.odds.potential_payout(self.stake)
    }
}

/// Accepts `stake` only if it is a positive finite number of units.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidStake`] otherwise.
pub fn validate_stake(stake: f64) -> Result<f64, TrackerError> {
    if stake.is_finite() && stake > 0.0 {
        Ok(stake)
    } else {
        Err(TrackerError::InvalidStake(stake))
    }
}

fn positive_stake<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let stake = f64::deserialize(deserializer)?;
    validate_stake(stake).map_err(serde::de::Error::custom)
}

/// Partial wager as submitted by a client. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewWager {
    /// Event date; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Event description.
    #[serde(default)]
    pub matchup: Option<String>,
    /// Side taken.
    #[serde(default)]
    pub selection: Option<String>,
    /// League; defaults to `Other`.
    #[serde(default)]
    pub league: Option<League>,
    /// Raw American odds; validated on creation.
    #[serde(default)]
    pub odds: Option<i32>,
    /// Stake in units.
    #[serde(default)]
    pub stake: Option<f64>,
    /// Initial result; defaults to `pending`.
    #[serde(default)]
    pub result: Option<BetResult>,
    /// Parlay flag.
    #[serde(default)]
    pub is_parlay: bool,
    /// Parlay legs.
    #[serde(default)]
    pub parlay_legs: Vec<ParlayLeg>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Fallback values applied to fields a [`NewWager`] leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WagerDefaults {
    /// Default odds.
    pub odds: AmericanOdds,
    /// Default stake in units.
    pub stake: f64,
}

impl Default for WagerDefaults {
    fn default() -> Self {
        Self {
            odds: AmericanOdds::STANDARD,
            stake: 1.0,
        }
    }
}

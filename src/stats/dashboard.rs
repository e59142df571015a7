//! Derived dashboard aggregates. Never stored.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BetResult, League};

/// Direction of a streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub enum StreakKind {
    /// Consecutive wins.
    #[default]
    #[serde(rename = "W")]
    Win,
    /// Consecutive losses.
    #[serde(rename = "L")]
    Loss,
}

/// Run of identical decisive results ending at the most recent wager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CurrentStreak {
    /// Whether the run is wins or losses.
    #[serde(rename = "type")]
    pub kind: StreakKind,
    /// Length of the run. Zero when nothing decisive has been settled.
    pub count: usize,
}

/// One point of the bankroll curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct BankrollPoint {
    /// Event date of the wager that produced this point.
    pub date: NaiveDate,
    /// Cumulative realized P&L up to and including that wager.
    pub balance: f64,
}

/// Per-league breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeagueStats {
    /// League.
    pub league: League,
    /// Wins in this league.
    pub wins: usize,
    /// Losses in this league.
    pub losses: usize,
    /// Pushes in this league.
    pub pushes: usize,
    /// Realized P&L in this league.
    pub pnl: f64,
    /// `wins / (wins + losses) * 100`, zero without decisive results.
    pub win_rate: f64,
    /// Mean American odds of the settled wagers in this league.
    pub avg_odds: f64,
    /// Settled wagers in this league.
    pub count: usize,
}

impl LeagueStats {
    pub(crate) fn empty(league: League) -> Self {
        Self {
            league,
            wins: 0,
            losses: 0,
            pushes: 0,
            pnl: 0.0,
            win_rate: 0.0,
            avg_odds: 0.0,
            count: 0,
        }
    }
}

/// Aggregate performance over the settled part of a wager collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Sum of realized P&L.
    pub total_pnl: f64,
    /// `total_pnl / units_risked * 100`.
    pub roi: f64,
    /// `wins / (wins + losses) * 100`.
    pub win_rate: f64,
    /// Number of settled wagers.
    pub total_bets: usize,
    /// Settled wins.
    pub wins: usize,
    /// Settled losses.
    pub losses: usize,
    /// Settled pushes.
    pub pushes: usize,
    /// Streak ending at the most recent decisive wager.
    pub current_streak: CurrentStreak,
    /// Longest run of wins ever (zero or positive).
    pub best_streak: usize,
    /// Longest run of losses ever, as a negative number (zero or negative).
    pub worst_streak: i64,
    /// Sum of stakes over settled wagers.
    pub units_risked: f64,
    /// Per-league breakdown, in league order; leagues without settled
    /// wagers are absent.
    pub by_league: Vec<LeagueStats>,
    /// Most recent results, newest first.
    pub recent_results: Vec<BetResult>,
    /// Cumulative P&L in chronological order, one point per wager.
    pub bankroll_history: Vec<BankrollPoint>,
}

/// Open risk over pending wagers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct ExposureSummary {
    /// Number of pending wagers.
    pub pending_count: usize,
    /// Sum of pending stakes.
    pub units_at_risk: f64,
    /// Profit if every pending wager wins.
    pub potential_profit: f64,
}

/// Settled results for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyResult {
    /// Calendar day.
    pub date: NaiveDate,
    /// Weekday name (e.g. `"Monday"`).
    pub weekday: String,
    /// Realized P&L in units.
    pub units: f64,
    /// Number of wagers settled for this day.
    pub bets: usize,
}

/// Monday-to-Sunday performance summary.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeekBreakdown {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Sunday of the week.
    pub week_end: NaiveDate,
    /// Wins in the week.
    pub wins: usize,
    /// Losses in the week.
    pub losses: usize,
    /// Pushes in the week.
    pub pushes: usize,
    /// `wins / (wins + losses) * 100`.
    pub win_rate: f64,
    /// Realized P&L in units.
    pub units: f64,
    /// Mean American odds of the week's settled wagers.
    pub avg_odds: f64,
    /// Seven rows, Monday first, zero-filled.
    pub days: Vec<DailyResult>,
}

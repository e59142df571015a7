//! Statistics engine.
//!
//! Pure functions from a wager snapshot to derived aggregates: the
//! dashboard stats, open exposure, and the weekly breakdown. Nothing here
//! is cached or stored; callers recompute from the current snapshot.

pub mod dashboard;
pub mod engine;
pub mod exposure;
pub mod weekly;

pub use dashboard::{
    BankrollPoint, CurrentStreak, DailyResult, DashboardStats, ExposureSummary, LeagueStats,
    StreakKind, WeekBreakdown,
};
pub use engine::{DEFAULT_RECENT_RESULTS, compute_stats, compute_stats_with, percentage};
pub use exposure::compute_exposure;
pub use weekly::compute_week_breakdown;

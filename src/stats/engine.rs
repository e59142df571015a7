//! Statistics engine: wager snapshot in, [`DashboardStats`] out.
//!
//! Every function here is pure and total. Pending wagers never contribute
//! to financial aggregates. Date ordering uses stable sorts, so wagers
//! sharing a date keep their input order and repeated calls on the same
//! input give identical output.

use std::collections::BTreeMap;

use crate::domain::{BetResult, League, Wager};

use super::dashboard::{
    BankrollPoint, CurrentStreak, DashboardStats, LeagueStats, StreakKind,
};

/// Number of entries in [`DashboardStats::recent_results`] by default.
pub const DEFAULT_RECENT_RESULTS: usize = 10;

/// Computes the dashboard aggregate with the default recent-results window.
#[must_use]
pub fn compute_stats(wagers: &[Wager]) -> DashboardStats {
    compute_stats_with(wagers, DEFAULT_RECENT_RESULTS)
}

/// Computes the dashboard aggregate, keeping `recent_limit` recent results.
#[must_use]
pub fn compute_stats_with(wagers: &[Wager], recent_limit: usize) -> DashboardStats {
    let settled = settled(wagers);

    let tally = Tally::over(settled.iter().copied());
    let total_pnl: f64 = settled.iter().map(|w| w.pnl).sum();
    let units_risked: f64 = settled.iter().map(|w| w.stake).sum();

    let newest_first = newest_first(&settled);
    let oldest_first = oldest_first(&settled);
    let (best_streak, worst_streak) = streak_extremes(&oldest_first);

    DashboardStats {
        total_pnl,
        roi: percentage(total_pnl, units_risked),
        win_rate: tally.win_rate(),
        total_bets: settled.len(),
        wins: tally.wins,
        losses: tally.losses,
        pushes: tally.pushes,
        current_streak: current_streak(&newest_first),
        best_streak,
        worst_streak,
        units_risked,
        by_league: league_breakdown(&settled),
        recent_results: newest_first
            .iter()
            .take(recent_limit)
            .map(|w| w.result)
            .collect(),
        bankroll_history: bankroll_curve(&oldest_first),
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
#[must_use]
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Settled wagers in input order.
pub(crate) fn settled(wagers: &[Wager]) -> Vec<&Wager> {
    wagers.iter().filter(|w| w.result.is_settled()).collect()
}

/// Win/loss/push counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) wins: usize,
    pub(crate) losses: usize,
    pub(crate) pushes: usize,
}

impl Tally {
    pub(crate) fn over<'a>(wagers: impl IntoIterator<Item = &'a Wager>) -> Self {
        let mut tally = Self::default();
        for wager in wagers {
            tally.record(wager.result);
        }
        tally
    }

    fn record(&mut self, result: BetResult) {
        match result {
            BetResult::Win => self.wins += 1,
            BetResult::Loss => self.losses += 1,
            BetResult::Push => self.pushes += 1,
            BetResult::Pending | BetResult::Void => {}
        }
    }

    /// Pushes are excluded from the denominator.
    pub(crate) fn win_rate(&self) -> f64 {
        percentage(self.wins as f64, (self.wins + self.losses) as f64)
    }
}

fn newest_first<'a>(settled: &[&'a Wager]) -> Vec<&'a Wager> {
    let mut sorted = settled.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn oldest_first<'a>(settled: &[&'a Wager]) -> Vec<&'a Wager> {
    let mut sorted = settled.to_vec();
    sorted.sort_by_key(|w| w.date);
    sorted
}

fn streak_kind(result: BetResult) -> Option<StreakKind> {
    match result {
        BetResult::Win => Some(StreakKind::Win),
        BetResult::Loss => Some(StreakKind::Loss),
        BetResult::Push | BetResult::Pending | BetResult::Void => None,
    }
}

/// Run of the most recent decisive result. Pushes are skipped.
fn current_streak(newest_first: &[&Wager]) -> CurrentStreak {
    let mut kinds = newest_first.iter().filter_map(|w| streak_kind(w.result));
    let Some(kind) = kinds.next() else {
        return CurrentStreak::default();
    };
    let count = 1 + kinds.take_while(|k| *k == kind).count();
    CurrentStreak { kind, count }
}

/// Longest win run (positive) and longest loss run (negative) over the
/// chronological history. Pushes neither extend nor break a run.
fn streak_extremes(oldest_first: &[&Wager]) -> (usize, i64) {
    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut best = 0usize;
    let mut worst = 0usize;

    for kind in oldest_first.iter().filter_map(|w| streak_kind(w.result)) {
        match kind {
            StreakKind::Win => {
                wins += 1;
                losses = 0;
                best = best.max(wins);
            }
            StreakKind::Loss => {
                losses += 1;
                wins = 0;
                worst = worst.max(losses);
            }
        }
    }

    let worst = i64::try_from(worst).map_or(i64::MIN, |n| -n);
    (best, worst)
}

/// Running P&L, one point per wager, no merging of shared dates.
fn bankroll_curve(oldest_first: &[&Wager]) -> Vec<BankrollPoint> {
    oldest_first
        .iter()
        .scan(0.0_f64, |balance, wager| {
            *balance += wager.pnl;
            Some(BankrollPoint {
                date: wager.date,
                balance: *balance,
            })
        })
        .collect()
}

fn league_breakdown(settled: &[&Wager]) -> Vec<LeagueStats> {
    let mut leagues: BTreeMap<League, LeagueStats> = BTreeMap::new();
    for wager in settled {
        let entry = leagues
            .entry(wager.league)
            .or_insert_with(|| LeagueStats::empty(wager.league));
        entry.count += 1;
        entry.pnl += wager.pnl;
        entry.avg_odds += f64::from(wager.odds.get());
        match wager.result {
            BetResult::Win => entry.wins += 1,
            BetResult::Loss => entry.losses += 1,
            BetResult::Push => entry.pushes += 1,
            BetResult::Pending | BetResult::Void => {}
        }
    }

    leagues
        .into_values()
        .map(|mut stats| {
            stats.win_rate = percentage(stats.wins as f64, (stats.wins + stats.losses) as f64);
            // Holds the odds sum until here; count is at least 1.
            stats.avg_odds /= stats.count as f64;
            stats
        })
        .collect()
}

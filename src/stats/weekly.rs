//! Monday-to-Sunday breakdown of settled wagers.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::Wager;

use super::dashboard::{DailyResult, WeekBreakdown};
use super::engine::{Tally, settled};

/// Summarizes the week containing `any_day`, one row per day.
///
/// Only settled wagers count; a wager belongs to the day of its event
/// date.
#[must_use]
pub fn compute_week_breakdown(wagers: &[Wager], any_day: NaiveDate) -> WeekBreakdown {
    let offset = u64::from(any_day.weekday().num_days_from_monday());
    let week_start = any_day.checked_sub_days(Days::new(offset)).unwrap_or(any_day);
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);

    let in_week: Vec<&Wager> = settled(wagers)
        .into_iter()
        .filter(|w| w.date >= week_start && w.date <= week_end)
        .collect();

    let tally = Tally::over(in_week.iter().copied());
    let units: f64 = in_week.iter().map(|w| w.pnl).sum();
    let avg_odds = if in_week.is_empty() {
        0.0
    } else {
        in_week.iter().map(|w| f64::from(w.odds.get())).sum::<f64>() / in_week.len() as f64
    };

    let days = week_start
        .iter_days()
        .take_while(|d| *d <= week_end)
        .map(|date| {
            let same_day = in_week.iter().filter(|w| w.date == date);
            let (units, bets) = same_day.fold((0.0, 0usize), |(u, n), w| (u + w.pnl, n + 1));
            DailyResult {
                date,
                weekday: date.format("%A").to_string(),
                units,
                bets,
            }
        })
        .collect();

    WeekBreakdown {
        week_start,
        week_end,
        wins: tally.wins,
        losses: tally.losses,
        pushes: tally.pushes,
        win_rate: tally.win_rate(),
        units,
        avg_odds,
        days,
    }
}

//! Payout calculator for American odds.
//!
//! These functions take raw odds so they can be applied to untrusted
//! values. They never panic; for odds outside the valid American range
//! the returned figure is meaningless but finite or infinite, never a
//! crash.

use super::BetResult;

/// Profit on a winning wager, excluding the returned stake.
///
/// Positive odds pay `stake * odds / 100`; negative odds pay
/// `stake * 100 / |odds|`.
#[must_use]
pub fn potential_payout(odds: i32, stake: f64) -> f64 {
    let odds = f64::from(odds);
    if odds > 0.0 {
        stake * odds / 100.0
    } else {
        stake * 100.0 / odds.abs()
    }
}

/// Realized profit or loss once a wager has the given result.
#[must_use]
pub fn realized_pnl(odds: i32, stake: f64, result: BetResult) -> f64 {
    match result {
        BetResult::Win => potential_payout(odds, stake),
        BetResult::Loss => -stake,
        BetResult::Push | BetResult::Pending | BetResult::Void => 0.0,
    }
}

/// Rounds to two decimal places for display and comparison.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_odds_pay_odds_over_hundred() {
        for odds in [100, 150, 250, 1000] {
            assert_eq!(
                round2(potential_payout(odds, 1.0)),
                round2(f64::from(odds) / 100.0)
            );
        }
    }

    #[test]
    fn negative_odds_pay_hundred_over_odds() {
        for odds in [-100, -110, -150, -400] {
            assert_eq!(
                round2(potential_payout(odds, 1.0)),
                round2(100.0 / f64::from(odds).abs())
            );
        }
        assert_eq!(round2(potential_payout(-110, 1.0)), 0.91);
    }

    #[test]
    fn payout_scales_with_stake() {
        assert_eq!(round2(potential_payout(150, 2.0)), 3.0);
        assert_eq!(round2(potential_payout(-200, 3.0)), 1.5);
    }

    #[test]
    fn loss_costs_the_stake() {
        assert_eq!(realized_pnl(-110, 2.5, BetResult::Loss), -2.5);
        assert_eq!(realized_pnl(300, 1.0, BetResult::Loss), -1.0);
    }

    #[test]
    fn non_decisive_results_are_flat() {
        for result in [BetResult::Push, BetResult::Pending, BetResult::Void] {
            assert_eq!(realized_pnl(-110, 5.0, result), 0.0);
        }
    }

    #[test]
    fn win_pays_potential_payout() {
        assert_eq!(
            realized_pnl(150, 2.0, BetResult::Win),
            potential_payout(150, 2.0)
        );
    }

    #[test]
    fn invalid_odds_do_not_panic() {
        let _ = potential_payout(0, 1.0);
        let _ = potential_payout(50, 1.0);
        let _ = potential_payout(-50, 1.0);
        let _ = potential_payout(i32::MIN, 1.0);
        let _ = realized_pnl(0, 1.0, BetResult::Win);
    }
}

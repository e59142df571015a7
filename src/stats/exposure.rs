//! Open risk over pending wagers.

use crate::domain::Wager;

use super::dashboard::ExposureSummary;

/// Sums stakes and potential profit over pending wagers.
#[must_use]
pub fn compute_exposure(wagers: &[Wager]) -> ExposureSummary {
    wagers
        .iter()
        .filter(|w| w.is_pending())
        .fold(ExposureSummary::default(), |mut acc, wager| {
            acc.pending_count += 1;
            acc.units_at_risk += wager.stake;
            acc.potential_profit += wager.potential_payout();
            acc
        })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BetResult, NewWager, WagerDefaults, round2};

    fn wager(odds: i32, stake: f64, result: BetResult) -> Wager {
        let new = NewWager {
            odds: Some(odds),
            stake: Some(stake),
            result: Some(result),
            ..NewWager::default()
        };
        let Ok(w) = Wager::from_new(new, &WagerDefaults::default()) else {
            panic!("valid wager");
        };
        w
    }

    #[test]
    fn sums_only_pending() {
        let wagers = vec![
            wager(-110, 2.0, BetResult::Pending),
            wager(-105, 1.5, BetResult::Pending),
            wager(150, 4.0, BetResult::Win),
        ];
        let exposure = compute_exposure(&wagers);
        assert_eq!(exposure.pending_count, 2);
        assert_eq!(round2(exposure.units_at_risk), 3.5);
        assert_eq!(round2(exposure.potential_profit), 3.25);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(compute_exposure(&[]), ExposureSummary::default());
    }
}

//! History filtering over a wager snapshot.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::{BetResult, League, Wager};

/// Criteria for narrowing a wager list. Empty criteria match everything.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WagerFilter {
    /// Only wagers in this league.
    #[serde(default)]
    pub league: Option<League>,
    /// Only wagers with this result.
    #[serde(default)]
    pub result: Option<BetResult>,
    /// Case-insensitive substring of the matchup or selection.
    #[serde(default)]
    pub search: Option<String>,
}

impl WagerFilter {
    /// Returns `true` if `wager` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, wager: &Wager) -> bool {
        if let Some(league) = self.league
            && wager.league != league
        {
            return false;
        }
        if let Some(result) = self.result
            && wager.result != result
        {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                wager.matchup.to_lowercase().contains(&term)
                    || wager.selection.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    /// Returns the matching wagers, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, wagers: &'a [Wager]) -> Vec<&'a Wager> {
        wagers.iter().filter(|w| self.matches(w)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{NewWager, WagerDefaults};

    fn wager(league: League, matchup: &str, selection: &str, result: BetResult) -> Wager {
        let new = NewWager {
            league: Some(league),
            matchup: Some(matchup.to_string()),
            selection: Some(selection.to_string()),
            result: Some(result),
            ..NewWager::default()
        };
        let Ok(w) = Wager::from_new(new, &WagerDefaults::default()) else {
            panic!("valid wager");
        };
        w
    }

    fn sample() -> Vec<Wager> {
        vec![
            wager(League::Nba, "Lakers vs Celtics", "OVER 217.5", BetResult::Win),
            wager(League::Nfl, "Chiefs vs Bills", "CHIEFS -3.5", BetResult::Loss),
            wager(League::Nba, "Heat vs Nuggets", "Heat ML", BetResult::Pending),
        ]
    }

    #[test]
    fn empty_filter_matches_all() {
        let wagers = sample();
        assert_eq!(WagerFilter::default().apply(&wagers).len(), 3);
    }

    #[test]
    fn filters_by_league_and_result() {
        let wagers = sample();
        let filter = WagerFilter {
            league: Some(League::Nba),
            result: Some(BetResult::Win),
            search: None,
        };
        let matched = filter.apply(&wagers);
        assert_eq!(matched.len(), 1);
        assert!(matched.iter().all(|w| w.matchup.starts_with("Lakers")));
    }

    #[test]
    fn search_is_case_insensitive_over_matchup_and_selection() {
        let wagers = sample();
        let by_matchup = WagerFilter {
            search: Some("celtics".to_string()),
            ..WagerFilter::default()
        };
        assert_eq!(by_matchup.apply(&wagers).len(), 1);

        let by_selection = WagerFilter {
            search: Some("ml".to_string()),
            ..WagerFilter::default()
        };
        assert_eq!(by_selection.apply(&wagers).len(), 1);

        let blank = WagerFilter {
            search: Some("   ".to_string()),
            ..WagerFilter::default()
        };
        assert_eq!(blank.apply(&wagers).len(), 3);
    }
}

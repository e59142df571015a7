//! Validated American odds.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::payout;
use crate::error::TrackerError;

/// Signed American odds, always `<= -100` or `>= +100`.
///
/// Deserialization goes through [`AmericanOdds::new`], so stored or
/// submitted values outside the valid range are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// The conventional -110 line.
    pub const STANDARD: Self = Self(-110);

    /// Validates and wraps a raw odds value.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidOdds`] when `value` lies in the open
    /// interval `(-100, 100)`.
    pub fn new(value: i32) -> Result<Self, TrackerError> {
        if value <= -100 || value >= 100 {
            Ok(Self(value))
        } else {
            Err(TrackerError::InvalidOdds(value))
        }
    }

    /// Returns the raw signed value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Profit on a win for the given stake.
    #[must_use]
    pub fn potential_payout(self, stake: f64) -> f64 {
        payout::potential_payout(self.0, stake)
    }

    /// Break-even win probability implied by these odds, in percent.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        let odds = f64::from(self.0);
        if odds > 0.0 {
            100.0 / (odds + 100.0) * 100.0
        } else {
            odds.abs() / (odds.abs() + 100.0) * 100.0
        }
    }
}

impl Default for AmericanOdds {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = TrackerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    /// Always shows the sign: `+150`, `-110`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::payout::round2;

    #[test]
    fn accepts_boundaries() {
        assert!(AmericanOdds::new(100).is_ok());
        assert!(AmericanOdds::new(-100).is_ok());
        assert!(AmericanOdds::new(i32::MIN).is_ok());
    }

    #[test]
    fn rejects_open_interval() {
        for value in [0, 99, -99, 1, -1] {
            assert!(matches!(
                AmericanOdds::new(value),
                Err(TrackerError::InvalidOdds(v)) if v == value
            ));
        }
    }

    #[test]
    fn display_shows_sign() {
        let Ok(plus) = AmericanOdds::new(150) else {
            panic!("valid odds");
        };
        assert_eq!(plus.to_string(), "+150");
        assert_eq!(AmericanOdds::STANDARD.to_string(), "-110");
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<AmericanOdds>("-110").is_ok());
        assert!(serde_json::from_str::<AmericanOdds>("50").is_err());
    }

    #[test]
    fn implied_probability_matches_convention() {
        assert_eq!(round2(AmericanOdds::STANDARD.implied_probability()), 52.38);
        let Ok(even) = AmericanOdds::new(100) else {
            panic!("valid odds");
        };
        assert_eq!(round2(even.implied_probability()), 50.0);
    }
}

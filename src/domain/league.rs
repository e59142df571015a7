//! Fixed set of leagues a wager can be filed under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TrackerError;

/// League (or sport bucket) a wager belongs to.
///
/// Declaration order is the order used for per-league breakdowns.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum League {
    /// National Football League.
    #[serde(rename = "NFL")]
    Nfl,
    /// National Basketball Association.
    #[serde(rename = "NBA")]
    Nba,
    /// National Hockey League.
    #[serde(rename = "NHL")]
    Nhl,
    /// NCAA men's basketball.
    #[serde(rename = "NCAAB")]
    Ncaab,
    /// Association football.
    Soccer,
    /// Major League Baseball.
    #[serde(rename = "MLB")]
    Mlb,
    /// Tennis.
    Tennis,
    /// Mixed martial arts.
    #[serde(rename = "MMA")]
    Mma,
    /// Anything else.
    #[default]
    Other,
}

impl League {
    /// Every league, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Nfl,
        Self::Nba,
        Self::Nhl,
        Self::Ncaab,
        Self::Soccer,
        Self::Mlb,
        Self::Tennis,
        Self::Mma,
        Self::Other,
    ];

    /// Returns the display code used on the wire (e.g. `"NBA"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nfl => "NFL",
            Self::Nba => "NBA",
            Self::Nhl => "NHL",
            Self::Ncaab => "NCAAB",
            Self::Soccer => "Soccer",
            Self::Mlb => "MLB",
            Self::Tennis => "Tennis",
            Self::Mma => "MMA",
            Self::Other => "Other",
        }
    }

    /// Returns the human-readable sport name for catalog endpoints.
    #[must_use]
    pub const fn sport(&self) -> &'static str {
        match self {
            Self::Nfl => "American football",
            Self::Nba | Self::Ncaab => "Basketball",
            Self::Nhl => "Ice hockey",
            Self::Soccer => "Soccer",
            Self::Mlb => "Baseball",
            Self::Tennis => "Tennis",
            Self::Mma => "Mixed martial arts",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = TrackerError;

    /// Case-insensitive parse of a league code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|league| league.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidRequest(format!("unknown league: {s}")))
    }
}

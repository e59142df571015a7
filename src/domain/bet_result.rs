//! Wager outcome taxonomy and the resolution state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TrackerError;

/// Outcome of a wager.
///
/// `Pending` is the only non-terminal state. `Void` never persists: a
/// wager resolved as void is removed from the collection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BetResult {
    /// Not yet settled.
    #[default]
    Pending,
    /// Settled as a win.
    Win,
    /// Settled as a loss.
    Loss,
    /// Stake returned, no profit or loss.
    Push,
    /// Cancelled; the wager is deleted.
    Void,
}

impl BetResult {
    /// Returns the wire name (e.g. `"win"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Push => "push",
            Self::Void => "void",
        }
    }

    /// Returns `true` for states a wager can never leave.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` for results that contribute to stats: win, loss, push.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Win | Self::Loss | Self::Push)
    }

    /// Returns `true` for results that count in win rate and streaks.
    #[must_use]
    pub const fn is_decisive(&self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }

    /// Validates a transition from `self` to `to`.
    ///
    /// Only `pending → {win, loss, push, void}` is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidStateTransition`] for every other pair.
    pub fn transition(self, to: Self) -> Result<Self, TrackerError> {
        match (self, to) {
            (Self::Pending, Self::Win | Self::Loss | Self::Push | Self::Void) => Ok(to),
            (from, to) => Err(TrackerError::InvalidStateTransition { from, to }),
        }
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetResult {
    type Err = TrackerError;

    /// Accepts the wire names plus the single-letter spreadsheet codes
    /// `w`, `l`, `p`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "win" | "w" => Ok(Self::Win),
            "loss" | "l" => Ok(Self::Loss),
            "push" | "p" => Ok(Self::Push),
            "void" => Ok(Self::Void),
            other => Err(TrackerError::InvalidRequest(format!(
                "unknown bet result: {other}"
            ))),
        }
    }
}

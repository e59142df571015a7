//! Domain layer: wager model, payout math, store, and event system.
//!
//! This module holds the wager record and its outcome taxonomy, the
//! American-odds payout calculator, the in-memory [`WagerStore`] that owns
//! the collection, and the [`EventBus`] that broadcasts mutations.

pub mod bet_result;
pub mod event_bus;
pub mod filter;
pub mod league;
pub mod odds;
pub mod payout;
pub mod wager;
pub mod wager_event;
pub mod wager_id;
pub mod wager_store;

pub use bet_result::BetResult;
pub use event_bus::EventBus;
pub use filter::WagerFilter;
pub use league::League;
pub use odds::AmericanOdds;
pub use payout::{potential_payout, realized_pnl, round2};
pub use wager::{NewWager, ParlayLeg, Wager, WagerDefaults, validate_stake};
pub use wager_event::WagerEvent;
pub use wager_id::WagerId;
pub use wager_store::{BatchUpdate, Snapshot, StoreUpdate, WagerStore};

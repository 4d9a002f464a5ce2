//! Threshold alert engine.
//!
//! Converts a balance snapshot into zero-or-one alert events against a
//! configured spending threshold, and tracks which alert tiers have already
//! fired in the current billing cycle so each tier fires exactly once.
//!
//! # Usage
//!
//! ```no_run
//! use alerts::{evaluate, StateStore};
//! use balance::BalanceSnapshot;
//!
//! let store = StateStore::new("notification_state.json");
//! let state = store.load();
//!
//! let snapshot = BalanceSnapshot::from_minor_units(30_000, 50_000, 100_000);
//! let outcome = evaluate(&snapshot, 1000.0, &state).unwrap();
//!
//! if outcome.alert.is_some() {
//!     // deliver the alert, then commit the proposed state:
//!     store.save(&outcome.state).ok();
//! }
//! ```
//!
//! # Tier semantics
//!
//! Tiers are range-bound, not cumulative: each tier covers a disjoint
//! percentage range of the threshold, and a reading is matched against at
//! most one of them. A balance that jumps from below 50% straight to 95%
//! fires only the tier-90 alert; the tier-50 and tier-75 flags stay false
//! for the rest of the cycle unless the balance later falls back into their
//! range and rises again. Do not change this to fire-all-lower-tiers without
//! revisiting the alerting policy.
//!
//! State is persisted per billing cycle and cleared only by an explicit
//! [`StateStore::reset`]; there is no automatic cycle rollover.

pub mod error;
pub mod evaluator;
pub mod events;
pub mod state;
pub mod store;
pub mod tier;

pub use error::AlertError;
pub use evaluator::{evaluate, percent_of_threshold, Evaluation};
pub use events::{BalanceAlert, Severity};
pub use state::NotificationState;
pub use store::StateStore;
pub use tier::Tier;

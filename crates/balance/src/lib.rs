//! Meta Graph API ad account balance client.
//!
//! This crate fetches the current spend figures for an ad account and
//! converts them into a [`BalanceSnapshot`], the value type the alert engine
//! evaluates against the configured spending threshold.
//!
//! The Graph API is consumed through the [`BalanceSource`] trait so that the
//! monitor loop can be driven by a test double without network access.

pub mod client;
pub mod error;
pub mod snapshot;

pub use client::{BalanceSource, GraphClient, GraphConfig};
pub use error::FetchError;
pub use snapshot::BalanceSnapshot;

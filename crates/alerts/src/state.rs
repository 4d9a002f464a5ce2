//! Per-cycle notification state.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Which alert tiers have already fired in the current billing cycle.
///
/// The JSON field names are fixed; they are the on-disk format of the state
/// file and must stay readable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationState {
    /// Tier-50 alert has been sent
    #[serde(default, rename = "notified50Percent")]
    pub notified_50_percent: bool,
    /// Tier-75 alert has been sent
    #[serde(default, rename = "notified75Percent")]
    pub notified_75_percent: bool,
    /// Tier-90 alert has been sent
    #[serde(default, rename = "notified90Percent")]
    pub notified_90_percent: bool,
    /// Tier-100 alert has been sent
    #[serde(default, rename = "notified100Percent")]
    pub notified_100_percent: bool,
}

impl NotificationState {
    /// Check whether the given tier has already fired this cycle.
    #[must_use]
    pub const fn is_notified(&self, tier: Tier) -> bool {
        match tier {
            Tier::Fifty => self.notified_50_percent,
            Tier::SeventyFive => self.notified_75_percent,
            Tier::Ninety => self.notified_90_percent,
            Tier::Hundred => self.notified_100_percent,
        }
    }

    /// Mark the given tier as fired.
    pub fn mark_notified(&mut self, tier: Tier) {
        match tier {
            Tier::Fifty => self.notified_50_percent = true,
            Tier::SeventyFive => self.notified_75_percent = true,
            Tier::Ninety => self.notified_90_percent = true,
            Tier::Hundred => self.notified_100_percent = true,
        }
    }

    /// Check whether no tier has fired yet.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        !self.notified_50_percent
            && !self.notified_75_percent
            && !self.notified_90_percent
            && !self.notified_100_percent
    }
}

//! Alert tiers: disjoint percentage-of-threshold ranges.

use serde::{Deserialize, Serialize};

use crate::events::Severity;

/// An alert tier, identified by the percentage range of the threshold it
/// covers.
///
/// Ranges are inclusive-exclusive and disjoint: `[50, 75)`, `[75, 90)`,
/// `[90, 100)`, `[100, ∞)`. A percentage below 50 matches no tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Balance has reached 50% of the threshold
    Fifty,
    /// Balance has reached 75% of the threshold
    SeventyFive,
    /// Balance has reached 90% of the threshold
    Ninety,
    /// Threshold has been reached or exceeded
    Hundred,
}

impl Tier {
    /// Find the tier whose range contains `percent`, if any.
    #[must_use]
    pub fn for_percent(percent: f64) -> Option<Self> {
        if percent >= 100.0 {
            Some(Self::Hundred)
        } else if percent >= 90.0 {
            Some(Self::Ninety)
        } else if percent >= 75.0 {
            Some(Self::SeventyFive)
        } else if percent >= 50.0 {
            Some(Self::Fifty)
        } else {
            None
        }
    }

    /// The lower bound of this tier's range, as a whole percentage.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        match self {
            Self::Fifty => 50,
            Self::SeventyFive => 75,
            Self::Ninety => 90,
            Self::Hundred => 100,
        }
    }

    /// Get display name for this tier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fifty => "50%",
            Self::SeventyFive => "75%",
            Self::Ninety => "90%",
            Self::Hundred => "100%",
        }
    }

    /// Get the severity associated with this tier.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Fifty => Severity::Info,
            Self::SeventyFive | Self::Ninety => Severity::Warning,
            Self::Hundred => Severity::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_fifty_matches_nothing() {
        assert_eq!(Tier::for_percent(0.0), None);
        assert_eq!(Tier::for_percent(25.0), None);
        assert_eq!(Tier::for_percent(49.999), None);
    }

    #[test]
    fn test_range_lower_bounds_inclusive() {
        assert_eq!(Tier::for_percent(50.0), Some(Tier::Fifty));
        assert_eq!(Tier::for_percent(75.0), Some(Tier::SeventyFive));
        assert_eq!(Tier::for_percent(90.0), Some(Tier::Ninety));
        assert_eq!(Tier::for_percent(100.0), Some(Tier::Hundred));
    }

    #[test]
    fn test_range_upper_bounds_exclusive() {
        assert_eq!(Tier::for_percent(74.999), Some(Tier::Fifty));
        assert_eq!(Tier::for_percent(89.999), Some(Tier::SeventyFive));
        assert_eq!(Tier::for_percent(99.999), Some(Tier::Ninety));
    }

    #[test]
    fn test_no_upper_bound_on_hundred() {
        assert_eq!(Tier::for_percent(105.0), Some(Tier::Hundred));
        assert_eq!(Tier::for_percent(1000.0), Some(Tier::Hundred));
    }

    #[test]
    fn test_severity_escalates() {
        assert_eq!(Tier::Fifty.severity(), Severity::Info);
        assert_eq!(Tier::SeventyFive.severity(), Severity::Warning);
        assert_eq!(Tier::Ninety.severity(), Severity::Warning);
        assert_eq!(Tier::Hundred.severity(), Severity::Critical);
    }
}

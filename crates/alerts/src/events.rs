//! Alert event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Severity levels for alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational - normal operations
    Info,
    /// Warning - something needs attention
    Warning,
    /// Critical - immediate action required
    Critical,
}

impl Severity {
    /// Get display name for this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// A single threshold alert, produced when a tier newly fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAlert {
    /// The tier that fired
    pub tier: Tier,
    /// Outstanding balance that triggered the alert, in major units
    pub due_amount: f64,
    /// `due_amount` as a percentage of the threshold
    pub percent: f64,
    /// The configured threshold the percentage is relative to
    pub threshold: f64,
    /// When the alert was produced
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl BalanceAlert {
    /// Create a new alert stamped with the current time.
    #[must_use]
    pub fn new(tier: Tier, due_amount: f64, percent: f64, threshold: f64) -> Self {
        Self {
            tier,
            due_amount,
            percent,
            threshold,
            timestamp: Utc::now(),
        }
    }

    /// Get a short title for this alert.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Balance alert: {} of limit", self.tier.as_str())
    }

    /// Get the severity for this alert.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.tier.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_title() {
        let alert = BalanceAlert::new(Tier::Ninety, 920.0, 92.0, 1000.0);
        assert_eq!(alert.title(), "Balance alert: 90% of limit");
    }

    #[test]
    fn test_alert_severity_follows_tier() {
        let alert = BalanceAlert::new(Tier::Hundred, 1050.0, 105.0, 1000.0);
        assert_eq!(alert.severity(), Severity::Critical);
    }
}

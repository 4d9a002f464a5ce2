//! Threshold evaluation: snapshot + threshold + state in, proposed state and
//! at most one alert out.
//!
//! The evaluator is pure. It never touches the store; the caller commits the
//! proposed state only after the alert has actually been delivered, so a
//! failed delivery is retried on the next cycle.

use balance::BalanceSnapshot;

use crate::error::AlertError;
use crate::events::BalanceAlert;
use crate::state::NotificationState;
use crate::tier::Tier;

/// Outcome of a single evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The state to persist once the alert (if any) has been delivered.
    pub state: NotificationState,
    /// The alert to deliver, if a tier newly fired.
    pub alert: Option<BalanceAlert>,
}

/// Compute the due amount as a percentage of the threshold.
///
/// Rejects non-positive (or non-finite) thresholds; a threshold of zero
/// would make every percentage infinite.
pub fn percent_of_threshold(due_amount: f64, threshold: f64) -> Result<f64, AlertError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(AlertError::InvalidThreshold(threshold));
    }
    Ok(due_amount / threshold * 100.0)
}

/// Evaluate a snapshot against the threshold and the current cycle state.
///
/// If the due amount falls in a tier whose flag is still false, the returned
/// [`Evaluation`] carries one alert for that tier and a state with that flag
/// set; otherwise the state is returned unchanged and no alert is produced.
pub fn evaluate(
    snapshot: &BalanceSnapshot,
    threshold: f64,
    state: &NotificationState,
) -> Result<Evaluation, AlertError> {
    let percent = percent_of_threshold(snapshot.due_amount, threshold)?;

    let mut next = *state;
    let alert = Tier::for_percent(percent).and_then(|tier| {
        if state.is_notified(tier) {
            None
        } else {
            next.mark_notified(tier);
            Some(BalanceAlert::new(tier, snapshot.due_amount, percent, threshold))
        }
    });

    Ok(Evaluation { state: next, alert })
}

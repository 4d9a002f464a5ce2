//! Notification channel implementations.

pub mod telegram;

use async_trait::async_trait;

use alerts::BalanceAlert;

use crate::error::ChannelError;

/// Trait for notification channels.
///
/// Delivery is awaited by the caller; a tier's fired flag is only persisted
/// once `send` has returned `Ok`.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Deliver a balance alert through this channel.
    async fn send(&self, alert: &BalanceAlert) -> Result<(), ChannelError>;
}

//! Telegram notification channel for balance alerts.
//!
//! This crate provides the outbound side of the monitor: a thin Telegram Bot
//! API client and a notification channel that renders [`BalanceAlert`]s into
//! chat messages.
//!
//! # Usage
//!
//! ```no_run
//! use alerts::{BalanceAlert, Tier};
//! use notify::{NotifyChannel, TelegramApi, TelegramChannel};
//!
//! # async fn run() -> Result<(), notify::ChannelError> {
//! let api = TelegramApi::new("123456:bot-token");
//! let channel = TelegramChannel::new(api, -1001234567890);
//!
//! let alert = BalanceAlert::new(Tier::Fifty, 500.0, 50.0, 1000.0);
//! channel.send(&alert).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The channel is trait-based so the monitor loop can be exercised with an
//! in-memory double:
//!
//! - [`NotifyChannel`] trait defines the delivery interface
//! - [`TelegramChannel`] implements delivery via the Bot API `sendMessage`
//! - [`TelegramApi`] is also used directly for chat command replies and
//!   update polling
//!
//! Delivery is awaited, not fire-and-forget: the monitor only commits a
//! tier's fired flag after `send` returns `Ok`.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod channels;
pub mod error;

pub use api::{Chat, Message, TelegramApi, Update};
pub use channels::telegram::TelegramChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;

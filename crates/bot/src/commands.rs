//! Chat command surface.
//!
//! A dedicated task long-polls `getUpdates` and forwards parsed commands to
//! the monitor loop over a channel, so command execution is serialized with
//! the periodic balance checks.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use notify::TelegramApi;

/// Server-side long-poll timeout for `getUpdates`.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Pause before retrying after a failed `getUpdates` call.
const ERROR_BACKOFF: Duration = Duration::from_secs(10);

/// A command understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the current account status
    Balance,
    /// Show the command listing
    Help,
    /// Clear the per-cycle alert flags (admin)
    Reset,
    /// Send a test notification through the alert channel (admin)
    TestAlert,
}

impl Command {
    /// Parse a message text into a command.
    ///
    /// Accepts the `/command@botname` form Telegram uses in group chats;
    /// anything after the command word is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word);

        match name {
            "/balance" => Some(Self::Balance),
            "/help" | "/start" => Some(Self::Help),
            "/reset" => Some(Self::Reset),
            "/testalert" => Some(Self::TestAlert),
            _ => None,
        }
    }
}

/// A parsed command together with the chat it came from.
#[derive(Debug, Clone, Copy)]
pub struct CommandRequest {
    /// Chat to reply to (also the caller identity for authorization)
    pub chat_id: i64,
    /// The parsed command
    pub command: Command,
}

/// Long-poll for updates and forward parsed commands to the monitor.
///
/// Returns when the receiving side of the channel is dropped.
pub async fn poll_updates(api: TelegramApi, commands: mpsc::Sender<CommandRequest>) {
    let mut offset: Option<i64> = None;

    loop {
        let updates = match api.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(ERROR_BACKOFF).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let chat_id = message.chat.id;
            let Some(text) = message.text else {
                continue;
            };
            let Some(command) = Command::parse(&text) else {
                continue;
            };

            debug!(chat_id, ?command, "Received command");

            if commands.send(CommandRequest { chat_id, command }).await.is_err() {
                // Monitor loop is gone; nothing left to do.
                return;
            }
        }
    }
}

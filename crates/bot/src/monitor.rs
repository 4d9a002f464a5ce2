//! Monitor loop: periodic balance checks and chat commands, serialized on a
//! single task.
//!
//! The loop owns the in-memory [`NotificationState`]; everything that reads
//! or writes it (scheduled cycles, `/reset`, `/balance`) runs through the
//! same `select!` loop, so no two evaluations can interleave. State is
//! committed through the store only after the corresponding alert has been
//! delivered.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use alerts::{evaluate, percent_of_threshold, NotificationState, StateStore};
use balance::{BalanceSnapshot, BalanceSource};
use notify::{NotifyChannel, TelegramApi};

use crate::commands::{Command, CommandRequest};
use crate::config::Config;

const HELP_MESSAGE: &str = "\
🤖 *Balance bot - available commands*:

/balance - Show the current ad account status
/help - Show this help message
/reset - Reset the alert system for a new billing cycle (administrative)
/testalert - Send a test notification to the alert chat (administrative)";

const UNAUTHORIZED_MESSAGE: &str = "❌ You are not allowed to use this command.";

/// The monitor: scheduler, evaluator driver and command executor.
pub struct Monitor {
    config: Config,
    source: Arc<dyn BalanceSource>,
    channel: Arc<dyn NotifyChannel>,
    api: TelegramApi,
    store: StateStore,
    state: NotificationState,
}

impl Monitor {
    /// Create a monitor, loading persisted notification state.
    #[must_use]
    pub fn new(
        config: Config,
        source: Arc<dyn BalanceSource>,
        channel: Arc<dyn NotifyChannel>,
        api: TelegramApi,
    ) -> Self {
        let store = StateStore::new(&config.state_path);
        let state = store.load();
        info!(?state, "Loaded notification state");

        Self {
            config,
            source,
            channel,
            api,
            store,
            state,
        }
    }

    /// Run until the command channel closes.
    ///
    /// The first balance check happens immediately; afterwards the interval
    /// drives the cadence. A tick that lands while a previous cycle is still
    /// running is skipped, not queued.
    pub async fn run(mut self, mut commands: mpsc::Receiver<CommandRequest>) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    info!("Running scheduled balance check");
                    self.run_cycle().await;
                }
                request = commands.recv() => {
                    let Some(request) = request else { break };
                    self.handle_command(request).await;
                }
            }
        }
    }

    /// One evaluation cycle: fetch, evaluate, deliver, commit on success.
    pub(crate) async fn run_cycle(&mut self) {
        let snapshot = match self.source.fetch_balance().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Balance fetch failed, skipping cycle");
                return;
            }
        };

        let outcome = match evaluate(&snapshot, self.config.threshold, &self.state) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Evaluation failed");
                return;
            }
        };

        let Some(alert) = outcome.alert else {
            info!(
                due_amount = snapshot.due_amount,
                threshold = self.config.threshold,
                "No new alert tier reached"
            );
            return;
        };

        info!(
            tier = alert.tier.as_str(),
            percent = alert.percent,
            due_amount = alert.due_amount,
            "Tier newly reached, delivering alert"
        );

        match self.channel.send(&alert).await {
            Ok(()) => {
                self.state = outcome.state;
                if let Err(e) = self.store.save(&self.state) {
                    warn!(
                        error = %e,
                        "Failed to persist notification state, continuing with in-memory state"
                    );
                }
            }
            Err(e) => {
                // Flag stays false so the same tier is retried next cycle.
                error!(
                    tier = alert.tier.as_str(),
                    error = %e,
                    "Alert delivery failed, tier will retry next cycle"
                );
            }
        }
    }

    async fn handle_command(&mut self, request: CommandRequest) {
        match request.command {
            Command::Balance => self.cmd_balance(request.chat_id).await,
            Command::Help => self.reply(request.chat_id, HELP_MESSAGE).await,
            Command::Reset => self.cmd_reset(request.chat_id).await,
            Command::TestAlert => self.cmd_test_alert(request.chat_id).await,
        }
    }

    /// `/balance`: read-only status projection, no state change.
    async fn cmd_balance(&self, chat_id: i64) {
        match self.status_report().await {
            Ok(text) => self.reply(chat_id, &text).await,
            Err(e) => {
                error!(error = %e, "Status query failed");
                self.reply(chat_id, "❌ Could not retrieve the account balance.")
                    .await;
            }
        }
    }

    async fn status_report(&self) -> anyhow::Result<String> {
        let snapshot = self.source.fetch_balance().await?;
        let percent = percent_of_threshold(snapshot.due_amount, self.config.threshold)?;
        Ok(Self::format_status(&snapshot, self.config.threshold, percent))
    }

    fn format_status(snapshot: &BalanceSnapshot, threshold: f64, percent: f64) -> String {
        format!(
            "💰 *Ad account status*:\n\
             - Spent: ${:.2}\n\
             - Spend cap: ${:.2}\n\
             - Remaining budget: ${:.2}\n\
             - Outstanding balance: ${:.2}\n\
             - Threshold: ${:.2}\n\
             - Percent of threshold: {:.1}%",
            snapshot.amount_spent,
            snapshot.spend_cap,
            snapshot.remaining_budget,
            snapshot.due_amount,
            threshold,
            percent,
        )
    }

    async fn cmd_reset(&mut self, chat_id: i64) {
        if !self.is_admin(chat_id) {
            warn!(chat_id, "Unauthorized /reset attempt");
            self.reply(chat_id, UNAUTHORIZED_MESSAGE).await;
            return;
        }

        self.state = self.store.reset();
        info!("Notification state reset");
        self.reply(chat_id, "✅ Alert system reset for the new billing cycle.")
            .await;
    }

    async fn cmd_test_alert(&self, chat_id: i64) {
        if !self.is_admin(chat_id) {
            warn!(chat_id, "Unauthorized /testalert attempt");
            self.reply(chat_id, UNAUTHORIZED_MESSAGE).await;
            return;
        }

        let text = format!(
            "🧪 *Test notification*\n\
             Target chat ID: `{}`\n\
             This message confirms the notification channel is working.",
            self.config.chat_id
        );

        match self.api.send_message(self.config.chat_id, &text).await {
            Ok(()) => {
                self.reply(
                    chat_id,
                    &format!(
                        "✅ Test message delivered to the alert chat (ID: {}).",
                        self.config.chat_id
                    ),
                )
                .await;
            }
            Err(e) => {
                error!(error = %e, "Test dispatch failed");
                self.reply(chat_id, "❌ Test message could not be delivered.")
                    .await;
            }
        }
    }

    fn is_admin(&self, chat_id: i64) -> bool {
        chat_id == self.config.admin_chat_id
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.api.send_message(chat_id, text).await {
            error!(chat_id, error = %e, "Failed to send reply");
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &NotificationState {
        &self.state
    }
}

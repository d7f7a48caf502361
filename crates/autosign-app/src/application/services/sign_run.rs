use std::sync::Arc;
use tracing::{debug, instrument};

use autosign_domain::check_in::RunSummary;
use autosign_domain::notification::{Delivery, NotificationMessage, NotificationSender};
use autosign_domain::{Account, RunLog, SignInService, SignOutcome};

/// Signs every account in order and reports each outcome
pub struct SignRunner {
    sign_in: Arc<dyn SignInService>,
    notifier: Arc<dyn NotificationSender>,
}

impl SignRunner {
    pub fn new(sign_in: Arc<dyn SignInService>, notifier: Arc<dyn NotificationSender>) -> Self {
        Self { sign_in, notifier }
    }

    /// Run a full pass over `accounts`, sequentially.
    ///
    /// One account's failure never stops the next; a failed webhook never
    /// changes an outcome.
    #[instrument(skip_all, fields(accounts = accounts.len()))]
    pub async fn run(&self, accounts: &[Account], log: &dyn RunLog) -> RunSummary {
        let mut summary = RunSummary::default();

        for account in accounts {
            let username = account.username();
            log.info(&format!("[{}] Signing...", username));

            let outcome = self.sign_in.sign_in(account).await;
            log_outcome(username, &outcome, log);

            self.notify(username, &outcome, log).await;
            summary.record(&outcome);
        }

        log.info("Finished!");
        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            already_signed = summary.already_signed,
            "Sign run complete"
        );

        summary
    }

    async fn notify(&self, username: &str, outcome: &SignOutcome, log: &dyn RunLog) {
        if !self.notifier.is_enabled() {
            return;
        }

        let message = NotificationMessage::for_outcome(username, outcome);
        match self.notifier.send(&message).await {
            Ok(Delivery::Sent { target, status }) => {
                log.info(&format!("Sent webhook to {}: {}", target, status))
            }
            Ok(Delivery::Skipped) => debug!("[{}] Webhook skipped", username),
            Err(e) => log.error(&format!("Send webhook failed: {}", e)),
        }
    }
}

fn log_outcome(username: &str, outcome: &SignOutcome, log: &dyn RunLog) {
    match outcome {
        SignOutcome::Success {
            message,
            signed_flow,
            total_flow,
        } => log.info(&format!(
            "[{}] Sign Success: {} GB (+{} GB) - {}",
            username, total_flow, signed_flow, message
        )),
        SignOutcome::Failure { message } => {
            log.error(&format!("[{}] Sign Failed: {}", username, message))
        }
        SignOutcome::AlreadySigned => log.warn(&format!("[{}] Already Signed!", username)),
    }
}

/// A runner bound to its configured accounts, shared by every trigger
pub struct SignJob {
    runner: SignRunner,
    accounts: Vec<Account>,
}

impl SignJob {
    pub fn new(runner: SignRunner, accounts: Vec<Account>) -> Self {
        Self { runner, accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub async fn run(&self, log: &dyn RunLog) -> RunSummary {
        self.runner.run(&self.accounts, log).await
    }
}

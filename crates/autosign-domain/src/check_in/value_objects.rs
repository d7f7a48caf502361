use serde::{Deserialize, Serialize};

/// Result of one account's sign-in attempt.
///
/// `Failure` always carries a message while `AlreadySigned` carries none; the
/// two must never be merged since they drive different log severities and
/// notification wording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignOutcome {
    Success {
        message: String,
        /// Flow credited by this sign-in (GB)
        signed_flow: f64,
        /// Cumulative flow after this sign-in (GB)
        total_flow: f64,
    },
    Failure {
        message: String,
    },
    /// The account already signed in today. Not an error.
    AlreadySigned,
}

impl SignOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        SignOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SignOutcome::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SignOutcome::Success { message, .. } | SignOutcome::Failure { message } => {
                Some(message)
            }
            SignOutcome::AlreadySigned => None,
        }
    }

    pub fn signed_flow(&self) -> Option<f64> {
        match self {
            SignOutcome::Success { signed_flow, .. } => Some(*signed_flow),
            _ => None,
        }
    }

    pub fn total_flow(&self) -> Option<f64> {
        match self {
            SignOutcome::Success { total_flow, .. } => Some(*total_flow),
            _ => None,
        }
    }
}

/// Aggregated outcome counts of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub already_signed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &SignOutcome) {
        self.total += 1;
        match outcome {
            SignOutcome::Success { .. } => self.succeeded += 1,
            SignOutcome::Failure { .. } => self.failed += 1,
            SignOutcome::AlreadySigned => self.already_signed += 1,
        }
    }
}

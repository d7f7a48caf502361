use async_trait::async_trait;

use super::SignOutcome;
use crate::account::Account;

/// Performs the daily sign-in for one account.
///
/// Implementations never fail: every transport, protocol or decoding problem is
/// folded into [`SignOutcome::Failure`].
#[async_trait]
pub trait SignInService: Send + Sync {
    async fn sign_in(&self, account: &Account) -> SignOutcome;
}

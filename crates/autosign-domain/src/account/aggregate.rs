use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::DomainError;

/// A HayFrp account to sign in with.
///
/// Accounts carry no identity beyond their position in the configured list;
/// duplicates are allowed and processed independently.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAccount")]
pub struct Account {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct RawAccount {
    username: String,
    password: String,
}

impl TryFrom<RawAccount> for Account {
    type Error = DomainError;

    fn try_from(raw: RawAccount) -> Result<Self, Self::Error> {
        Account::new(raw.username, raw.password)
    }
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::Validation(
                "Account username cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            username,
            password: password.into(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

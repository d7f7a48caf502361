use async_trait::async_trait;
use log::debug;
use tracing::instrument;

use autosign_domain::{Account, SignInService, SignOutcome};
use autosign_infrastructure::http::{ApiClient, RequestError};

mod classify;

use classify::{classify_login, classify_sign, LoginStep};

/// Two-step HayFrp sign-in: login for a CSRF token, then sign with it
#[derive(Clone)]
pub struct SignInExecutor {
    api: ApiClient,
}

impl SignInExecutor {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn try_sign_in(&self, account: &Account) -> Result<SignOutcome, RequestError> {
        let login = self
            .api
            .login(account.username(), account.password())
            .await?;

        let token = match classify_login(&login)? {
            LoginStep::Proceed(token) => token,
            LoginStep::Done(outcome) => return Ok(outcome),
        };
        debug!("[{}] Logged in, signing", account.username());

        let sign = self.api.sign(token).await?;
        Ok(classify_sign(&sign)?)
    }
}

#[async_trait]
impl SignInService for SignInExecutor {
    #[instrument(skip_all, fields(username = %account.username()))]
    async fn sign_in(&self, account: &Account) -> SignOutcome {
        self.try_sign_in(account)
            .await
            .unwrap_or_else(|e| SignOutcome::failure(format!("Request Error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosign_infrastructure::http::{HttpClient, RetryConfig};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn executor(base: &str) -> SignInExecutor {
        let http = HttpClient::with_retry_config(RetryConfig {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        })
        .unwrap();
        SignInExecutor::new(ApiClient::new(http, Some(base)))
    }

    fn alice() -> Account {
        Account::new("alice", "pw").unwrap()
    }

    async fn mount_login(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/user"))
            .and(body_partial_json(json!({"type": "login", "user": "alice", "passwd": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_sign(server: &MockServer, body: serde_json::Value, times: u64) {
        Mock::given(method("POST"))
            .and(path("/user"))
            .and(body_partial_json(json!({"type": "sign", "csrf": "T1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_successful_sign_in() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 200, "token": "T1"})).await;
        mount_sign(
            &server,
            json!({"status": 200, "message": "ok", "signflow": 5, "flow": 105}),
            1,
        )
        .await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(
            outcome,
            SignOutcome::Success {
                message: "ok".to_string(),
                signed_flow: 5.0,
                total_flow: 105.0,
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_password_skips_sign() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 403})).await;
        mount_sign(&server, json!({"status": 200}), 0).await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(outcome, SignOutcome::failure("Wrong Password (403)"));
    }

    #[tokio::test]
    async fn test_already_signed() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 200, "token": "T1"})).await;
        mount_sign(&server, json!({"status": 403, "message": "signed"}), 1).await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(outcome, SignOutcome::AlreadySigned);
    }

    #[tokio::test]
    async fn test_already_signed_with_malformed_flow() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 200, "token": "T1"})).await;
        mount_sign(
            &server,
            json!({"status": 403, "message": "already", "flow": ""}),
            1,
        )
        .await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(outcome, SignOutcome::AlreadySigned);
    }

    #[tokio::test]
    async fn test_wrong_password_with_numeric_token() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 403, "token": 12345})).await;
        mount_sign(&server, json!({"status": 200}), 0).await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(outcome, SignOutcome::failure("Wrong Password (403)"));
    }

    #[tokio::test]
    async fn test_token_expired() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 200, "token": "T1"})).await;
        mount_sign(&server, json!({"status": 404}), 1).await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        assert_eq!(outcome, SignOutcome::failure("Token Expired (404)"));
    }

    #[tokio::test]
    async fn test_missing_token_becomes_request_error() {
        let server = MockServer::start().await;
        mount_login(&server, json!({"status": 200})).await;
        mount_sign(&server, json!({"status": 200}), 0).await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        match outcome {
            SignOutcome::Failure { message } => {
                assert!(message.starts_with("Request Error: "), "{}", message);
                assert!(message.contains("token"), "{}", message);
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_failure_becomes_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(2)
            .mount(&server)
            .await;

        let outcome = executor(&server.uri()).sign_in(&alice()).await;

        match outcome {
            SignOutcome::Failure { message } => {
                assert!(message.starts_with("Request Error: "), "{}", message);
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }
}

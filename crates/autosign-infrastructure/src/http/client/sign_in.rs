use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiClient;
use crate::http::{ApiError, RequestError};

const USER_ROUTE: &str = "user";

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum UserRequest<'a> {
    Login { user: &'a str, passwd: &'a str },
    Sign { csrf: &'a str },
}

/// Answer to `{type: "login"}`
///
/// Only `status` is decoded strictly; other fields are checked when read.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub status: i64,
    #[serde(default)]
    token: Value,
}

impl LoginResponse {
    /// CSRF token; required once the login succeeded
    pub fn token(&self) -> Result<&str, ApiError> {
        match &self.token {
            Value::String(t) if !t.is_empty() => Ok(t),
            Value::Null | Value::String(_) => Err(ApiError::MissingField("token")),
            _ => Err(ApiError::InvalidField("token")),
        }
    }
}

/// Answer to `{type: "sign"}`
///
/// Only `status` is decoded strictly; other fields are checked when read.
#[derive(Debug, Clone, Deserialize)]
pub struct SignResponse {
    pub status: i64,
    #[serde(default)]
    message: Value,
    #[serde(default)]
    signflow: Value,
    #[serde(default)]
    flow: Value,
}

impl SignResponse {
    /// Total flow after signing; required on success
    pub fn total_flow(&self) -> Result<f64, ApiError> {
        flow_value(&self.flow, "flow")?.ok_or(ApiError::MissingField("flow"))
    }

    /// Flow credited by this sign-in, falling back to `flow` when the API
    /// omits `signflow`
    pub fn signed_flow(&self) -> Result<f64, ApiError> {
        match flow_value(&self.signflow, "signflow")? {
            Some(flow) => Ok(flow),
            None => self.total_flow(),
        }
    }

    /// Server message; empty when absent, other JSON rendered as text
    pub fn message(&self) -> String {
        match &self.message {
            Value::Null => String::new(),
            Value::String(m) => m.clone(),
            other => other.to_string(),
        }
    }
}

/// Flows arrive either as JSON numbers or numeric strings
fn flow_value(value: &Value, field: &'static str) -> Result<Option<f64>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or(ApiError::InvalidField(field)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ApiError::InvalidField(field)),
        _ => Err(ApiError::InvalidField(field)),
    }
}

impl ApiClient {
    /// Step one: exchange credentials for a CSRF token
    pub async fn login(&self, user: &str, passwd: &str) -> Result<LoginResponse, RequestError> {
        self.call_api(
            USER_ROUTE,
            Some(&UserRequest::Login { user, passwd }),
            Method::POST,
        )
        .await
    }

    /// Step two: claim today's flow with the token from [`ApiClient::login`]
    pub async fn sign(&self, csrf: &str) -> Result<SignResponse, RequestError> {
        self.call_api(USER_ROUTE, Some(&UserRequest::Sign { csrf }), Method::POST)
            .await
    }
}

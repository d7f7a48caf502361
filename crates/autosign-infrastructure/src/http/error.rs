use thiserror::Error;

/// Failures of the external API contract (as opposed to the transport)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HayFrp API responded with HTTP {status}")]
    Status { status: u16 },

    #[error("HayFrp API returned malformed JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("HayFrp API response is missing field '{0}'")]
    MissingField(&'static str),

    #[error("HayFrp API response field '{0}' has an unexpected type")]
    InvalidField(&'static str),

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),
}

/// Everything that can go wrong while issuing a request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rate limited by upstream{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("request failed after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: reqwest::Error,
    },

    #[error("max retries reached")]
    MaxRetriesReached,
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(" (retry after {}s)", secs),
        None => String::new(),
    }
}

impl RequestError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Api(ApiError::Status { status }) => Some(*status),
            RequestError::RateLimited { .. } => Some(429),
            RequestError::Transport(e) | RequestError::RetriesExhausted { last: e, .. } => {
                e.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }
}

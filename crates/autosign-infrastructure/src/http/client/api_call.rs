use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{parse_retry_after, DEFAULT_API_BASE};
use super::HttpClient;
use crate::http::{ApiError, RequestError};

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Client for the HayFrp JSON API
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// `base_url` falls back to [`DEFAULT_API_BASE`] when absent or blank
    pub fn new(http: HttpClient, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string();

        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call an API route and decode the JSON answer
    ///
    /// Any non-2xx status is an error, not a value to classify: the HayFrp
    /// API reports its own status inside the JSON body.
    pub async fn call_api<P, T>(
        &self,
        route: &str,
        payload: Option<&P>,
        method: Method,
    ) -> Result<T, RequestError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = join_url(&self.base_url, route)?;
        log::debug!("Calling HayFrp API: {} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(header::CACHE_CONTROL, "no-cache")
            .header("waf", "off");

        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
            request = request.body(body);
        }

        let response = self.http.execute(request.build()?).await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(
                response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );
            return Err(RequestError::RateLimited { retry_after });
        }

        if !status.is_success() {
            log::warn!("HayFrp API responded with {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e).into())
    }
}

/// Join base and route with exactly one `/` between them
pub(super) fn join_url(base: &str, route: &str) -> Result<Url, ApiError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        route.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", joined, e)))
}

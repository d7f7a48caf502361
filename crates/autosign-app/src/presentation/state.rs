use std::sync::Arc;

use crate::application::services::SignJob;

/// Shared state of the HTTP trigger
pub struct AppState {
    pub job: Arc<SignJob>,
    /// `None` disables on-demand runs; every request is redirected
    pub access_key: Option<String>,
    pub homepage: String,
}

impl AppState {
    pub fn new(job: Arc<SignJob>, access_key: Option<String>, homepage: String) -> Self {
        Self {
            job,
            access_key,
            homepage,
        }
    }

    /// Whether `path` is the secret trigger path `/{access_key}`
    pub fn is_trigger_path(&self, path: &str) -> bool {
        match &self.access_key {
            Some(key) => path.strip_prefix('/') == Some(key.as_str()),
            None => false,
        }
    }
}

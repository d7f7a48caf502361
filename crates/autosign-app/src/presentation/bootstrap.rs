use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use autosign_infrastructure::config::Settings;
use autosign_infrastructure::http::{ApiClient, HttpClient};
use autosign_infrastructure::notification::create_sender;

use crate::application::services::{SignInExecutor, SignJob, SignRunner};
use crate::presentation::state::AppState;

/// Wire the sign job from settings
pub fn build_sign_job(settings: &Settings) -> Result<SignJob> {
    let accounts = settings.accounts().context("Failed to read accounts")?;
    if accounts.is_empty() {
        warn!("No accounts configured; runs will only log Finished!");
    }

    let http = HttpClient::new()?;
    let api = ApiClient::new(http.clone(), settings.api_url());
    let notifier = create_sender(settings.webhook_url(), http);

    info!(
        accounts = accounts.len(),
        api = api.base_url(),
        webhook = notifier.is_enabled(),
        "Sign job ready"
    );

    let runner = SignRunner::new(Arc::new(SignInExecutor::new(api)), notifier);
    Ok(SignJob::new(runner, accounts))
}

pub fn build_app_state(settings: &Settings, job: Arc<SignJob>) -> AppState {
    let access_key = settings.access_key().map(str::to_string);
    if access_key.is_none() {
        warn!("No access key configured; HTTP trigger is disabled");
    }

    AppState::new(job, access_key, settings.homepage.clone())
}

use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use autosign_domain::Account;

const ENV_PREFIX: &str = "HAYFRP";
const DEFAULT_CONFIG_FILE: &str = "config.toml";
const WEBHOOK_DISABLED: &str = "disabled";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid account list: {0}")]
    Users(#[source] serde_json::Error),
}

/// Account list as written in configuration: either a JSON-encoded string
/// (the usual form for an environment variable) or a native list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UsersSource {
    Json(String),
    List(Vec<Account>),
}

/// Process-wide settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    webhook_url: Option<String>,
    #[serde(default)]
    users: Option<UsersSource>,
    #[serde(default)]
    access_key: Option<String>,
    /// Six-field cron expression of the scheduled run
    pub schedule: String,
    /// Socket address of the on-demand HTTP trigger
    pub listen: String,
    /// Where unauthorised HTTP requests are redirected
    pub homepage: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Configured API base, if any
    pub fn api_url(&self) -> Option<&str> {
        non_empty(self.api_url.as_deref())
    }

    /// Webhook target; `None` when unset, empty or `disabled`
    pub fn webhook_url(&self) -> Option<&str> {
        non_empty(self.webhook_url.as_deref()).filter(|url| *url != WEBHOOK_DISABLED)
    }

    /// Access key gating the on-demand trigger; `None` disables it
    pub fn access_key(&self) -> Option<&str> {
        non_empty(self.access_key.as_deref())
    }

    /// Accounts in configuration order
    pub fn accounts(&self) -> Result<Vec<Account>, ConfigError> {
        match &self.users {
            None => Ok(Vec::new()),
            Some(UsersSource::List(list)) => Ok(list.clone()),
            Some(UsersSource::Json(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(UsersSource::Json(raw)) => serde_json::from_str(raw).map_err(ConfigError::Users),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Load settings from defaults, an optional TOML file and `HAYFRP_*`
/// environment variables, in increasing priority.
///
/// An explicit `path` must exist; the default `config.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    build_settings(path, None)
}

pub(crate) fn build_settings(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => File::from(p.to_path_buf()).required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };

    let settings = Config::builder()
        .set_default("schedule", "0 0 0 * * *")?
        .set_default("listen", "0.0.0.0:8787")?
        .set_default("homepage", "https://www.hayfrp.com")?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = build_settings(None, env(&[])).unwrap();

        assert_eq!(settings.schedule, "0 0 0 * * *");
        assert_eq!(settings.listen, "0.0.0.0:8787");
        assert_eq!(settings.api_url(), None);
        assert_eq!(settings.webhook_url(), None);
        assert_eq!(settings.access_key(), None);
        assert!(settings.accounts().unwrap().is_empty());
    }

    #[test]
    fn test_environment_values() {
        let settings = build_settings(
            None,
            env(&[
                ("HAYFRP_API_URL", "http://localhost:9000"),
                ("HAYFRP_WEBHOOK_URL", "https://discord.test/hook"),
                ("HAYFRP_ACCESS_KEY", "s3cret"),
                (
                    "HAYFRP_USERS",
                    r#"[{"username":"alice","password":"pw1"},{"username":"bob","password":"pw2"}]"#,
                ),
            ]),
        )
        .unwrap();

        assert_eq!(settings.api_url(), Some("http://localhost:9000"));
        assert_eq!(settings.webhook_url(), Some("https://discord.test/hook"));
        assert_eq!(settings.access_key(), Some("s3cret"));

        let accounts = settings.accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username(), "alice");
        assert_eq!(accounts[1].password(), "pw2");
    }

    #[test]
    fn test_disabled_webhook() {
        let settings =
            build_settings(None, env(&[("HAYFRP_WEBHOOK_URL", "disabled")])).unwrap();
        assert_eq!(settings.webhook_url(), None);

        let settings = build_settings(None, env(&[("HAYFRP_WEBHOOK_URL", "")])).unwrap();
        assert_eq!(settings.webhook_url(), None);
    }

    #[test]
    fn test_invalid_users_json() {
        let settings = build_settings(None, env(&[("HAYFRP_USERS", "[{oops")])).unwrap();
        assert!(matches!(settings.accounts(), Err(ConfigError::Users(_))));
    }

    #[test]
    fn test_file_with_native_user_list_and_env_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
schedule = "0 30 8 * * *"
access_key = "from-file"

[[users]]
username = "carol"
password = "pw"
"#
        )
        .unwrap();

        let settings = build_settings(
            Some(file.path()),
            env(&[("HAYFRP_ACCESS_KEY", "from-env")]),
        )
        .unwrap();

        assert_eq!(settings.schedule, "0 30 8 * * *");
        assert_eq!(settings.access_key(), Some("from-env"));
        let accounts = settings.accounts().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username(), "carol");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = build_settings(Some(Path::new("/nonexistent/autosign.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}

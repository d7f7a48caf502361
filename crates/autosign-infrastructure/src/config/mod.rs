mod settings;
mod timeouts;

pub use settings::{load_settings, ConfigError, Settings, UsersSource};
pub use timeouts::TimeoutConfig;

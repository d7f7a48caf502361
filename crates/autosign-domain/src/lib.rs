// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod account;
pub mod check_in;
pub mod notification;
pub mod run_log;
pub mod shared;

// Re-exports for convenience
pub use account::Account;
pub use check_in::{SignInService, SignOutcome};
pub use run_log::{LogLevel, RunLog};
pub use shared::DomainError;

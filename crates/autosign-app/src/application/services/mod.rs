mod scheduler;
mod sign_in_executor;
mod sign_run;

pub use scheduler::SignScheduler;
pub use sign_in_executor::SignInExecutor;
pub use sign_run::{SignJob, SignRunner};

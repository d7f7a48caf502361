mod service;
mod value_objects;


pub use service::SignInService;
pub use value_objects::{RunSummary, SignOutcome};

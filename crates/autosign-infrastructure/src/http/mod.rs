mod client;
mod error;

pub use client::{
    ApiClient, HttpClient, LoginResponse, RetryConfig, RetryDelay, SignResponse, TokioDelay,
    DEFAULT_API_BASE,
};
pub use error::{ApiError, RequestError};

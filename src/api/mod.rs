//! REST gateway: HTTP client and auth endpoints

pub mod auth;
pub mod client;

pub use auth::{Session, User};
pub use client::{ApiClient, DEFAULT_TIMEOUT};

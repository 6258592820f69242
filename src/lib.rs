//! Launchpad admission service library
//!
//! Decides whether submitted token-launch requests are accepted: validates
//! untrusted payloads, enforces a per-client rate limit and a global hourly
//! quota, and keeps an in-memory registry of accepted launches.

pub mod admission;
pub mod api;
pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use admission::AdmissionService;
pub use config::LaunchpadConfig;
pub use models::{LaunchRecord, LaunchRequest};

//! Launch admission pipeline
//!
//! Validation, per-client rate limiting, the global hourly quota, the
//! registry of accepted launches, and the service that orchestrates them.

pub mod fee;
pub mod quota;
pub mod rate_limit;
pub mod registry;
pub mod service;
pub mod validator;

pub use fee::{FeeVerifier, NoopFeeVerifier};
pub use quota::GlobalQuota;
pub use rate_limit::RateLimiter;
pub use registry::LaunchRegistry;
pub use service::{Accepted, AdmissionService, AdmissionStatus};

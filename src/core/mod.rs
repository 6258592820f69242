//! Core abstractions shared across the service

pub mod clock;
pub mod error;

pub use clock::{Clock, SystemClock};
pub use error::Rejection;

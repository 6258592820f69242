//! Data models for launch requests and accepted launches

pub mod launch;

pub use launch::{LaunchRecord, LaunchRequest};

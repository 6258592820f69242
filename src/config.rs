//! Configuration management for the launchpad admission service

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    pub api: ApiConfig,
    pub admission: AdmissionConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    pub bind_address: String,
    pub enable_cors: bool,
}

/// Admission policy knobs. Defaults carry the launchpad's production
/// constants; every one of them can be overridden from the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdmissionConfig {
    #[validate(range(min = 1, max = 500))]
    pub max_name_length: usize,
    #[validate(range(min = 1, max = 50))]
    pub max_ticker_length: usize,
    #[validate(range(min = 1, max = 5000))]
    pub max_description_length: usize,
    #[validate(range(min = 1, max = 2000))]
    pub max_website_length: usize,

    /// Per-client window length, anchored at the client's first request.
    #[validate(range(min = 1, max = 86400))]
    pub rate_limit_window_secs: u64,
    #[validate(range(min = 1, max = 1000))]
    pub max_requests_per_client_window: u32,

    /// Global cap on accepted launches within one quota window.
    #[validate(range(min = 1, max = 1000))]
    pub max_launches_per_hour: u32,
    /// Quota window length when the rolling reset policy is active.
    #[validate(range(min = 1, max = 86400))]
    pub quota_window_secs: u64,
    pub quota_reset_policy: QuotaResetPolicy,

    /// Expected base58 length of the fee-transfer transaction signature.
    #[validate(range(min = 1, max = 256))]
    pub fee_signature_length: usize,
    /// Flat launch fee, surfaced to clients for display only.
    pub launch_fee_sol: f64,
}

/// How the global quota window resets.
///
/// The clock-hour policy resets whenever the wall clock crosses an hour
/// boundary; the rolling policy resets a fixed duration after the window
/// opened. These are distinct algorithms and are kept separately testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaResetPolicy {
    ClockHour,
    Rolling,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub structured_logging: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            enable_cors: true,
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_name_length: 50,
            max_ticker_length: 10,
            max_description_length: 500,
            max_website_length: 200,
            rate_limit_window_secs: 3600,
            max_requests_per_client_window: 5,
            max_launches_per_hour: 10,
            quota_window_secs: 3600,
            quota_reset_policy: QuotaResetPolicy::ClockHour,
            fee_signature_length: 88,
            launch_fee_sol: 0.1,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl LaunchpadConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: Self = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.bind_address.is_empty() {
            return Err(anyhow::anyhow!("bind address cannot be empty"));
        }
        Validate::validate(&self.api).context("api config invalid")?;
        Validate::validate(&self.admission).context("admission config invalid")?;
        Validate::validate(&self.monitoring).context("monitoring config invalid")?;
        Ok(())
    }
}

//! Admission orchestration
//!
//! One instance owns all admission state (limiter, quota, registry) and is
//! constructed once at process start; request handlers share it through an
//! `Arc`. Each submission runs the check sequence to completion with no
//! suspension points: validate, rate-limit, fee-verify, quota, then
//! normalize and register.

use crate::admission::fee::{FeeVerifier, NoopFeeVerifier};
use crate::admission::quota::GlobalQuota;
use crate::admission::rate_limit::RateLimiter;
use crate::admission::registry::LaunchRegistry;
use crate::admission::validator;
use crate::config::AdmissionConfig;
use crate::core::clock::Clock;
use crate::core::error::Rejection;
use crate::models::launch::INITIAL_PRICE;
use crate::models::{LaunchRecord, LaunchRequest};
use chrono::{Duration, SecondsFormat};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of an accepted submission.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub record: LaunchRecord,
    pub launches_remaining: u32,
}

/// Snapshot of the global quota window.
#[derive(Debug, Clone)]
pub struct AdmissionStatus {
    pub launch_count: u32,
    pub max_launches: u32,
    pub launches_remaining: u32,
    pub time_until_reset: Duration,
}

pub struct AdmissionService {
    config: AdmissionConfig,
    rate_limiter: RateLimiter,
    quota: GlobalQuota,
    registry: LaunchRegistry,
    fee_verifier: Box<dyn FeeVerifier>,
    clock: Arc<dyn Clock>,
}

impl AdmissionService {
    pub fn new(config: AdmissionConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_fee_verifier(config, clock, Box::new(NoopFeeVerifier))
    }

    pub fn with_fee_verifier(
        config: AdmissionConfig,
        clock: Arc<dyn Clock>,
        fee_verifier: Box<dyn FeeVerifier>,
    ) -> Self {
        let rate_limiter = RateLimiter::new(
            config.max_requests_per_client_window,
            Duration::seconds(config.rate_limit_window_secs as i64),
            clock.clone(),
        );
        let quota = GlobalQuota::new(
            config.max_launches_per_hour,
            Duration::seconds(config.quota_window_secs as i64),
            config.quota_reset_policy,
            clock.clone(),
        );
        Self {
            config,
            rate_limiter,
            quota,
            registry: LaunchRegistry::new(),
            fee_verifier,
            clock,
        }
    }

    /// Run the full admission sequence for one submission.
    ///
    /// Checks run strictly in order and short-circuit on the first failure,
    /// so a request destined to fail early never touches later state. A
    /// rate-limit slot consumed before a later quota rejection is not
    /// rolled back.
    pub fn submit(&self, client_id: &str, request: &LaunchRequest) -> Result<Accepted, Rejection> {
        let errors = validator::validate(request, &self.config);
        if !errors.is_empty() {
            debug!(client_id, ?errors, "launch request failed validation");
            return Err(Rejection::Validation(errors));
        }

        // Validation guarantees the required fields are present.
        let (Some(name), Some(ticker), Some(wallet), Some(signature)) = (
            request.name.as_deref(),
            request.ticker.as_deref(),
            request.wallet_address.as_deref(),
            request.fee_transaction_signature.as_deref(),
        ) else {
            return Err(Rejection::Internal(
                "validated request is missing required fields".to_string(),
            ));
        };

        if !self.rate_limiter.allow(client_id) {
            warn!(client_id, "launch request rate limited");
            return Err(Rejection::RateLimited);
        }

        self.fee_verifier
            .verify(signature.trim(), wallet.trim())
            .map_err(|reason| Rejection::Validation(vec![format!("fee payment rejected: {reason}")]))?;

        if !self.quota.check_and_reserve() {
            warn!(client_id, "global launch quota exhausted");
            return Err(Rejection::QuotaExceeded {
                time_until_reset: self.quota.time_until_reset(),
            });
        }

        let record = self.build_record(client_id, request, name, ticker, wallet, signature);
        self.registry.record(record.clone());

        let launches_remaining = self.quota.remaining();
        info!(
            ticker = %record.ticker,
            mint = %record.mint_address,
            launches_remaining,
            "launch accepted"
        );

        Ok(Accepted {
            record,
            launches_remaining,
        })
    }

    /// Current quota window state, without consuming a slot.
    pub fn status(&self) -> AdmissionStatus {
        AdmissionStatus {
            launch_count: self.quota.used(),
            max_launches: self.quota.max(),
            launches_remaining: self.quota.remaining(),
            time_until_reset: self.quota.time_until_reset(),
        }
    }

    /// All accepted launches, most recent first.
    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.registry.list()
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    fn build_record(
        &self,
        client_id: &str,
        request: &LaunchRequest,
        name: &str,
        ticker: &str,
        wallet: &str,
        signature: &str,
    ) -> LaunchRecord {
        let mint_address = request
            .token_mint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            // No mint supplied: reserve a fresh address. Actual minting is
            // the external SDK's job.
            .unwrap_or_else(|| Keypair::new().pubkey().to_string());

        LaunchRecord {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            ticker: ticker.trim().to_ascii_uppercase(),
            description: trimmed_or_empty(request.description.as_deref()),
            website: trimmed_or_empty(request.website.as_deref()),
            x: trimmed_or_empty(request.x.as_deref()),
            telegram: trimmed_or_empty(request.telegram.as_deref()),
            mint_address,
            wallet_address: wallet.trim().to_string(),
            launch_time: self
                .clock
                .now()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            initial_price: INITIAL_PRICE,
            current_price: INITIAL_PRICE,
            volume_24h: 0.0,
            fee_transaction_signature: signature.trim().to_string(),
            submitted_by: client_id.to_string(),
        }
    }
}

fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

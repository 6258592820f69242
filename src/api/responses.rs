//! API response types and rejection mapping

use crate::admission::{Accepted, AdmissionStatus};
use crate::core::error::Rejection;
use crate::models::LaunchRecord;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Response for an accepted launch
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAcceptedResponse {
    pub success: bool,
    pub token: LaunchRecord,
    pub launches_remaining: u32,
}

impl From<Accepted> for LaunchAcceptedResponse {
    fn from(accepted: Accepted) -> Self {
        Self {
            success: true,
            token: accepted.record,
            launches_remaining: accepted.launches_remaining,
        }
    }
}

/// Response for the admission status query
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionStatusResponse {
    pub launch_count: u32,
    pub max_launches: u32,
    pub launches_remaining: u32,
    /// Milliseconds until the quota window resets.
    pub time_until_reset: i64,
    pub launch_fee_sol: f64,
}

impl AdmissionStatusResponse {
    pub fn new(status: AdmissionStatus, launch_fee_sol: f64) -> Self {
        Self {
            launch_count: status.launch_count,
            max_launches: status.max_launches,
            launches_remaining: status.launches_remaining,
            time_until_reset: status.time_until_reset.num_milliseconds().max(0),
            launch_fee_sol,
        }
    }
}

/// Response for the launch listing
#[derive(Debug, Serialize, Deserialize)]
pub struct TokensResponse {
    pub success: bool,
    pub tokens: Vec<LaunchRecord>,
}

/// Response for a mint-address reservation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub success: bool,
    pub token: PendingToken,
    pub message: String,
}

/// A token whose mint address is reserved but not yet created on chain.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingToken {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub initial_supply: u64,
    pub decimals: u8,
    pub wallet_address: String,
    pub status: String,
}

/// Error body carried by every rejection response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Milliseconds until the quota resets; only set for QUOTA_EXCEEDED.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_until_reset: Option<i64>,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let kind = self.kind().to_string();
        let (status, body) = match self {
            Rejection::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid launch request".to_string(),
                    kind,
                    details: Some(details),
                    time_until_reset: None,
                },
            ),
            Rejection::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "Too many requests from this client".to_string(),
                    kind,
                    details: None,
                    time_until_reset: None,
                },
            ),
            Rejection::QuotaExceeded { time_until_reset } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "Maximum launches per hour reached".to_string(),
                    kind,
                    details: None,
                    time_until_reset: Some(time_until_reset.num_milliseconds().max(0)),
                },
            ),
            Rejection::Internal(reason) => {
                tracing::error!("internal admission failure: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Failed to launch token".to_string(),
                        kind,
                        details: None,
                        time_until_reset: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

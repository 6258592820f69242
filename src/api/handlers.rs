//! API request handlers

use super::{responses::*, ApiState};
use crate::core::error::Rejection;
use crate::models::LaunchRequest;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::net::SocketAddr;
use std::str::FromStr;

/// Submit a launch request
pub async fn submit_launch(
    State(state): State<ApiState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<LaunchRequest>, JsonRejection>,
) -> Result<Json<LaunchAcceptedResponse>, Rejection> {
    let Json(request) =
        payload.map_err(|e| Rejection::Validation(vec![format!("malformed request body: {e}")]))?;

    let client_id = client_id(&headers, peer);
    let accepted = state.admission.submit(&client_id, &request)?;
    Ok(Json(accepted.into()))
}

/// Get the current admission window status
pub async fn admission_status(State(state): State<ApiState>) -> Json<AdmissionStatusResponse> {
    let status = state.admission.status();
    let fee = state.admission.config().launch_fee_sol;
    Json(AdmissionStatusResponse::new(status, fee))
}

/// List accepted launches, most recent first
pub async fn list_tokens(State(state): State<ApiState>) -> Json<TokensResponse> {
    Json(TokensResponse {
        success: true,
        tokens: state.admission.launches(),
    })
}

/// Mint-address reservation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub name: Option<String>,
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub wallet_address: Option<String>,
}

fn default_initial_supply() -> u64 {
    1_000_000
}

fn default_decimals() -> u8 {
    9
}

/// Reserve a mint address for a token to be created by the wallet-signing
/// front end. Does not touch the quota or the registry.
pub async fn create_token(
    State(_state): State<ApiState>,
    payload: Result<Json<CreateTokenRequest>, JsonRejection>,
) -> Result<Json<CreateTokenResponse>, Rejection> {
    let Json(request) =
        payload.map_err(|e| Rejection::Validation(vec![format!("malformed request body: {e}")]))?;

    let mut errors = Vec::new();
    let name = required(request.name.as_deref(), "name", &mut errors);
    let symbol = required(request.symbol.as_deref(), "symbol", &mut errors);
    let wallet = required(request.wallet_address.as_deref(), "walletAddress", &mut errors);
    if let Some(wallet) = wallet {
        if Pubkey::from_str(wallet).is_err() {
            errors.push("walletAddress is not a valid Solana public key".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(Rejection::Validation(errors));
    }

    // Checked above; unreachable unless the checks change.
    let (Some(name), Some(symbol), Some(wallet)) = (name, symbol, wallet) else {
        return Err(Rejection::Internal("create-token fields missing".to_string()));
    };

    use solana_sdk::{signature::Keypair, signer::Signer};
    let mint = Keypair::new();

    Ok(Json(CreateTokenResponse {
        success: true,
        token: PendingToken {
            mint: mint.pubkey().to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            description: request
                .description
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            initial_supply: request.initial_supply,
            decimals: request.decimals,
            wallet_address: wallet.to_string(),
            status: "pending_creation".to_string(),
        },
        message: "Token creation requires the user's signature; complete it in the front end."
            .to_string(),
    }))
}

/// Rate-limit key for a request: first forwarded hop when behind a proxy,
/// otherwise the peer address.
fn client_id(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| peer.ip().to_string())
}

fn required<'a>(
    value: Option<&'a str>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(v) => Some(v),
        None => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

//! Launch request and record models

use serde::{Deserialize, Serialize};

/// Price assigned to every newly accepted launch.
pub const INITIAL_PRICE: f64 = 0.001;

/// Untrusted launch submission as it arrives off the wire.
///
/// Every field is optional at this stage; required-field enforcement is the
/// validator's job so that all problems can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub x: Option<String>,
    pub telegram: Option<String>,
    pub wallet_address: Option<String>,
    pub fee_transaction_signature: Option<String>,
    pub token_mint: Option<String>,
}

/// An accepted launch, post-validation and normalization.
///
/// Records are immutable once stored: the registry only ever prepends and
/// lists, never updates or removes. Wire names are camelCase to match the
/// front-end contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRecord {
    pub id: String,
    pub name: String,
    /// Normalized to upper-case A-Z0-9.
    pub ticker: String,
    pub description: String,
    pub website: String,
    pub x: String,
    pub telegram: String,
    pub mint_address: String,
    pub wallet_address: String,
    /// ISO-8601 timestamp of acceptance.
    pub launch_time: String,
    pub initial_price: f64,
    pub current_price: f64,
    pub volume_24h: f64,
    pub fee_transaction_signature: String,
    /// Opaque client identifier the request was rate-limited under.
    pub submitted_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_camel_case_fields() {
        let request: LaunchRequest = serde_json::from_str(
            r#"{
                "name": "Test Coin",
                "ticker": "TST",
                "walletAddress": "11111111111111111111111111111111",
                "feeTransactionSignature": "sig",
                "tokenMint": "mint"
            }"#,
        )
        .unwrap();
        assert_eq!(request.name.as_deref(), Some("Test Coin"));
        assert_eq!(
            request.wallet_address.as_deref(),
            Some("11111111111111111111111111111111")
        );
        assert_eq!(request.token_mint.as_deref(), Some("mint"));
        assert!(request.website.is_none());
    }

    #[test]
    fn record_serializes_volume_without_underscore() {
        let record = LaunchRecord {
            id: "1".into(),
            name: "Test Coin".into(),
            ticker: "TST".into(),
            description: String::new(),
            website: String::new(),
            x: String::new(),
            telegram: String::new(),
            mint_address: "mint".into(),
            wallet_address: "wallet".into(),
            launch_time: "2024-01-15T14:30:00.000Z".into(),
            initial_price: INITIAL_PRICE,
            current_price: INITIAL_PRICE,
            volume_24h: 0.0,
            fee_transaction_signature: "sig".into(),
            submitted_by: "127.0.0.1".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("volume24h").is_some());
        assert!(json.get("mintAddress").is_some());
        assert!(json.get("launchTime").is_some());
    }
}

//! Shape and format validation for launch submissions
//!
//! Pure functions over the raw payload. Every check runs and every failure
//! is reported, so a client sees the full set of problems in one response.

use crate::config::AdmissionConfig;
use crate::models::LaunchRequest;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Validate a raw launch request against the admission limits.
///
/// Returns human-readable problem descriptions; an empty list means the
/// payload is acceptable. Never panics and never mutates anything.
pub fn validate(request: &LaunchRequest, limits: &AdmissionConfig) -> Vec<String> {
    let mut errors = Vec::new();

    check_name(request.name.as_deref(), limits, &mut errors);
    check_ticker(request.ticker.as_deref(), limits, &mut errors);

    if let Some(description) = non_empty(request.description.as_deref()) {
        if description.chars().count() > limits.max_description_length {
            errors.push(format!(
                "description must be at most {} characters",
                limits.max_description_length
            ));
        }
    }

    for (field, value) in [
        ("website", request.website.as_deref()),
        ("x", request.x.as_deref()),
        ("telegram", request.telegram.as_deref()),
    ] {
        if let Some(url) = non_empty(value) {
            check_url(field, url, limits, &mut errors);
        }
    }

    check_wallet(request.wallet_address.as_deref(), &mut errors);
    check_fee_signature(
        request.fee_transaction_signature.as_deref(),
        limits,
        &mut errors,
    );

    errors
}

fn check_name(name: Option<&str>, limits: &AdmissionConfig, errors: &mut Vec<String>) {
    let Some(name) = non_empty(name) else {
        errors.push("name is required".to_string());
        return;
    };
    if name.chars().count() > limits.max_name_length {
        errors.push(format!(
            "name must be at most {} characters",
            limits.max_name_length
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-')
    {
        errors.push(
            "name may only contain letters, digits, spaces, underscores and hyphens".to_string(),
        );
    }
}

fn check_ticker(ticker: Option<&str>, limits: &AdmissionConfig, errors: &mut Vec<String>) {
    let Some(ticker) = non_empty(ticker) else {
        errors.push("ticker is required".to_string());
        return;
    };
    // Lower-case input is tolerated here; normalization upper-cases the
    // stored ticker so the A-Z0-9 invariant holds for every record.
    if ticker.chars().count() > limits.max_ticker_length
        || !ticker.chars().all(|c| c.is_ascii_alphanumeric())
    {
        errors.push(format!(
            "ticker format is invalid: expected 1-{} characters of A-Z or 0-9",
            limits.max_ticker_length
        ));
    }
}

fn check_url(field: &str, url: &str, limits: &AdmissionConfig, errors: &mut Vec<String>) {
    if url.chars().count() > limits.max_website_length {
        errors.push(format!(
            "{field} must be at most {} characters",
            limits.max_website_length
        ));
    }
    if !validator::validate_url(url) {
        errors.push(format!("{field} must be a well-formed URL"));
    }
}

fn check_wallet(wallet: Option<&str>, errors: &mut Vec<String>) {
    let Some(wallet) = non_empty(wallet) else {
        errors.push("walletAddress is required".to_string());
        return;
    };
    // Must decode as a 32-byte base58 public key; never coerced.
    if Pubkey::from_str(wallet).is_err() {
        errors.push("walletAddress is not a valid Solana public key".to_string());
    }
}

fn check_fee_signature(signature: Option<&str>, limits: &AdmissionConfig, errors: &mut Vec<String>) {
    let Some(signature) = non_empty(signature) else {
        errors.push("feeTransactionSignature is required".to_string());
        return;
    };
    // Format check only: fixed length over the base58 alphabet. Ledger
    // confirmation of the fee transfer belongs to an external verifier.
    if signature.chars().count() != limits.fee_signature_length
        || bs58::decode(signature).into_vec().is_err()
    {
        errors.push(format!(
            "feeTransactionSignature format is invalid: expected a {}-character base58 signature",
            limits.fee_signature_length
        ));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

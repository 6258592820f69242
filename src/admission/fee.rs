//! Fee payment verification seam
//!
//! The admission pipeline runs this check between the rate limit and the
//! quota reservation, so a ledger-backed verifier (query the chain for the
//! signature, confirm amount, recipient and finality) can replace the
//! default without restructuring the pipeline.

/// Verifies that the claimed fee-transfer signature corresponds to an
/// actual payment. A rejection message is client-visible.
pub trait FeeVerifier: Send + Sync {
    fn verify(&self, signature: &str, wallet_address: &str) -> Result<(), String>;
}

/// Default verifier: accepts everything.
///
/// Signature *format* is already enforced by the validator; confirming the
/// transfer against a live ledger is an external collaborator this service
/// deliberately does not ship.
#[derive(Debug, Default)]
pub struct NoopFeeVerifier;

impl FeeVerifier for NoopFeeVerifier {
    fn verify(&self, _signature: &str, _wallet_address: &str) -> Result<(), String> {
        Ok(())
    }
}

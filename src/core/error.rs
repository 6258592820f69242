//! Rejection taxonomy for the admission pipeline

use chrono::Duration;
use thiserror::Error;

/// Why a launch request was refused.
///
/// Every component in the pipeline reports its negative outcome as data;
/// the admission service is the only place that maps those outcomes into
/// one of these variants, and nothing in the pipeline panics or throws
/// across a component boundary.
#[derive(Debug, Error)]
pub enum Rejection {
    /// The payload failed one or more shape/format checks. Carries the
    /// full set of problems found, not just the first.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The submitting client exhausted its per-client window.
    #[error("rate limit exceeded, try again later")]
    RateLimited,

    /// The global hourly launch quota is exhausted.
    #[error("maximum launches per hour reached, resets in {}ms", .time_until_reset.num_milliseconds())]
    QuotaExceeded { time_until_reset: Duration },

    /// A defect inside the service, not a client input problem.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Rejection {
    /// Stable machine-readable kind, surfaced on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::Validation(_) => "VALIDATION",
            Rejection::RateLimited => "RATE_LIMIT",
            Rejection::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Rejection::Internal(_) => "INTERNAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(Rejection::Validation(vec![]).kind(), "VALIDATION");
        assert_eq!(Rejection::RateLimited.kind(), "RATE_LIMIT");
        assert_eq!(
            Rejection::QuotaExceeded {
                time_until_reset: Duration::minutes(10)
            }
            .kind(),
            "QUOTA_EXCEEDED"
        );
        assert_eq!(Rejection::Internal("boom".into()).kind(), "INTERNAL");
    }

    #[test]
    fn validation_message_lists_every_problem() {
        let rejection =
            Rejection::Validation(vec!["name is required".into(), "ticker is required".into()]);
        let message = rejection.to_string();
        assert!(message.contains("name is required"));
        assert!(message.contains("ticker is required"));
    }
}

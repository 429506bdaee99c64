//! Error types for the SMS provider layer.

/// Errors surfaced by SMS providers.
///
/// Neither variant is retried by a provider itself; retry policy, if any,
/// belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// Missing or unusable setup: no gateway definition, required options
    /// absent, or no protocol client available at construction.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A failure while talking to the gateway. The provider guarantees the
    /// session was torn down before this is reported.
    #[error("SMS could not be sent: {0}")]
    Delivery(String),
}

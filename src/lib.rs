//! # SNPP SMS provider
//!
//! SMS/OTP delivery through legacy SNPP (RFC 1861) paging gateways.
//!
//! The crate is a small provider framework slice:
//! - **Provider trait**: common interface for SMS providers
//! - **SNPP provider**: sequences the protocol calls against a gateway
//! - **Mock provider**: console output for development and tests
//! - **Gateway config**: flat option map with environment loading
//! - **Security**: phone numbers are masked in all log output
//!
//! Each submission is one linear sequence — validate configuration,
//! render the subject/body templates, open a session, authenticate when
//! credentials are configured, transmit, and always tear the session
//! down — with no retries, pooling, queuing, or shared state. Retry
//! policy belongs to the caller.
//!
//! ## Features
//!
//! - `tcp-client` (default): TCP-backed SNPP session implementation.
//!   Without it, construct [`SnppSmsProvider`] with an injected
//!   [`SnppSessionFactory`].

pub mod config;
pub mod error;
pub mod phone;
pub mod provider;
pub mod snpp;
pub mod template;

pub use config::SmsGatewayConfig;
pub use error::SmsError;
pub use phone::{is_valid_phone_number, mangle_phone, mask_phone_number};
pub use provider::{
    MockSmsProvider, ParameterKind, ParameterSpec, ProviderParameters, SmsProvider,
};
pub use snpp::{SnppError, SnppSession, SnppSessionFactory, SnppSmsProvider};

/// Create an SMS provider by registry name.
///
/// Returns the implementation matching `provider` wired with the given
/// gateway definition. Unknown names and providers that fail to
/// initialize fall back to the mock implementation.
pub fn create_sms_provider(
    provider: &str,
    gateway: SmsGatewayConfig,
) -> Box<dyn SmsProvider> {
    match provider {
        "mock" => Box::new(MockSmsProvider::new()),
        "snpp" => match SnppSmsProvider::new(gateway) {
            Ok(provider) => Box::new(provider),
            Err(err) => {
                tracing::error!("Failed to initialize SNPP SMS provider: {}", err);
                tracing::warn!("Falling back to mock SMS provider");
                Box::new(MockSmsProvider::new())
            }
        },
        other => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                other
            );
            Box::new(MockSmsProvider::new())
        }
    }
}

//! SMS provider contract
//!
//! Defines the trait every SMS provider implements, together with the
//! descriptor schema a provider publishes so the hosting application's
//! configuration UI can render its settings.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SmsError;

pub mod mock;

pub use mock::MockSmsProvider;

/// SMS provider trait for submitting text messages
///
/// Implementations include:
/// - SNPP paging gateway delivery
/// - Mock implementation for development
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Submit a message to a phone number.
    ///
    /// Returns `Ok(true)` when the gateway accepted the submission. Any
    /// failure surfaces as a single [`SmsError`]; presentation is the
    /// caller's responsibility.
    async fn submit_message(&self, phone: &str, message: &str) -> Result<bool, SmsError>;

    /// Provider name for logs and registries (e.g. "SNPP", "Mock").
    fn provider_name(&self) -> &str;

    /// Health check. Default implementation reports available.
    async fn is_available(&self) -> bool {
        true
    }

    /// Static schema of the configuration keys this provider accepts.
    ///
    /// Pure metadata, no side effects; consumed by the hosting
    /// application's configuration UI and provider registry.
    fn parameters() -> ProviderParameters
    where
        Self: Sized;
}

/// Descriptor of a provider's accepted configuration keys and capabilities.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderParameters {
    /// Whether free-form per-message options are accepted.
    pub options_allowed: bool,
    /// Whether free-form per-message headers are accepted.
    pub headers_allowed: bool,
    /// Accepted configuration keys.
    pub parameters: Vec<ParameterSpec>,
}

impl ProviderParameters {
    /// Look up a parameter by key name.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of the required keys, in declaration order.
    pub fn required_keys(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }
}

/// One accepted configuration key.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    /// Key name as it appears in the gateway definition.
    pub name: &'static str,
    /// Whether the key must be present for the provider to operate.
    pub required: bool,
    /// Human-readable description for the configuration UI.
    pub description: &'static str,
    /// Input widget hint.
    #[serde(rename = "type")]
    pub kind: ParameterKind,
}

impl ParameterSpec {
    /// A required single-line parameter.
    pub fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: true,
            description,
            kind: ParameterKind::String,
        }
    }

    /// An optional single-line parameter.
    pub fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            required: false,
            description,
            kind: ParameterKind::String,
        }
    }

    /// Mark the parameter as multi-line text.
    pub fn text(mut self) -> Self {
        self.kind = ParameterKind::Text;
        self
    }
}

/// Input widget hint for a configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Single-line string value.
    String,
    /// Multi-line text value.
    Text,
}

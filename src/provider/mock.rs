//! Mock SMS provider
//!
//! Development and test stand-in that logs messages instead of sending
//! them. Tracks a message counter and can simulate failures.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::SmsError;
use crate::phone::{is_valid_phone_number, mask_phone_number};

use super::{ProviderParameters, SmsProvider};

/// Mock SMS provider for development and testing.
#[derive(Clone)]
pub struct MockSmsProvider {
    /// Counter for messages accepted so far.
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures.
    simulate_failure: bool,
    /// Whether to print messages to the console.
    console_output: bool,
}

impl MockSmsProvider {
    /// Create a mock provider with console output enabled.
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock provider with configurable options.
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of messages accepted.
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter.
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation.
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockSmsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsProvider for MockSmsProvider {
    async fn submit_message(&self, phone: &str, message: &str) -> Result<bool, SmsError> {
        if !is_valid_phone_number(phone) {
            return Err(SmsError::Delivery(format!(
                "invalid phone number format: {}",
                mask_phone_number(phone)
            )));
        }

        if self.simulate_failure {
            warn!(
                phone = %mask_phone_number(phone),
                "mock SMS provider simulating failure"
            );
            return Err(SmsError::Delivery(
                "simulated SMS sending failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS - MESSAGE #{count}");
            println!("To: {phone}");
            println!("Content: {message}");
            println!("{}\n", "=".repeat(60));
        }

        info!(
            provider = "mock",
            phone = %mask_phone_number(phone),
            message_length = message.len(),
            "SMS submitted (mock)"
        );

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(true)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }

    fn parameters() -> ProviderParameters
    where
        Self: Sized,
    {
        // The mock accepts no configuration at all.
        ProviderParameters {
            options_allowed: false,
            headers_allowed: false,
            parameters: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_succeeds_and_counts() {
        let provider = MockSmsProvider::with_options(false, false);
        let sent = provider.submit_message("+1234567890", "Test message").await;

        assert!(sent.unwrap());
        assert_eq!(provider.message_count(), 1);
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let provider = MockSmsProvider::with_options(false, false);
        let result = provider.submit_message("1234567890", "Test message").await;

        match result {
            Err(SmsError::Delivery(msg)) => assert!(msg.contains("Invalid") || msg.contains("invalid")),
            other => panic!("expected delivery error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_simulation() {
        let mut provider = MockSmsProvider::with_options(false, false);
        provider.set_simulate_failure(true);

        let result = provider.submit_message("+1234567890", "Test message").await;
        assert!(result.is_err());
        assert!(!provider.is_available().await);
    }

    #[tokio::test]
    async fn counter_tracks_and_resets() {
        let provider = MockSmsProvider::with_options(false, false);

        for i in 1..=3 {
            let _ = provider.submit_message("+1234567890", &format!("Message {i}")).await;
            assert_eq!(provider.message_count(), i);
        }

        provider.reset_counter();
        assert_eq!(provider.message_count(), 0);
    }

    #[test]
    fn provider_name() {
        assert_eq!(MockSmsProvider::new().provider_name(), "Mock");
    }

    #[test]
    fn accepts_no_parameters() {
        let params = MockSmsProvider::parameters();
        assert!(!params.options_allowed);
        assert!(!params.headers_allowed);
        assert!(params.parameters.is_empty());
    }
}

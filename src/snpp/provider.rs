//! SNPP message sender
//!
//! Converts an OTP/notification message into a page submitted through an
//! SNPP gateway: render the subject and body templates, open a session,
//! optionally authenticate, set pager target, subject and body, send,
//! and always tear the session down before reporting the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{keys, SmsGatewayConfig};
use crate::error::SmsError;
use crate::phone::{mangle_phone, mask_phone_number};
use crate::provider::{ParameterSpec, ProviderParameters, SmsProvider};
use crate::template;

use super::session::{SnppError, SnppSession, SnppSessionFactory};

/// Subject template used when `SUBJECT` is not configured.
pub const DEFAULT_SUBJECT: &str = "{phone}";
/// Body template used when `BODY` is not configured.
pub const DEFAULT_BODY: &str = "{otp}";

/// SMS provider submitting messages through an SNPP paging gateway.
///
/// Stateless per call: each submission owns its session exclusively, so
/// concurrent submissions are independent.
pub struct SnppSmsProvider {
    gateway: Option<SmsGatewayConfig>,
    factory: Arc<dyn SnppSessionFactory>,
}

impl SnppSmsProvider {
    /// Create a provider with the default TCP-backed session factory.
    #[cfg(feature = "tcp-client")]
    pub fn new(gateway: SmsGatewayConfig) -> Result<Self, SmsError> {
        Ok(Self {
            gateway: Some(gateway),
            factory: Arc::new(super::client::TcpSnppSessionFactory),
        })
    }

    /// Without the `tcp-client` feature no default session factory
    /// exists; construction fails and [`Self::with_factory`] must be
    /// used instead.
    #[cfg(not(feature = "tcp-client"))]
    pub fn new(_gateway: SmsGatewayConfig) -> Result<Self, SmsError> {
        Err(SmsError::Configuration(
            "no SNPP session factory available: enable the `tcp-client` feature \
             or construct the provider with an injected factory"
                .to_string(),
        ))
    }

    /// Create a provider with an injected session factory.
    ///
    /// A provider built without a gateway definition fails every
    /// submission until one is attached.
    pub fn with_factory(
        gateway: Option<SmsGatewayConfig>,
        factory: Arc<dyn SnppSessionFactory>,
    ) -> Self {
        Self { gateway, factory }
    }

    /// Attach or replace the gateway definition.
    pub fn attach_gateway(&mut self, gateway: SmsGatewayConfig) {
        self.gateway = Some(gateway);
    }

    async fn transmit(
        session: &mut dyn SnppSession,
        username: Option<&str>,
        password: Option<&str>,
        phone: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), SnppError> {
        if let Some(username) = username {
            debug!(username = %username, "logging in to SNPP gateway");
            session.login(username, password).await?;
        }
        session.pager(phone).await?;
        if !subject.is_empty() {
            session.subject(subject).await?;
        }
        session.message(body).await?;
        session.send().await?;
        Ok(())
    }
}

#[async_trait]
impl SmsProvider for SnppSmsProvider {
    async fn submit_message(&self, phone: &str, message: &str) -> Result<bool, SmsError> {
        let gateway = self.gateway.as_ref().ok_or_else(|| {
            warn!("missing SMS gateway definition");
            SmsError::Configuration("missing SMS gateway definition".to_string())
        })?;

        let phone = mangle_phone(phone, gateway);
        debug!(
            phone = %mask_phone_number(&phone),
            message_length = message.len(),
            "submitting message over SNPP"
        );

        let host = gateway.option(keys::SMSC_HOST).ok_or_else(|| {
            warn!("cannot submit message, SMSC_HOST is missing");
            SmsError::Configuration("no SMSC_HOST specified in the provider config".to_string())
        })?;
        let port = gateway.option(keys::SMSC_PORT).ok_or_else(|| {
            warn!("cannot submit message, SMSC_PORT is missing");
            SmsError::Configuration("no SMSC_PORT specified in the provider config".to_string())
        })?;

        let subject = template::render(
            gateway.option(keys::SUBJECT).unwrap_or(DEFAULT_SUBJECT),
            &phone,
            message,
        );
        let body = template::render(
            gateway.option(keys::BODY).unwrap_or(DEFAULT_BODY),
            &phone,
            message,
        );
        let username = gateway.option(keys::USERNAME);
        let password = gateway.option(keys::PASSWORD);

        let mut session = self
            .factory
            .open(host, port, gateway.timeout())
            .await
            .map_err(|err| {
                warn!(error = %err, host = %host, "failed to connect to SNPP gateway");
                SmsError::Delivery(err.to_string())
            })?;

        let outcome =
            Self::transmit(session.as_mut(), username, password, &phone, &subject, &body).await;

        // Teardown runs on every path; a secondary failure here is logged
        // and never masks the primary outcome.
        if let Err(err) = session.quit().await {
            warn!(error = %err, "SNPP QUIT failed");
        }
        if let Err(err) = session.close().await {
            warn!(error = %err, "failed to close SNPP session");
        }

        match outcome {
            Ok(()) => {
                info!(
                    phone = %mask_phone_number(&phone),
                    "message submitted to SNPP gateway"
                );
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "failed to send message");
                Err(SmsError::Delivery(err.to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SNPP"
    }

    fn parameters() -> ProviderParameters
    where
        Self: Sized,
    {
        ProviderParameters {
            options_allowed: false,
            headers_allowed: false,
            parameters: vec![
                ParameterSpec::required(keys::SMSC_HOST, "network address of the SNPP gateway"),
                ParameterSpec::required(keys::SMSC_PORT, "TCP port of the SNPP gateway"),
                ParameterSpec::optional(keys::USERNAME, "username for authentication on the gateway"),
                ParameterSpec::optional(keys::PASSWORD, "password for authentication on the gateway"),
                ParameterSpec::optional(
                    keys::SUBJECT,
                    "subject template, supports the {phone} and {otp} tags",
                ),
                ParameterSpec::optional(
                    keys::BODY,
                    "body template, supports the {phone} and {otp} tags",
                )
                .text(),
                ParameterSpec::optional(
                    keys::REGEXP,
                    "rewrite applied to the phone number, in /search/replace/ form, \
                     e.g. /[^0-9+]// to strip formatting",
                ),
                ParameterSpec::optional(keys::TIMEOUT, "gateway network timeout in seconds, default 30"),
            ],
        }
    }
}

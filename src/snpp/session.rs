//! Session seam between the SNPP provider and the wire protocol.
//!
//! The provider is constructed with a [`SnppSessionFactory`]; each
//! submission opens exactly one session, drives it through the protocol
//! sequence, and tears it down before returning.

use std::time::Duration;

use async_trait::async_trait;

/// Errors raised by an SNPP session implementation.
#[derive(Debug, thiserror::Error)]
pub enum SnppError {
    /// Socket-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The gateway did not answer within the configured timeout.
    #[error("gateway did not respond within {0:?}")]
    Timeout(Duration),

    /// The gateway answered a command with a non-2xx reply code.
    #[error("gateway rejected {command}: {code} {text}")]
    Rejected {
        command: &'static str,
        code: u16,
        text: String,
    },

    /// The gateway sent a reply line that does not start with a
    /// three-digit code.
    #[error("malformed gateway reply: {0:?}")]
    MalformedReply(String),

    /// The gateway closed the connection mid-session.
    #[error("connection closed by gateway")]
    ConnectionClosed,

    /// A protocol field contained CR or LF.
    #[error("{0} must be a single line without CR/LF")]
    InvalidArgument(&'static str),
}

/// One SNPP protocol session.
///
/// Owned exclusively by a single submission. The caller runs [`quit`]
/// and [`close`] on every exit path, success or failure.
///
/// [`quit`]: SnppSession::quit
/// [`close`]: SnppSession::close
#[async_trait]
pub trait SnppSession: Send {
    /// Authenticate with the gateway (`LOGI`).
    async fn login(&mut self, username: &str, password: Option<&str>) -> Result<(), SnppError>;

    /// Set the destination pager/phone identifier (`PAGE`).
    async fn pager(&mut self, pager_id: &str) -> Result<(), SnppError>;

    /// Set the message subject (`SUBJ`).
    async fn subject(&mut self, subject: &str) -> Result<(), SnppError>;

    /// Set the message body (`MESS`).
    async fn message(&mut self, body: &str) -> Result<(), SnppError>;

    /// Submit the page (`SEND`).
    async fn send(&mut self) -> Result<(), SnppError>;

    /// Graceful termination (`QUIT`).
    async fn quit(&mut self) -> Result<(), SnppError>;

    /// Tear down the underlying connection.
    async fn close(&mut self) -> Result<(), SnppError>;
}

/// Capability to open SNPP sessions.
#[async_trait]
pub trait SnppSessionFactory: Send + Sync {
    /// Open a session to `host:port`, bounding every network step by
    /// `timeout`.
    async fn open(
        &self,
        host: &str,
        port: &str,
        timeout: Duration,
    ) -> Result<Box<dyn SnppSession>, SnppError>;
}

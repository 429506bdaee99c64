//! SNPP gateway provider
//!
//! Submits SMS/OTP messages through a legacy SNPP (RFC 1861) paging
//! gateway. The provider in [`provider`] only sequences protocol calls —
//! connect, optional login, set pager, optional subject, body, send,
//! quit, close — against the session seam in [`session`]; the wire
//! protocol itself lives in [`client`] behind the `tcp-client` feature
//! and can be swapped out by injecting another [`SnppSessionFactory`].

pub mod provider;
pub mod session;

#[cfg(feature = "tcp-client")]
pub mod client;

pub use provider::SnppSmsProvider;
pub use session::{SnppError, SnppSession, SnppSessionFactory};

#[cfg(feature = "tcp-client")]
pub use client::{TcpSnppSession, TcpSnppSessionFactory};

#[cfg(test)]
mod tests;

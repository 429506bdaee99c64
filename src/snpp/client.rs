//! TCP-backed SNPP session (RFC 1861).
//!
//! Commands are CRLF-terminated lines; replies carry a three-digit code
//! followed by text, and any 2xx code is a positive completion. Only the
//! level 1 command set plus `LOGI`/`SUBJ` is spoken here.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio::time;
use tracing::{debug, trace};

use super::session::{SnppError, SnppSession, SnppSessionFactory};

/// One parsed gateway reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    code: u16,
    text: String,
}

impl Reply {
    /// Positive completion per RFC 1861.
    fn is_positive(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

fn parse_reply(line: &str) -> Result<Reply, SnppError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(SnppError::MalformedReply(line.to_string()));
    }
    let code = line[..3]
        .parse::<u16>()
        .map_err(|_| SnppError::MalformedReply(line.to_string()))?;
    Ok(Reply {
        code,
        text: line[3..].trim_start().to_string(),
    })
}

/// Commands and their arguments are single lines by construction.
fn ensure_single_line(field: &'static str, value: &str) -> Result<(), SnppError> {
    if value.contains(['\r', '\n']) {
        return Err(SnppError::InvalidArgument(field));
    }
    Ok(())
}

/// SNPP session over a buffered TCP stream.
pub struct TcpSnppSession {
    stream: BufStream<TcpStream>,
    timeout: Duration,
}

impl TcpSnppSession {
    /// Connect to the gateway and consume its greeting.
    pub async fn connect(host: &str, port: &str, timeout: Duration) -> Result<Self, SnppError> {
        let addr = format!("{host}:{port}");
        debug!(addr = %addr, "connecting to SNPP gateway");
        let socket = time::timeout(timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| SnppError::Timeout(timeout))??;

        let mut session = Self {
            stream: BufStream::new(socket),
            timeout,
        };
        let greeting = session.read_reply().await?;
        if !greeting.is_positive() {
            return Err(SnppError::Rejected {
                command: "greeting",
                code: greeting.code,
                text: greeting.text,
            });
        }
        trace!(code = greeting.code, "gateway greeting accepted");
        Ok(session)
    }

    async fn read_reply(&mut self) -> Result<Reply, SnppError> {
        let timeout = self.timeout;
        let mut line = String::new();
        let read = time::timeout(timeout, self.stream.read_line(&mut line))
            .await
            .map_err(|_| SnppError::Timeout(timeout))??;
        if read == 0 {
            return Err(SnppError::ConnectionClosed);
        }
        parse_reply(&line)
    }

    async fn command(&mut self, verb: &'static str, arg: Option<&str>) -> Result<Reply, SnppError> {
        let timeout = self.timeout;
        let line = match arg {
            Some(arg) => format!("{verb} {arg}\r\n"),
            None => format!("{verb}\r\n"),
        };
        let write = async {
            self.stream.write_all(line.as_bytes()).await?;
            self.stream.flush().await
        };
        time::timeout(timeout, write)
            .await
            .map_err(|_| SnppError::Timeout(timeout))??;
        trace!(command = verb, "sent gateway command");

        let reply = self.read_reply().await?;
        if !reply.is_positive() {
            return Err(SnppError::Rejected {
                command: verb,
                code: reply.code,
                text: reply.text,
            });
        }
        Ok(reply)
    }
}

#[async_trait]
impl SnppSession for TcpSnppSession {
    async fn login(&mut self, username: &str, password: Option<&str>) -> Result<(), SnppError> {
        ensure_single_line("username", username)?;
        let arg = match password {
            Some(password) => {
                ensure_single_line("password", password)?;
                format!("{username} {password}")
            }
            None => username.to_string(),
        };
        self.command("LOGI", Some(&arg)).await?;
        Ok(())
    }

    async fn pager(&mut self, pager_id: &str) -> Result<(), SnppError> {
        ensure_single_line("pager id", pager_id)?;
        self.command("PAGE", Some(pager_id)).await?;
        Ok(())
    }

    async fn subject(&mut self, subject: &str) -> Result<(), SnppError> {
        ensure_single_line("subject", subject)?;
        self.command("SUBJ", Some(subject)).await?;
        Ok(())
    }

    async fn message(&mut self, body: &str) -> Result<(), SnppError> {
        ensure_single_line("message body", body)?;
        self.command("MESS", Some(body)).await?;
        Ok(())
    }

    async fn send(&mut self) -> Result<(), SnppError> {
        self.command("SEND", None).await?;
        Ok(())
    }

    async fn quit(&mut self) -> Result<(), SnppError> {
        self.command("QUIT", None).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SnppError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

/// Factory producing one [`TcpSnppSession`] per submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpSnppSessionFactory;

#[async_trait]
impl SnppSessionFactory for TcpSnppSessionFactory {
    async fn open(
        &self,
        host: &str,
        port: &str,
        timeout: Duration,
    ) -> Result<Box<dyn SnppSession>, SnppError> {
        Ok(Box::new(TcpSnppSession::connect(host, port, timeout).await?))
    }
}

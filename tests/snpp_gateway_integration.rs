//! End-to-end submission against an in-process SNPP gateway.

#![cfg(feature = "tcp-client")]

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use snpp_sms::config::keys;
use snpp_sms::{SmsGatewayConfig, SmsProvider, SnppSmsProvider};

/// Minimal scripted SNPP gateway: greets, answers every command with a
/// canned reply, records what it saw.
async fn spawn_gateway(reject_send: bool) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        serve(socket, reject_send).await
    });
    (port, handle)
}

async fn serve(socket: TcpStream, reject_send: bool) -> Vec<String> {
    let (read, mut write) = socket.into_split();
    let mut reader = BufReader::new(read);
    write.write_all(b"220 SNPP (V3) Gateway Ready\r\n").await.unwrap();

    let mut seen = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await.unwrap() == 0 {
            break;
        }
        let command = line.trim_end().to_string();
        let verb = command.split_whitespace().next().unwrap_or("").to_string();
        seen.push(command);

        let reply: &[u8] = match verb.as_str() {
            "QUIT" => b"221 OK, Goodbye\r\n",
            "SEND" if reject_send => b"554 Error, failed\r\n",
            _ => b"250 OK\r\n",
        };
        write.write_all(reply).await.unwrap();
        if verb == "QUIT" {
            break;
        }
    }
    seen
}

fn gateway_config(port: &str) -> SmsGatewayConfig {
    SmsGatewayConfig::new()
        .with_option(keys::SMSC_HOST, "127.0.0.1")
        .with_option(keys::SMSC_PORT, port)
        .with_option(keys::TIMEOUT, "5")
}

#[tokio::test]
async fn submits_a_page_end_to_end() {
    let (port, gateway) = spawn_gateway(false).await;
    let provider = SnppSmsProvider::new(gateway_config(&port)).unwrap();

    let sent = provider.submit_message("+1555", "123456").await.unwrap();
    assert!(sent);

    let seen = gateway.await.unwrap();
    let seen: Vec<&str> = seen.iter().map(String::as_str).collect();
    assert_eq!(
        seen,
        vec!["PAGE +1555", "SUBJ +1555", "MESS 123456", "SEND", "QUIT"]
    );
}

#[tokio::test]
async fn authenticates_when_credentials_configured() {
    let (port, gateway) = spawn_gateway(false).await;
    let config = gateway_config(&port)
        .with_option(keys::USERNAME, "pageops")
        .with_option(keys::PASSWORD, "secret");
    let provider = SnppSmsProvider::new(config).unwrap();

    provider.submit_message("+1555", "123456").await.unwrap();

    let seen = gateway.await.unwrap();
    assert_eq!(seen.first().map(String::as_str), Some("LOGI pageops secret"));
}

#[tokio::test]
async fn rejected_send_surfaces_as_delivery_error_and_quits() {
    let (port, gateway) = spawn_gateway(true).await;
    let provider = SnppSmsProvider::new(gateway_config(&port)).unwrap();

    let err = provider.submit_message("+1555", "123456").await.unwrap_err();
    assert!(err.to_string().contains("554"));

    let seen = gateway.await.unwrap();
    assert!(seen.iter().any(|c| c == "QUIT"));
}

#[tokio::test]
async fn unreachable_gateway_is_a_delivery_error() {
    // Bind a listener to reserve a port, then drop it so nothing accepts.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    drop(listener);

    let config = gateway_config(&port).with_option(keys::TIMEOUT, "1");
    let provider = SnppSmsProvider::new(config).unwrap();

    let err = provider.submit_message("+1555", "123456").await.unwrap_err();
    assert!(matches!(err, snpp_sms::SmsError::Delivery(_)));
}

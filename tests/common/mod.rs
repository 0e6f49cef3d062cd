//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use keycloak_gateway::config::MapEnv;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Discovery document with the six endpoints the gateway extracts.
#[allow(dead_code)]
pub const DISCOVERY_DOCUMENT: &str = r#"{"authorization_endpoint":"https://idp/auth","token_endpoint":"https://idp/token","jwks_uri":"https://idp/jwks","end_session_endpoint":"https://idp/logout","introspection_endpoint":"https://idp/introspect","userinfo_endpoint":"https://idp/userinfo"}"#;

/// A mock HTTP server counting the requests it receives.
pub struct MockServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    paths: Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request paths seen so far.
    #[allow(dead_code)]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Start a mock backend that always answers with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: &'static str) -> MockServer {
    start_programmable_backend(move || async move { (status, body.to_string()) }).await
}

/// Start a programmable mock backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockServer
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let paths = Arc::new(std::sync::Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let server = MockServer {
        addr,
        hits: hits.clone(),
        paths: paths.clone(),
    };

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let hits = hits.clone();
                    let paths = paths.clone();
                    tokio::spawn(async move {
                        let path = read_request_path(&mut socket).await;
                        hits.fetch_add(1, Ordering::SeqCst);
                        paths.lock().unwrap().push(path);

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    server
}

/// Start a backend that answers one request with `body` and keeps the
/// connection alive.
///
/// The receiver reports whether the client closed the connection within
/// `wait` after the response was written.
#[allow(dead_code)]
pub async fn start_keep_alive_backend(
    body: &'static str,
    wait: Duration,
) -> (SocketAddr, oneshot::Receiver<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_path(&mut socket).await;

        let response_str = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: keep-alive\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response_str.as_bytes()).await.unwrap();

        let mut buf = [0u8; 64];
        let closed = matches!(
            tokio::time::timeout(wait, socket.read(&mut buf)).await,
            Ok(Ok(0)) | Ok(Err(_))
        );
        let _ = closed_tx.send(closed);
    });

    (addr, closed_rx)
}

/// Read the request head and return its path.
async fn read_request_path(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}

/// An environment with every required variable set, pointing at `issuer`.
pub fn complete_env(issuer: &str) -> MapEnv {
    MapEnv::new()
        .with("KEYCLOAK_ISSUER", issuer)
        .with("KEYCLOAK_CLIENT_ID", "gateway")
        .with("KEYCLOAK_CLIENT_SECRET", "super-secret")
        .with("REDIRECT_URL", "https://gateway.example.com/auth/callback")
        .with("KEYCLOAK_SCOPE", "openid profile email")
        .with("FRONTEND_URL", "https://app.example.com")
}

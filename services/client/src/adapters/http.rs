//! services/client/src/adapters/http.rs
//!
//! This module contains the reqwest-backed adapter for the tracker backend.
//! It implements the `Transport` port from the `core` crate and owns transport
//! details only: URL building, headers, timeout and status mapping.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;
use tracker_core::ports::{Endpoint, Method, Transport, TransportError, TransportResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `Transport` port over HTTP.
///
/// The underlying client keeps a cookie store, so the session cookie issued by
/// `/login` or `/signup` is presented on every later call.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` with an explicit request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

//=========================================================================================
// `Transport` Trait Implementation
//=========================================================================================

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Option<Bytes>,
    ) -> TransportResult<Bytes> {
        let url = reqwest::Url::parse(&self.url_for(endpoint))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        debug!("{} {}", method, url);

        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            debug!("{} answered {}: {}", endpoint, status.as_u16(), body_preview(&body));
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{}...", preview)
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response on a loopback port and hands back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\n",
                    "Content-Type: application/json\r\n",
                    "Content-Length: {}\r\n",
                    "Connection: close\r\n\r\n{}"
                ),
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (format!("http://{}/api/auth", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    #[tokio::test]
    async fn posts_json_body_with_content_type() {
        let (base, server) = serve_once("200 OK", r#"{"success":true}"#).await;
        let transport = HttpTransport::new(&base, Duration::from_secs(5)).unwrap();

        let body = transport
            .send(
                Endpoint::Login,
                Method::Post,
                Some(Bytes::from_static(br#"{"email":"a@x.com"}"#)),
            )
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"success":true}"#);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/auth/login HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"email":"a@x.com"}"#));
    }

    #[tokio::test]
    async fn get_without_body_sends_no_content_type() {
        let (base, server) = serve_once("200 OK", r#"{"engineers":[]}"#).await;
        let transport = HttpTransport::new(&base, Duration::from_secs(5)).unwrap();

        transport
            .send(Endpoint::AdminEngineers, Method::Get, None)
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/auth/admin/engineers HTTP/1.1"));
        assert!(!request.to_lowercase().contains("content-type"));
    }

    #[tokio::test]
    async fn non_success_status_keeps_the_body() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            r#"{"success":false,"message":"Invalid credentials"}"#,
        )
        .await;
        let transport = HttpTransport::new(&base, Duration::from_secs(5)).unwrap();

        let err = transport
            .send(Endpoint::CheckAuth, Method::Get, None)
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(String::from_utf8_lossy(&body).contains("Invalid credentials"));
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Bind then drop to get a port nobody is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport =
            HttpTransport::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let err = transport
            .send(Endpoint::Logout, Method::Post, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn preview_compacts_and_truncates() {
        assert_eq!(body_preview(b"  a \n b  "), "a b");
        let long = "x".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }
}

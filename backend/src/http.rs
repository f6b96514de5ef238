use crate::BackendError;
use giftwise_common::SuggestionRequest;
use serde_json::Value;
use std::time::Duration;

/// JSON-over-POST client for a deployed suggestion endpoint.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: String) -> Result<Self, BackendError> {
        Self::with_timeout(endpoint, None)
    }

    /// The timeout, when set, bounds the whole round trip.
    pub fn with_timeout(endpoint: String, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Setup(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn post(&self, request: &SuggestionRequest) -> Result<Value, BackendError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            previous_gifts = request.previous_gifts.len(),
            "posting suggestion request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = resp.status();
        tracing::debug!(%status, "backend responded");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "backend returned an error status");
            return Err(BackendError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await.map_err(|e| BackendError::Network {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one HTTP response and hands back the raw request body.
    async fn one_shot_server(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let (header_end, content_length) = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    break (pos + 4, len);
                }
            };
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&buf[header_end..]).to_string());

            let reply = format!(
                "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{addr}/api/gifts"), rx)
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest {
            occasion: "Birthday".to_string(),
            recipient: "Colleague".to_string(),
            budget: 500,
            style: "Practical".to_string(),
            notes: "Likes plants".to_string(),
            prompt: "Suggest gifts".to_string(),
            previous_gifts: vec!["Coffee Mug".to_string()],
        }
    }

    #[tokio::test]
    async fn test_post_sends_json_and_returns_body() {
        let (url, body_rx) = one_shot_server(
            200,
            r#"{"gifts":[{"gift":"Desk Plant","why":"Green","price_range":"₹500"}]}"#,
        )
        .await;
        let backend = HttpBackend::new(url).unwrap();

        let value = backend.post(&request()).await.unwrap();
        assert_eq!(value["gifts"][0]["gift"], "Desk Plant");

        let sent: serde_json::Value = serde_json::from_str(&body_rx.await.unwrap()).unwrap();
        assert_eq!(sent["occasion"], "Birthday");
        assert_eq!(sent["budget"], 500);
        assert_eq!(sent["previous_gifts"][0], "Coffee Mug");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let (url, _rx) = one_shot_server(503, r#"{"error":"overloaded"}"#).await;
        let backend = HttpBackend::new(url).unwrap();

        let err = backend.post(&request()).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(matches!(err, BackendError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (url, _rx) = one_shot_server(200, "not json").await;
        let backend = HttpBackend::new(url).unwrap();

        let err = backend.post(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_elapsed_timeout_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without ever answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let backend =
            HttpBackend::with_timeout(format!("http://{addr}/"), Some(Duration::from_millis(200)))
                .unwrap();
        assert_eq!(backend.endpoint(), format!("http://{addr}/"));

        let err = backend.post(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::Network { status: None, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(format!("http://{addr}/")).unwrap();
        let err = backend.post(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::Network { .. }));
        assert_eq!(err.status(), None);
    }
}

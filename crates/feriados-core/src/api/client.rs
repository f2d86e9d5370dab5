//! API client for the nolaborables.com.ar holiday API.
//!
//! `HolidayClient` downloads a year's holiday list and hands the body back as
//! raw text so the cache can persist exactly what the server sent.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the yearly holidays endpoint.
pub const DEFAULT_API_URL: &str = "https://nolaborables.com.ar/api/v2/feriados";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Where the yearly holiday list comes from.
///
/// Implementations return the raw JSON body for `year`; the cache validates
/// it before anything is written to disk.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<String, ApiError>;
}

/// API client for nolaborables.com.ar.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HolidayClient {
    client: Client,
    base_url: String,
}

impl HolidayClient {
    /// Create a client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a different base URL (mirrors, local servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn year_url(&self, year: i32) -> String {
        format!("{}/{}", self.base_url, year)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Single GET. A 429 comes back as `ApiError::RateLimited`.
    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await.map_err(|e| {
            warn!(url = url, error = %e, "Holiday request rejected");
            e
        })?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl HolidaySource for HolidayClient {
    async fn fetch_year(&self, year: i32) -> Result<String, ApiError> {
        let url = self.year_url(year);
        debug!(url = %url, "Fetching holidays");

        let body = self.get_text(&url).await?;
        if body.trim().is_empty() {
            return Err(ApiError::InvalidResponse(format!("Empty body from {}", url)));
        }

        debug!(year, bytes = body.len(), "Holidays fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_year_url() {
        let client = HolidayClient::new().unwrap();
        assert_eq!(
            client.year_url(2025),
            "https://nolaborables.com.ar/api/v2/feriados/2025"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HolidayClient::with_base_url("http://localhost:8080/feriados/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/feriados");
        assert_eq!(client.year_url(2024), "http://localhost:8080/feriados/2024");
    }

    /// Answer every connection with the same canned HTTP response.
    /// Returns the base URL and a counter of accepted connections.
    async fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        (format!("http://{}/feriados", addr), connections)
    }

    async fn serve_once(status: &'static str, body: &'static str) -> String {
        serve(status, body).await.0
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let (url, connections) = serve("429 Too Many Requests", "slow down").await;
        let client = HolidayClient::with_base_url(url).unwrap();

        let started = std::time::Instant::now();
        let err = client.fetch_year(2025).await.unwrap_err();

        assert!(matches!(err, ApiError::RateLimited));
        assert_eq!(connections.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_fetch_year_returns_raw_body() {
        let body = r#"[{"motivo":"Año Nuevo","tipo":"inamovible","dia":1,"mes":1}]"#;
        let url = serve_once("200 OK", body).await;
        let client = HolidayClient::with_base_url(url).unwrap();

        let fetched = client.fetch_year(2025).await.unwrap();
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_fetch_year_maps_not_found() {
        let url = serve_once("404 Not Found", r#"{"error":"año no disponible"}"#).await;
        let client = HolidayClient::with_base_url(url).unwrap();

        let err = client.fetch_year(1800).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_year_rejects_empty_body() {
        let url = serve_once("200 OK", "").await;
        let client = HolidayClient::with_base_url(url).unwrap();

        let err = client.fetch_year(2025).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = HolidayClient::with_base_url("http://127.0.0.1:9/feriados").unwrap();
        let err = client.fetch_year(2025).await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));
    }
}

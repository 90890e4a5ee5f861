//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One call is one round trip: no retries and no status interpretation.

use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use restcheck_application::ports::{HttpClient, HttpClientError};
use restcheck_domain::{HttpMethod, JSON_MEDIA_TYPE, RequestSpec, ResponseEnvelope};

/// Redirect limit applied to every request.
const MAX_REDIRECTS: usize = 10;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("restcheck/", env!("CARGO_PKG_VERSION"));

/// Transport settings for the reqwest adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer.
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - No timeout
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_options(&TransportOptions::default())
    }

    /// Creates a new HTTP client from transport options.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_options(options: &TransportOptions) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(options.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout: options.timeout,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout: Option<Duration>) -> HttpClientError {
        if error.is_timeout() {
            let timeout_ms = timeout.map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = error_chain(error);
        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with its sources; reqwest keeps the OS reason there.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseEnvelope, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(payload) = &request.body {
            let bytes = serde_json::to_vec(payload)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, JSON_MEDIA_TYPE)
                .body(bytes);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?;

        Ok(ResponseEnvelope::new(status, headers, &body, start.elapsed()))
    }
}

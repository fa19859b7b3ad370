//! HTTP transport abstraction.
//!
//! Operations talk to the service through the [`Transport`] trait so the
//! client can be driven by a stub in tests. [`ReqwestTransport`] is the
//! production implementation (`reqwest` feature).

use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// HTTP methods used by the Monitor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path below `/api`, including any query string (e.g. `/v1/monitor?name=cpu`).
    pub path: String,
    /// JSON body, if the operation sends one.
    pub body: Option<String>,
}

/// HTTP response from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the HTTP round trip for dependency injection.
///
/// Implementations perform exactly one request per call and return transport
/// failures as errors. Status handling and JSON decoding are left to the
/// caller.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::{ReqwestTransport, ReqwestTransportBuilder, DEFAULT_BASE_URL};

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::{Client, Method, StatusCode};

    use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
    use crate::{ClientError, Result};

    /// Default API host.
    pub const DEFAULT_BASE_URL: &str = "https://api.datadoghq.com";

    const API_KEY_HEADER: &str = "dd-api-key";
    const APP_KEY_HEADER: &str = "dd-application-key";

    impl From<HttpMethod> for Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Delete => Method::DELETE,
            }
        }
    }

    /// Production transport using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
        base_url: String,
    }

    impl ReqwestTransport {
        /// Create a new builder for configuring the transport.
        pub fn builder() -> ReqwestTransportBuilder {
            ReqwestTransportBuilder::default()
        }

        /// The host requests are sent to.
        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        fn url(&self, path: &str) -> String {
            format!("{}/api{}", self.base_url, path)
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let url = self.url(&request.path);
            tracing::debug!("{} {}", request.method, url);

            let mut builder = self.client.request(request.method.into(), &url);
            if let Some(body) = request.body {
                builder = builder.header(CONTENT_TYPE, "application/json").body(body);
            }

            let response = builder.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(ClientError::Auth(format!(
                    "{} {} returned {}",
                    request.method, request.path, status
                )));
            }

            let body = response.text().await?;
            tracing::debug!(
                "{} {} -> {} ({} bytes)",
                request.method,
                url,
                status.as_u16(),
                body.len()
            );

            Ok(HttpResponse {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Builder for ReqwestTransport.
    #[derive(Debug, Default)]
    pub struct ReqwestTransportBuilder {
        base_url: Option<String>,
        api_key: Option<String>,
        app_key: Option<String>,
        timeout: Option<Duration>,
    }

    impl ReqwestTransportBuilder {
        /// Set the API host (default: "https://api.datadoghq.com").
        pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = Some(base_url.into());
            self
        }

        /// Set the API key and application key.
        pub fn credentials(mut self, api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
            self.api_key = Some(api_key.into());
            self.app_key = Some(app_key.into());
            self
        }

        /// Set the request timeout (default: 10 seconds).
        pub fn timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }

        /// Build the transport.
        pub fn build(self) -> Result<ReqwestTransport> {
            let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

            let mut headers = HeaderMap::new();
            if let Some(api_key) = &self.api_key {
                headers.insert(API_KEY_HEADER, secret_header(api_key)?);
            }
            if let Some(app_key) = &self.app_key {
                headers.insert(APP_KEY_HEADER, secret_header(app_key)?);
            }

            let client = Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()
                .map_err(|e| ClientError::Config(e.to_string()))?;

            let base_url = self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string();

            Ok(ReqwestTransport { client, base_url })
        }
    }

    fn secret_header(value: &str) -> Result<HeaderValue> {
        let mut header = HeaderValue::from_str(value)
            .map_err(|_| ClientError::Config("API keys must be visible ASCII".to_string()))?;
        header.set_sensitive(true);
        Ok(header)
    }

}

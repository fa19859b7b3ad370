//! The API client and its request dispatch.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::{ClientError, Result};

/// Client for the Monitor API.
///
/// The client holds no state besides its transport. Every operation performs
/// exactly one request; nothing is retried, cached or paginated. Cloning is
/// cheap and clones share the transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client over a shared transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client that owns its transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(Arc::new(transport))
    }

    /// Create a client for the default host using an API key and an
    /// application key.
    #[cfg(feature = "reqwest")]
    pub fn with_credentials(
        api_key: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Result<Self> {
        let transport = crate::ReqwestTransport::builder()
            .credentials(api_key, app_key)
            .build()?;
        Ok(Self::with_transport(transport))
    }

    /// Send a request and decode the response body into `T`.
    ///
    /// An empty body is decoded as `{}`.
    pub(crate) async fn do_json_request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<String>,
    ) -> Result<T> {
        let response = self.dispatch(method, path, body).await?;
        decode_body(&response.body)
    }

    /// Send a request whose response body is not needed.
    pub(crate) async fn do_request(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<String>,
    ) -> Result<()> {
        self.dispatch(method, path, body).await.map(|_| ())
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        tracing::debug!(
            "Dispatching {} {} (body: {} bytes)",
            method,
            path,
            body.as_ref().map_or(0, String::len)
        );

        let response = self
            .transport
            .send(HttpRequest { method, path, body })
            .await?;

        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }
}

/// Serialize a request body.
pub(crate) fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(ClientError::Encode)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(ClientError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use ddmon_types::Monitor;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 500,
                    body: "Internal Server Error".to_string(),
                })
            })
        });

        let client = Client::with_transport(mock);
        let err = client
            .do_request(HttpMethod::Post, "/v1/monitor/mute_all".to_string(), None)
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("expected ClientError::Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_is_passed_through() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Box::pin(async { Err(ClientError::Timeout) }));

        let client = Client::with_transport(mock);
        let err = client
            .do_json_request::<Monitor>(HttpMethod::Get, "/v1/monitor/1".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .returning(|_| Box::pin(async { Ok(ok("not json")) }));

        let client = Client::with_transport(mock);
        let err = client
            .do_json_request::<Monitor>(HttpMethod::Get, "/v1/monitor/1".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_body_decodes_as_empty_object() {
        let mut mock = MockTransport::new();
        mock.expect_send().returning(|_| Box::pin(async { Ok(ok("")) }));

        let client = Client::with_transport(mock);
        let monitor: Monitor = client
            .do_json_request(HttpMethod::Get, "/v1/monitor/1".to_string(), None)
            .await
            .unwrap();
        assert_eq!(monitor, Monitor::default());
    }

    #[tokio::test]
    async fn request_is_forwarded_unchanged() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.method == HttpMethod::Put
                    && req.path == "/v1/monitor/5"
                    && req.body.as_deref() == Some("{\"tags\":[]}")
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(ok("{}")) }));

        let client = Client::with_transport(mock);
        let body = encode_body(&Monitor::default()).unwrap();
        client
            .do_request(HttpMethod::Put, "/v1/monitor/5".to_string(), Some(body))
            .await
            .unwrap();
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn with_credentials_builds_default_transport() {
        assert!(Client::with_credentials("api", "app").is_ok());

        let err = Client::with_credentials("bad\nkey", "app").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn debug_does_not_require_transport_debug() {
        let client = Client::with_transport(MockTransport::new());
        assert!(format!("{:?}", client).starts_with("Client"));
    }
}

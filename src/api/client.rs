//! Cluster API client
//!
//! Maps each endpoint of the cluster management API onto a typed call.
//! Validation is not done here; see [`crate::console::ops`].

use super::http::{ApiRequest, ApiResponse, HttpTransport, Transport};
use super::model::{ClusterRef, ClusterSpec, ScaleRequest};
use crate::error::{ConsoleError, ConsoleResult};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Client bound to one API origin
#[derive(Clone)]
pub struct ClusterClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ClusterClient {
    /// Client using the default reqwest transport
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self::with_transport(base_url, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single cluster; the namespace is percent-encoded
    pub fn cluster_url(&self, namespace: &str) -> String {
        self.url(&format!("/clusters/{}", urlencoding::encode(namespace)))
    }

    async fn send(&self, request: ApiRequest) -> ConsoleResult<ApiResponse> {
        Ok(self.transport.send(request).await?)
    }

    /// `POST /clusters`, returns the response body verbatim
    pub async fn create(&self, spec: &ClusterSpec) -> ConsoleResult<String> {
        let body = to_json(spec)?;
        let request = ApiRequest::new(Method::POST, self.url("/clusters")).with_json(body);
        expect_success(self.send(request).await?).map(|r| r.body)
    }

    /// `DELETE /clusters` with `{namespace}`, returns the response body verbatim
    pub async fn delete(&self, cluster: &ClusterRef) -> ConsoleResult<String> {
        let body = to_json(cluster)?;
        let request = ApiRequest::new(Method::DELETE, self.url("/clusters")).with_json(body);
        expect_success(self.send(request).await?).map(|r| r.body)
    }

    /// `POST /clusters/scale`, returns the response body verbatim
    pub async fn scale(&self, scale: &ScaleRequest) -> ConsoleResult<String> {
        let body = to_json(scale)?;
        let request = ApiRequest::new(Method::POST, self.url("/clusters/scale")).with_json(body);
        expect_success(self.send(request).await?).map(|r| r.body)
    }

    /// `GET /clusters`
    ///
    /// A `null` body counts as an empty list; any other non-array is an error.
    pub async fn list(&self) -> ConsoleResult<Vec<Value>> {
        let request = ApiRequest::new(Method::GET, self.url("/clusters"));
        let response = expect_success(self.send(request).await?)?;

        match parse_json(&response.body)? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ConsoleError::Transport(format!(
                "malformed response: expected a JSON array, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// `GET /clusters/{namespace}`
    pub async fn get(&self, namespace: &str) -> ConsoleResult<Value> {
        let request = ApiRequest::new(Method::GET, self.cluster_url(namespace));
        let response = expect_success(self.send(request).await?)?;
        parse_json(&response.body)
    }

    /// `GET /health`; the body is ignored
    pub async fn health(&self) -> ConsoleResult<()> {
        let request = ApiRequest::new(Method::GET, self.url("/health"));
        expect_success(self.send(request).await?).map(|_| ())
    }
}

fn expect_success(response: ApiResponse) -> ConsoleResult<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ConsoleError::Server {
            status: response.status,
            status_text: response.status_text,
            body: response.body,
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> ConsoleResult<Value> {
    serde_json::to_value(value).map_err(|e| ConsoleError::Transport(e.to_string()))
}

fn parse_json(body: &str) -> ConsoleResult<Value> {
    serde_json::from_str(body)
        .map_err(|e| ConsoleError::Transport(format!("malformed response: {}", e)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use futures::future::{BoxFuture, FutureExt};

    struct Fixed(u16, &'static str);

    impl Transport for Fixed {
        fn send(&self, _request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
            let response = ApiResponse::new(self.0, self.1);
            async move { Ok(response) }.boxed()
        }
    }

    fn client(status: u16, body: &'static str) -> ClusterClient {
        ClusterClient::with_transport("http://api.test/", Arc::new(Fixed(status, body)))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let c = client(200, "");
        assert_eq!(c.base_url(), "http://api.test");
        assert_eq!(c.cluster_url("ns-1"), "http://api.test/clusters/ns-1");
    }

    #[test]
    fn test_cluster_url_encodes_namespace() {
        let c = client(200, "");
        assert_eq!(c.cluster_url("a b/c"), "http://api.test/clusters/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_list_null_is_empty() {
        let items = client(200, "null").list().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_object_is_malformed() {
        let err = client(200, r#"{"a":1}"#).list().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Transport(ref m) if m.contains("an object")));
    }

    #[tokio::test]
    async fn test_get_non_success_skips_parse() {
        let err = client(404, "<html>not found</html>").get("x").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_health_reports_server_error() {
        let err = client(503, "").health().await.unwrap_err();
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }
}

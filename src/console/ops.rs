//! Console Operations
//!
//! Each operation is a plain async function from form input to a result,
//! plus a render step mapping that result onto a [`StatusUpdate`]. The UI
//! only snapshots a form into a [`Submission`] and applies the [`Outcome`].

use super::form::{FormKind, FormState};
use super::status::StatusUpdate;
use crate::api::client::ClusterClient;
use crate::api::model::{ClusterFields, ClusterRef, ClusterSpec, ScaleRequest};
use crate::error::{ConsoleError, ConsoleResult};
use serde_json::Value;

// =========================================================================
// Validation
// =========================================================================

/// Check required fields in order and build the request body
pub fn validate_create(fields: &ClusterFields) -> ConsoleResult<ClusterSpec> {
    if fields.tenant_org_id.is_empty() {
        return Err(ConsoleError::validation("tenant org id required"));
    }
    if fields.user.is_empty() {
        return Err(ConsoleError::validation("user required"));
    }
    if fields.service_name.is_empty() {
        return Err(ConsoleError::validation("service name required"));
    }
    Ok(ClusterSpec::from_fields(fields))
}

pub fn validate_namespace(namespace: &str) -> ConsoleResult<ClusterRef> {
    if namespace.is_empty() {
        return Err(ConsoleError::validation("namespace required"));
    }
    Ok(ClusterRef {
        namespace: namespace.to_string(),
    })
}

pub fn validate_scale(namespace: &str, replicas: &str) -> ConsoleResult<ScaleRequest> {
    let cluster = validate_namespace(namespace)?;
    let replicas = replicas
        .trim()
        .parse::<u32>()
        .map_err(|_| ConsoleError::validation("replicas must be a non-negative integer"))?;
    Ok(ScaleRequest {
        namespace: cluster.namespace,
        replicas,
    })
}

// =========================================================================
// Operations
// =========================================================================

pub async fn create_cluster(client: &ClusterClient, fields: &ClusterFields) -> ConsoleResult<String> {
    let spec = validate_create(fields)?;
    client.create(&spec).await
}

pub async fn delete_cluster(client: &ClusterClient, namespace: &str) -> ConsoleResult<String> {
    let cluster = validate_namespace(namespace)?;
    client.delete(&cluster).await
}

pub async fn list_clusters(client: &ClusterClient) -> ConsoleResult<Vec<Value>> {
    client.list().await
}

pub async fn get_cluster_details(client: &ClusterClient, namespace: &str) -> ConsoleResult<Value> {
    let cluster = validate_namespace(namespace)?;
    client.get(&cluster.namespace).await
}

pub async fn scale_cluster(
    client: &ClusterClient,
    namespace: &str,
    replicas: &str,
) -> ConsoleResult<String> {
    let scale = validate_scale(namespace, replicas)?;
    client.scale(&scale).await
}

/// Startup reachability probe. Only logs.
pub async fn health_check(client: &ClusterClient) {
    match client.health().await {
        Ok(()) => tracing::info!("API reachable at {}", client.base_url()),
        Err(ConsoleError::Server { status, .. }) => {
            tracing::warn!("API at {} may be unavailable (HTTP {})", client.base_url(), status)
        }
        Err(e) => tracing::warn!("Cannot reach API at {}: {}", client.base_url(), e),
    }
}

// =========================================================================
// Submission and rendering
// =========================================================================

/// Form input captured at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(ClusterFields),
    Delete { namespace: String },
    List,
    Details { namespace: String },
    Scale { namespace: String, replicas: String },
}

impl Submission {
    pub fn from_form(form: &FormState) -> Self {
        match form.kind {
            FormKind::Create => Submission::Create(form.cluster_fields()),
            FormKind::Delete => Submission::Delete {
                namespace: form.value("namespace").to_string(),
            },
            FormKind::List => Submission::List,
            FormKind::Details => Submission::Details {
                namespace: form.value("namespace").to_string(),
            },
            FormKind::Scale => Submission::Scale {
                namespace: form.value("namespace").to_string(),
                replicas: form.value("replicas").to_string(),
            },
        }
    }

    /// Local checks only; `Ok` means a request will be sent
    pub fn validate(&self) -> ConsoleResult<()> {
        match self {
            Submission::Create(fields) => validate_create(fields).map(|_| ()),
            Submission::Delete { namespace } | Submission::Details { namespace } => {
                validate_namespace(namespace).map(|_| ())
            }
            Submission::List => Ok(()),
            Submission::Scale {
                namespace,
                replicas,
            } => validate_scale(namespace, replicas).map(|_| ()),
        }
    }
}

/// Rendered result of one submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub update: StatusUpdate,
    /// Clear the form's inputs (only after a successful write)
    pub reset_form: bool,
}

/// Message shown while a request is in flight
pub fn pending_message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Create => "creating...",
        FormKind::Delete => "deleting...",
        FormKind::List => "querying...",
        FormKind::Details => "querying details...",
        FormKind::Scale => "scaling...",
    }
}

/// Run a submission to completion and render it
pub async fn execute(client: &ClusterClient, submission: &Submission) -> Outcome {
    match submission {
        Submission::Create(fields) => {
            render_write(WriteOp::Create, create_cluster(client, fields).await)
        }
        Submission::Delete { namespace } => {
            render_write(WriteOp::Delete, delete_cluster(client, namespace).await)
        }
        Submission::List => render_list(list_clusters(client).await),
        Submission::Details { namespace } => {
            render_details(get_cluster_details(client, namespace).await)
        }
        Submission::Scale {
            namespace,
            replicas,
        } => render_write(
            WriteOp::Scale,
            scale_cluster(client, namespace, replicas).await,
        ),
    }
}

/// Render a validation failure without touching the network
pub fn render_rejected(err: &ConsoleError) -> Outcome {
    Outcome {
        update: StatusUpdate::error(err.to_string()),
        reset_form: false,
    }
}

/// The write operations; their bodies are opaque text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Delete,
    Scale,
}

impl WriteOp {
    fn labels(self) -> (&'static str, &'static str) {
        match self {
            WriteOp::Create => ("cluster created", "create failed"),
            WriteOp::Delete => ("cluster deleted", "delete failed"),
            WriteOp::Scale => ("cluster scaled", "scale failed"),
        }
    }
}

/// Create, delete and scale: the server body is echoed on both paths
pub fn render_write(op: WriteOp, result: ConsoleResult<String>) -> Outcome {
    let (done, failed) = op.labels();

    match result {
        Ok(body) => Outcome {
            update: StatusUpdate::success(format!("{}\n{}", done, body)),
            reset_form: true,
        },
        Err(err @ ConsoleError::Server { .. }) => Outcome {
            update: StatusUpdate::error(format!("{}: {}", failed, err.with_body())),
            reset_form: false,
        },
        Err(err) => render_rejected(&err),
    }
}

pub fn render_list(result: ConsoleResult<Vec<Value>>) -> Outcome {
    let update = match result {
        Ok(items) => StatusUpdate::success(format!("found {} clusters", items.len()))
            .with_detail(pretty(&Value::Array(items))),
        Err(err) => read_failure(&err),
    };
    Outcome {
        update,
        reset_form: false,
    }
}

pub fn render_details(result: ConsoleResult<Value>) -> Outcome {
    let update = match result {
        Ok(cluster) => StatusUpdate::success("query succeeded").with_detail(pretty(&cluster)),
        Err(err) => read_failure(&err),
    };
    Outcome {
        update,
        reset_form: false,
    }
}

/// List and details never echo the server body
fn read_failure(err: &ConsoleError) -> StatusUpdate {
    match err {
        ConsoleError::Server { .. } => StatusUpdate::error(format!("query failed: {}", err)),
        other => StatusUpdate::error(other.to_string()),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::{ApiRequest, ApiResponse, Transport};
    use crate::console::status::StatusKind;
    use crate::error::TransportError;
    use futures::future::{BoxFuture, FutureExt};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn valid_fields() -> ClusterFields {
        ClusterFields {
            tenant_org_id: "org".to_string(),
            user: "u".to_string(),
            service_name: "svc".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_order() {
        let err = validate_create(&ClusterFields::default()).unwrap_err();
        assert_eq!(err, ConsoleError::validation("tenant org id required"));

        let fields = ClusterFields {
            tenant_org_id: "org".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_create(&fields).unwrap_err(),
            ConsoleError::validation("user required")
        );

        let fields = ClusterFields {
            service_name: String::new(),
            ..valid_fields()
        };
        assert_eq!(
            validate_create(&fields).unwrap_err(),
            ConsoleError::validation("service name required")
        );

        assert!(validate_create(&valid_fields()).is_ok());
    }

    #[test]
    fn test_validate_scale() {
        assert_eq!(
            validate_scale("", "3").unwrap_err(),
            ConsoleError::validation("namespace required")
        );
        assert!(validate_scale("ns", "-1").unwrap_err().is_validation());
        assert!(validate_scale("ns", "").unwrap_err().is_validation());
        assert_eq!(validate_scale("ns", " 4 ").unwrap().replicas, 4);
    }

    #[test]
    fn test_submission_from_form() {
        let mut form = FormState::new(FormKind::Details);
        form.set("namespace", "ns-9");
        assert_eq!(
            Submission::from_form(&form),
            Submission::Details {
                namespace: "ns-9".to_string()
            }
        );
        assert!(Submission::from_form(&FormState::new(FormKind::List))
            .validate()
            .is_ok());
        assert!(Submission::from_form(&FormState::new(FormKind::Delete))
            .validate()
            .is_err());
    }

    #[test]
    fn test_render_write_success_resets() {
        let outcome = render_write(WriteOp::Create, Ok("ok-123".to_string()));
        assert_eq!(outcome.update.kind, StatusKind::Success);
        assert!(outcome.update.message.contains("ok-123"));
        assert!(outcome.reset_form);
    }

    #[test]
    fn test_render_write_server_error_keeps_form() {
        let outcome = render_write(
            WriteOp::Delete,
            Err(ConsoleError::Server {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "boom".to_string(),
            }),
        );
        assert_eq!(outcome.update.kind, StatusKind::Error);
        assert_eq!(
            outcome.update.message,
            "delete failed: 500 Internal Server Error\nboom"
        );
        assert!(!outcome.reset_form);
    }

    #[test]
    fn test_render_write_wording_per_op() {
        let scaled = render_write(WriteOp::Scale, Ok("3 replicas".to_string()));
        assert_eq!(scaled.update.message, "cluster scaled\n3 replicas");

        let failed = render_write(
            WriteOp::Create,
            Err(ConsoleError::Server {
                status: 409,
                status_text: "Conflict".to_string(),
                body: "exists".to_string(),
            }),
        );
        assert_eq!(failed.update.message, "create failed: 409 Conflict\nexists");
    }

    #[test]
    fn test_render_list_empty() {
        let outcome = render_list(Ok(vec![]));
        assert_eq!(outcome.update.message, "found 0 clusters");
        assert_eq!(outcome.update.detail.as_deref(), Some("[]"));
    }

    #[test]
    fn test_render_list_server_error_omits_body() {
        let outcome = render_list(Err(ConsoleError::Server {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "upstream exploded".to_string(),
        }));
        assert_eq!(outcome.update.message, "query failed: 502 Bad Gateway");
        assert!(outcome.update.detail.is_none());
    }

    #[test]
    fn test_render_details_pretty_prints() {
        let outcome = render_details(Ok(json!({"namespace": "ns-1"})));
        assert_eq!(outcome.update.message, "query succeeded");
        assert_eq!(
            outcome.update.detail.as_deref(),
            Some("{\n  \"namespace\": \"ns-1\"\n}")
        );
    }

    #[test]
    fn test_render_transport_failure() {
        let outcome = render_details(Err(ConsoleError::Transport("timeout".to_string())));
        assert_eq!(outcome.update.kind, StatusKind::Error);
        assert_eq!(outcome.update.message, "request failed: timeout");
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl Transport for Counting {
        fn send(&self, _request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            async { Ok(ApiResponse::new(200, "ok")) }.boxed()
        }
    }

    #[test]
    fn test_rejected_create_sends_nothing() {
        let transport = Arc::new(Counting::default());
        let client = ClusterClient::with_transport("http://api.test", transport.clone());
        let submission = Submission::Create(ClusterFields {
            tenant_org_id: String::new(),
            ..valid_fields()
        });

        let outcome = tokio_test::block_on(execute(&client, &submission));

        assert_eq!(transport.0.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.update.kind, StatusKind::Error);
        assert_eq!(outcome.update.message, "tenant org id required");
    }

    #[test]
    fn test_list_is_never_validated_away() {
        let transport = Arc::new(Counting::default());
        let client = ClusterClient::with_transport("http://api.test", transport.clone());
        let _ = tokio_test::block_on(execute(&client, &Submission::List));
        assert_eq!(transport.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pending_messages() {
        assert_eq!(pending_message(FormKind::Create), "creating...");
        assert_eq!(pending_message(FormKind::Details), "querying details...");
    }
}

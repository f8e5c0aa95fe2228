//! Request payloads for the cluster management API

use serde::Serialize;

/// Body of `POST /clusters`
///
/// Optional fields that are absent are skipped during serialization, so the
/// server applies its own defaults. Build one through
/// [`ClusterSpec::from_fields`] to get empty strings folded into `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterSpec {
    pub tenant_org_id: String,
    pub user: String,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_url: Option<String>,
}

/// Raw create-form input, one string per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterFields {
    pub tenant_org_id: String,
    pub user: String,
    pub service_name: String,
    pub namespace: String,
    pub replicas: String,
    pub cpu_request: String,
    pub cpu_limit: String,
    pub mem_request: String,
    pub mem_limit: String,
    pub disk_size: String,
    pub gpu_count: String,
    pub dimension: String,
    pub vector_count: String,
    pub index_limit: String,
    pub gitlab_url: String,
}

impl ClusterSpec {
    /// Build a spec from raw form input.
    ///
    /// Required fields are copied as-is (validation happens elsewhere).
    /// Empty optional text becomes `None`; numeric fields that are empty or
    /// fail to parse become `None` as well.
    pub fn from_fields(fields: &ClusterFields) -> Self {
        Self {
            tenant_org_id: fields.tenant_org_id.clone(),
            user: fields.user.clone(),
            service_name: fields.service_name.clone(),
            namespace: non_empty(&fields.namespace),
            replicas: parse_int("replicas", &fields.replicas),
            cpu_request: non_empty(&fields.cpu_request),
            cpu_limit: non_empty(&fields.cpu_limit),
            mem_request: non_empty(&fields.mem_request),
            mem_limit: non_empty(&fields.mem_limit),
            disk_size: non_empty(&fields.disk_size),
            gpu_count: parse_int("gpu_count", &fields.gpu_count),
            dimension: parse_int("dimension", &fields.dimension),
            vector_count: parse_int("vector_count", &fields.vector_count),
            index_limit: parse_int("index_limit", &fields.index_limit),
            gitlab_url: non_empty(&fields.gitlab_url),
        }
    }
}

/// Body of `DELETE /clusters`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRef {
    pub namespace: String,
}

/// Body of `POST /clusters/scale`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleRequest {
    pub namespace: String,
    pub replicas: u32,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse an integer field; anything that isn't an integer counts as absent
fn parse_int(field: &str, value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Ignoring non-numeric value for {}: {:?}", field, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required() -> ClusterFields {
        ClusterFields {
            tenant_org_id: "org-1".to_string(),
            user: "alice".to_string(),
            service_name: "search".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_only_required_fields_serialized() {
        let spec = ClusterSpec::from_fields(&required());
        let body = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            body,
            json!({"tenant_org_id": "org-1", "user": "alice", "service_name": "search"})
        );
    }

    #[test]
    fn test_optional_fields_kept_when_present() {
        let fields = ClusterFields {
            namespace: "ns-a".to_string(),
            replicas: "3".to_string(),
            mem_limit: "2Gi".to_string(),
            gitlab_url: "https://git.example.com/a".to_string(),
            ..required()
        };
        let body = serde_json::to_value(ClusterSpec::from_fields(&fields)).unwrap();
        assert_eq!(body["namespace"], "ns-a");
        assert_eq!(body["replicas"], 3);
        assert_eq!(body["mem_limit"], "2Gi");
        assert_eq!(body["gitlab_url"], "https://git.example.com/a");
        assert!(body.get("cpu_request").is_none());
        assert!(body.get("gpu_count").is_none());
    }

    #[test]
    fn test_non_numeric_treated_as_absent() {
        let fields = ClusterFields {
            replicas: "three".to_string(),
            dimension: " 128 ".to_string(),
            ..required()
        };
        let spec = ClusterSpec::from_fields(&fields);
        assert_eq!(spec.replicas, None);
        assert_eq!(spec.dimension, Some(128));
    }

    #[test]
    fn test_zero_is_not_omitted() {
        let fields = ClusterFields {
            gpu_count: "0".to_string(),
            ..required()
        };
        let body = serde_json::to_value(ClusterSpec::from_fields(&fields)).unwrap();
        assert_eq!(body["gpu_count"], 0);
    }
}

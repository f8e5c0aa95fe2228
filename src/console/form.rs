//! Form State
//!
//! Text inputs for each console form and the focus/editing logic behind them.

use crate::api::model::ClusterFields;

/// The five console forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Create,
    Delete,
    List,
    Details,
    Scale,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::Create,
        FormKind::Delete,
        FormKind::List,
        FormKind::Details,
        FormKind::Scale,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Create Cluster",
            Self::Delete => "Delete Cluster",
            Self::List => "List Clusters",
            Self::Details => "Cluster Details",
            Self::Scale => "Scale Cluster",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A single labelled input
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Shown greyed out while the field is empty
    pub placeholder: &'static str,
}

impl FormField {
    fn required(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            required: true,
            placeholder: "",
        }
    }

    fn optional(key: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            required: false,
            placeholder,
        }
    }
}

/// Inputs of one form plus which one has focus
#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::Create => vec![
                FormField::required("tenant_org_id", "Tenant org ID"),
                FormField::required("user", "User"),
                FormField::required("service_name", "Service name"),
                FormField::optional("namespace", "Namespace", "server default"),
                FormField::optional("replicas", "Replicas", "e.g. 3"),
                FormField::optional("cpu_request", "CPU request", "e.g. 500m"),
                FormField::optional("cpu_limit", "CPU limit", "e.g. 2"),
                FormField::optional("mem_request", "Memory request", "e.g. 1Gi"),
                FormField::optional("mem_limit", "Memory limit", "e.g. 2Gi"),
                FormField::optional("disk_size", "Disk size", "e.g. 10Gi"),
                FormField::optional("gpu_count", "GPU count", "e.g. 0"),
                FormField::optional("dimension", "Vector dimension", "e.g. 128"),
                FormField::optional("vector_count", "Vector count", "e.g. 10000"),
                FormField::optional("index_limit", "Index limit", "e.g. 10"),
                FormField::optional("gitlab_url", "Gitlab URL", "optional"),
            ],
            FormKind::Delete | FormKind::Details => {
                vec![FormField::required("namespace", "Namespace")]
            }
            FormKind::Scale => vec![
                FormField::required("namespace", "Namespace"),
                FormField::required("replicas", "Replicas"),
            ],
            FormKind::List => Vec::new(),
        };

        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Value of a field, empty if the form has no such field
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.to_string();
        }
    }

    pub fn focus_next(&mut self) {
        if self.has_fields() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if self.has_fields() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn clear_focused(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.clear();
        }
    }

    /// Empty every field and move focus back to the first one
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.value.is_empty())
    }

    /// Snapshot of the create form's inputs
    pub fn cluster_fields(&self) -> ClusterFields {
        ClusterFields {
            tenant_org_id: self.value("tenant_org_id").to_string(),
            user: self.value("user").to_string(),
            service_name: self.value("service_name").to_string(),
            namespace: self.value("namespace").to_string(),
            replicas: self.value("replicas").to_string(),
            cpu_request: self.value("cpu_request").to_string(),
            cpu_limit: self.value("cpu_limit").to_string(),
            mem_request: self.value("mem_request").to_string(),
            mem_limit: self.value("mem_limit").to_string(),
            disk_size: self.value("disk_size").to_string(),
            gpu_count: self.value("gpu_count").to_string(),
            dimension: self.value("dimension").to_string(),
            vector_count: self.value("vector_count").to_string(),
            index_limit: self.value("index_limit").to_string(),
            gitlab_url: self.value("gitlab_url").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cycle() {
        assert_eq!(FormKind::Create.next(), FormKind::Delete);
        assert_eq!(FormKind::Scale.next(), FormKind::Create);
        assert_eq!(FormKind::Create.previous(), FormKind::Scale);
    }

    #[test]
    fn test_editing_and_focus() {
        let mut form = FormState::new(FormKind::Scale);
        form.insert_char('n');
        form.insert_char('s');
        form.focus_next();
        form.insert_char('4');
        assert_eq!(form.value("namespace"), "ns");
        assert_eq!(form.value("replicas"), "4");

        form.backspace();
        assert_eq!(form.value("replicas"), "");
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_reset_clears_all() {
        let mut form = FormState::new(FormKind::Create);
        form.set("tenant_org_id", "org");
        form.set("gitlab_url", "https://x");
        form.focus = 5;
        form.reset();
        assert!(form.is_blank());
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_list_form_has_no_fields() {
        let mut form = FormState::new(FormKind::List);
        form.focus_next();
        form.insert_char('x');
        assert!(!form.has_fields());
        assert_eq!(form.value("namespace"), "");
    }

    #[test]
    fn test_cluster_fields_snapshot() {
        let mut form = FormState::new(FormKind::Create);
        form.set("user", "bob");
        form.set("index_limit", "7");
        let fields = form.cluster_fields();
        assert_eq!(fields.user, "bob");
        assert_eq!(fields.index_limit, "7");
        assert_eq!(fields.tenant_org_id, "");
    }
}

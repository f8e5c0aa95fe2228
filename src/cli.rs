//! Command-line interface
//!
//! Without a subcommand tcluster starts the terminal UI. Each subcommand
//! runs one console operation, prints what the status area would show and
//! exits.

use crate::api::client::ClusterClient;
use crate::api::model::ClusterFields;
use crate::console::ops::{self, Outcome, Submission};
use crate::console::StatusKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use tracing::Level;

/// Terminal console for a remote cluster management API
#[derive(Parser, Debug)]
#[command(name = "tcluster", version, about, long_about = None)]
pub struct Args {
    /// Base URL of the cluster API (overrides the config file)
    #[arg(long, env = "TCLUSTER_API_URL")]
    pub api_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a cluster
    Create(CreateArgs),
    /// Delete the cluster in a namespace
    Delete { namespace: String },
    /// List all clusters
    List,
    /// Show one cluster
    Get { namespace: String },
    /// Change the replica count of a cluster
    Scale { namespace: String, replicas: String },
    /// Check that the API answers
    Health,
    /// Persist settings to the config file
    Config {
        /// API base URL to store
        #[arg(long)]
        api_url: Option<String>,
        /// Seconds before finished results hide in the UI
        #[arg(long)]
        status_timeout_secs: Option<u64>,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    #[arg(long)]
    pub tenant_org_id: String,
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub service_name: String,
    #[arg(long)]
    pub namespace: Option<String>,
    #[arg(long)]
    pub replicas: Option<String>,
    #[arg(long)]
    pub cpu_request: Option<String>,
    #[arg(long)]
    pub cpu_limit: Option<String>,
    #[arg(long)]
    pub mem_request: Option<String>,
    #[arg(long)]
    pub mem_limit: Option<String>,
    #[arg(long)]
    pub disk_size: Option<String>,
    #[arg(long)]
    pub gpu_count: Option<String>,
    #[arg(long)]
    pub dimension: Option<String>,
    #[arg(long)]
    pub vector_count: Option<String>,
    #[arg(long)]
    pub index_limit: Option<String>,
    #[arg(long)]
    pub gitlab_url: Option<String>,
}

impl CreateArgs {
    pub fn to_fields(&self) -> ClusterFields {
        // numeric flags stay text; ClusterSpec decides what parses
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        ClusterFields {
            tenant_org_id: self.tenant_org_id.clone(),
            user: self.user.clone(),
            service_name: self.service_name.clone(),
            namespace: self.namespace.clone().unwrap_or_default(),
            replicas: text(&self.replicas),
            cpu_request: self.cpu_request.clone().unwrap_or_default(),
            cpu_limit: self.cpu_limit.clone().unwrap_or_default(),
            mem_request: self.mem_request.clone().unwrap_or_default(),
            mem_limit: self.mem_limit.clone().unwrap_or_default(),
            disk_size: self.disk_size.clone().unwrap_or_default(),
            gpu_count: text(&self.gpu_count),
            dimension: text(&self.dimension),
            vector_count: text(&self.vector_count),
            index_limit: text(&self.index_limit),
            gitlab_url: self.gitlab_url.clone().unwrap_or_default(),
        }
    }
}

impl Command {
    /// The console submission this command runs, if it is one
    pub fn submission(&self) -> Option<Submission> {
        match self {
            Command::Create(args) => Some(Submission::Create(args.to_fields())),
            Command::Delete { namespace } => Some(Submission::Delete {
                namespace: namespace.clone(),
            }),
            Command::List => Some(Submission::List),
            Command::Get { namespace } => Some(Submission::Details {
                namespace: namespace.clone(),
            }),
            Command::Scale {
                namespace,
                replicas,
            } => Some(Submission::Scale {
                namespace: namespace.clone(),
                replicas: replicas.clone(),
            }),
            Command::Health | Command::Config { .. } => None,
        }
    }
}

/// Run a one-shot operation and print the result.
/// Returns false if the operation ended in an error.
pub async fn run_once<W: Write>(
    client: &ClusterClient,
    submission: &Submission,
    out: &mut W,
) -> std::io::Result<bool> {
    let outcome = ops::execute(client, submission).await;
    print_outcome(&outcome, out)?;
    Ok(outcome.update.kind != StatusKind::Error)
}

/// Probe `/health` and print the result
pub async fn run_health<W: Write>(client: &ClusterClient, out: &mut W) -> std::io::Result<bool> {
    match client.health().await {
        Ok(()) => {
            writeln!(out, "API reachable at {}", client.base_url())?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "API at {} not reachable: {}", client.base_url(), e)?;
            Ok(false)
        }
    }
}

pub fn print_outcome<W: Write>(outcome: &Outcome, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{} {}", outcome.update.kind.icon(), outcome.update.message)?;
    if let Some(detail) = &outcome.update.detail {
        writeln!(out, "{}", detail)?;
    }
    Ok(())
}

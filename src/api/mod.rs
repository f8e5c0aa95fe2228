//! Cluster API interaction module
//!
//! # Module Structure
//!
//! - [`model`] - Request payloads (cluster spec, namespace ref, scale)
//! - [`http`] - Transport seam and the reqwest implementation
//! - [`client`] - Typed calls for each endpoint
//!
//! # Example
//!
//! ```ignore
//! use tcluster::api::client::ClusterClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ClusterClient::new("http://localhost:8080")?;
//!     let clusters = client.list().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod model;

//! GCP API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Application Default Credentials, static tokens, default project lookup
//! - [`client`] - Main GCP client and per-service URL builders
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use gcpdraw::gcp::client::GcpClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GcpClient::new("my-project")?;
//!     let networks = client.get(&client.compute_global_url("networks")).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;

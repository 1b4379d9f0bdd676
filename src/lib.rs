//! gcpdraw - render a GCP project's inventory as a draw.io diagram
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`inventory::collect`] lists every category through an
//!    [`inventory::InventorySource`] (normally [`gcp::client::GcpClient`]).
//! 2. [`diagram::build`] lays the records out on a fixed grid.
//! 3. [`diagram::to_xml`] serializes the result as an `mxfile` document.

pub mod config;
pub mod diagram;
pub mod gcp;
pub mod inventory;
pub mod logging;

/// Version injected at compile time via GCPDRAW_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("GCPDRAW_VERSION") {
    Some(v) => v,
    None => "dev",
};

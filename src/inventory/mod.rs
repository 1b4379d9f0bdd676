//! Inventory collection
//!
//! # Architecture
//!
//! - [`registry`] - Category definitions loaded from embedded JSON
//! - [`dispatch`] - Maps SDK method names to concrete REST API calls
//! - [`fetcher`] - Paginated fetch of one category through [`GcpClient`](crate::gcp::client::GcpClient)
//! - [`record`] - Typed records parsed from the raw items
//! - [`collector`] - Failure-isolated collection of every category

pub mod collector;
mod dispatch;
pub mod fetcher;
pub mod record;
pub mod registry;

use anyhow::Result;
use serde_json::Value;

pub use collector::{collect, CollectOptions, Collection};
pub use record::{Bucket, IdentityProvider, Instance, Network, ResourceRecord, Role, Tags};
pub use registry::Category;

/// Anything that can list the raw items of a category
#[allow(async_fn_in_trait)]
pub trait InventorySource {
    async fn list(&self, category: Category) -> Result<Vec<Value>>;
}

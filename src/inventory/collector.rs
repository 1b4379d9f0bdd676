//! Resource Collector
//!
//! Gathers every category from an [`InventorySource`]. A failing category
//! is logged and left empty; it never aborts the other fetches.

use super::record::{Bucket, IdentityProvider, Instance, Network, ResourceRecord, Role};
use super::registry::{get_category, Category};
use super::InventorySource;
use crate::gcp::http::format_gcp_error;

/// Roles handed to the diagram after filtering
pub const MAX_COLLECTED_ROLES: usize = 10;

/// Default prefix of provider-managed role IDs
pub const DEFAULT_RESERVED_ROLE_PREFIX: &str = "goog";

/// Collector settings
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Roles whose label starts with this prefix are dropped
    pub reserved_role_prefix: String,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            reserved_role_prefix: DEFAULT_RESERVED_ROLE_PREFIX.to_string(),
        }
    }
}

/// Inventory of one project, in API response order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub networks: Vec<Network>,
    pub instances: Vec<Instance>,
    pub buckets: Vec<Bucket>,
    pub roles: Vec<Role>,
    pub identity_providers: Vec<IdentityProvider>,
}

impl Collection {
    /// Number of records collected for a category
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Networks => self.networks.len(),
            Category::Instances => self.instances.len(),
            Category::Buckets => self.buckets.len(),
            Category::Roles => self.roles.len(),
            Category::IdentityProviders => self.identity_providers.len(),
        }
    }
}

/// Collect all categories, sequentially
pub async fn collect<S: InventorySource>(source: &S, options: &CollectOptions) -> Collection {
    let networks = fetch_records::<Network, _>(source).await;
    let instances = fetch_records::<Instance, _>(source).await;
    let buckets = fetch_records::<Bucket, _>(source).await;
    let roles = filter_roles(
        fetch_records::<Role, _>(source).await,
        &options.reserved_role_prefix,
    );
    let identity_providers = fetch_records::<IdentityProvider, _>(source).await;

    Collection {
        networks,
        instances,
        buckets,
        roles,
        identity_providers,
    }
}

/// Fetch and parse one category, degrading to empty on any error
async fn fetch_records<R: ResourceRecord, S: InventorySource>(source: &S) -> Vec<R> {
    let category = R::CATEGORY;
    let Some(def) = get_category(category) else {
        tracing::error!("No definition for category {}", category);
        return Vec::new();
    };

    match source.list(category).await {
        Ok(items) => {
            let records: Vec<R> = items.iter().map(|item| R::from_json(item, def)).collect();
            tracing::info!("Fetched {} {}", records.len(), def.display_name);
            records
        }
        Err(e) => {
            tracing::error!(
                "Error fetching {}: {} ({:#})",
                def.display_name,
                format_gcp_error(&e),
                e
            );
            Vec::new()
        }
    }
}

/// Drop provider-managed roles, then keep the first [`MAX_COLLECTED_ROLES`]
pub fn filter_roles(roles: Vec<Role>, reserved_prefix: &str) -> Vec<Role> {
    roles
        .into_iter()
        .filter(|role| reserved_prefix.is_empty() || !role.label.starts_with(reserved_prefix))
        .take(MAX_COLLECTED_ROLES)
        .collect()
}

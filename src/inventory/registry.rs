//! Category Registry - Load inventory category definitions from JSON
//!
//! Each diagram category maps to one list call on a GCP service. The
//! definitions are embedded at compile time so adding a field path or
//! query parameter doesn't need code changes.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Embedded category definitions (compiled into the binary)
const CATEGORY_FILE: &str = include_str!("../resources/inventory.json");

/// Inventory category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Networks,
    Instances,
    Buckets,
    Roles,
    IdentityProviders,
}

impl Category {
    /// All categories in collection order
    pub const ALL: [Category; 5] = [
        Category::Networks,
        Category::Instances,
        Category::Buckets,
        Category::Roles,
        Category::IdentityProviders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Networks => "networks",
            Self::Instances => "instances",
            Self::Buckets => "buckets",
            Self::Roles => "roles",
            Self::IdentityProviders => "identity_providers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub display_name: String,
    pub service: String,
    pub sdk_method: String,
    #[serde(default)]
    pub sdk_method_params: Value,
    pub response_path: String,
    pub id_field: String,
    pub name_field: String,
}

/// Root structure of resources/inventory.json
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub categories: HashMap<Category, CategoryDef>,
}

static REGISTRY: OnceLock<InventoryConfig> = OnceLock::new();

/// Get the category registry (parsed from embedded JSON on first access)
pub fn get_registry() -> &'static InventoryConfig {
    REGISTRY.get_or_init(|| {
        serde_json::from_str(CATEGORY_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded inventory JSON: {}", e))
    })
}

/// Get a category definition
pub fn get_category(category: Category) -> Option<&'static CategoryDef> {
    get_registry().categories.get(&category)
}

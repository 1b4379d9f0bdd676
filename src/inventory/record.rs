//! Typed inventory records parsed from GCP list responses.

use super::registry::{Category, CategoryDef};
use serde_json::Value;
use std::collections::BTreeMap;

/// Resource tags (GCP labels), ordered for deterministic output
pub type Tags = BTreeMap<String, String>;

/// Tag key holding an instance's display name
pub const NAME_TAG: &str = "Name";

/// Fallback for missing identifier fields
const UNKNOWN: &str = "unknown";

/// A record of one inventory category
pub trait ResourceRecord: Sized {
    const CATEGORY: Category;

    /// Build a record from one raw list item
    fn from_json(item: &Value, def: &CategoryDef) -> Self;

    fn id(&self) -> &str;

    /// Human-readable label
    fn label(&self) -> &str;

    /// Variant-specific status or type field
    fn status(&self) -> &str;

    fn tags(&self) -> &Tags;
}

/// VPC network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    pub label: String,
    pub cidr: String,
    pub tags: Tags,
}

/// Compute Engine VM instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub id: String,
    pub label: String,
    pub machine_type: String,
    pub status: String,
    pub tags: Tags,
}

impl Instance {
    /// Stopped instances are drawn in a different colour
    pub fn is_stopped(&self) -> bool {
        self.status == "stopped"
    }
}

/// Cloud Storage bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: String,
    pub label: String,
    pub location: String,
    pub tags: Tags,
}

/// IAM custom role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub label: String,
    pub stage: String,
    pub tags: Tags,
}

/// Workload identity pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProvider {
    pub id: String,
    pub label: String,
    pub state: String,
    pub tags: Tags,
}

macro_rules! record_accessors {
    ($status:ident) => {
        fn id(&self) -> &str {
            &self.id
        }

        fn label(&self) -> &str {
            &self.label
        }

        fn status(&self) -> &str {
            &self.$status
        }

        fn tags(&self) -> &Tags {
            &self.tags
        }
    };
}

impl ResourceRecord for Network {
    const CATEGORY: Category = Category::Networks;

    fn from_json(item: &Value, def: &CategoryDef) -> Self {
        let cidr = str_field(item, "IPv4Range").unwrap_or_else(|| {
            match item.get("autoCreateSubnetworks").and_then(|v| v.as_bool()) {
                Some(true) => "auto-subnets".to_string(),
                Some(false) => "custom-subnets".to_string(),
                None => "N/A".to_string(),
            }
        });

        Self {
            id: id_field(item, def),
            label: label_field(item, def),
            cidr,
            tags: labels(item),
        }
    }

    record_accessors!(cidr);
}

impl ResourceRecord for Instance {
    const CATEGORY: Category = Category::Instances;

    fn from_json(item: &Value, def: &CategoryDef) -> Self {
        let label = label_field(item, def);

        let mut tags = labels(item);
        if !label.is_empty() {
            tags.insert(NAME_TAG.to_string(), label.clone());
        }

        let machine_type = str_field(item, "machineType")
            .map(|t| short_name(&t))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            id: id_field(item, def),
            label,
            machine_type,
            status: normalize_instance_status(str_field(item, "status").as_deref()),
            tags,
        }
    }

    record_accessors!(status);
}

impl ResourceRecord for Bucket {
    const CATEGORY: Category = Category::Buckets;

    fn from_json(item: &Value, def: &CategoryDef) -> Self {
        Self {
            id: id_field(item, def),
            label: label_field(item, def),
            location: str_field(item, "location")
                .map(|l| l.to_lowercase())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            tags: labels(item),
        }
    }

    record_accessors!(location);
}

impl ResourceRecord for Role {
    const CATEGORY: Category = Category::Roles;

    fn from_json(item: &Value, def: &CategoryDef) -> Self {
        Self {
            id: id_field(item, def),
            label: label_field(item, def),
            stage: str_field(item, "stage").unwrap_or_else(|| "GA".to_string()),
            tags: Tags::new(),
        }
    }

    record_accessors!(stage);
}

impl ResourceRecord for IdentityProvider {
    const CATEGORY: Category = Category::IdentityProviders;

    fn from_json(item: &Value, def: &CategoryDef) -> Self {
        let id = id_field(item, def);
        let label = str_field(item, &def.name_field).unwrap_or_else(|| short_name(&id));

        Self {
            id,
            label,
            state: str_field(item, "state").unwrap_or_else(|| UNKNOWN.to_string()),
            tags: Tags::new(),
        }
    }

    record_accessors!(state);
}

/// Map a Compute Engine status to the lowercase state shown on the diagram.
/// `TERMINATED` is what the API reports for a stopped VM.
pub fn normalize_instance_status(status: Option<&str>) -> String {
    match status {
        Some("TERMINATED") => "stopped".to_string(),
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => UNKNOWN.to_string(),
    }
}

/// Extract short name from a GCP resource URL or path
/// e.g., "projects/p/roles/deployer" -> "deployer"
pub fn short_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn str_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_field(item: &Value, def: &CategoryDef) -> String {
    str_field(item, &def.id_field).unwrap_or_else(|| UNKNOWN.to_string())
}

fn label_field(item: &Value, def: &CategoryDef) -> String {
    str_field(item, &def.name_field)
        .map(|name| short_name(&name))
        .unwrap_or_default()
}

fn labels(item: &Value) -> Tags {
    item.get("labels")
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

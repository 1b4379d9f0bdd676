//! Inventory Fetcher
//!
//! Fetches the raw items of one category from GCP, following pagination.

use super::dispatch;
use super::registry::{get_category, Category, CategoryDef};
use super::InventorySource;
use crate::gcp::client::GcpClient;
use anyhow::Result;
use serde_json::Value;

/// Result of paginated fetch
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<String>,
}

impl InventorySource for GcpClient {
    async fn list(&self, category: Category) -> Result<Vec<Value>> {
        fetch_category(category, self).await
    }
}

/// Fetch all items of a category (auto-paginate)
pub async fn fetch_category(category: Category, client: &GcpClient) -> Result<Vec<Value>> {
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let result = fetch_category_paginated(category, client, page_token.as_deref()).await?;
        all_items.extend(result.items);

        if result.next_token.is_none() {
            break;
        }
        page_token = result.next_token;
    }

    Ok(all_items)
}

/// Fetch one page of a category
pub async fn fetch_category_paginated(
    category: Category,
    client: &GcpClient,
    page_token: Option<&str>,
) -> Result<PaginatedResult> {
    let Some(def) = get_category(category) else {
        return Err(anyhow::anyhow!("Unknown category: {}", category));
    };

    let params = build_params(def, page_token);

    let response =
        dispatch::invoke_sdk(&def.service, &def.sdk_method, client, &params).await?;

    let items = extract_items(&response, &def.response_path);

    let next_token = response
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(PaginatedResult { items, next_token })
}

/// Registry params plus the page token, if any
fn build_params(def: &CategoryDef, page_token: Option<&str>) -> Value {
    let mut params = def.sdk_method_params.clone();
    if !params.is_object() {
        params = Value::Object(serde_json::Map::new());
    }

    if let (Value::Object(map), Some(token)) = (&mut params, page_token) {
        map.insert("pageToken".to_string(), Value::String(token.to_string()));
    }

    params
}

/// Extract the item array at a dot-separated response path.
/// GCP omits the list field entirely when there is nothing to return.
pub fn extract_items(response: &Value, path: &str) -> Vec<Value> {
    if path.is_empty() {
        return response.as_array().cloned().unwrap_or_default();
    }

    let mut current = response;
    for part in path.split('.') {
        current = match current.get(part) {
            Some(v) => v,
            None => return vec![],
        };
    }

    current.as_array().cloned().unwrap_or_default()
}

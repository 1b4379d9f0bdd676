//! SDK Dispatch
//!
//! Maps the SDK method names used in the category registry to GCP REST calls.

use crate::gcp::client::GcpClient;
use anyhow::Result;
use serde_json::Value;

/// Invoke a GCP SDK method
pub async fn invoke_sdk(
    service: &str,
    method: &str,
    client: &GcpClient,
    params: &Value,
) -> Result<Value> {
    tracing::debug!("invoke_sdk: service={}, method={}", service, method);

    match service {
        "compute" => invoke_compute(method, client, params).await,
        "storage" => invoke_storage(method, client, params).await,
        "iam" => invoke_iam(method, client, params).await,
        _ => Err(anyhow::anyhow!("Unknown service: {}", service)),
    }
}

// =============================================================================
// Compute Engine
// =============================================================================

async fn invoke_compute(method: &str, client: &GcpClient, params: &Value) -> Result<Value> {
    match method {
        "list_networks" => {
            let url = add_query_params(&client.compute_global_url("networks"), params);
            client.get(&url).await
        }
        "list_instances" => {
            let url = add_query_params(&client.compute_aggregated_url("instances"), params);
            let response = client.get(&url).await?;
            Ok(flatten_aggregated_response(response))
        }
        _ => Err(anyhow::anyhow!("Unknown compute method: {}", method)),
    }
}

// =============================================================================
// Cloud Storage
// =============================================================================

async fn invoke_storage(method: &str, client: &GcpClient, params: &Value) -> Result<Value> {
    match method {
        "list_buckets" => {
            let url = format!(
                "{}?project={}",
                client.storage_url("b"),
                urlencoding::encode(&client.project_id)
            );
            let url = add_query_params(&url, params);
            client.get(&url).await
        }
        _ => Err(anyhow::anyhow!("Unknown storage method: {}", method)),
    }
}

// =============================================================================
// IAM
// =============================================================================

async fn invoke_iam(method: &str, client: &GcpClient, params: &Value) -> Result<Value> {
    match method {
        "list_roles" => {
            let url = add_query_params(&client.iam_project_url("roles"), params);
            client.get(&url).await
        }
        "list_workload_identity_pools" => {
            let url = add_query_params(
                &client.iam_project_url("locations/global/workloadIdentityPools"),
                params,
            );
            client.get(&url).await
        }
        _ => Err(anyhow::anyhow!("Unknown iam method: {}", method)),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Append string (or string array) params as query parameters
fn add_query_params(url: &str, params: &Value) -> String {
    let Value::Object(map) = params else {
        return url.to_string();
    };

    let mut query_parts: Vec<String> = Vec::new();

    for (key, value) in map {
        match value {
            Value::String(s) => {
                query_parts.push(format!("{}={}", key, urlencoding::encode(s)));
            }
            Value::Array(arr) => {
                for item in arr {
                    if let Value::String(s) = item {
                        query_parts.push(format!("{}={}", key, urlencoding::encode(s)));
                    }
                }
            }
            _ => {}
        }
    }

    if query_parts.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query_parts.join("&"))
    } else {
        format!("{}?{}", url, query_parts.join("&"))
    }
}

/// Flatten an aggregated API response into a standard list response.
/// Aggregated responses have format: { "items": { "zones/us-central1-a": { "instances": [...] }, ... } }
/// We flatten to: { "items": [...all instances...], "nextPageToken": ... }
fn flatten_aggregated_response(response: Value) -> Value {
    let next_token = response.get("nextPageToken").cloned();

    let mut all_items: Vec<Value> = Vec::new();

    if let Some(items) = response.get("items").and_then(|v| v.as_object()) {
        for zone_data in items.values() {
            let Some(obj) = zone_data.as_object() else {
                continue;
            };
            for (key, value) in obj {
                // Zones without resources only carry a warning
                if key == "warning" {
                    continue;
                }
                if let Some(arr) = value.as_array() {
                    all_items.extend(arr.iter().cloned());
                }
            }
        }
    }

    let mut flattened = serde_json::json!({ "items": all_items });
    if let Some(token) = next_token {
        flattened["nextPageToken"] = token;
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_query_params() {
        let params = json!({ "maxResults": "500", "pageToken": "a b" });
        let url = add_query_params("https://x/instances", &params);
        assert_eq!(url, "https://x/instances?maxResults=500&pageToken=a%20b");

        let url = add_query_params("https://x/b?project=p", &json!({ "projection": "noAcl" }));
        assert_eq!(url, "https://x/b?project=p&projection=noAcl");
    }

    #[test]
    fn test_add_query_params_ignores_non_objects() {
        assert_eq!(add_query_params("https://x", &Value::Null), "https://x");
    }

    #[test]
    fn test_flatten_aggregated_response() {
        let response = json!({
            "items": {
                "zones/us-central1-a": { "instances": [{ "name": "a" }, { "name": "b" }] },
                "zones/us-east1-b": { "warning": { "code": "NO_RESULTS_ON_PAGE" } },
                "zones/europe-west1-b": { "instances": [{ "name": "c" }] }
            },
            "nextPageToken": "next"
        });

        let flattened = flatten_aggregated_response(response);
        assert_eq!(flattened["items"].as_array().unwrap().len(), 3);
        assert_eq!(flattened["nextPageToken"], "next");
    }

    #[test]
    fn test_flatten_aggregated_response_keeps_zone_order() {
        let flattened = flatten_aggregated_response(json!({
            "items": {
                "zones/us-west1-a": { "instances": [{ "name": "first" }] },
                "zones/asia-east1-a": { "instances": [{ "name": "second" }] }
            }
        }));

        let names: Vec<&str> = flattened["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["name"].as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_flatten_aggregated_response_without_items() {
        let flattened = flatten_aggregated_response(json!({}));
        assert_eq!(flattened, json!({ "items": [] }));
    }
}

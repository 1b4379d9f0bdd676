//! Integration tests for inventory collection using wiremock
//!
//! These tests point a real `GcpClient` at mocked GCP endpoints and check
//! pagination, aggregated responses and per-category failure isolation.

use gcpdraw::gcp::auth::GcpCredentials;
use gcpdraw::gcp::client::{Endpoints, GcpClient};
use gcpdraw::inventory::fetcher::fetch_category;
use gcpdraw::inventory::{collect, Category, CollectOptions};
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "test-project";

fn client_for(server: &MockServer) -> GcpClient {
    GcpClient::with_credentials(
        PROJECT,
        GcpCredentials::from_static_token("test-token"),
        Endpoints::single_host(&server.uri()),
    )
    .expect("client should build")
}

async fn mount_json(server: &MockServer, url_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "message": "mocked failure" }
        })))
        .mount(server)
        .await;
}

mod fetch_tests {
    use super::*;

    /// Networks come straight from the `items` field
    #[tokio::test]
    async fn test_fetch_networks() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/compute/v1/projects/test-project/global/networks",
            json!({
                "items": [
                    { "name": "default", "autoCreateSubnetworks": true },
                    { "name": "legacy", "IPv4Range": "10.240.0.0/16" }
                ]
            }),
        )
        .await;

        let items = fetch_category(Category::Networks, &client_for(&server))
            .await
            .expect("fetch should succeed");

        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["IPv4Range"], "10.240.0.0/16");
    }

    /// Aggregated instance lists are flattened across zones
    #[tokio::test]
    async fn test_fetch_instances_aggregated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/compute/v1/projects/test-project/aggregated/instances"))
            .and(query_param("maxResults", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": {
                    "zones/us-central1-a": {
                        "instances": [{ "id": "1", "name": "web", "status": "RUNNING" }]
                    },
                    "zones/us-east1-b": {
                        "warning": { "code": "NO_RESULTS_ON_PAGE" }
                    },
                    "zones/us-west1-a": {
                        "instances": [{ "id": "2", "name": "db", "status": "TERMINATED" }]
                    }
                }
            })))
            .mount(&server)
            .await;

        let items = fetch_category(Category::Instances, &client_for(&server))
            .await
            .expect("fetch should succeed");

        assert_eq!(items.len(), 2);
    }

    /// Buckets are listed with the project as a query parameter
    #[tokio::test]
    async fn test_fetch_buckets_passes_project() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/v1/b"))
            .and(query_param("project", PROJECT))
            .and(query_param("projection", "noAcl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "name": "logs", "location": "US" }]
            })))
            .mount(&server)
            .await;

        let items = fetch_category(Category::Buckets, &client_for(&server))
            .await
            .expect("fetch should succeed");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "logs");
    }

    /// Pagination follows nextPageToken until it is absent
    #[tokio::test]
    async fn test_fetch_follows_page_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/test-project/roles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "roles": [{ "name": "projects/test-project/roles/first" }],
                "nextPageToken": "p2"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/projects/test-project/roles"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "roles": [{ "name": "projects/test-project/roles/second" }]
            })))
            .mount(&server)
            .await;

        let items = fetch_category(Category::Roles, &client_for(&server))
            .await
            .expect("fetch should succeed");

        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], "projects/test-project/roles/second");
    }

    /// Empty list responses omit the list field entirely
    #[tokio::test]
    async fn test_fetch_missing_list_field_is_empty() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/v1/projects/test-project/locations/global/workloadIdentityPools",
            json!({}),
        )
        .await;

        let items = fetch_category(Category::IdentityProviders, &client_for(&server))
            .await
            .expect("fetch should succeed");

        assert!(items.is_empty());
    }

    /// Non-success statuses surface as errors
    #[tokio::test]
    async fn test_fetch_403_is_error() {
        let server = MockServer::start().await;
        mount_status(&server, "/compute/v1/projects/test-project/global/networks", 403).await;

        let result = fetch_category(Category::Networks, &client_for(&server)).await;

        let err = result.expect_err("403 should fail");
        assert!(err.to_string().contains("403"));
    }

    /// Malformed JSON surfaces as an error
    #[tokio::test]
    async fn test_fetch_malformed_json_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/v1/b"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .mount(&server)
            .await;

        let result = fetch_category(Category::Buckets, &client_for(&server)).await;
        assert!(result.is_err());
    }
}

mod collect_tests {
    use super::*;

    /// A failing category degrades to empty without affecting the rest
    #[tokio::test]
    async fn test_collect_isolates_failures() {
        let server = MockServer::start().await;

        mount_json(
            &server,
            "/compute/v1/projects/test-project/global/networks",
            json!({ "items": [{ "name": "prod-vpc", "IPv4Range": "10.0.0.0/16" }] }),
        )
        .await;
        mount_json(
            &server,
            "/compute/v1/projects/test-project/aggregated/instances",
            json!({
                "items": {
                    "zones/us-central1-a": {
                        "instances": [{
                            "id": "42",
                            "name": "web",
                            "machineType": "zones/us-central1-a/machineTypes/e2-small",
                            "status": "RUNNING"
                        }]
                    }
                }
            }),
        )
        .await;
        mount_status(&server, "/storage/v1/b", 500).await;
        mount_status(&server, "/v1/projects/test-project/roles", 403).await;
        mount_json(
            &server,
            "/v1/projects/test-project/locations/global/workloadIdentityPools",
            json!({
                "workloadIdentityPools": [{
                    "name": "projects/123/locations/global/workloadIdentityPools/github",
                    "displayName": "GitHub",
                    "state": "ACTIVE"
                }]
            }),
        )
        .await;

        let collection = collect(&client_for(&server), &CollectOptions::default()).await;

        assert_eq!(collection.networks.len(), 1);
        assert_eq!(collection.networks[0].cidr, "10.0.0.0/16");
        assert_eq!(collection.instances.len(), 1);
        assert_eq!(collection.instances[0].machine_type, "e2-small");
        assert!(collection.buckets.is_empty());
        assert!(collection.roles.is_empty());
        assert_eq!(collection.identity_providers.len(), 1);
        assert_eq!(collection.identity_providers[0].label, "GitHub");
    }

    /// Reserved roles are filtered before the 10-role cut
    #[tokio::test]
    async fn test_collect_filters_reserved_roles() {
        let server = MockServer::start().await;

        let mut roles: Vec<serde_json::Value> = (0..4)
            .map(|i| json!({ "name": format!("projects/test-project/roles/googAgent{}", i) }))
            .collect();
        roles.extend(
            (0..12).map(|i| json!({ "name": format!("projects/test-project/roles/team{}", i) })),
        );
        mount_json(&server, "/v1/projects/test-project/roles", json!({ "roles": roles })).await;

        // Every other category fails outright (no mock mounted -> 404)
        let collection = collect(&client_for(&server), &CollectOptions::default()).await;

        assert_eq!(collection.roles.len(), 10);
        assert!(collection.roles.iter().all(|r| r.label.starts_with("team")));
        assert_eq!(collection.roles[0].label, "team0");
        assert!(collection.networks.is_empty());
        assert!(collection.instances.is_empty());
    }
}

//! Unusable Application Default Credentials must not stop the run
//!
//! Kept in its own test binary because it points
//! `GOOGLE_APPLICATION_CREDENTIALS` at a broken file for the whole process.

use chrono::{TimeZone, Utc};
use gcpdraw::diagram::{build, to_xml, DiagramOptions, CANVAS_ID};
use gcpdraw::gcp::client::GcpClient;
use gcpdraw::inventory::{collect, Category, CollectOptions};

#[tokio::test]
async fn test_broken_credentials_yield_title_only_diagram() {
    let dir = tempfile::tempdir().unwrap();
    let key_file = dir.path().join("key.json");
    std::fs::write(&key_file, "{ not a service account").unwrap();
    std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", &key_file);

    let client = GcpClient::new("demo-project").expect("client should build without credentials");

    let token = client.credentials.get_token().await;
    assert!(token.is_err());

    let collection = collect(&client, &CollectOptions::default()).await;
    for category in Category::ALL {
        assert_eq!(collection.count(category), 0);
    }

    let options = DiagramOptions {
        title: "GCP Infrastructure Diagram".to_string(),
        account: "demo-project".to_string(),
    };
    let diagram = build(&collection, &options);
    assert_eq!(diagram.nodes.len(), 1);
    assert_eq!(diagram.nodes[0].parent, CANVAS_ID);

    let modified = Utc.with_ymd_and_hms(2025, 11, 24, 0, 0, 0).unwrap();
    let xml = to_xml(&diagram, modified).unwrap();
    assert_eq!(xml.matches("<mxCell").count(), 3);
}

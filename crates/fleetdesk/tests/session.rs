use fdesk_domain::Credentials;
use fdesk_domain::config::ClientConfig;
use fdesk_http::testing::MockBackend;
use fleetdesk::{Fleetdesk, FleetdeskError};
use serde_json::json;

fn config_for(backend: &MockBackend, dir: &tempfile::TempDir) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = backend.base_url().to_owned();
    config.storage.path = dir.path().join("session.json");
    config
}

#[tokio::test]
async fn login_is_visible_to_every_slice_and_survives_reopen() {
    let backend = MockBackend::start().await;
    backend.on("POST", "/auth/login/", 200, json!({"access": "abc"}));
    backend.on("GET", "/vehicles/", 200, json!([]));
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&backend, &dir);

    let desk = Fleetdesk::open(&config).await.unwrap();
    desk.identity().login(&Credentials::new("admin", "pw")).await.unwrap();
    desk.fleet().list_vehicles(&Default::default()).await.unwrap();
    assert_eq!(backend.last_request().unwrap().authorization.as_deref(), Some("Bearer abc"));

    let reopened = Fleetdesk::open(&config).await.unwrap();
    assert!(reopened.identity().has_token());
}

#[tokio::test]
async fn memory_only_sessions_do_not_write_files() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&backend, &dir);
    config.storage.persist = false;

    let desk = Fleetdesk::open(&config).await.unwrap();
    assert!(!desk.store().is_persistent());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn bad_base_url_fails_to_open() {
    let mut config = ClientConfig::default();
    config.api.base_url = "::not-a-url::".to_owned();
    config.storage.persist = false;

    let err = Fleetdesk::open(&config).await.unwrap_err();
    assert!(matches!(err, FleetdeskError::Api { .. }));
}

#[tokio::test]
async fn overview_aggregates_concurrent_fetches() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/vehicles/",
        200,
        json!({"count": 2, "results": [{"id": 1, "status": "rented"}, {"id": 2, "status": "available"}]}),
    );
    backend.on(
        "GET",
        "/contracts/",
        200,
        json!([{"id": 1, "status": "active", "total_amount": "1000", "total_paid": "200", "deposit_amount": "100"}]),
    );
    backend.on("GET", "/job-cards/", 200, json!([{"id": 1, "status": "awaiting_parts"}]));
    backend.on("GET", "/inventory/summary/", 200, json!({"low_stock_count": 2}));

    let desk = Fleetdesk::with_client(backend.client(), fleetdesk::storage::LocalStore::in_memory());
    let overview = desk.overview().await;

    assert_eq!(overview.vehicles_total, 2);
    assert!((overview.fleet_utilization - 50.0).abs() < 1e-9);
    assert_eq!(overview.active_contracts, 1);
    assert!((overview.outstanding_balance - 700.0).abs() < 1e-9);
    assert_eq!(overview.open_job_cards, 1);
    assert_eq!(overview.low_stock_parts, 2);
}

#[tokio::test]
async fn overview_isolates_failing_fetches() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/vehicles/", 200, json!([{"id": 1, "status": "rented"}]));
    backend.on("GET", "/contracts/", 500, json!({"detail": "Database unavailable"}));
    backend.on("GET", "/job-cards/", 401, json!({"detail": "Token expired"}));

    let desk = Fleetdesk::with_client(backend.client(), fleetdesk::storage::LocalStore::in_memory());
    let overview = desk.overview().await;

    assert_eq!(overview.vehicles_total, 1);
    assert_eq!(overview.vehicles_in_use, 1);
    assert_eq!(overview.active_contracts, 0);
    assert_eq!(overview.open_job_cards, 0);
    assert_eq!(overview.low_stock_parts, 0);
    assert_eq!(backend.requests().len(), 4, "one call per panel, no retries");
}

#[tokio::test]
async fn overview_counts_every_page() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/vehicles/",
        200,
        json!({
            "count": 3,
            "next": format!("{}/vehicles/?page=2", backend.base_url()),
            "results": [{"id": 1, "status": "rented"}, {"id": 2, "status": "available"}]
        }),
    );
    backend.on(
        "GET",
        "/vehicles/?page=2",
        200,
        json!({"count": 3, "next": null, "results": [{"id": 3, "status": "rented"}]}),
    );
    backend.on(
        "GET",
        "/job-cards/",
        200,
        json!({
            "count": 2,
            "next": format!("{}/job-cards/?page=2", backend.base_url()),
            "results": [{"id": 1, "status": "completed"}]
        }),
    );
    backend.on(
        "GET",
        "/job-cards/?page=2",
        200,
        json!({"count": 2, "next": null, "results": [{"id": 2, "status": "in_progress"}]}),
    );

    let desk = Fleetdesk::with_client(backend.client(), fleetdesk::storage::LocalStore::in_memory());
    let overview = desk.overview().await;

    assert_eq!(overview.vehicles_total, 3);
    assert_eq!(overview.vehicles_in_use, 2);
    assert_eq!(overview.open_job_cards, 1);
    assert_eq!(backend.requests_to("GET", "/vehicles/").len(), 2);
}

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use fdesk_http::testing::MockBackend;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Runs the binary against `backend` with an isolated session file.
struct Harness {
    backend: MockBackend,
    dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        Self { backend: MockBackend::start().await, dir: tempfile::tempdir().unwrap() }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("fleetdesk");
        cmd.current_dir(self.dir.path())
            .env_remove("FLEETDESK_CONFIG")
            .env_remove("FLEETDESK_PASSWORD")
            .env_remove("RUST_LOG")
            .env("FLEET__API__BASE_URL", self.backend.base_url())
            .env("FLEET__STORAGE__PATH", self.dir.path().join("session.json"))
            .env("FLEET__LOG__LEVEL", "off");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self.cmd().arg("--json").args(args).assert().success().get_output().stdout.clone();
        serde_json::from_slice(&out).unwrap()
    }
}

#[test]
fn help_lists_every_command_group() {
    cargo_bin_cmd!("fleetdesk")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("contracts"))
        .stdout(predicate::str::contains("vehicles"))
        .stdout(predicate::str::contains("job-cards"))
        .stdout(predicate::str::contains("inventory"));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_persists_token_for_later_commands() {
    let h = Harness::start().await;
    h.backend.on(
        "POST",
        "/auth/login/",
        200,
        json!({"access": "abc", "user": {"id": 1, "username": "amina", "first_name": "Amina", "last_name": "Odhiambo"}}),
    );
    h.backend.on("GET", "/auth/me/", 200, json!({"id": 1, "username": "amina", "role": "admin"}));

    h.cmd()
        .args(["login", "--username", "amina", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Amina Odhiambo."));

    h.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("amina").and(predicate::str::contains("admin")));

    let me = h.backend.requests_to("GET", "/auth/me/");
    assert_eq!(me[0].authorization.as_deref(), Some("Bearer abc"));
    let login = h.backend.requests_to("POST", "/auth/login/");
    assert_eq!(login[0].authorization, None);
    assert_eq!(login[0].body.as_ref().unwrap()["password"], "pw");
}

#[tokio::test(flavor = "multi_thread")]
async fn login_reads_password_from_stdin() {
    let h = Harness::start().await;
    h.backend.on("POST", "/auth/login/", 200, json!({"token": "xyz"}));

    h.cmd()
        .args(["login", "-u", "amina"])
        .write_stdin("from-stdin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as amina."));

    let login = h.backend.requests_to("POST", "/auth/login/");
    assert_eq!(login[0].body.as_ref().unwrap()["password"], "from-stdin");
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_reports_whether_a_session_existed() {
    let h = Harness::start().await;
    h.backend.on("POST", "/auth/login/", 200, json!({"access": "abc"}));

    h.cmd().args(["login", "-u", "amina", "-p", "pw"]).assert().success();
    h.cmd().arg("logout").assert().success().stdout("Logged out.\n");
    h.cmd().arg("logout").assert().success().stdout("No active session.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn vehicles_list_as_json_with_status_filter() {
    let h = Harness::start().await;
    h.backend.on(
        "GET",
        "/vehicles/",
        200,
        json!({"count": 2, "results": [
            {"id": 1, "make": "Toyota", "model": "Hilux", "status": "rented"},
            {"id": 2, "make": "Isuzu", "model": "D-Max", "status": "rented"}
        ]}),
    );

    let value = h.run_json(&["vehicles", "list", "--status", "rented"]);
    let vehicles = value.as_array().unwrap();
    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[1]["make"], "Isuzu");

    let request = h.backend.last_request().unwrap();
    assert_eq!(request.query_param("status").as_deref(), Some("rented"));
}

#[tokio::test(flavor = "multi_thread")]
async fn contracts_list_prints_one_line_per_contract() {
    let h = Harness::start().await;
    h.backend.on(
        "GET",
        "/contracts/",
        200,
        json!([
            {"id": 1, "contract_number": "C-001", "customer_name": "Amina", "status": "active"},
            {"id": 2, "contract_number": "C-002", "customer_name": "Brian", "status": "draft"}
        ]),
    );

    let out = h.cmd().args(["contracts", "list"]).assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().next().unwrap().contains("C-001"));
}

#[tokio::test(flavor = "multi_thread")]
async fn job_card_status_is_patched() {
    let h = Harness::start().await;
    h.backend.on(
        "PATCH",
        "/job-cards/5/",
        200,
        json!({"id": 5, "job_number": "JC-5", "status": "completed"}),
    );

    let value = h.run_json(&["job-cards", "status", "5", "completed"]);
    assert_eq!(value["status"], "completed");

    let patch = h.backend.requests_to("PATCH", "/job-cards/5/");
    assert_eq!(patch[0].body, Some(json!({"status": "completed"})));
}

#[tokio::test(flavor = "multi_thread")]
async fn users_deactivate_sends_flag() {
    let h = Harness::start().await;
    h.backend.on("PATCH", "/users/9/", 200, json!({"id": 9, "username": "kim", "is_active": false}));

    h.cmd()
        .args(["users", "deactivate", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive"));

    let patch = h.backend.requests_to("PATCH", "/users/9/");
    assert_eq!(patch[0].body, Some(json!({"is_active": false})));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_exits_with_login_hint() {
    let h = Harness::start().await;
    h.backend.on("GET", "/contracts/", 401, json!({"detail": "Token expired."}));

    h.cmd()
        .args(["contracts", "list"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Token expired."))
        .stderr(predicate::str::contains("fleetdesk login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_failure_exits_non_zero() {
    let h = Harness::start().await;
    h.backend.on("GET", "/inventory/summary/", 500, json!({"detail": "Database unavailable"}));

    h.cmd()
        .args(["inventory", "summary"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load inventory summary"))
        .stderr(predicate::str::contains("Database unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn overview_survives_failing_slices() {
    let h = Harness::start().await;
    h.backend.on("GET", "/vehicles/", 200, json!([{"id": 1, "status": "rented"}]));
    h.backend.on("GET", "/job-cards/", 500, json!({"detail": "boom"}));

    let value = h.run_json(&["overview"]);
    assert_eq!(value["vehicles_total"], 1);
    assert_eq!(value["vehicles_in_use"], 1);
    assert_eq!(value["open_job_cards"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn low_stock_parts_keep_search_and_read_every_page() {
    let h = Harness::start().await;
    h.backend.on(
        "GET",
        "/inventory/parts/",
        200,
        json!({
            "count": 3,
            "next": format!("{}/inventory/parts/?page=2&search=filter", h.backend.base_url()),
            "results": [
                {"id": 1, "name": "Oil filter", "quantity_in_stock": 9, "reorder_level": 2},
                {"id": 2, "name": "Air filter", "quantity_in_stock": 1, "reorder_level": 4}
            ]
        }),
    );
    h.backend.on(
        "GET",
        "/inventory/parts/?page=2&search=filter",
        200,
        json!({"count": 3, "next": null, "results": [
            {"id": 3, "name": "Fuel filter", "quantity_in_stock": 0, "reorder_level": 1}
        ]}),
    );

    let value = h.run_json(&["inventory", "parts", "--low-stock", "--search", "filter"]);
    let ids: Vec<i64> = value.as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [2, 3]);

    let first = &h.backend.requests_to("GET", "/inventory/parts/")[0];
    assert_eq!(first.query_param("search").as_deref(), Some("filter"));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    cargo_bin_cmd!("fleetdesk")
        .current_dir(dir.path())
        .env_remove("FLEETDESK_CONFIG")
        .arg("--config")
        .arg(&path)
        .arg("logout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

use fdesk_domain::{JobCardPayload, JobCardStatus, Priority};
use fdesk_garage::Garage;
use fdesk_http::ListQuery;
use fdesk_http::testing::MockBackend;
use serde_json::json;

fn card_json(status: &str) -> serde_json::Value {
    json!({
        "id": 21,
        "job_number": "JC-0021",
        "customer_name": "Walk-in",
        "status": status,
        "priority": "high",
        "labor_cost": "120.00",
        "parts": [
            {"part": 4, "quantity": 2, "unit_price": "15.50"},
            {"part": 9, "quantity": 1, "unit_price": 40}
        ]
    })
}

#[tokio::test]
async fn list_job_cards_parses_lines() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/job-cards/", 200, json!({"count": 1, "results": [card_json("in_progress")]}));

    let cards = Garage::new(backend.client()).list_job_cards(&ListQuery::new()).await.unwrap();
    assert!(cards[0].is_open());
    assert_eq!(cards[0].priority, Priority::High);
    assert!((cards[0].parts_total() - 71.0).abs() < 1e-9);
}

#[tokio::test]
async fn status_change_sends_only_status() {
    let backend = MockBackend::start().await;
    backend.on("PATCH", "/job-cards/21/", 200, card_json("completed"));

    let card = Garage::new(backend.client())
        .update_job_card_status(21, JobCardStatus::Completed)
        .await
        .unwrap();

    assert!(!card.is_open());
    assert_eq!(backend.last_request().unwrap().body, Some(json!({"status": "completed"})));
}

#[tokio::test]
async fn assign_technician_sends_only_technician() {
    let backend = MockBackend::start().await;
    backend.on("PATCH", "/job-cards/21/", 200, card_json("pending"));

    Garage::new(backend.client()).assign_technician(21, 5).await.unwrap();
    assert_eq!(backend.last_request().unwrap().body, Some(json!({"technician": 5})));
}

#[tokio::test]
async fn create_update_delete_round() {
    let backend = MockBackend::start().await;
    backend.on("POST", "/job-cards/", 201, card_json("pending"));
    backend.on("PUT", "/job-cards/21/", 200, card_json("pending"));
    backend.on_empty("DELETE", "/job-cards/21/", 204);

    let garage = Garage::new(backend.client());
    let payload = JobCardPayload {
        vehicle: Some(3),
        customer_name: "Walk-in".to_owned(),
        description: "Brake noise".to_owned(),
        priority: Priority::High,
        status: JobCardStatus::Pending,
        technician: None,
    };
    assert_eq!(garage.create_job_card(&payload).await.unwrap().job_number, "JC-0021");
    garage.update_job_card(21, &payload).await.unwrap();
    garage.delete_job_card(21).await.unwrap();

    let methods: Vec<String> = backend.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["POST", "PUT", "DELETE"]);
}

#[tokio::test]
async fn rejected_transition_surfaces_backend_detail() {
    let backend = MockBackend::start().await;
    backend.on("PATCH", "/job-cards/21/", 400, json!({"detail": "Cannot reopen a cancelled job card."}));

    let err = Garage::new(backend.client())
        .update_job_card_status(21, JobCardStatus::Pending)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Cannot reopen"));
}

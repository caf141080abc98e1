use chrono::NaiveDate;
use fdesk_domain::constants::TOKEN_KEYS;
use fdesk_domain::{
    Contract, ContractStatus, JobCard, JobCardStatus, Page, Part, Permissions, Priority, Role,
    TokenPair, User, Vehicle, VehicleStatus,
};
use serde_json::json;

#[test]
fn token_keys_are_looked_up_in_order() {
    assert_eq!(TOKEN_KEYS, ["access_token", "token", "auth_token"]);
}

#[test]
fn contract_tolerates_sparse_payloads() {
    let contract: Contract = serde_json::from_value(json!({
        "id": 7,
        "contract_number": "CN-0007",
        "total_amount": "1000.00",
        "total_paid": 200,
        "deposit_amount": "100",
        "status": "active",
        "start_date": "2024-03-01",
        "created_at": "2024-03-01T09:30:00Z",
        "some_new_field": { "nested": true }
    }))
    .unwrap();

    assert_eq!(contract.id, 7);
    assert_eq!(contract.status, ContractStatus::Active);
    assert_eq!(contract.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert!(contract.customer_name.is_empty());
    assert!((contract.collection_rate() - 30.0).abs() < 1e-9);
    assert!((contract.outstanding_balance() - 700.0).abs() < 1e-9);
    assert!(contract.is_active());
}

#[test]
fn unknown_status_values_do_not_fail() {
    let contract: Contract = serde_json::from_value(json!({ "status": "archived" })).unwrap();
    assert_eq!(contract.status, ContractStatus::Unknown);

    let vehicle: Vehicle = serde_json::from_value(json!({ "status": "stolen" })).unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Unknown);
}

#[test]
fn status_wire_names_round_trip_through_display() {
    assert_eq!(VehicleStatus::OutOfService.to_string(), "out_of_service");
    assert_eq!(serde_json::to_value(JobCardStatus::AwaitingParts).unwrap(), json!("awaiting_parts"));
    assert_eq!("in-progress".parse::<JobCardStatus>().unwrap(), JobCardStatus::InProgress);
    assert!("paused".parse::<JobCardStatus>().is_err());
}

#[test]
fn vehicle_derived_values() {
    let vehicle: Vehicle = serde_json::from_value(json!({
        "registration_number": "KDA 123A",
        "make": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "status": "rented",
        "service_interval_km": 5000,
        "mileage_since_service": 4000,
        "total_revenue": "4000.00",
        "total_expenses": "1000.00",
        "next_service_due": "2024-06-01"
    }))
    .unwrap();

    assert_eq!(vehicle.display_name(), "2021 Toyota Corolla (KDA 123A)");
    assert_eq!(vehicle.health_score(), 20);
    assert!((vehicle.profit_margin() - 75.0).abs() < 1e-9);
    assert!(vehicle.is_in_use());
    assert!(vehicle.is_service_due(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
    assert!(!vehicle.is_service_due(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
}

#[test]
fn job_card_parts_total_and_open_state() {
    let card: JobCard = serde_json::from_value(json!({
        "job_number": "JC-1",
        "status": "awaiting_parts",
        "parts": [
            { "part": 1, "quantity": 2, "unit_price": "15.50" },
            { "part": 2, "quantity": 1, "unit_price": 9 }
        ]
    }))
    .unwrap();

    assert!(card.is_open());
    assert!((card.parts_total() - 40.0).abs() < 1e-9);
}

#[test]
fn unknown_priority_does_not_fail() {
    let card: JobCard = serde_json::from_value(json!({ "job_number": "JC-9", "priority": "critical" }))
        .unwrap();
    assert_eq!(card.priority, Priority::Unknown);
    assert_eq!(card.priority.as_str(), "unknown");
}

#[test]
fn null_columns_fall_back_to_defaults() {
    let card: JobCard = serde_json::from_value(json!({
        "id": 3,
        "job_number": null,
        "customer_name": null,
        "status": null,
        "priority": null,
        "description": null,
        "parts": null
    }))
    .unwrap();
    assert_eq!(card.id, 3);
    assert!(card.job_number.is_empty() && card.parts.is_empty());
    assert_eq!((card.status, card.priority), (JobCardStatus::default(), Priority::Medium));

    let card: JobCard = serde_json::from_value(json!({
        "parts": [{ "part": null, "quantity": null, "unit_price": "4.00" }]
    }))
    .unwrap();
    assert_eq!(card.parts[0].quantity, 0);

    let user: User = serde_json::from_value(json!({
        "id": 2, "username": "kim", "email": null, "first_name": null, "is_active": null, "role": null
    }))
    .unwrap();
    assert!(user.email.is_empty() && !user.is_active);
    assert_eq!(user.role, Role::default());

    let part: Part = serde_json::from_value(json!({ "name": "Gasket", "quantity_in_stock": null }))
        .unwrap();
    assert_eq!(part.quantity_in_stock, 0);

    let vehicle: Vehicle = serde_json::from_value(json!({ "make": null, "mileage": null })).unwrap();
    assert!(vehicle.make.is_empty());
    assert_eq!(vehicle.mileage, 0);
}

#[test]
fn part_low_stock_is_inclusive() {
    let part = Part { quantity_in_stock: 5, reorder_level: 5, unit_cost: 2.5, ..Part::default() };
    assert!(part.is_low_stock());
    assert!((part.stock_value() - 12.5).abs() < 1e-9);

    let healthy = Part { quantity_in_stock: 6, ..part };
    assert!(!healthy.is_low_stock());
}

#[test]
fn permissions_parse_from_codes() {
    let user: User = serde_json::from_value(json!({
        "username": "amina",
        "role": "technician",
        "permissions": ["garage.view", "garage.manage", "time.travel"]
    }))
    .unwrap();

    let permissions = user.effective_permissions();
    assert!(permissions.contains(Permissions::VIEW_GARAGE | Permissions::MANAGE_GARAGE));
    assert!(!permissions.contains(Permissions::VIEW_FLEET));
    assert_eq!(
        serde_json::to_value(permissions).unwrap(),
        json!(["garage.view", "garage.manage"])
    );
}

#[test]
fn missing_permissions_fall_back_to_role() {
    let user: User = serde_json::from_value(json!({ "username": "root", "role": "admin" })).unwrap();
    assert_eq!(user.effective_permissions(), Permissions::ALL);
    assert_eq!(user.full_name(), "root");
    assert!(!Role::Manager.default_permissions().contains(Permissions::MANAGE_USERS));
}

#[test]
fn token_pair_accepts_alternate_field_names() {
    let pair: TokenPair = serde_json::from_value(json!({ "token": "abc" })).unwrap();
    assert_eq!(pair.access, "abc");
    assert!(pair.refresh.is_none());
    assert!(!format!("{pair:?}").contains("abc"));
}

#[test]
fn page_reports_next_link() {
    let page: Page<Part> = serde_json::from_value(json!({
        "count": 40,
        "next": "http://api/inventory/parts/?page=2",
        "previous": null,
        "results": [{ "id": 1 }]
    }))
    .unwrap();

    assert!(page.has_next());
    assert_eq!(page.results.len(), 1);
    assert_eq!(Page::from_items(vec![1, 2, 3]).count, 3);
}

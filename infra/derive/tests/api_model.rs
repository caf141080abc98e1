use fdesk_derive::api_model;
use serde_json::json;

#[api_model(defaults)]
#[derive(Default)]
struct Equipment {
    id: u64,
    name: String,
    serial_number: Option<String>,
}

#[api_model(strict)]
struct Credentials {
    username: String,
}

#[api_model(rename_all = "snake_case")]
enum Condition {
    Operational,
    UnderRepair,
}

#[test]
fn defaults_fill_missing_fields() {
    let parsed: Equipment = serde_json::from_value(json!({ "name": "Jack" })).unwrap();
    assert_eq!(parsed, Equipment { id: 0, name: "Jack".to_owned(), serial_number: None });
}

#[test]
fn unknown_fields_are_tolerated_by_default() {
    let parsed: Equipment =
        serde_json::from_value(json!({ "id": 3, "name": "Lift", "extra": true })).unwrap();
    assert_eq!(parsed.id, 3);
}

#[test]
fn strict_models_reject_unknown_fields() {
    let err = serde_json::from_value::<Credentials>(json!({ "username": "a", "role": "x" }));
    assert!(err.is_err());
    let ok: Credentials = serde_json::from_value(json!({ "username": "a" })).unwrap();
    assert_eq!(ok.clone().username, "a");
}

#[test]
fn enums_follow_rename_policy() {
    assert_eq!(serde_json::to_value(Condition::UnderRepair).unwrap(), json!("under_repair"));
    let parsed: Condition = serde_json::from_value(json!("operational")).unwrap();
    assert_eq!(parsed, Condition::Operational);
}

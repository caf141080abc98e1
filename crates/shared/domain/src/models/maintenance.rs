use super::wire_names;
use crate::Id;
use chrono::NaiveDate;
use fdesk_derive::api_model;

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum ServiceType {
    #[default]
    Routine,
    Repair,
    Inspection,
    Tyres,
    Bodywork,
    #[serde(other)]
    Other,
}

wire_names!(ServiceType {
    Routine => "routine",
    Repair => "repair",
    Inspection => "inspection",
    Tyres => "tyres",
    Bodywork => "bodywork",
    Other => "other",
});

/// A completed or scheduled service on a fleet vehicle.
#[api_model(defaults)]
#[derive(Default)]
pub struct MaintenanceRecord {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub vehicle: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub service_type: ServiceType,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub description: String,
    pub service_date: Option<NaiveDate>,
    pub mileage_at_service: Option<u64>,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub cost: f64,
    pub performed_by: Option<String>,
    pub job_card: Option<Id>,
    pub next_service_date: Option<NaiveDate>,
    pub next_service_mileage: Option<u64>,
}

/// Body for `POST /maintenance-records/`.
#[api_model]
pub struct NewMaintenanceRecord {
    pub vehicle: Id,
    #[serde(default)]
    pub service_type: ServiceType,
    pub description: String,
    pub service_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage_at_service: Option<u64>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_service_date: Option<NaiveDate>,
}

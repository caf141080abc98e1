use super::wire_names;
use crate::{Id, metrics};
use chrono::{DateTime, NaiveDate, Utc};
use fdesk_derive::api_model;

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
    Reserved,
    Maintenance,
    OutOfService,
    Sold,
    #[serde(other)]
    Unknown,
}

wire_names!(VehicleStatus {
    Available => "available",
    Rented => "rented",
    Reserved => "reserved",
    Maintenance => "maintenance",
    OutOfService => "out_of_service",
    Sold => "sold",
    Unknown => "unknown",
});

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum VehicleCategory {
    #[default]
    Sedan,
    Suv,
    Pickup,
    Van,
    Truck,
    Bus,
    Motorcycle,
    #[serde(other)]
    Other,
}

wire_names!(VehicleCategory {
    Sedan => "sedan",
    Suv => "suv",
    Pickup => "pickup",
    Van => "van",
    Truck => "truck",
    Bus => "bus",
    Motorcycle => "motorcycle",
    Other => "other",
});

/// A fleet vehicle.
#[api_model(defaults)]
#[derive(Default)]
pub struct Vehicle {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub registration_number: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub make: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub model: String,
    pub year: Option<u16>,
    pub vin: Option<String>,
    pub color: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub category: VehicleCategory,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub status: VehicleStatus,
    pub fuel_type: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub mileage: u64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub daily_rate: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub purchase_price: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub current_value: f64,
    /// Lifetime rental revenue, aggregated by the backend.
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_revenue: f64,
    /// Lifetime maintenance and running costs, aggregated by the backend.
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_expenses: f64,
    pub service_interval_km: Option<u64>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub mileage_since_service: u64,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_due: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// "2021 Toyota Corolla (KDA 123A)".
    #[must_use]
    pub fn display_name(&self) -> String {
        let base = format!("{} {}", self.make, self.model);
        let base = match self.year {
            Some(year) => format!("{year} {base}"),
            None => base,
        };
        if self.registration_number.is_empty() {
            base
        } else {
            format!("{base} ({})", self.registration_number)
        }
    }

    #[must_use]
    pub fn health_score(&self) -> u8 {
        metrics::health_score(self.mileage_since_service, self.service_interval_km)
    }

    #[must_use]
    pub fn profit_margin(&self) -> f64 {
        metrics::profit_margin(self.total_revenue, self.total_expenses)
    }

    /// Due when the service date has passed or the interval is used up.
    #[must_use]
    pub fn is_service_due(&self, today: NaiveDate) -> bool {
        self.next_service_due.is_some_and(|due| due <= today) || self.health_score() == 0
    }

    #[must_use]
    pub const fn is_in_use(&self) -> bool {
        matches!(self.status, VehicleStatus::Rented | VehicleStatus::Reserved)
    }
}

/// Create/replace body for `/vehicles/`.
#[api_model]
pub struct VehiclePayload {
    pub registration_number: String,
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub category: VehicleCategory,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub mileage: u64,
    pub daily_rate: f64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_interval_km: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Partial update body for `/vehicles/{id}/`.
#[api_model(defaults)]
#[derive(Default)]
pub struct VehiclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

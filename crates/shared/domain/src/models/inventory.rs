use super::wire_names;
use crate::{Id, metrics};
use chrono::NaiveDate;
use fdesk_derive::api_model;

/// A stocked spare part.
#[api_model(defaults)]
#[derive(Default)]
pub struct Part {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub part_number: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub name: String,
    pub category: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub description: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub quantity_in_stock: i64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub reorder_level: i64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub unit_cost: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub selling_price: f64,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

impl Part {
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.quantity_in_stock <= self.reorder_level
    }

    #[must_use]
    pub fn stock_value(&self) -> f64 {
        self.quantity_in_stock.max(0) as f64 * self.unit_cost
    }
}

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum EquipmentStatus {
    #[default]
    Operational,
    UnderMaintenance,
    OutOfService,
    Retired,
    #[serde(other)]
    Unknown,
}

wire_names!(EquipmentStatus {
    Operational => "operational",
    UnderMaintenance => "under_maintenance",
    OutOfService => "out_of_service",
    Retired => "retired",
    Unknown => "unknown",
});

/// Workshop equipment (lifts, diagnostic tools, compressors).
#[api_model(defaults)]
#[derive(Default)]
pub struct Equipment {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub name: String,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub status: EquipmentStatus,
    pub assigned_to: Option<Id>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub purchase_cost: f64,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
}

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum StockStatus {
    #[default]
    InStock,
    Reserved,
    InTransit,
    Sold,
    #[serde(other)]
    Unknown,
}

wire_names!(StockStatus {
    InStock => "in_stock",
    Reserved => "reserved",
    InTransit => "in_transit",
    Sold => "sold",
    Unknown => "unknown",
});

/// A vehicle held as stock for sale.
#[api_model(defaults)]
#[derive(Default)]
pub struct InventoryVehicle {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub stock_number: String,
    pub vin: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub make: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub model: String,
    pub year: Option<u16>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub status: StockStatus,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub acquisition_cost: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub listed_price: f64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub days_in_stock: u32,
}

impl InventoryVehicle {
    /// Margin at the listed price, in percent.
    #[must_use]
    pub fn listed_margin(&self) -> f64 {
        metrics::profit_margin(self.listed_price, self.acquisition_cost)
    }
}

/// Aggregates from `/inventory/summary/`.
#[api_model(defaults)]
#[derive(Default)]
pub struct InventorySummary {
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub total_parts: u64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub low_stock_count: u64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_stock_value: f64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub equipment_count: u64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub equipment_under_maintenance: u64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub vehicles_in_stock: u64,
}

/// Body for `POST /inventory/parts/{id}/adjust-stock/`.
#[api_model]
pub struct StockAdjustment {
    /// Signed change in units; negative for consumption or write-offs.
    pub delta: i64,
    pub reason: String,
}

use super::wire_names;
use crate::Id;
use chrono::{DateTime, Utc};
use fdesk_derive::api_model;

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum JobCardStatus {
    #[default]
    Pending,
    InProgress,
    AwaitingParts,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

wire_names!(JobCardStatus {
    Pending => "pending",
    InProgress => "in_progress",
    AwaitingParts => "awaiting_parts",
    Completed => "completed",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

impl JobCardStatus {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::AwaitingParts)
    }
}

impl std::str::FromStr for JobCardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "awaiting_parts" => Ok(Self::AwaitingParts),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown job card status '{other}'")),
        }
    }
}

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    #[serde(other)]
    Unknown,
}

wire_names!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
    Unknown => "unknown",
});

/// A part line consumed by a job card.
#[api_model(defaults)]
#[derive(Default)]
pub struct JobCardPart {
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub part: Id,
    pub part_name: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub quantity: u32,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub unit_price: f64,
}

/// A garage work order.
#[api_model(defaults)]
#[derive(Default)]
pub struct JobCard {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub job_number: String,
    pub vehicle: Option<Id>,
    pub vehicle_registration: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub customer_name: String,
    pub technician: Option<Id>,
    pub technician_name: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub status: JobCardStatus,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub priority: Priority,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub description: String,
    pub diagnosis: Option<String>,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub labor_cost: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub parts_cost: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_cost: f64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub parts: Vec<JobCardPart>,
    pub opened_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobCard {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Sum of the part lines, for cards where the backend has not priced `parts_cost` yet.
    #[must_use]
    pub fn parts_total(&self) -> f64 {
        self.parts.iter().map(|line| f64::from(line.quantity) * line.unit_price).sum()
    }
}

/// Create/replace body for `/job-cards/`.
#[api_model]
pub struct JobCardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Id>,
    pub customer_name: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: JobCardStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<Id>,
}

/// Partial update body for `/job-cards/{id}/`.
#[api_model(defaults)]
#[derive(Default)]
pub struct JobCardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobCardStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
}

use super::wire_names;
use crate::{Id, Permissions};
use chrono::{DateTime, Utc};
use fdesk_derive::api_model;

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Staff,
    Technician,
    Accountant,
    Customer,
    #[serde(other)]
    Unknown,
}

wire_names!(Role {
    Admin => "admin",
    Manager => "manager",
    Staff => "staff",
    Technician => "technician",
    Accountant => "accountant",
    Customer => "customer",
    Unknown => "unknown",
});

impl Role {
    /// Permissions a role carries when the backend sends none explicitly.
    #[must_use]
    pub const fn default_permissions(self) -> Permissions {
        match self {
            Self::Admin => Permissions::ALL,
            Self::Manager => Permissions::ALL.difference(Permissions::MANAGE_USERS),
            Self::Staff => Permissions::VIEW_CONTRACTS
                .union(Permissions::MANAGE_CONTRACTS)
                .union(Permissions::VIEW_FLEET),
            Self::Technician => Permissions::VIEW_FLEET
                .union(Permissions::VIEW_GARAGE)
                .union(Permissions::MANAGE_GARAGE)
                .union(Permissions::VIEW_INVENTORY),
            Self::Accountant => Permissions::VIEW_CONTRACTS
                .union(Permissions::VIEW_REPORTS)
                .union(Permissions::VIEW_INVENTORY),
            Self::Customer | Self::Unknown => Permissions::empty(),
        }
    }
}

#[api_model(defaults)]
#[derive(Default)]
pub struct User {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub username: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub email: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub first_name: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub last_name: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub role: Role,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub is_active: bool,
    pub phone: Option<String>,
    pub permissions: Option<Permissions>,
    pub date_joined: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", falling back to the username.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() { self.username.clone() } else { name.to_owned() }
    }

    /// Explicit permissions, or the role defaults when the backend omits them.
    #[must_use]
    pub fn effective_permissions(&self) -> Permissions {
        self.permissions.unwrap_or_else(|| self.role.default_permissions())
    }
}

/// Create/replace body for `/users/`.
#[api_model]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

const fn active() -> bool {
    true
}

/// Partial update body for `/users/{id}/`.
#[api_model(defaults)]
#[derive(Default)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

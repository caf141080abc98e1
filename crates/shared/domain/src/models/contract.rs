use super::wire_names;
use crate::{Id, metrics};
use chrono::{DateTime, NaiveDate, Utc};
use fdesk_derive::api_model;

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Terminated,
    Overdue,
    #[serde(other)]
    Unknown,
}

wire_names!(ContractStatus {
    Draft => "draft",
    Active => "active",
    Completed => "completed",
    Terminated => "terminated",
    Overdue => "overdue",
    Unknown => "unknown",
});

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum PaymentFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Upfront,
    #[serde(other)]
    Unknown,
}

wire_names!(PaymentFrequency {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Upfront => "upfront",
    Unknown => "unknown",
});

/// A vehicle-rental agreement.
#[api_model(defaults)]
#[derive(Default)]
pub struct Contract {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub contract_number: String,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle: Option<Id>,
    pub vehicle_registration: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub daily_rate: f64,
    /// Full contract value.
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_amount: f64,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub deposit_amount: f64,
    /// Sum of recorded payments, excluding the deposit.
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub total_paid: f64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub status: ContractStatus,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub payment_frequency: PaymentFrequency,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Contract {
    #[must_use]
    pub fn collection_rate(&self) -> f64 {
        metrics::collection_rate(self.total_amount, self.total_paid, self.deposit_amount)
    }

    #[must_use]
    pub fn outstanding_balance(&self) -> f64 {
        metrics::outstanding_balance(self.total_amount, self.total_paid, self.deposit_amount)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ContractStatus::Active | ContractStatus::Overdue)
    }
}

/// Create/replace body for `/contracts/`.
#[api_model]
pub struct ContractPayload {
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub vehicle: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub status: ContractStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Partial update body for `/contracts/{id}/`.
#[api_model(defaults)]
#[derive(Default)]
pub struct ContractPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[api_model]
pub struct TerminateRequest {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
}

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    BankTransfer,
    MobileMoney,
    Cheque,
    #[serde(other)]
    Unknown,
}

wire_names!(PaymentMethod {
    Cash => "cash",
    Card => "card",
    BankTransfer => "bank_transfer",
    MobileMoney => "mobile_money",
    Cheque => "cheque",
    Unknown => "unknown",
});

#[api_model(rename_all = "snake_case")]
#[derive(Default, Copy, Eq, Hash)]
pub enum PaymentKind {
    #[default]
    Payment,
    Deposit,
    Refund,
    #[serde(other)]
    Unknown,
}

wire_names!(PaymentKind {
    Payment => "payment",
    Deposit => "deposit",
    Refund => "refund",
    Unknown => "unknown",
});

/// A payment recorded against a contract.
#[api_model(defaults)]
#[derive(Default)]
pub struct Payment {
    pub id: Id,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub contract: Id,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub amount: f64,
    pub payment_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub method: PaymentMethod,
    #[serde(alias = "payment_type")]
    pub kind: PaymentKind,
    pub reference: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub notes: String,
}

/// Body for `POST /contracts/{id}/payments/`.
#[api_model]
pub struct NewPayment {
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub kind: PaymentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

//! Entity shapes, one module per backend app.

mod auth;
mod contract;
mod inventory;
mod job_card;
mod maintenance;
mod user;
mod vehicle;

pub use auth::{Credentials, RegisterPayload, TokenPair};
pub use contract::{
    Contract, ContractPatch, ContractPayload, ContractStatus, NewPayment, Payment, PaymentFrequency,
    PaymentKind, PaymentMethod, TerminateRequest,
};
pub use inventory::{
    Equipment, EquipmentStatus, InventorySummary, InventoryVehicle, Part, StockAdjustment,
    StockStatus,
};
pub use job_card::{JobCard, JobCardPart, JobCardPatch, JobCardPayload, JobCardStatus, Priority};
pub use maintenance::{MaintenanceRecord, NewMaintenanceRecord, ServiceType};
pub use user::{Role, User, UserPatch, UserPayload};
pub use vehicle::{Vehicle, VehicleCategory, VehiclePatch, VehiclePayload, VehicleStatus};

/// Implements `as_str` and `Display` for a status enum using its wire names.
macro_rules! wire_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_names;

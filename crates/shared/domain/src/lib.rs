//! # Domain Models
//!
//! Data-transfer shapes mirrored from the Fleetdesk REST backend, plus the derived
//! display values the admin screens compute from them.
//! Keep it lean: no I/O or networking. The backend owns every lifecycle rule; the only
//! client-side behavior here is optional-field defaults and one-line arithmetic.

pub mod amount;
pub mod config;
pub mod constants;
pub mod metrics;
pub mod models;
pub mod nullable;
pub mod page;
pub mod permissions;

pub use crate::models::*;
pub use crate::page::Page;
pub use crate::permissions::Permissions;

/// Primary key type used by every backend resource.
pub type Id = u64;

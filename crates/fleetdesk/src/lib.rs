//! Facade crate for the Fleetdesk SDK.
//! Re-exports domain/kernel primitives and wires every feature slice onto one session.
//! Keep this crate thin: it composes other crates and only adds the dashboard overview.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn run() -> Result<(), fleetdesk::FleetdeskError> {
//! use fleetdesk::Fleetdesk;
//! use fleetdesk::domain::config::ClientConfig;
//!
//! let desk = Fleetdesk::open(&ClientConfig::default()).await?;
//! let overview = desk.overview().await;
//! println!("{} of {} vehicles out", overview.vehicles_in_use, overview.vehicles_total);
//! # Ok(())
//! # }
//! ```

mod error;
mod overview;
mod session;

pub use crate::error::{FleetdeskError, FleetdeskErrorExt};
pub use crate::overview::Overview;
pub use crate::session::Fleetdesk;

pub use fdesk_domain as domain;
pub use fdesk_http as http;
pub use fdesk_kernel as kernel;
pub use fdesk_storage as storage;

/// Feature slices, re-exported for direct use.
pub mod features {
    pub use fdesk_contracts as contracts;
    pub use fdesk_fleet as fleet;
    pub use fdesk_garage as garage;
    pub use fdesk_identity as identity;
    pub use fdesk_inventory as inventory;

    /// Slices wired into every session.
    pub const ENABLED: &[&str] = &["identity", "contracts", "fleet", "garage", "inventory"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

use chrono::NaiveDate;
use fdesk_derive::api_model;
use fdesk_domain::{Contract, InventorySummary, JobCard, Vehicle, metrics};

/// Figures shown on the dashboard landing page.
#[api_model(defaults)]
#[derive(Default)]
pub struct Overview {
    pub vehicles_total: usize,
    pub vehicles_in_use: usize,
    pub vehicles_due_service: usize,
    /// Share of the fleet currently rented or reserved, in percent.
    pub fleet_utilization: f64,
    pub active_contracts: usize,
    /// Sum still owed across active contracts.
    pub outstanding_balance: f64,
    pub open_job_cards: usize,
    pub low_stock_parts: u64,
    pub inventory: InventorySummary,
}

impl Overview {
    #[must_use]
    pub fn from_parts(
        vehicles: &[Vehicle],
        contracts: &[Contract],
        job_cards: &[JobCard],
        inventory: InventorySummary,
        today: NaiveDate,
    ) -> Self {
        let vehicles_in_use = vehicles.iter().filter(|v| v.is_in_use()).count();
        let active: Vec<&Contract> = contracts.iter().filter(|c| c.is_active()).collect();

        Self {
            vehicles_total: vehicles.len(),
            vehicles_in_use,
            vehicles_due_service: vehicles.iter().filter(|v| v.is_service_due(today)).count(),
            fleet_utilization: metrics::utilization_rate(vehicles_in_use, vehicles.len()),
            active_contracts: active.len(),
            outstanding_balance: active.iter().map(|c| c.outstanding_balance()).sum(),
            open_job_cards: job_cards.iter().filter(|j| j.is_open()).count(),
            low_stock_parts: inventory.low_stock_count,
            inventory,
        }
    }
}

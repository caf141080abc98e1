//! Fleet feature slice.
//!
//! Vehicles under `/vehicles/` and their service history under `/maintenance-records/`.

mod health;

pub use crate::health::VehicleHealth;

use chrono::Utc;
use fdesk_domain::constants::endpoints;
use fdesk_domain::{
    Id, MaintenanceRecord, NewMaintenanceRecord, Vehicle, VehiclePatch, VehiclePayload,
};
use fdesk_http::{ApiClient, ApiError, ListQuery, Resource};
use tracing::info;

/// Fleet feature state.
#[derive(Debug, Clone)]
pub struct Fleet {
    vehicles: Resource<Vehicle>,
    maintenance: Resource<MaintenanceRecord>,
}

impl Fleet {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            vehicles: Resource::new(client.clone(), endpoints::VEHICLES),
            maintenance: Resource::new(client, endpoints::MAINTENANCE_RECORDS),
        }
    }

    pub async fn list_vehicles(&self, query: &ListQuery) -> Result<Vec<Vehicle>, ApiError> {
        self.vehicles.list(query).await
    }

    /// Every vehicle matching `query`, across all pages.
    pub async fn all_vehicles(&self, query: &ListQuery) -> Result<Vec<Vehicle>, ApiError> {
        self.vehicles.list_all(query).await
    }

    pub async fn fetch_vehicle(&self, id: Id) -> Result<Vehicle, ApiError> {
        self.vehicles.fetch(id).await
    }

    pub async fn create_vehicle(&self, payload: &VehiclePayload) -> Result<Vehicle, ApiError> {
        let vehicle = self.vehicles.create(payload).await?;
        info!(id = vehicle.id, registration = %vehicle.registration_number, "Vehicle added");
        Ok(vehicle)
    }

    pub async fn update_vehicle(
        &self,
        id: Id,
        payload: &VehiclePayload,
    ) -> Result<Vehicle, ApiError> {
        self.vehicles.update(id, payload).await
    }

    pub async fn patch_vehicle(&self, id: Id, patch: &VehiclePatch) -> Result<Vehicle, ApiError> {
        self.vehicles.patch(id, patch).await
    }

    pub async fn delete_vehicle(&self, id: Id) -> Result<(), ApiError> {
        self.vehicles.delete(id).await
    }

    /// Service history of one vehicle, filtered server side.
    pub async fn maintenance_records(
        &self,
        vehicle: Id,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        self.maintenance.list(&ListQuery::new().filter("vehicle", vehicle)).await
    }

    pub async fn schedule_maintenance(
        &self,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, ApiError> {
        let record = self.maintenance.create(record).await?;
        info!(
            id = record.id,
            vehicle = record.vehicle,
            kind = %record.service_type,
            "Maintenance scheduled"
        );
        Ok(record)
    }

    /// Health, margin and service status of one vehicle as of today (UTC).
    pub async fn vehicle_health(&self, id: Id) -> Result<VehicleHealth, ApiError> {
        let vehicle = self.fetch_vehicle(id).await?;
        Ok(VehicleHealth::new(vehicle, Utc::now().date_naive()))
    }
}

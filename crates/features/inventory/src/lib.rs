//! Inventory feature slice.
//!
//! Parts, equipment and for-sale vehicles under `/inventory/`. Stock levels are owned by
//! the backend; the client only reads them and posts adjustments.

use fdesk_domain::constants::endpoints;
use fdesk_domain::{Equipment, Id, InventorySummary, InventoryVehicle, Part, StockAdjustment};
use fdesk_http::{ApiClient, ApiError, ListQuery, Resource};
use tracing::{debug, info};

/// Inventory feature state.
#[derive(Debug, Clone)]
pub struct Inventory {
    client: ApiClient,
    parts: Resource<Part>,
    equipment: Resource<Equipment>,
    vehicles: Resource<InventoryVehicle>,
}

impl Inventory {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            parts: Resource::new(client.clone(), endpoints::PARTS),
            equipment: Resource::new(client.clone(), endpoints::EQUIPMENT),
            vehicles: Resource::new(client.clone(), endpoints::INVENTORY_VEHICLES),
            client,
        }
    }

    // --- Parts ---

    pub async fn list_parts(&self, query: &ListQuery) -> Result<Vec<Part>, ApiError> {
        self.parts.list(query).await
    }

    pub async fn fetch_part(&self, id: Id) -> Result<Part, ApiError> {
        self.parts.fetch(id).await
    }

    pub async fn create_part(&self, part: &Part) -> Result<Part, ApiError> {
        self.parts.create(part).await
    }

    pub async fn update_part(&self, id: Id, part: &Part) -> Result<Part, ApiError> {
        self.parts.update(id, part).await
    }

    pub async fn delete_part(&self, id: Id) -> Result<(), ApiError> {
        self.parts.delete(id).await
    }

    /// Parts matching `query` that sit at or below their reorder level.
    ///
    /// The backend has no low stock filter, so every page is fetched and filtered here.
    /// `page` in `query` is ignored.
    pub async fn low_stock_parts(&self, query: &ListQuery) -> Result<Vec<Part>, ApiError> {
        let query = ListQuery { page: None, ..query.clone() };
        let parts = self.parts.list_all(&query).await?;
        let total = parts.len();
        let low: Vec<Part> = parts.into_iter().filter(Part::is_low_stock).collect();
        debug!(total, low = low.len(), "Filtered low stock parts");
        Ok(low)
    }

    /// Applies a signed stock change; the backend returns the updated part.
    pub async fn adjust_stock(
        &self,
        part: Id,
        delta: i64,
        reason: impl Into<String>,
    ) -> Result<Part, ApiError> {
        let path = self.parts.action_path(part, endpoints::PART_ADJUST_STOCK);
        let body = StockAdjustment { delta, reason: reason.into() };
        let updated: Part = self.client.post(&path, &body).await?;
        info!(part, delta, stock = updated.quantity_in_stock, "Stock adjusted");
        Ok(updated)
    }

    // --- Equipment ---

    pub async fn list_equipment(&self, query: &ListQuery) -> Result<Vec<Equipment>, ApiError> {
        self.equipment.list(query).await
    }

    pub async fn fetch_equipment(&self, id: Id) -> Result<Equipment, ApiError> {
        self.equipment.fetch(id).await
    }

    pub async fn create_equipment(&self, equipment: &Equipment) -> Result<Equipment, ApiError> {
        self.equipment.create(equipment).await
    }

    pub async fn update_equipment(
        &self,
        id: Id,
        equipment: &Equipment,
    ) -> Result<Equipment, ApiError> {
        self.equipment.update(id, equipment).await
    }

    pub async fn delete_equipment(&self, id: Id) -> Result<(), ApiError> {
        self.equipment.delete(id).await
    }

    // --- Vehicles in stock ---

    pub async fn list_vehicles(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<InventoryVehicle>, ApiError> {
        self.vehicles.list(query).await
    }

    pub async fn fetch_vehicle(&self, id: Id) -> Result<InventoryVehicle, ApiError> {
        self.vehicles.fetch(id).await
    }

    pub async fn create_vehicle(
        &self,
        vehicle: &InventoryVehicle,
    ) -> Result<InventoryVehicle, ApiError> {
        self.vehicles.create(vehicle).await
    }

    pub async fn update_vehicle(
        &self,
        id: Id,
        vehicle: &InventoryVehicle,
    ) -> Result<InventoryVehicle, ApiError> {
        self.vehicles.update(id, vehicle).await
    }

    pub async fn delete_vehicle(&self, id: Id) -> Result<(), ApiError> {
        self.vehicles.delete(id).await
    }

    // --- Aggregates ---

    pub async fn inventory_summary(&self) -> Result<InventorySummary, ApiError> {
        self.client.get(endpoints::INVENTORY_SUMMARY).await
    }
}

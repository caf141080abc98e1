use chrono::NaiveDate;
use fdesk_derive::api_model;
use fdesk_domain::Vehicle;

/// Display figures for one vehicle.
#[api_model]
pub struct VehicleHealth {
    pub vehicle: Vehicle,
    /// Remaining share of the service interval, `0..=100`.
    pub health_score: u8,
    pub profit_margin: f64,
    pub service_due: bool,
}

impl VehicleHealth {
    #[must_use]
    pub fn new(vehicle: Vehicle, today: NaiveDate) -> Self {
        Self {
            health_score: vehicle.health_score(),
            profit_margin: vehicle.profit_margin(),
            service_due: vehicle.is_service_due(today),
            vehicle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_health_from_mileage_and_money() {
        let vehicle = Vehicle {
            service_interval_km: Some(10_000),
            mileage_since_service: 2_500,
            total_revenue: 2_000.0,
            total_expenses: 500.0,
            ..Vehicle::default()
        };
        let health = VehicleHealth::new(vehicle, today());

        assert_eq!(health.health_score, 75);
        assert!((health.profit_margin - 75.0).abs() < 1e-9);
        assert!(!health.service_due);
    }

    #[test]
    fn test_due_by_date_even_with_mileage_left() {
        let vehicle = Vehicle {
            next_service_due: NaiveDate::from_ymd_opt(2026, 2, 28),
            ..Vehicle::default()
        };
        assert!(VehicleHealth::new(vehicle, today()).service_due);
    }

    #[test]
    fn test_due_when_interval_used_up() {
        let vehicle = Vehicle {
            service_interval_km: Some(5_000),
            mileage_since_service: 6_000,
            ..Vehicle::default()
        };
        let health = VehicleHealth::new(vehicle, today());
        assert_eq!(health.health_score, 0);
        assert!(health.service_due);
    }
}

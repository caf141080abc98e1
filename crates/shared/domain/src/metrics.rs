//! Derived display values.
//!
//! Every figure here is computed from numbers the backend already aggregated. The
//! functions are pure and total: degenerate denominators yield `0.0` instead of `NaN`.

/// Share of the contract value already collected, in percent.
///
/// `(payments + deposits) / contract_value * 100`; `0.0` when the contract has no value.
///
/// ```
/// use fdesk_domain::metrics::collection_rate;
///
/// assert!((collection_rate(1000.0, 200.0, 100.0) - 30.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn collection_rate(contract_value: f64, payments: f64, deposits: f64) -> f64 {
    if contract_value <= 0.0 {
        return 0.0;
    }
    (payments + deposits) / contract_value * 100.0
}

/// Amount still owed on a contract, never negative.
#[must_use]
pub fn outstanding_balance(contract_value: f64, payments: f64, deposits: f64) -> f64 {
    (contract_value - payments - deposits).max(0.0)
}

/// Remaining share of the service interval, in percent (`0..=100`).
///
/// A vehicle fresh from service scores 100, one at or past its interval scores 0.
/// Without a known interval the vehicle is treated as healthy.
#[must_use]
pub fn health_score(mileage_since_service: u64, service_interval: Option<u64>) -> u8 {
    let Some(interval) = service_interval.filter(|i| *i > 0) else {
        return 100;
    };
    let used = mileage_since_service.min(interval);
    let remaining = u128::from(interval - used) * 100 / u128::from(interval);
    u8::try_from(remaining).unwrap_or(100)
}

/// Net margin over revenue, in percent; `0.0` without revenue.
#[must_use]
pub fn profit_margin(revenue: f64, expenses: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    (revenue - expenses) / revenue * 100.0
}

/// Share of units in use, in percent; `0.0` for an empty fleet.
#[must_use]
pub fn utilization_rate(in_use: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    in_use as f64 / total as f64 * 100.0
}

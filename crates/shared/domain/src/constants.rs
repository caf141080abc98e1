//! Backend endpoints and local storage keys.

/// Fallback API root when no configuration overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Storage keys that may hold the bearer token, in lookup order.
pub const TOKEN_KEYS: [&str; 3] = ["access_token", "token", "auth_token"];

/// Storage key for the refresh token returned by login.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// URL fragments whose requests never carry a bearer token.
pub const UNAUTHENTICATED_PATHS: [&str; 2] = ["/auth/login", "/auth/register"];

/// Collection paths, relative to the API root. Trailing slashes match the backend router.
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login/";
    pub const REGISTER: &str = "/auth/register/";
    pub const CURRENT_USER: &str = "/auth/me/";
    pub const USERS: &str = "/users/";

    pub const CONTRACTS: &str = "/contracts/";
    pub const CONTRACT_PAYMENTS: &str = "payments/";
    pub const CONTRACT_TERMINATE: &str = "terminate/";

    pub const VEHICLES: &str = "/vehicles/";
    pub const MAINTENANCE_RECORDS: &str = "/maintenance-records/";

    pub const JOB_CARDS: &str = "/job-cards/";

    pub const PARTS: &str = "/inventory/parts/";
    pub const PART_ADJUST_STOCK: &str = "adjust-stock/";
    pub const EQUIPMENT: &str = "/inventory/equipment/";
    pub const INVENTORY_VEHICLES: &str = "/inventory/vehicles/";
    pub const INVENTORY_SUMMARY: &str = "/inventory/summary/";
}

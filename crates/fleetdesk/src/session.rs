use crate::error::{FleetdeskError, FleetdeskErrorExt};
use crate::overview::Overview;
use chrono::Utc;
use fdesk_contracts::Contracts;
use fdesk_domain::config::ClientConfig;
use fdesk_fleet::Fleet;
use fdesk_garage::Garage;
use fdesk_http::{ApiClient, ListQuery, with_default};
use fdesk_identity::{Identity, StoredToken};
use fdesk_inventory::Inventory;
use fdesk_storage::LocalStore;
use std::path::Path;
use tracing::{debug, info};

/// One authenticated (or not yet authenticated) connection to the backend.
///
/// All slices share the same [`ApiClient`], and the client reads its bearer token from
/// the same [`LocalStore`] that [`Identity::login`] writes to.
#[derive(Debug, Clone)]
pub struct Fleetdesk {
    client: ApiClient,
    store: LocalStore,
    identity: Identity,
    contracts: Contracts,
    fleet: Fleet,
    garage: Garage,
    inventory: Inventory,
}

impl Fleetdesk {
    /// Opens the token store described by `config.storage` and builds the client.
    pub async fn open(config: &ClientConfig) -> Result<Self, FleetdeskError> {
        let store = if config.storage.persist {
            LocalStore::builder()
                .path(&config.storage.path)
                .open()
                .await
                .context(format!("Opening {}", config.storage.path.display()))?
        } else {
            debug!("Token persistence disabled, keeping session in memory");
            LocalStore::in_memory()
        };

        let client = ApiClient::builder()
            .config(&config.api)
            .token_source(StoredToken::new(store.clone()))
            .build()?;

        info!(base_url = %client.base_url(), persistent = store.is_persistent(), "Session opened");
        Ok(Self::with_client(client, store))
    }

    /// Loads the configuration (file plus `FLEET__*` overrides) and opens a session.
    pub async fn from_config_file(path: Option<&Path>) -> Result<Self, FleetdeskError> {
        let config = fdesk_kernel::config::load_client_config(path)?;
        Self::open(&config).await
    }

    /// Wires the slices onto an existing client and store.
    #[must_use]
    pub fn with_client(client: ApiClient, store: LocalStore) -> Self {
        Self {
            identity: Identity::new(client.clone(), store.clone()),
            contracts: Contracts::new(client.clone()),
            fleet: Fleet::new(client.clone()),
            garage: Garage::new(client.clone()),
            inventory: Inventory::new(client.clone()),
            client,
            store,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn store(&self) -> &LocalStore {
        &self.store
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub const fn contracts(&self) -> &Contracts {
        &self.contracts
    }

    #[must_use]
    pub const fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    #[must_use]
    pub const fn garage(&self) -> &Garage {
        &self.garage
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Dashboard snapshot.
    ///
    /// The four fetches run concurrently and read every page of their collection. A failing
    /// fetch is logged and replaced by an empty list (or an empty summary) so the rest of the
    /// snapshot still renders.
    pub async fn overview(&self) -> Overview {
        let query = ListQuery::default();
        let (vehicles, contracts, job_cards, summary) = tokio::join!(
            with_default("vehicles", self.fleet.all_vehicles(&query)),
            with_default("contracts", self.contracts.all_contracts(&query)),
            with_default("job cards", self.garage.all_job_cards(&query)),
            with_default("inventory summary", self.inventory.inventory_summary()),
        );

        Overview::from_parts(&vehicles, &contracts, &job_cards, summary, Utc::now().date_naive())
    }
}

use super::HealthReport;
use crate::auth::{AuthError, OperatorGate, OperatorSession};
use crate::clients::{BakingDayClient, BreadTypeClient, CatalogClient, OrderClient};
use crate::clock::{Clock, SystemClock};
use crate::config::BakeryConfig;
use crate::model::{BakingDay, BreadType, OrderLine};
use crate::order_actor::OrderContext;
use collection_actor::{CollectionStore, JsonFileStore, MemoryStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

pub const BREAD_TYPES: &str = "bread_types";
pub const BAKING_DAYS: &str = "baking_days";
pub const ORDERS: &str = "orders";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The backing store of every collection.
#[derive(Clone)]
pub struct Stores {
    pub bread_types: Arc<dyn CollectionStore<BreadType>>,
    pub baking_days: Arc<dyn CollectionStore<BakingDay>>,
    pub orders: Arc<dyn CollectionStore<OrderLine>>,
}

impl Stores {
    /// One `<name>.json` file per collection under `dir`.
    pub fn json(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            bread_types: Arc::new(JsonFileStore::new(dir, BREAD_TYPES)),
            baking_days: Arc::new(JsonFileStore::new(dir, BAKING_DAYS)),
            orders: Arc::new(JsonFileStore::new(dir, ORDERS)),
        }
    }
}

/// In-memory stores whose handles stay with the caller, so tests can inspect
/// records or switch a store unavailable.
#[derive(Clone)]
pub struct MemoryStores {
    pub bread_types: MemoryStore<BreadType>,
    pub baking_days: MemoryStore<BakingDay>,
    pub orders: MemoryStore<OrderLine>,
}

impl Default for MemoryStores {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStores {
    pub fn new() -> Self {
        Self {
            bread_types: MemoryStore::new(BREAD_TYPES),
            baking_days: MemoryStore::new(BAKING_DAYS),
            orders: MemoryStore::new(ORDERS),
        }
    }

    pub fn stores(&self) -> Stores {
        Stores {
            bread_types: Arc::new(self.bread_types.clone()),
            baking_days: Arc::new(self.baking_days.clone()),
            orders: Arc::new(self.orders.clone()),
        }
    }
}

/// The running bakery: three collection actors and the clients to reach them.
///
/// # Architecture
///
/// - **Bread type actor**: unique names, no dependencies
/// - **Baking day actor**: menus and share tokens, no dependencies
/// - **Order actor**: submission rules; resolves share tokens through the baking day client
///
/// # Example
///
/// ```ignore
/// let system = BakerySystem::open(&config).await?;
///
/// let session = system.login("secret")?;
/// let day = system.catalog.create_baking_day(&session, "Monday", options).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BakerySystem {
    /// Operator and customer operations
    pub catalog: CatalogClient,

    /// Direct access to each collection
    pub bread_types: BreadTypeClient,
    pub baking_days: BakingDayClient,
    pub orders: OrderClient,

    gate: OperatorGate,
    stores: Stores,
    clock: Arc<dyn Clock>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BakerySystem {
    /// Starts the system on the JSON data directory from `config`, creating the
    /// directory if needed, with the system clock.
    pub async fn open(config: &BakeryConfig) -> Result<Self, StartupError> {
        let dir = &config.storage.data_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StartupError::DataDir {
                path: dir.clone(),
                source,
            })?;
        info!(data_dir = %dir.display(), "Opening data directory");
        Ok(Self::with_stores(config, Stores::json(dir), Arc::new(SystemClock)))
    }

    /// Starts the system on arbitrary stores and clock.
    ///
    /// 1. Create the actors and their clients
    /// 2. Start bread type and baking day actors (`Context = ()`)
    /// 3. Start the order actor with the baking day client, policy and clock injected
    pub fn with_stores(config: &BakeryConfig, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let buffer_size = config.actors.buffer_size;
        let policy = config.ordering;

        // 1. Create actors
        let (bread_actor, bread_types) = crate::bread_actor::new(buffer_size, stores.bread_types.clone());
        let (day_actor, baking_days) = crate::baking_day_actor::new(buffer_size, stores.baking_days.clone());
        let (order_actor, orders) = crate::order_actor::new(buffer_size, stores.orders.clone());

        // 2. Start actors without dependencies
        let bread_handle = tokio::spawn(bread_actor.run(()));
        let day_handle = tokio::spawn(day_actor.run(()));

        // 3. Order actor needs the baking day client
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            baking_days: baking_days.clone(),
            policy,
            clock: clock.clone(),
        }));

        let catalog = CatalogClient::new(
            bread_types.clone(),
            baking_days.clone(),
            orders.clone(),
            policy,
            clock.clone(),
        );

        info!(?policy, "Bakery system started");
        Self {
            catalog,
            bread_types,
            baking_days,
            orders,
            gate: OperatorGate::new(config.operator.password.clone()),
            stores,
            clock,
            handles: vec![bread_handle, day_handle, order_handle],
        }
    }

    /// Exchanges the operator password for a session.
    pub fn login(&self, password: &str) -> Result<OperatorSession, AuthError> {
        self.gate.login(password, self.clock.as_ref())
    }

    /// Healthy when every collection can be read and decoded.
    pub async fn health(&self) -> HealthReport {
        let timestamp = self.clock.now();
        let probes = [
            self.stores.bread_types.probe().await,
            self.stores.baking_days.probe().await,
            self.stores.orders.probe().await,
        ];
        match probes.into_iter().find_map(Result::err) {
            None => HealthReport::healthy(timestamp),
            Some(e) => {
                warn!(error = %e, "Health check failed");
                HealthReport::unhealthy(timestamp, e.to_string())
            }
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' channels; each actor finishes the
    /// request it is handling and exits. The order actor holds a baking day client
    /// of its own, so the baking day actor stops only after the order actor has.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.catalog);
        drop(self.bread_types);
        drop(self.baking_days);
        drop(self.orders);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

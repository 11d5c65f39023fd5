//! # System Lifecycle & Orchestration
//!
//! Starts the three collection actors, wires the order actor to the baking day
//! client, and shuts everything down again.
//!
//! ```rust,ignore
//! let config = BakeryConfig::load(None)?;
//! let system = BakerySystem::open(&config).await?;
//!
//! let session = system.login("secret")?;
//! let rye = system.catalog.create_bread_type(&session, "Rye").await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! Dependency graph (arrows are "calls"):
//!
//! ```text
//! CatalogClient ──► BreadTypeClient ──► bread type actor
//!       │
//!       ├─────────► BakingDayClient ──► baking day actor
//!       │                 ▲
//!       └─────────► OrderClient ──────► order actor ─┘
//! ```
//!
//! No actor waits on an actor that could be waiting on it.

pub mod bakery_system;
pub mod health;
pub mod tracing;

pub use bakery_system::*;
pub use health::*;
pub use self::tracing::*;

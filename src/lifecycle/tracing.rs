//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. The
//! filter comes from `RUST_LOG` when set, otherwise from `log.filter` in the
//! configuration.
//!
//! ```bash
//! # Lifecycle and accepted orders
//! RUST_LOG=info cargo run
//!
//! # Full payloads and capacity checks
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=collection_actor=debug cargo run
//! ```
//!
//! Log lines carry structured fields instead of module paths:
//!
//! ```text
//! INFO Actor started entity_type="OrderLine" collection="orders"
//! INFO submit: Sending submit to actor share_token=5f0c…
//! INFO Order accepted group_id=… baking_day_id=… loaves=2
//! WARN Action failed entity_type="OrderLine" error=Not enough … left: requested 2, available 1
//! ```
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, from the binary.
pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the actor instead
        .compact()
        .init();
}

//! Demo binary: loads the configuration, opens the data directory, reports
//! health and walks through one baking day.

use bakery_orders::config::BakeryConfig;
use bakery_orders::lifecycle::{setup_tracing, BakerySystem};
use bakery_orders::model::{BreadOption, LineRequest, OrderSubmission};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config_path = std::env::args().nth(1);
    let config = BakeryConfig::load(config_path.as_deref()).map_err(|e| e.to_string())?;

    setup_tracing(&config.log.filter);
    info!(?config, "Starting bakery");

    let system = BakerySystem::open(&config).await.map_err(|e| e.to_string())?;

    let health = system.health().await;
    info!(
        health = %serde_json::to_string(&health).map_err(|e| e.to_string())?,
        "Health check"
    );
    if !health.is_healthy() {
        error!("Data directory is not usable");
        system.shutdown().await?;
        return Err("unhealthy".into());
    }

    match system.login(&config.operator.password) {
        Ok(session) => {
            let span = tracing::info_span!("demo");
            async {
                let bread = match system.catalog.create_bread_type(&session, "Sourdough").await {
                    Ok(id) => id,
                    Err(e) => {
                        warn!(error = %e, "Skipping demo");
                        return Ok::<(), String>(());
                    }
                };
                let day_id = system
                    .catalog
                    .create_baking_day(&session, "Saturday", vec![BreadOption::new(bread.clone(), 10)])
                    .await
                    .map_err(|e| e.to_string())?;

                let upcoming = system
                    .catalog
                    .upcoming_baking_days(&session)
                    .await
                    .map_err(|e| e.to_string())?;
                let Some(day) = upcoming.iter().find(|d| d.baking_day.id == day_id) else {
                    return Err("new baking day not listed".into());
                };
                let token = day.baking_day.share_token.clone();
                info!(%token, date = %day.baking_day.date, "Share this link with customers");

                let submission = OrderSubmission {
                    share_token: token.clone(),
                    customer_name: "Alice".into(),
                    customer_contact: "555-0100".into(),
                    lines: vec![LineRequest::new(bread, 1)],
                };
                match system.catalog.submit_order(submission).await {
                    Ok(group_id) => info!(%group_id, "Order placed"),
                    Err(e) => warn!(error = %e, "Order rejected"),
                }

                let report = system
                    .catalog
                    .day_report(&session, day_id)
                    .await
                    .map_err(|e| e.to_string())?;
                info!(
                    report = %serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?,
                    "Day report"
                );
                Ok(())
            }
            .instrument(span)
            .await?;
        }
        Err(e) => warn!(error = %e, "Operator demo skipped"),
    }

    system.shutdown().await
}

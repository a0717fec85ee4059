//! One-shot delay detection, meant to run from a daily scheduler.
//!
//! Flags every intervention whose due date is before today and prints how
//! many were flagged.

use std::error::Error;
use std::sync::Arc;

use mission_manager::adapters::http::AppState;
use mission_manager::adapters::SystemClock;
use mission_manager::config::AppConfig;
use mission_manager::ports::Clock;
use mission_manager::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.server)?;

    let state = AppState::from_config(&config, Arc::new(SystemClock)).await?;
    let today = state.clock.today();

    let flagged = state.detect_overdue_handler().detect_and_flag(today).await?;
    tracing::info!(%today, flagged = flagged.len(), "Delay detection finished");

    println!("{} intervention(s) flagged as late on {}", flagged.len(), today);
    for intervention in &flagged {
        println!("  - {} ({})", intervention.title(), intervention.id());
    }
    Ok(())
}

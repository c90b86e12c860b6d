//! Application entry point for fernbrom.
//!
//! Initializes services, starts the daily scheduler and serves HTTP.

use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use fernbrom::config::Config;
use fernbrom::config::PUSH_UTC_OFFSET_SECS;
use fernbrom::logging::setup_logging;
use fernbrom::server;
use fernbrom::service::Services;
use fernbrom::task::daily_push_scheduler::DailyPushScheduler;
use log::debug;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let services = setup_services(&config, init_start)?;
    let scheduler = setup_scheduler(&config, &services, init_start)?;

    run(&config, services, init_start).await?;
    scheduler.stop();
    Ok(())
}

fn load_config() -> Result<Arc<Config>> {
    let config = Arc::new(Config::new());
    setup_logging(&config)?;
    debug!("Configuration loaded.");
    info!("Starting fernbrom...");
    Ok(config)
}

fn setup_services(config: &Config, init_start: Instant) -> Result<Arc<Services>> {
    debug!("Setting up Services...");
    let services = Arc::new(Services::new(config)?);
    info!(
        "Services setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );
    Ok(services)
}

fn setup_scheduler(
    config: &Config,
    services: &Services,
    init_start: Instant,
) -> Result<Arc<DailyPushScheduler>> {
    debug!("Setting up DailyPushScheduler...");
    let scheduler = DailyPushScheduler::new(
        services.daily_push.clone(),
        &config.push_cron,
        PUSH_UTC_OFFSET_SECS,
    )?;
    scheduler.clone().start();
    info!(
        "Scheduler setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );
    Ok(scheduler)
}

async fn run(config: &Config, services: Arc<Services>, init_start: Instant) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!(
        "fernbrom is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );
    server::serve(services, addr).await
}

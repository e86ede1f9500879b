use std::time::Duration;

use popstream::broker::Broker;
use popstream::config::{Settings, load_config};
use popstream::publisher::spawn_ticker;
use popstream::transport::{AppState, start_server};
use popstream::utils::error::Result;
use popstream::utils::logging;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&settings.log.level);

    if let Err(e) = run_server(settings).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> Result<()> {
    let shutdown = CancellationToken::new();
    let (broker, broker_task) = Broker::spawn();

    if settings.publisher.enabled {
        spawn_ticker(
            broker.clone(),
            Duration::from_millis(settings.publisher.interval_ms),
            shutdown.clone(),
        );
    }

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received. Exiting gracefully.");
                    shutdown.cancel();
                }
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        });
    }

    let state = AppState::new(broker, shutdown.clone())?;
    let result = start_server(&settings.server, state).await;

    // Stop the ticker too if the server exited on its own.
    shutdown.cancel();
    if result.is_ok() {
        if let Err(e) = broker_task.await {
            error!("Broker task failed: {}", e);
        }
    }
    result
}

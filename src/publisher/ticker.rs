use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::broker::BrokerHandle;

/// Publishes the current time on a fixed period until cancelled.
///
/// The first message goes out one full period after start. A zero period is
/// refused and the ticker returns without publishing.
pub async fn run_ticker(broker: BrokerHandle, period: Duration, shutdown: CancellationToken) {
    if period.is_zero() {
        error!("ticker period must be greater than zero, publisher not started");
        return;
    }

    let mut interval = time::interval_at(time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                info!("Receiving event");
                broker.publish(time_message(Local::now()));
            }
        }
    }
    debug!("ticker stopped");
}

pub fn spawn_ticker(
    broker: BrokerHandle,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_ticker(broker, period, shutdown))
}

pub fn time_message(now: DateTime<Local>) -> String {
    format!("the time is {}", now.format("%Y-%m-%d %H:%M:%S%.3f %z"))
}

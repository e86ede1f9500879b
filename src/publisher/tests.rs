use super::ticker::{spawn_ticker, time_message};
use crate::broker::Broker;
use crate::client::Subscriber;
use chrono::{Local, TimeZone};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[test]
fn test_time_message_format() {
    let now = Local.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
    let text = time_message(now);
    assert!(text.starts_with("the time is 2024-05-17 09:30:00.000 "));
}

#[tokio::test(start_paused = true)]
async fn test_ticker_publishes_each_period() {
    let (broker, _task) = Broker::spawn();
    let (subscriber, mut rx) = Subscriber::channel();
    broker.join(subscriber);

    let shutdown = CancellationToken::new();
    let ticker = spawn_ticker(broker.clone(), Duration::from_secs(2), shutdown.clone());

    let first = rx.recv().await.unwrap();
    assert!(first.as_str().starts_with("the time is "));
    let second = rx.recv().await.unwrap();
    assert!(second.as_str().starts_with("the time is "));

    shutdown.cancel();
    ticker.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_ticker_waits_one_period_before_first_publish() {
    let (broker, _task) = Broker::spawn();
    let (subscriber, mut rx) = Subscriber::channel();
    broker.join(subscriber);

    let shutdown = CancellationToken::new();
    let _ticker = spawn_ticker(broker.clone(), Duration::from_secs(2), shutdown.clone());

    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(rx.recv().await.is_some());
    shutdown.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_ticker_stops_publishing() {
    let (broker, _task) = Broker::spawn();
    let (subscriber, mut rx) = Subscriber::channel();
    broker.join(subscriber);

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    spawn_ticker(broker.clone(), Duration::from_secs(2), shutdown)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(broker.subscriber_count().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_period_ticker_returns_without_panicking() {
    let (broker, _task) = Broker::spawn();
    let (subscriber, mut rx) = Subscriber::channel();
    broker.join(subscriber);

    let result = spawn_ticker(broker.clone(), Duration::ZERO, CancellationToken::new()).await;
    assert!(result.is_ok());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A polling "sensor" that only runs while somebody is subscribed.
//!
//! Run with `RUST_LOG=debug cargo run -p ember --example lazy_sensor` to see the
//! activation transitions logged.

use ember::{ActivationHooks, BehaviorSubject, Multicast, RefCountSubject, Result};
use futures::StreamExt;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

struct PollingSensor {
    readings: BehaviorSubject<f64>,
    runtime: Handle,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl ActivationHooks for PollingSensor {
    fn on_active(&self) -> Result<()> {
        tracing::info!("sensor powered on");
        let readings = self.readings.clone();
        let poller = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(50));
            let mut sample = 20.0;
            loop {
                ticker.tick().await;
                sample += 0.25;
                if readings.publish(sample).is_err() {
                    break;
                }
            }
        });
        *self.poller.lock() = Some(poller);
        Ok(())
    }

    fn on_inactive(&self) -> Result<()> {
        if let Some(poller) = self.poller.lock().take() {
            poller.abort();
        }
        tracing::info!("sensor powered off");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let readings = BehaviorSubject::new();
    let sensor = RefCountSubject::new(
        readings.clone(),
        PollingSensor {
            readings,
            runtime: Handle::current(),
            poller: Mutex::new(None),
        },
    );

    for round in 1..=2 {
        let mut dashboard = sensor.subscribe();
        let mut logger = sensor.subscribe();

        for _ in 0..3 {
            let Some(item) = dashboard.next().await else {
                break;
            };
            let celsius = item.into_result()?;
            tracing::info!(round, celsius, "dashboard reading");
        }
        drop(dashboard);

        if let Some(item) = logger.next().await {
            let celsius = item.into_result()?;
            tracing::info!(round, celsius, "logger reading");
        }
        drop(logger);

        // Nobody listens now; the poller is stopped until the next round.
        anyhow::ensure!(!sensor.is_active(), "sensor still active after round {round}");
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    sensor.complete();
    Ok(())
}

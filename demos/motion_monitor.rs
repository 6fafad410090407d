// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watches a camera's notification stream and logs motion changes.
//!
//! # Usage
//!
//! ```bash
//! CAM_URL=http://192.168.1.20 CAM_USER=admin CAM_PASSWD=secret \
//!     RUST_LOG=camnotify=debug cargo run --example motion_monitor
//! ```
//!
//! The program exits with a non-zero status once the stream fails. Press
//! Ctrl+C to stop it earlier.

use std::process::ExitCode;
use std::sync::Arc;

use camnotify::sensor::MotionSensorState;
use camnotify::{CameraConfig, Error, Monitor};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CameraConfig::new(
        env_or_empty("CAM_URL"),
        env_or_empty("CAM_USER"),
        env_or_empty("CAM_PASSWD"),
    );
    tracing::info!(?config, "Starting motion monitor");

    let monitor = match Monitor::new(config) {
        Ok(monitor) => monitor,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create monitor");
            return ExitCode::FAILURE;
        }
    };

    let sensor = Arc::new(MotionSensorState::new());
    sensor.on_motion_changed(|detected| {
        tracing::info!(detected, "Motion state changed");
    });

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    match monitor.run_until(&sensor, shutdown).await {
        Error::Cancelled => ExitCode::SUCCESS,
        err => {
            tracing::error!(error = %err, "Motion monitoring stopped");
            ExitCode::FAILURE
        }
    }
}

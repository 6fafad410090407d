// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `camnotify` - Camera notification streams as motion sensor state.
//!
//! D-Link style IP cameras expose a long-lived HTTP endpoint,
//! `/config/notify_stream.cgi`, that never finishes its response and instead
//! appends `\r`-delimited `key=value` records whenever something happens.
//! This library subscribes to that stream, decodes the records into typed
//! [`Event`]s and drives a home-automation [`MotionSensor`] from them.
//!
//! # Pipeline
//!
//! ```text
//! HTTP body chunks -> RecordDecoder -> parse_line -> Event
//!     -> channel (one slot) -> Monitor -> MotionSensor::set_motion_detected
//! ```
//!
//! - The subscriber runs in its own task and never reads ahead of the
//!   consumer by more than one event.
//! - Any error ends the monitor. There is no reconnection.
//! - Records with unknown keys are dropped silently.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use camnotify::{CameraConfig, Monitor};
//! use camnotify::sensor::MotionSensorState;
//!
//! #[tokio::main]
//! async fn main() -> camnotify::Result<()> {
//!     let config = CameraConfig::new("http://192.168.1.20", "admin", "secret");
//!     let monitor = Monitor::new(config)?;
//!
//!     let sensor = Arc::new(MotionSensorState::new());
//!     sensor.on_motion_changed(|detected| println!("motion: {detected}"));
//!
//!     // Only returns once the stream fails.
//!     Err(monitor.run(&sensor).await)
//! }
//! ```

mod config;
pub mod error;
pub mod event;
mod monitor;
pub mod protocol;
pub mod sensor;

pub use config::{CameraConfig, NOTIFY_STREAM_PATH};
pub use error::{Error, ProtocolError, Result};
pub use event::{Event, MovementDetected, parse_line};
pub use monitor::Monitor;
pub use protocol::{ChunkSource, Notification, NotifyClient, RecordDecoder};
pub use sensor::{MotionSensor, MotionSensorState};

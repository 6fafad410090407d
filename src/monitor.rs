// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitor loop bridging a camera's notifications to a motion sensor.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::CameraConfig;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::protocol::{Notification, NotifyClient};
use crate::sensor::MotionSensor;

/// Drives a [`MotionSensor`] from a camera's notification stream.
///
/// A monitor has no successful end state: it runs until the stream fails and
/// then returns that failure. There is no reconnection; the owner decides what
/// a returned error means for the rest of the process.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use camnotify::{CameraConfig, Monitor};
/// use camnotify::sensor::MotionSensorState;
///
/// # async fn example() -> camnotify::Result<()> {
/// let monitor = Monitor::new(CameraConfig::new("http://192.168.1.20", "admin", "secret"))?;
/// let sensor = Arc::new(MotionSensorState::new());
///
/// let err = monitor.run(&sensor).await;
/// eprintln!("motion monitoring stopped: {err}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Monitor {
    client: NotifyClient,
}

impl Monitor {
    /// Creates a monitor for the given camera.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the HTTP client cannot be created.
    pub fn new(config: CameraConfig) -> Result<Self> {
        Ok(Self::from_client(NotifyClient::new(config)?))
    }

    /// Creates a monitor from an existing notification client.
    #[must_use]
    pub fn from_client(client: NotifyClient) -> Self {
        Self { client }
    }

    /// Returns the notification client.
    #[must_use]
    pub fn client(&self) -> &NotifyClient {
        &self.client
    }

    /// Runs until the notification stream fails and returns the failure.
    ///
    /// The subscriber runs as a separate task. It is cancelled whenever this
    /// future completes or is dropped, which closes the camera connection.
    pub async fn run<S>(&self, sensor: &S) -> Error
    where
        S: MotionSensor + ?Sized,
    {
        self.run_until(sensor, CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), but also stops with [`Error::Cancelled`]
    /// once `shutdown` is cancelled.
    pub async fn run_until<S>(&self, sensor: &S, shutdown: CancellationToken) -> Error
    where
        S: MotionSensor + ?Sized,
    {
        let cancel = shutdown.child_token();
        let _subscriber_guard = cancel.clone().drop_guard();

        let (tx, mut rx) = mpsc::channel::<Notification>(1);
        tokio::spawn(self.client.clone().subscribe(tx, cancel));

        loop {
            let notification = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    tracing::debug!("Motion monitor shut down");
                    return Error::Cancelled;
                }
                notification = rx.recv() => notification,
            };

            match notification {
                Some(Ok(event)) => apply_event(sensor, event),
                Some(Err(e)) => return e,
                None => return Error::ChannelClosed,
            }
        }
    }
}

/// Maps one event onto the sensor.
fn apply_event<S>(sensor: &S, event: Event)
where
    S: MotionSensor + ?Sized,
{
    match event {
        Event::MovementDetected(movement) => {
            tracing::debug!(
                raw = %movement.raw(),
                detected = movement.value(),
                "Updating motion sensor"
            );
            sensor.set_motion_detected(movement.value());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::time::timeout;

    use super::*;
    use crate::event::parse_line;

    #[derive(Default)]
    struct RecordingSensor {
        values: Mutex<Vec<bool>>,
    }

    impl MotionSensor for RecordingSensor {
        fn set_motion_detected(&self, detected: bool) {
            self.values.lock().push(detected);
        }
    }

    #[test]
    fn movement_event_sets_sensor() {
        let sensor = RecordingSensor::default();
        apply_event(&sensor, parse_line("pir=on").unwrap());
        apply_event(&sensor, parse_line("pir=off").unwrap());
        apply_event(&sensor, parse_line("pir=on").unwrap());
        assert_eq!(*sensor.values.lock(), vec![true, false, true]);
    }

    #[test]
    fn repeated_values_are_not_debounced() {
        let sensor = RecordingSensor::default();
        apply_event(&sensor, parse_line("pir=on").unwrap());
        apply_event(&sensor, parse_line("pir=on").unwrap());
        assert_eq!(*sensor.values.lock(), vec![true, true]);
    }

    #[tokio::test]
    async fn unreachable_camera_returns_connection_error() {
        let monitor = Monitor::new(CameraConfig::new("http://127.0.0.1:1", "admin", "")).unwrap();
        let sensor = RecordingSensor::default();

        let err = timeout(Duration::from_secs(10), monitor.run(&sensor))
            .await
            .expect("monitor did not stop");

        assert!(matches!(err, Error::Connection(_)), "got {err:?}");
        assert!(sensor.values.lock().is_empty());
    }

    #[tokio::test]
    async fn empty_address_returns_connection_error() {
        let monitor = Monitor::new(CameraConfig::new("", "", "")).unwrap();
        let sensor = RecordingSensor::default();

        let err = monitor.run(&sensor).await;

        assert!(matches!(err, Error::Connection(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn cancelled_shutdown_returns_cancelled() {
        let monitor = Monitor::new(CameraConfig::new("http://127.0.0.1:1", "", "")).unwrap();
        let sensor = RecordingSensor::default();
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let err = monitor.run_until(&sensor, shutdown).await;

        assert!(matches!(err, Error::Cancelled), "got {err:?}");
    }
}

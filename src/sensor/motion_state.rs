// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thread-safe motion sensor state with change callbacks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;

use super::MotionSensor;

/// Unique identifier for a motion callback, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type MotionCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Motion sensor state shared between the monitor and its readers.
///
/// The value lives in an atomic flag, so reads never block. Callbacks run on
/// the writer's task, only when the value actually changes.
pub struct MotionSensorState {
    detected: AtomicBool,
    next_id: AtomicU64,
    callbacks: RwLock<HashMap<SubscriptionId, MotionCallback>>,
}

impl MotionSensorState {
    /// Creates a sensor reporting no motion.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detected: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns `true` if motion is currently detected.
    #[must_use]
    pub fn is_motion_detected(&self) -> bool {
        self.detected.load(Ordering::Acquire)
    }

    /// Registers a callback invoked with the new value on every change.
    pub fn on_motion_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }
}

impl MotionSensor for MotionSensorState {
    fn set_motion_detected(&self, detected: bool) {
        let previous = self.detected.swap(detected, Ordering::AcqRel);
        if previous == detected {
            return;
        }

        // Callbacks may subscribe or unsubscribe, so the lock is released first.
        let callbacks: Vec<MotionCallback> = self.callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(detected);
        }
    }
}

impl Default for MotionSensorState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MotionSensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionSensorState")
            .field("detected", &self.is_motion_detected())
            .field("callbacks", &self.callback_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn starts_without_motion() {
        let sensor = MotionSensorState::new();
        assert!(!sensor.is_motion_detected());
        assert_eq!(sensor.callback_count(), 0);
    }

    #[test]
    fn set_updates_value() {
        let sensor = MotionSensorState::new();
        sensor.set_motion_detected(true);
        assert!(sensor.is_motion_detected());
        sensor.set_motion_detected(false);
        assert!(!sensor.is_motion_detected());
    }

    #[test]
    fn callbacks_fire_only_on_change() {
        let sensor = MotionSensorState::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        sensor.on_motion_changed(move |detected| seen_clone.lock().push(detected));

        sensor.set_motion_detected(false);
        sensor.set_motion_detected(true);
        sensor.set_motion_detected(true);
        sensor.set_motion_detected(false);

        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn unsubscribe_stops_callbacks() {
        let sensor = MotionSensorState::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let id = sensor.on_motion_changed(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        sensor.set_motion_detected(true);
        assert!(sensor.unsubscribe(id));
        assert!(!sensor.unsubscribe(id));
        sensor.set_motion_detected(false);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sensor.callback_count(), 0);
    }

    #[test]
    fn subscription_ids_are_unique() {
        let sensor = MotionSensorState::new();
        let a = sensor.on_motion_changed(|_| {});
        let b = sensor.on_motion_changed(|_| {});
        assert_ne!(a, b);
        assert_eq!(a.to_string(), format!("Sub({})", a.value()));
    }

    #[test]
    fn works_through_arc() {
        let sensor = Arc::new(MotionSensorState::new());
        let reader = Arc::clone(&sensor);

        let writer: &dyn MotionSensor = &sensor;
        writer.set_motion_detected(true);

        assert!(reader.is_motion_detected());
    }
}

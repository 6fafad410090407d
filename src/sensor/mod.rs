// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motion sensor boundary.
//!
//! The monitor writes motion state into a sensor owned by the surrounding
//! accessory framework. That framework may read the value from its own
//! threads, so implementations of [`MotionSensor`] take `&self` and must
//! synchronize internally.
//!
//! [`MotionSensorState`] is a ready-made implementation backed by an atomic
//! flag, with change callbacks for bridging into other frameworks:
//!
//! ```
//! use camnotify::sensor::{MotionSensor, MotionSensorState};
//!
//! let sensor = MotionSensorState::new();
//! let sub_id = sensor.on_motion_changed(|detected| {
//!     println!("motion detected: {detected}");
//! });
//!
//! sensor.set_motion_detected(true);
//! assert!(sensor.is_motion_detected());
//!
//! sensor.unsubscribe(sub_id);
//! ```

mod motion_state;

pub use motion_state::{MotionSensorState, SubscriptionId};

use std::sync::Arc;

/// A boolean "motion currently detected" property.
pub trait MotionSensor: Send + Sync {
    /// Sets the detected state.
    ///
    /// Called once per recognized motion record, without debouncing.
    fn set_motion_detected(&self, detected: bool);
}

impl<T: MotionSensor + ?Sized> MotionSensor for &T {
    fn set_motion_detected(&self, detected: bool) {
        (**self).set_motion_detected(detected);
    }
}

impl<T: MotionSensor + ?Sized> MotionSensor for Arc<T> {
    fn set_motion_detected(&self, detected: bool) {
        (**self).set_motion_detected(detected);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera event types.

use serde::Serialize;

/// An event decoded from one record of the notification stream.
///
/// The set of variants is closed: consumers match on it exhaustively, so a
/// newly recognized protocol key only compiles once every consumer handles it.
///
/// # Examples
///
/// ```
/// use camnotify::event::{Event, parse_line};
///
/// let event = parse_line("pir=on").unwrap();
/// assert_eq!(event.raw(), "pir=on");
///
/// match event {
///     Event::MovementDetected(movement) => assert!(movement.value()),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The passive infrared sensor changed state.
    MovementDetected(MovementDetected),
}

impl Event {
    /// Returns the protocol line this event was decoded from.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::MovementDetected(e) => e.raw(),
        }
    }
}

impl From<MovementDetected> for Event {
    fn from(event: MovementDetected) -> Self {
        Self::MovementDetected(event)
    }
}

/// Motion reported by a `pir=` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementDetected {
    value: bool,
    raw: String,
}

impl MovementDetected {
    /// Record key of passive infrared events.
    pub const PREFIX: &'static str = "pir=";

    /// Decodes a `pir=` line.
    ///
    /// Returns `None` if the line does not start with [`Self::PREFIX`]. Motion
    /// is present only when the line ends with `on`; every other suffix,
    /// including malformed ones, means no motion.
    #[must_use]
    pub fn from_line(raw: &str) -> Option<Self> {
        raw.starts_with(Self::PREFIX).then(|| Self {
            value: raw.ends_with("on"),
            raw: raw.to_string(),
        })
    }

    /// Returns `true` if motion is currently detected.
    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }

    /// Returns the protocol line this event was decoded from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

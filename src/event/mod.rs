// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event model for camera notifications.
//!
//! Each `\r`-delimited record of the notification stream is a `key=value`
//! token. Recognized keys decode to an [`Event`] variant; every other record is
//! dropped by [`parse_line`].
//!
//! | Record      | Event                                 |
//! |-------------|---------------------------------------|
//! | `pir=on`    | [`MovementDetected`] with value `true`  |
//! | `pir=<any>` | [`MovementDetected`] with value `false` |
//! | other       | none                                  |

mod camera_event;
mod parser;

pub use camera_event::{Event, MovementDetected};
pub use parser::parse_line;

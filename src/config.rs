// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection parameters for a camera.

use std::fmt;

/// Path of the notification stream endpoint.
pub const NOTIFY_STREAM_PATH: &str = "/config/notify_stream.cgi";

/// Connection parameters for one camera.
///
/// The values are opaque: nothing is validated here. An empty or invalid
/// address surfaces as a connection error when the stream is opened.
///
/// # Examples
///
/// ```
/// use camnotify::CameraConfig;
///
/// let config = CameraConfig::new("http://192.168.1.20", "admin", "secret");
/// assert_eq!(
///     config.notify_url(),
///     "http://192.168.1.20/config/notify_stream.cgi"
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CameraConfig {
    address: String,
    username: String,
    password: String,
}

impl CameraConfig {
    /// Creates a configuration.
    ///
    /// # Arguments
    ///
    /// * `address` - Scheme and host of the camera, e.g. `http://192.168.1.20`
    /// * `username` - User for HTTP Basic authentication
    /// * `password` - Password for HTTP Basic authentication
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the base address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Builds the URL of the notification stream.
    #[must_use]
    pub fn notify_url(&self) -> String {
        format!(
            "{}{NOTIFY_STREAM_PATH}",
            self.address.trim_end_matches('/')
        )
    }
}

impl fmt::Debug for CameraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

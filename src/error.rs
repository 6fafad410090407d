// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `camnotify` library.
//!
//! Every error in this crate is terminal for a running monitor: there is no
//! retry and no partial recovery. Unrecognized protocol records are not errors
//! at all, they are filtered out by the line parser.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The notification request could not be built or sent.
    ///
    /// Covers invalid addresses, DNS, TCP and TLS failures.
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The camera answered, but not in the expected way.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// An event reached a consumer that has no handler for it.
    #[error("event '{raw}', unrecognized")]
    UnrecognizedEvent {
        /// The raw protocol line the event was decoded from.
        raw: String,
    },

    /// The subscriber went away without reporting an error.
    #[error("notification channel closed")]
    ChannelClosed,

    /// The monitor was shut down by its owner.
    #[error("monitor cancelled")]
    Cancelled,
}

/// Errors related to the notification stream itself.
///
/// Each variant carries the HTTP status text of the response (for example
/// `"200 OK"` or `"401 Unauthorized"`).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The camera did not answer with `200 OK`.
    #[error("got {status}")]
    UnexpectedStatus {
        /// Status text of the response.
        status: String,
    },

    /// The camera closed the notification stream.
    #[error("stream closed, got {status}")]
    StreamClosed {
        /// Status text of the response the stream belonged to.
        status: String,
    },

    /// Reading the notification stream failed.
    #[error("stream read failed, got {status}: {source}")]
    StreamRead {
        /// Status text of the response the stream belonged to.
        status: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ProtocolError {
    /// Returns the HTTP status text associated with this error.
    #[must_use]
    pub fn status(&self) -> &str {
        match self {
            Self::UnexpectedStatus { status }
            | Self::StreamClosed { status }
            | Self::StreamRead { status, .. } => status,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_display() {
        let err = ProtocolError::UnexpectedStatus {
            status: "401 Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "got 401 Unauthorized");
    }

    #[test]
    fn unrecognized_event_display() {
        let err = Error::UnrecognizedEvent {
            raw: "foo=bar".to_string(),
        };
        assert_eq!(err.to_string(), "event 'foo=bar', unrecognized");
    }

    #[test]
    fn monitor_exit_display() {
        assert_eq!(
            Error::ChannelClosed.to_string(),
            "notification channel closed"
        );
        assert_eq!(Error::Cancelled.to_string(), "monitor cancelled");
    }

    #[test]
    fn error_from_protocol_error() {
        let err: Error = ProtocolError::StreamClosed {
            status: "200 OK".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::StreamClosed { .. })
        ));
        assert_eq!(err.to_string(), "protocol error: stream closed, got 200 OK");
    }

    #[test]
    fn status_is_exposed_for_every_variant() {
        let read = ProtocolError::StreamRead {
            status: "200 OK".to_string(),
            source: std::io::Error::other("reset"),
        };
        assert_eq!(read.status(), "200 OK");

        let closed = ProtocolError::StreamClosed {
            status: "200 OK".to_string(),
        };
        assert_eq!(closed.status(), "200 OK");
    }
}

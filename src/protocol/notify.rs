// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification stream client.

use reqwest::{Client, Response, StatusCode};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::CameraConfig;
use crate::error::{Error, ProtocolError, Result};
use crate::event::{Event, parse_line};
use crate::protocol::{ChunkSource, RecordDecoder};

/// Message carried from the subscriber to its consumer.
///
/// A subscriber sends any number of `Ok` events followed by at most one
/// `Err`, after which it drops its sender.
pub type Notification = Result<Event>;

/// Client for a camera's notification stream.
///
/// No timeout is configured on the connection: a stream that stays open but
/// goes silent blocks the reader until it is cancelled.
///
/// # Examples
///
/// ```no_run
/// use camnotify::CameraConfig;
/// use camnotify::protocol::NotifyClient;
/// use tokio::sync::mpsc;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> camnotify::Result<()> {
/// let client = NotifyClient::new(CameraConfig::new("http://192.168.1.20", "admin", ""))?;
///
/// let (tx, mut rx) = mpsc::channel(1);
/// tokio::spawn(client.subscribe(tx, CancellationToken::new()));
///
/// while let Some(notification) = rx.recv().await {
///     println!("{:?}", notification?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NotifyClient {
    config: CameraConfig,
    client: Client,
}

impl NotifyClient {
    /// Creates a client for the given camera.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the HTTP client cannot be created.
    pub fn new(config: CameraConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(Error::Connection)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a client reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(config: CameraConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Returns the camera configuration.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Requests the notification stream.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if the request cannot be built or sent
    /// - [`ProtocolError::UnexpectedStatus`] if the camera does not answer `200 OK`
    pub async fn open(&self) -> Result<NotifyStream> {
        let url = self.config.notify_url();

        tracing::debug!(url = %url, "Opening notification stream");

        let response = self
            .client
            .get(&url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .send()
            .await
            .map_err(Error::Connection)?;

        let status = status_text(response.status());
        if response.status() != StatusCode::OK {
            return Err(ProtocolError::UnexpectedStatus { status }.into());
        }

        tracing::info!(url = %url, "Subscribed to notification stream");

        Ok(NotifyStream { response, status })
    }

    /// Opens the stream and forwards its events to `tx` until it fails.
    ///
    /// The terminal error, if any, is the last message sent. Cancelling
    /// `cancel` or dropping the receiver ends the subscription silently.
    pub async fn subscribe(self, tx: mpsc::Sender<Notification>, cancel: CancellationToken) {
        let opened = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Subscription cancelled before the stream opened");
                return;
            }
            opened = self.open() => opened,
        };

        match opened {
            Ok(stream) => stream.drain(tx, cancel).await,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open notification stream");
                let _ = tx.send(Err(e)).await;
            }
        }
    }
}

/// An open notification stream.
#[derive(Debug)]
pub struct NotifyStream {
    response: Response,
    status: String,
}

impl NotifyStream {
    /// Returns the status text of the response, e.g. `"200 OK"`.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Forwards events from this stream to `tx`. See [`drain_records`].
    pub async fn drain(self, tx: mpsc::Sender<Notification>, cancel: CancellationToken) {
        drain_records(self.response, self.status, tx, cancel).await;
    }
}

/// Decodes records from `source` and forwards their events to `tx`.
///
/// The channel slot is reserved before each record is pulled, so with a
/// channel of capacity one nothing more is read from `source` until the
/// consumer has taken the previous event. Records without a recognized key
/// are dropped.
///
/// The stream ending or failing is reported once, as
/// [`ProtocolError::StreamClosed`] or [`ProtocolError::StreamRead`] carrying
/// `status`. Cancellation and a dropped receiver end the loop without a
/// message.
pub async fn drain_records<S: ChunkSource>(
    mut source: S,
    status: String,
    tx: mpsc::Sender<Notification>,
    cancel: CancellationToken,
) {
    let mut decoder = RecordDecoder::new();

    loop {
        let permit = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Notification stream cancelled");
                return;
            }
            permit = tx.reserve() => match permit {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::debug!("Notification receiver dropped");
                    return;
                }
            },
        };

        let notification = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Notification stream cancelled");
                return;
            }
            notification = next_event(&mut source, &mut decoder, &status) => notification,
        };

        let finished = notification.is_err();
        if let Err(e) = &notification {
            tracing::warn!(error = %e, "Notification stream ended");
        }

        permit.send(notification);

        if finished {
            return;
        }
    }
}

/// Pulls records until one decodes to an event, refilling from `source`.
async fn next_event<S: ChunkSource>(
    source: &mut S,
    decoder: &mut RecordDecoder,
    status: &str,
) -> Notification {
    loop {
        while let Some(record) = decoder.next_record() {
            if let Some(event) = parse_line(&record) {
                tracing::debug!(raw = %record, "Received camera event");
                return Ok(event);
            }
            tracing::trace!(raw = %record, "Dropping unrecognized record");
        }

        match source.next_chunk().await {
            Ok(Some(chunk)) => decoder.push(&chunk),
            Ok(None) => {
                return Err(ProtocolError::StreamClosed {
                    status: status.to_string(),
                }
                .into());
            }
            Err(err) => {
                return Err(ProtocolError::StreamRead {
                    status: status.to_string(),
                    source: err,
                }
                .into());
            }
        }
    }
}

/// Formats a status the way HTTP status lines read, e.g. `401 Unauthorized`.
fn status_text(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification stream protocol.
//!
//! The camera keeps the response to `GET /config/notify_stream.cgi` open and
//! appends `\r`-delimited `key=value` records to it as things happen.
//!
//! - [`NotifyClient`]: opens the authenticated stream and drains it
//! - [`RecordDecoder`]: splits the streaming body into records
//! - [`ChunkSource`]: the byte source a stream is drained from

mod decoder;
mod notify;

pub use decoder::{RECORD_DELIMITER, RecordDecoder};
pub use notify::{Notification, NotifyClient, NotifyStream, drain_records};

use std::future::Future;
use std::io;

/// A source of raw body chunks.
///
/// `Ok(None)` marks the end of the stream. Implemented for
/// [`reqwest::Response`]; anything else that yields bytes can be drained the
/// same way.
pub trait ChunkSource {
    /// Reads the next chunk of the body.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying transport fails.
    fn next_chunk(&mut self) -> impl Future<Output = io::Result<Option<Vec<u8>>>> + Send;
}

impl ChunkSource for reqwest::Response {
    async fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        self.chunk()
            .await
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .map_err(io::Error::other)
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Incremental splitter for `\r`-delimited notification records.

/// Byte terminating each record of the notification stream.
pub const RECORD_DELIMITER: u8 = b'\r';

/// Splits a chunked byte stream into notification records.
///
/// Chunk boundaries are arbitrary: a record may span several chunks and a
/// chunk may hold several records. Bytes after the last delimiter stay
/// buffered until more data arrives. The buffer has no size limit: a stream
/// that never sends a delimiter grows it until the connection is cancelled.
///
/// # Examples
///
/// ```
/// use camnotify::protocol::RecordDecoder;
///
/// let mut decoder = RecordDecoder::new();
/// decoder.push(b"pir=on\r\npir=o");
/// assert_eq!(decoder.next_record().as_deref(), Some("pir=on"));
/// assert_eq!(decoder.next_record(), None);
///
/// decoder.push(b"ff\r");
/// assert_eq!(decoder.next_record().as_deref(), Some("pir=off"));
/// ```
#[derive(Debug, Default)]
pub struct RecordDecoder {
    buf: Vec<u8>,
    // bytes of `buf` already known to hold no delimiter
    scanned: usize,
}

impl RecordDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends bytes read from the stream.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Takes the next complete record, with surrounding whitespace trimmed.
    ///
    /// Returns `None` until a delimiter has been buffered. Records that are
    /// not valid UTF-8 are decoded lossily.
    pub fn next_record(&mut self) -> Option<String> {
        let Some(offset) = self.buf[self.scanned..]
            .iter()
            .position(|&b| b == RECORD_DELIMITER)
        else {
            self.scanned = self.buf.len();
            return None;
        };
        let end = self.scanned + offset;
        self.scanned = 0;
        let record: Vec<u8> = self.buf.drain(..=end).collect();
        Some(String::from_utf8_lossy(&record).trim().to_string())
    }

    /// Returns the number of buffered bytes not yet returned as a record.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

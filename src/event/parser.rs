// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line parser for notification stream records.

use std::str::FromStr;

use crate::error::Error;

use super::{Event, MovementDetected};

/// Decodes one trimmed protocol line into an [`Event`].
///
/// Lines with an unknown key (including empty lines) yield `None`: they are
/// filtered out rather than treated as malformed input.
///
/// # Examples
///
/// ```
/// use camnotify::event::parse_line;
///
/// assert!(parse_line("pir=on").is_some());
/// assert!(parse_line("garbage").is_none());
/// ```
#[must_use]
pub fn parse_line(raw: &str) -> Option<Event> {
    raw.parse().ok()
}

impl FromStr for Event {
    type Err = Error;

    /// Strict form of [`parse_line`]: unknown keys are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(movement) = MovementDetected::from_line(s) {
            return Ok(movement.into());
        }

        Err(Error::UnrecognizedEvent { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(raw: &str) -> bool {
        match parse_line(raw) {
            Some(Event::MovementDetected(e)) => e.value(),
            None => panic!("expected MovementDetected for {raw:?}"),
        }
    }

    #[test]
    fn pir_ending_with_on_is_motion() {
        assert!(movement("pir=on"));
        assert!(movement("pir=xon"));
        assert!(movement("pir=on=on"));
    }

    #[test]
    fn pir_with_other_suffix_is_no_motion() {
        assert!(!movement("pir=off"));
        assert!(!movement("pir="));
        assert!(!movement("pir=xyz"));
        assert!(!movement("pir=ON"));
        assert!(!movement("pir=on "));
    }

    #[test]
    fn unknown_prefix_yields_no_event() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("garbage"), None);
        assert_eq!(parse_line("foo=bar"), None);
        assert_eq!(parse_line("PIR=on"), None);
        assert_eq!(parse_line("pir"), None);
    }

    #[test]
    fn parsing_is_idempotent() {
        for raw in ["pir=on", "pir=off", "pir=", "foo=bar", ""] {
            assert_eq!(parse_line(raw), parse_line(raw));
        }
    }

    #[test]
    fn strict_parse_reports_unrecognized_line() {
        let err = "sound=on".parse::<Event>().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedEvent { ref raw } if raw == "sound=on"));
    }

    #[test]
    fn strict_parse_keeps_raw_line() {
        let event: Event = "pir=off".parse().unwrap();
        assert_eq!(event.raw(), "pir=off");
    }
}

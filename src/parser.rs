//! Scanner for the readings blob served by the backend's `GET /data`.
//!
//! The blob is a semi-structured stream of bracketed tuples:
//!
//! ```text
//! [2024-01-01T10:00:00 -05:00, 42.5][2024-01-01T10:05:00 -05:00, 40.0]
//! ```
//!
//! A single linear scan extracts every well-formed entry in source order
//! (the backend emits them chronologically; they are not re-sorted). The
//! timestamp is everything up to, but excluding, the trailing `±HH:MM`
//! offset token; the distance parses as `f64`. Text between entries is
//! ignored, and a malformed entry never aborts the scan: it is recorded as
//! an explicit [`Malformed`] diagnostic and skipped, so one truncated
//! trailing entry cannot take out an otherwise good payload.

use std::fmt;

use crate::models::Reading;

// ---

/// Why a bracketed entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// An `[` with no matching `]` before the next entry or end of input.
    UnclosedEntry,
    /// No `,` separating the timestamp from the distance.
    MissingDistance,
    /// Timestamp lacks the trailing `±HH:MM` offset token.
    MissingOffset,
    /// The distance field did not parse as a float.
    BadDistance,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        let msg = match self {
            MalformedReason::UnclosedEntry => "entry has no closing bracket",
            MalformedReason::MissingDistance => "entry has no distance field",
            MalformedReason::MissingOffset => "timestamp has no timezone offset",
            MalformedReason::BadDistance => "distance is not a number",
        };
        f.write_str(msg)
    }
}

/// One rejected entry, located by the byte offset of its opening `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed {
    // ---
    pub offset: usize,
    pub reason: MalformedReason,
}

/// Result of scanning a readings blob.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    // ---
    /// Well-formed readings in source order.
    pub readings: Vec<Reading>,
    /// Entries that were skipped, with the reason why.
    pub malformed: Vec<Malformed>,
}

/// Scan a readings blob in a single pass.
pub fn scan_readings(blob: &str) -> ScanOutcome {
    // ---
    let mut outcome = ScanOutcome::default();
    let mut pos = 0;

    while let Some(open) = blob[pos..].find('[').map(|i| pos + i) {
        // The grammar does not nest, so the entry ends at the next `]`. If
        // another `[` (or end of input) shows up first, the entry is
        // truncated and the scan resumes at that `[`.
        let body_start = open + 1;
        let close = blob[body_start..].find([']', '[']).map(|i| body_start + i);

        let close = match close {
            Some(i) if blob.as_bytes()[i] == b']' => i,
            Some(next_open) => {
                outcome.push_malformed(open, MalformedReason::UnclosedEntry);
                pos = next_open;
                continue;
            }
            None => {
                outcome.push_malformed(open, MalformedReason::UnclosedEntry);
                break;
            }
        };

        match parse_entry(&blob[body_start..close]) {
            Ok(reading) => outcome.readings.push(reading),
            Err(reason) => outcome.push_malformed(open, reason),
        }

        pos = close + 1;
    }

    outcome
}

impl ScanOutcome {
    fn push_malformed(&mut self, offset: usize, reason: MalformedReason) {
        self.malformed.push(Malformed { offset, reason });
    }
}

// ---

/// Parse the interior of one bracketed entry: `<timestamp> <±HH:MM>, <distance>`.
fn parse_entry(body: &str) -> Result<Reading, MalformedReason> {
    // ---
    // Split at the last comma so a (hypothetical) comma inside the timestamp
    // cannot swallow the distance.
    let (stamp_part, distance_part) = body
        .rsplit_once(',')
        .ok_or(MalformedReason::MissingDistance)?;

    let distance: f64 = distance_part
        .trim()
        .parse()
        .map_err(|_| MalformedReason::BadDistance)?;

    // The offset is a whitespace-separated trailing token like `-05:00`.
    let stamp_part = stamp_part.trim();
    let (timestamp, offset) = stamp_part
        .rsplit_once(char::is_whitespace)
        .ok_or(MalformedReason::MissingOffset)?;

    if !is_utc_offset(offset) {
        return Err(MalformedReason::MissingOffset);
    }

    Ok(Reading {
        timestamp: timestamp.trim_end().to_string(),
        distance,
    })
}

/// True for `±HH:MM`-shaped tokens (`-05:00`, `+10:30`, ...).
fn is_utc_offset(token: &str) -> bool {
    // ---
    let Some(digits) = token.strip_prefix(['+', '-']) else {
        return false;
    };
    let Some((hours, minutes)) = digits.split_once(':') else {
        return false;
    };
    !hours.is_empty()
        && !minutes.is_empty()
        && hours.chars().all(|c| c.is_ascii_digit())
        && minutes.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_two_entry_payload() {
        // ---
        let blob = "[2024-01-01T10:00:00 -05:00, 42.5][2024-01-01T10:05:00 -05:00, 40.0]";
        let outcome = scan_readings(blob);

        assert!(outcome.malformed.is_empty());
        assert_eq!(
            outcome.readings,
            vec![
                Reading {
                    timestamp: "2024-01-01T10:00:00".to_string(),
                    distance: 42.5,
                },
                Reading {
                    timestamp: "2024-01-01T10:05:00".to_string(),
                    distance: 40.0,
                },
            ]
        );
    }

    #[test]
    fn test_positive_offset_and_whitespace() {
        // ---
        let blob = "[2024-06-01T00:00:00 +10:30 , 12.25]\n[2024-06-01T00:10:00 +10:30, 11]\n";
        let outcome = scan_readings(blob);

        assert!(outcome.malformed.is_empty());
        assert_eq!(outcome.readings.len(), 2);
        assert_eq!(outcome.readings[0].timestamp, "2024-06-01T00:00:00");
        assert_eq!(outcome.readings[0].distance, 12.25);
        assert_eq!(outcome.readings[1].distance, 11.0);
    }

    #[test]
    fn test_junk_between_entries_is_ignored() {
        // ---
        let blob = "noise [2024-01-01T10:00:00 -05:00, 1.5] more noise ]] junk";
        let outcome = scan_readings(blob);

        assert_eq!(outcome.readings.len(), 1);
        // The stray `]`s outside an entry are not diagnostics
        assert!(outcome.malformed.is_empty());
    }

    #[test]
    fn test_unclosed_entry_does_not_abort_scan() {
        // ---
        let blob = "[2024-01-01T10:00:00 -05:00, 42.5[2024-01-01T10:05:00 -05:00, 40.0]";
        let outcome = scan_readings(blob);

        assert_eq!(outcome.readings.len(), 1);
        assert_eq!(outcome.readings[0].distance, 40.0);
        assert_eq!(
            outcome.malformed,
            vec![Malformed {
                offset: 0,
                reason: MalformedReason::UnclosedEntry,
            }]
        );
    }

    #[test]
    fn test_truncated_trailing_entry() {
        // ---
        let blob = "[2024-01-01T10:00:00 -05:00, 42.5][2024-01-01T10:05:00 -05";
        let outcome = scan_readings(blob);

        assert_eq!(outcome.readings.len(), 1);
        assert_eq!(outcome.malformed.len(), 1);
        assert_eq!(outcome.malformed[0].offset, 34);
        assert_eq!(outcome.malformed[0].reason, MalformedReason::UnclosedEntry);
    }

    #[test]
    fn test_missing_distance() {
        // ---
        let outcome = scan_readings("[2024-01-01T10:00:00 -05:00]");

        assert!(outcome.readings.is_empty());
        assert_eq!(outcome.malformed[0].reason, MalformedReason::MissingDistance);
    }

    #[test]
    fn test_missing_offset() {
        // ---
        let outcome = scan_readings("[2024-01-01T10:00:00, 42.5]");

        assert!(outcome.readings.is_empty());
        assert_eq!(outcome.malformed[0].reason, MalformedReason::MissingOffset);
    }

    #[test]
    fn test_bad_distance() {
        // ---
        let outcome = scan_readings("[2024-01-01T10:00:00 -05:00, n/a]");

        assert!(outcome.readings.is_empty());
        assert_eq!(outcome.malformed[0].reason, MalformedReason::BadDistance);
    }

    #[test]
    fn test_counts_match_entry_count() {
        // ---
        let blob: String = (0..20)
            .map(|i| format!("[2024-01-01T10:{i:02}:00 -05:00, {}.0]", 50 - i))
            .collect();
        let outcome = scan_readings(&blob);

        assert_eq!(outcome.readings.len(), 20);
        assert!(outcome.malformed.is_empty());
        // Order-preserving: input order is output order
        assert_eq!(outcome.readings[0].distance, 50.0);
        assert_eq!(outcome.readings[19].distance, 31.0);
    }

    #[test]
    fn test_empty_and_bracketless_input() {
        // ---
        assert!(scan_readings("").readings.is_empty());
        let outcome = scan_readings("no entries here");
        assert!(outcome.readings.is_empty());
        assert!(outcome.malformed.is_empty());
    }
}

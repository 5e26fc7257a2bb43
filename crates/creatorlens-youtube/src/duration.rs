//! ISO-8601 duration parsing for the `contentDetails.duration` video field.
//!
//! YouTube reports durations like `"PT1H2M30S"`, `"PT45S"`, or `"P1DT2H"`.
//! These functions use manual byte scanning rather than `regex`: the grammar
//! is tiny and the parser runs once per video. See [`crate::normalize`] for
//! how the parsed seconds feed Shorts detection.

/// Parses an ISO-8601 duration (`PnDTnHnMnS`) into total seconds.
///
/// Matching rules:
/// 1. The leading `P` is required; anything else parses to `0`.
/// 2. Day, hour, minute and second components may appear in any subset
///    (`"P2D"`, `"PT1H"`, `"P1DT2H3M4S"`). The `T` separator is skipped
///    wherever it appears.
/// 3. Fractional seconds (allowed by the standard, never sent by the API)
///    are truncated.
/// 4. Unknown designators and malformed digit runs yield `0` rather than an
///    error; downstream a zero duration means "no duration data".
#[must_use]
pub fn parse_duration_secs(raw: &str) -> u64 {
    let bytes = raw.as_bytes();
    if bytes.first() != Some(&b'P') {
        return 0;
    }

    let mut total: u64 = 0;
    let mut i = 1usize;
    while i < bytes.len() {
        if bytes[i] == b'T' {
            i += 1;
            continue;
        }
        if !bytes[i].is_ascii_digit() {
            return 0;
        }

        let num_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let Ok(value) = raw[num_start..i].parse::<u64>() else {
            return 0;
        };

        // Fractional part: only legal on the seconds component.
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if frac_start == i || bytes.get(i) != Some(&b'S') {
                return 0;
            }
            total = total.saturating_add(value);
            i += 1;
            continue;
        }

        let Some(&designator) = bytes.get(i) else {
            return 0;
        };
        let multiplier: u64 = match designator {
            b'D' => 86_400,
            b'H' => 3_600,
            b'M' => 60,
            b'S' => 1,
            _ => return 0,
        };
        total = total.saturating_add(value.saturating_mul(multiplier));
        i += 1;
    }
    total
}

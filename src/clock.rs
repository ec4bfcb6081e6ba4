//! Millisecond timestamp formatting and parsing.
//!
//! The `HH:MM:SS.mmm` form is used both for the live timer display and for
//! cue boundaries in the wire format, so the two functions here must stay
//! exact inverses of each other for every value they both accept.

/// Format a millisecond duration as `HH:MM:SS.mmm`.
///
/// Hours, minutes and seconds are zero-padded to two digits, milliseconds
/// to three. Durations above 99 hours are not expected and simply widen
/// the hour field.
pub fn format_elapsed(ms: u64) -> String {
    let millis = ms % 1_000;
    let total_secs = ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Parse a `HH:MM:SS.mmm` timestamp back into milliseconds.
///
/// Returns `None` for anything that does not match the grammar, including
/// out-of-range minute/second fields.
pub fn parse_timestamp(text: &str) -> Option<u64> {
    let (clock, millis) = text.split_once('.')?;
    if millis.len() != 3 {
        return None;
    }
    let millis: u64 = parse_field(millis)?;

    let mut parts = clock.split(':');
    let hours: u64 = parse_field(parts.next()?)?;
    let minutes: u64 = parse_field(parts.next()?)?;
    let seconds: u64 = parse_field(parts.next()?)?;
    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return None;
    }

    Some(((hours * 3_600 + minutes * 60 + seconds) * 1_000) + millis)
}

fn parse_field(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

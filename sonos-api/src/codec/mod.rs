//! Conversions between protocol tokens and typed values
//!
//! Everything here is pure and infallible: malformed input maps to a
//! documented default rather than an error, matching how renderers report
//! unknown or transitional values.

mod play_mode;
mod source;
mod time;
mod transport_state;

pub use play_mode::PlayMode;
pub use source::SourceScheme;
pub use time::{format_seek_time, per_mille, time_to_seconds, SeekTimeBuffer};
pub use transport_state::TransportState;

/// Leading integer of `text`, in the manner of C's `atoi`
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. No digits gives 0.
pub fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_add(i64::from(digit - b'0')));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Leading integer of `text` clamped into `min..=max`
pub fn parse_clamped(text: &str, min: i64, max: i64) -> i64 {
    parse_leading_int(text).clamp(min, max)
}

/// `"1"` is on; anything else is off
pub fn parse_flag(text: &str) -> bool {
    text == "1"
}

/// Wire form of an on/off flag
pub fn flag_token(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}

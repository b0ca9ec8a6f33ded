//! Track time strings
//!
//! Renderers report durations and positions as `H:MM:SS` with a hours field
//! of any width. Seeking takes the same shape.

use std::fmt::Write;

use soap_client::ValueBuffer;

/// Fits `255:255:255`, the widest value [`format_seek_time`] can produce
pub type SeekTimeBuffer = ValueBuffer<12>;

/// Convert an `H:MM:SS` string to seconds
///
/// Scans right to left: each digit adds `digit × 10^p × 60^c`, where `p`
/// counts the digits already seen in the current field and `c` the colons
/// to the right. Characters other than digits and colons are ignored, so
/// `NOT_IMPLEMENTED` and the empty string both give 0. Absurdly long input
/// saturates at `u32::MAX`.
pub fn time_to_seconds(time: &str) -> u32 {
    let mut seconds: u64 = 0;
    let mut digit_power: u32 = 0;
    let mut field_weight: u64 = 1;

    for byte in time.bytes().rev() {
        match byte {
            b':' => {
                digit_power = 0;
                field_weight = field_weight.saturating_mul(60);
            }
            b'0'..=b'9' => {
                let place = 10u64.checked_pow(digit_power).unwrap_or(u64::MAX);
                let value = u64::from(byte - b'0').saturating_mul(place).saturating_mul(field_weight);
                seconds = seconds.saturating_add(value);
                digit_power += 1;
            }
            _ => {}
        }
    }

    u32::try_from(seconds).unwrap_or(u32::MAX)
}

/// Render a seek target as `H:MM:SS`
pub fn format_seek_time(hours: u8, minutes: u8, seconds: u8) -> SeekTimeBuffer {
    let mut target = SeekTimeBuffer::new();
    // 12 bytes hold every u8 triple
    let _ = write!(target, "{}:{:02}:{:02}", hours, minutes, seconds);
    target
}

/// Position as parts per thousand of the duration, rounded to nearest
///
/// Zero when either input is zero, which is also how a stopped or
/// unknown track reads.
pub fn per_mille(duration: u32, position: u32) -> u16 {
    if duration == 0 || position == 0 {
        return 0;
    }
    let duration = u64::from(duration);
    let scaled = (u64::from(position) * 1000 + duration / 2) / duration;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("0:01:02", 62)]
    #[case("1:00:00", 3600)]
    #[case("0:00:00", 0)]
    #[case("12:34:56", 45296)]
    #[case("100:00:01", 360_001)]
    #[case("3:25", 205)]
    #[case("59", 59)]
    #[case("", 0)]
    #[case("NOT_IMPLEMENTED", 0)]
    #[case(" 0:00:07 ", 7)]
    fn test_time_to_seconds(#[case] time: &str, #[case] expected: u32) {
        assert_eq!(time_to_seconds(time), expected);
    }

    #[test]
    fn test_huge_input_saturates() {
        assert_eq!(time_to_seconds("99999999999999999999999:00:00"), u32::MAX);
    }

    #[rstest]
    #[case(0, 1, 2, "0:01:02")]
    #[case(1, 0, 0, "1:00:00")]
    #[case(12, 5, 9, "12:05:09")]
    #[case(255, 255, 255, "255:255:255")]
    fn test_format_seek_time(#[case] h: u8, #[case] m: u8, #[case] s: u8, #[case] expected: &str) {
        let target = format_seek_time(h, m, s);
        assert_eq!(target.as_str(), expected);
        assert!(!target.is_truncated());
    }

    #[rstest]
    #[case(200, 50, 250)]
    #[case(0, 50, 0)]
    #[case(200, 0, 0)]
    #[case(3, 1, 333)]
    #[case(3, 2, 667)]
    #[case(180, 180, 1000)]
    fn test_per_mille(#[case] duration: u32, #[case] position: u32, #[case] expected: u16) {
        assert_eq!(per_mille(duration, position), expected);
    }

    proptest! {
        #[test]
        fn prop_seek_time_round_trips(h in 0u8..=255, m in 0u8..60, s in 0u8..60) {
            let target = format_seek_time(h, m, s);
            let expected = u32::from(h) * 3600 + u32::from(m) * 60 + u32::from(s);
            prop_assert_eq!(time_to_seconds(target.as_str()), expected);
        }

        #[test]
        fn prop_per_mille_bounded(duration in 1u32.., position in 0u32..) {
            let value = per_mille(duration, position);
            if position <= duration {
                prop_assert!(value <= 1000);
            }
        }
    }
}

//! Alarm time codec.
//!
//! The document stores the alarm as minutes since midnight (`0..1440`); the
//! form shows it as a 24-hour `HH:MM` string.

/// Minutes in one day; valid alarm times are strictly below this.
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

pub const MINUTES_PER_HOUR: u32 = 60;

/// The value substituted for an absent or truncated `HH:MM` string.
const MIDNIGHT: &str = "00:00";

/// Formats minutes-of-day as a zero-padded `HH:MM` string.
///
/// The hour wraps at 24 so the output is always a valid time of day.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    let hour = (minutes / MINUTES_PER_HOUR) % 24;
    let minute = minutes % MINUTES_PER_HOUR;
    format!("{hour:02}:{minute:02}")
}

/// Parses an `HH:MM` string into minutes-of-day.
///
/// Strings shorter than five characters are treated as `"00:00"`.  The hour is
/// read from the first two characters and the minute from everything after
/// the separator; each is reduced modulo 24 and 60 respectively.  A component
/// without leading digits reads as zero.
pub fn hhmm_to_minutes(text: &str) -> u32 {
    let chars: Vec<char> = text.chars().collect();
    let chars: Vec<char> = if chars.len() < 5 {
        MIDNIGHT.chars().collect()
    } else {
        chars
    };

    let hour_text: String = chars[..2].iter().collect();
    let minute_text: String = chars[3..].iter().collect();

    let hour = leading_number(&hour_text) % 24;
    let minute = leading_number(&minute_text) % MINUTES_PER_HOUR;
    hour * MINUTES_PER_HOUR + minute
}

/// Reads the run of ASCII digits at the start of `text`, ignoring leading
/// whitespace.  Returns 0 when there are none (or they overflow).
fn leading_number(text: &str) -> u32 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_hhmm_known_values() {
        assert_eq!(minutes_to_hhmm(0), "00:00");
        assert_eq!(minutes_to_hhmm(1439), "23:59");
        assert_eq!(minutes_to_hhmm(90), "01:30");
        assert_eq!(minutes_to_hhmm(360), "06:00");
    }

    #[test]
    fn test_minutes_to_hhmm_wraps_past_midnight() {
        assert_eq!(minutes_to_hhmm(MINUTES_PER_DAY + 5), "00:05");
    }

    #[test]
    fn test_hhmm_to_minutes_known_values() {
        assert_eq!(hhmm_to_minutes("00:00"), 0);
        assert_eq!(hhmm_to_minutes("23:59"), 1439);
        assert_eq!(hhmm_to_minutes("01:30"), 90);
    }

    #[test]
    fn test_hhmm_to_minutes_empty_is_midnight() {
        assert_eq!(hhmm_to_minutes(""), 0);
    }

    #[test]
    fn test_hhmm_to_minutes_short_string_is_midnight() {
        // "7:30" is only four characters long.
        assert_eq!(hhmm_to_minutes("7:30"), 0);
    }

    #[test]
    fn test_hhmm_to_minutes_reduces_out_of_range_components() {
        // 25 % 24 = 1, 75 % 60 = 15
        assert_eq!(hhmm_to_minutes("25:75"), 75);
    }

    #[test]
    fn test_hhmm_to_minutes_accepts_seconds_suffix() {
        // Time inputs may report seconds; parsing stops at the first non-digit.
        assert_eq!(hhmm_to_minutes("06:45:00"), 405);
    }

    #[test]
    fn test_hhmm_to_minutes_garbage_reads_as_zero() {
        assert_eq!(hhmm_to_minutes("ab:cd"), 0);
    }

    #[test]
    fn test_every_minute_round_trips() {
        for minutes in 0..MINUTES_PER_DAY {
            assert_eq!(hhmm_to_minutes(&minutes_to_hhmm(minutes)), minutes);
        }
    }
}

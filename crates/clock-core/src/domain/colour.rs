//! Conversion between RGB triples and `#RRGGBB` hex colour strings.
//!
//! The configuration document stores colours as three-element arrays
//! (`[255, 0, 128]`) while colour pickers work with 7-character hex strings
//! (`"#FF0080"`).  Neither direction can fail: malformed input falls back to
//! white.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hex form of the neutral default colour.
pub const DEFAULT_HEX: &str = "#FFFFFF";

/// An RGB colour, serialized as a `[r, g, b]` JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// The neutral default colour, `[255, 255, 255]`.
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Formats the colour as `#RRGGBB` with uppercase hex digits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Parses a `#RRGGBB` string.
    ///
    /// Any string that is not exactly 7 characters long yields [`Rgb::WHITE`].
    /// The first character is not inspected.  Digits are case-insensitive; a
    /// channel that is not valid hex also yields [`Rgb::WHITE`].
    pub fn from_hex(text: &str) -> Rgb {
        if text.chars().count() != 7 || !text.is_ascii() {
            return Rgb::WHITE;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&text[range], 16).ok();
        match (channel(1..3), channel(3..5), channel(5..7)) {
            (Some(r), Some(g), Some(b)) => Rgb([r, g, b]),
            _ => Rgb::WHITE,
        }
    }

    /// Reads a colour from an untyped JSON value.
    ///
    /// Returns `None` unless the value is an array of exactly three integers in
    /// `0..=255`.
    pub fn from_value(value: &Value) -> Option<Rgb> {
        let items = value.as_array()?;
        if items.len() != 3 {
            return None;
        }

        let mut channels = [0u8; 3];
        for (slot, item) in channels.iter_mut().zip(items) {
            *slot = u8::try_from(item.as_u64()?).ok()?;
        }
        Some(Rgb(channels))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// Converts an untyped JSON colour to its hex form, `#FFFFFF` when malformed.
pub fn value_to_hex(value: &Value) -> String {
    Rgb::from_value(value)
        .map(Rgb::to_hex)
        .unwrap_or_else(|| DEFAULT_HEX.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_hex_pads_and_uppercases_channels() {
        assert_eq!(Rgb::new(255, 0, 128).to_hex(), "#FF0080");
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn test_from_hex_parses_each_channel() {
        assert_eq!(Rgb::from_hex("#ABCDEF"), Rgb::new(171, 205, 239));
    }

    #[test]
    fn test_from_hex_is_case_insensitive() {
        assert_eq!(Rgb::from_hex("#abcdef"), Rgb::from_hex("#ABCDEF"));
    }

    #[test]
    fn test_from_hex_wrong_length_defaults_to_white() {
        for text in ["", "#FFF", "#0000000", "000000"] {
            assert_eq!(Rgb::from_hex(text), Rgb::WHITE, "input {text:?}");
        }
    }

    #[test]
    fn test_from_hex_invalid_digits_default_to_white() {
        assert_eq!(Rgb::from_hex("#GG0000"), Rgb::WHITE);
    }

    #[test]
    fn test_from_hex_non_ascii_seven_chars_defaults_to_white() {
        // 7 characters, but more than 7 bytes.
        assert_eq!(Rgb::from_hex("#ÄBCDEF"), Rgb::WHITE);
    }

    #[test]
    fn test_value_to_hex_non_triple_is_white() {
        assert_eq!(value_to_hex(&json!([1, 2])), DEFAULT_HEX);
        assert_eq!(value_to_hex(&json!([1, 2, 3, 4])), DEFAULT_HEX);
        assert_eq!(value_to_hex(&json!("not-an-array")), DEFAULT_HEX);
        assert_eq!(value_to_hex(&json!(["a", "b", "c"])), DEFAULT_HEX);
        assert_eq!(value_to_hex(&Value::Null), DEFAULT_HEX);
    }

    #[test]
    fn test_value_to_hex_out_of_range_channel_is_white() {
        assert_eq!(value_to_hex(&json!([256, 0, 0])), DEFAULT_HEX);
    }

    #[test]
    fn test_value_to_hex_valid_triple() {
        assert_eq!(value_to_hex(&json!([0, 0, 255])), "#0000FF");
    }

    #[test]
    fn test_rgb_serializes_as_array() {
        let json = serde_json::to_value(Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, json!([255, 0, 0]));
    }

    #[test]
    fn test_hex_round_trip_is_exact() {
        let colour = Rgb::new(18, 52, 86);
        assert_eq!(Rgb::from_hex(&colour.to_hex()), colour);
    }
}

//! The configuration document entity.
//!
//! A clock has exactly one [`Configuration`].  It is stored on the device as a
//! JSON object with camelCase keys:
//!
//! ```json
//! {
//!   "deviceName": "Bedroom",
//!   "alarmTime": 360,
//!   "alarmActivation": "WEEKDAYS",
//!   "isRadioInstalled": true,
//!   "radioFrequency": 99.3,
//!   "isUseRadio": false,
//!   "brightness": 15,
//!   "is24Hour": true,
//!   "latitude": -31.9514,
//!   "longitude": 115.8617,
//!   "timezone": "AWST-8",
//!   "offset": 8,
//!   "dayPattern": "RAINBOW_DIGITS",
//!   "dayColour": [255, 255, 255],
//!   "nightPattern": "SOLID_COLOUR",
//!   "nightColour": [255, 0, 0],
//!   "alarmPattern": "RAINBOW_DIGITS",
//!   "alarmColour": [0, 0, 255],
//!   "version": "1.2.0"
//! }
//! ```
//!
//! `version` and `isAlarmDisabled` are reported by the device and are never
//! written by the editor.  Everything else is listed in [`EDITABLE_KEYS`].
//!
//! Building a `Configuration` from an untyped document (with defaults for
//! missing or malformed values) is the job of [`crate::mapping::from_document`].

use serde::Serialize;

use crate::domain::colour::Rgb;

// ── Document keys ─────────────────────────────────────────────────────────────

pub const KEY_DEVICE_NAME: &str = "deviceName";
pub const KEY_ALARM_TIME: &str = "alarmTime";
pub const KEY_ALARM_ACTIVATION: &str = "alarmActivation";
pub const KEY_IS_RADIO_INSTALLED: &str = "isRadioInstalled";
pub const KEY_RADIO_FREQUENCY: &str = "radioFrequency";
pub const KEY_IS_USE_RADIO: &str = "isUseRadio";
pub const KEY_BRIGHTNESS: &str = "brightness";
pub const KEY_IS_24_HOUR: &str = "is24Hour";
pub const KEY_LATITUDE: &str = "latitude";
pub const KEY_LONGITUDE: &str = "longitude";
pub const KEY_TIMEZONE: &str = "timezone";
pub const KEY_OFFSET: &str = "offset";
pub const KEY_VERSION: &str = "version";
pub const KEY_IS_ALARM_DISABLED: &str = "isAlarmDisabled";

/// Keys a client may overwrite through `POST /writeConfig`.
///
/// Keys outside this list (`version`, `isAlarmDisabled`, anything the device
/// adds in future) are owned by the device and survive every write.
pub const EDITABLE_KEYS: [&str; 18] = [
    KEY_DEVICE_NAME,
    KEY_ALARM_TIME,
    KEY_ALARM_ACTIVATION,
    KEY_IS_RADIO_INSTALLED,
    KEY_RADIO_FREQUENCY,
    KEY_IS_USE_RADIO,
    KEY_BRIGHTNESS,
    KEY_IS_24_HOUR,
    KEY_LATITUDE,
    KEY_LONGITUDE,
    KEY_TIMEZONE,
    KEY_OFFSET,
    "dayPattern",
    "dayColour",
    "nightPattern",
    "nightColour",
    "alarmPattern",
    "alarmColour",
];

/// Returns `true` if `key` may be written by a client.
pub fn is_editable_key(key: &str) -> bool {
    EDITABLE_KEYS.contains(&key)
}

// ── Value limits ──────────────────────────────────────────────────────────────

pub const DEVICE_NAME_MAX_LEN: usize = 20;
pub const TIMEZONE_MAX_LEN: usize = 20;
pub const MIN_BRIGHTNESS: u8 = 1;
pub const MAX_BRIGHTNESS: u8 = 15;
pub const MIN_RADIO_FREQUENCY: f64 = 88.0;
pub const MAX_RADIO_FREQUENCY: f64 = 107.9;
pub const MIN_OFFSET_HOURS: i32 = -12;
pub const MAX_OFFSET_HOURS: i32 = 12;

// ── Display slots ─────────────────────────────────────────────────────────────

/// One of the three display configurations the clock switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySlot {
    /// Used between sunrise (or the alarm) and sunset.
    Day,
    /// Used between sunset and sunrise.
    Night,
    /// Used while the alarm is sounding.
    Alarm,
}

impl DisplaySlot {
    pub const ALL: [DisplaySlot; 3] = [DisplaySlot::Day, DisplaySlot::Night, DisplaySlot::Alarm];

    /// Lower-case name used in messages and key prefixes.
    pub fn prefix(self) -> &'static str {
        match self {
            DisplaySlot::Day => "day",
            DisplaySlot::Night => "night",
            DisplaySlot::Alarm => "alarm",
        }
    }

    pub fn pattern_key(self) -> &'static str {
        match self {
            DisplaySlot::Day => "dayPattern",
            DisplaySlot::Night => "nightPattern",
            DisplaySlot::Alarm => "alarmPattern",
        }
    }

    pub fn colour_key(self) -> &'static str {
        match self {
            DisplaySlot::Day => "dayColour",
            DisplaySlot::Night => "nightColour",
            DisplaySlot::Alarm => "alarmColour",
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// The complete settings of one clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Name shown on the network and in the editor title (1–20 characters).
    pub device_name: String,
    /// Alarm time in minutes since midnight (`0..1440`).
    pub alarm_time: u32,
    /// One of the activation options, e.g. `"WEEKDAYS"`.
    pub alarm_activation: String,
    /// Whether the FM radio module is fitted.
    pub is_radio_installed: bool,
    /// FM frequency in MHz; present only when the radio is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_frequency: Option<f64>,
    /// Wake to the radio instead of the buzzer; present only when the radio
    /// is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_use_radio: Option<bool>,
    /// Display brightness, `1..=15`.
    pub brightness: u8,
    #[serde(rename = "is24Hour")]
    pub is_24_hour: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// POSIX TZ string, e.g. `"AWST-8"`.
    pub timezone: String,
    /// UTC offset in whole hours, used for sunrise/sunset calculation.
    pub offset: i32,
    pub day_pattern: String,
    pub day_colour: Rgb,
    pub night_pattern: String,
    pub night_colour: Rgb,
    pub alarm_pattern: String,
    pub alarm_colour: Rgb,
    /// Firmware version reported by the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Set by the device when its alarm hardware is switched off.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_alarm_disabled: bool,
}

impl Configuration {
    /// The settings a clock ships with.
    ///
    /// Used by the store when no document exists yet.
    pub fn factory_default() -> Self {
        Self {
            device_name: "Test Clock".to_string(),
            alarm_time: 360,
            alarm_activation: "ALARM_DISABLED".to_string(),
            is_radio_installed: true,
            radio_frequency: Some(99.3),
            is_use_radio: Some(false),
            brightness: MAX_BRIGHTNESS,
            is_24_hour: true,
            latitude: -31.9514,
            longitude: 115.8617,
            timezone: "AWST-8".to_string(),
            offset: 8,
            day_pattern: "RAINBOW_DIGITS".to_string(),
            day_colour: Rgb::new(255, 255, 255),
            night_pattern: "SOLID_COLOUR".to_string(),
            night_colour: Rgb::new(255, 0, 0),
            alarm_pattern: "RAINBOW_DIGITS".to_string(),
            alarm_colour: Rgb::new(0, 0, 255),
            version: None,
            is_alarm_disabled: false,
        }
    }

    /// Returns the pattern and colour configured for `slot`.
    pub fn display(&self, slot: DisplaySlot) -> (&str, Rgb) {
        match slot {
            DisplaySlot::Day => (&self.day_pattern, self.day_colour),
            DisplaySlot::Night => (&self.night_pattern, self.night_colour),
            DisplaySlot::Alarm => (&self.alarm_pattern, self.alarm_colour),
        }
    }

    /// Replaces the pattern and colour configured for `slot`.
    pub fn set_display(&mut self, slot: DisplaySlot, pattern: String, colour: Rgb) {
        let (p, c) = match slot {
            DisplaySlot::Day => (&mut self.day_pattern, &mut self.day_colour),
            DisplaySlot::Night => (&mut self.night_pattern, &mut self.night_colour),
            DisplaySlot::Alarm => (&mut self.alarm_pattern, &mut self.alarm_colour),
        };
        *p = pattern;
        *c = colour;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

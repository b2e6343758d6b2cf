//! Conversions between a [`Configuration`], its form representation and JSON.
//!
//! ```text
//!                 to_fields()                   from_document() / from_json()
//!  FieldSet  ◄───────────────  Configuration  ◄─────────────────────────────  JSON
//!            ───────────────►                 ─────────────────────────────►
//!                from_fields()                 to_json() / editable_document()
//! ```
//!
//! Loading is forgiving: a stored document may be missing fields, or hold
//! numbers as strings (older editors posted raw input values), and the form
//! still has to render.  Each missing or malformed value falls back to the
//! same default the form would show for an empty input.
//!
//! For every valid configuration `from_fields(&to_fields(&c)) == c`: colours
//! and alarm times survive the hex and `HH:MM` representations exactly.

mod fields;

pub use fields::{DisplayFields, FieldSet, FIELD_IDS};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::alarm_time::{hhmm_to_minutes, minutes_to_hhmm};
use crate::domain::colour::Rgb;
use crate::domain::configuration::{
    is_editable_key, Configuration, DisplaySlot, KEY_ALARM_ACTIVATION, KEY_ALARM_TIME,
    KEY_BRIGHTNESS, KEY_DEVICE_NAME, KEY_IS_24_HOUR, KEY_IS_ALARM_DISABLED,
    KEY_IS_RADIO_INSTALLED, KEY_IS_USE_RADIO, KEY_LATITUDE, KEY_LONGITUDE, KEY_OFFSET,
    KEY_RADIO_FREQUENCY, KEY_TIMEZONE, KEY_VERSION, MAX_BRIGHTNESS, MIN_BRIGHTNESS,
    MIN_RADIO_FREQUENCY,
};

/// Pattern used when a document or form has none.
pub const DEFAULT_PATTERN: &str = "SOLID_COLOUR";

/// Frequency used when the radio is installed but no frequency is set.
pub const DEFAULT_RADIO_FREQUENCY: f64 = MIN_RADIO_FREQUENCY;

/// Errors produced while converting configurations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The JSON text could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON value is valid but is not an object.
    #[error("configuration must be a JSON object")]
    NotAnObject,

    /// A form field id that the form does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A checkbox-style field was given something other than `true`/`false`.
    #[error("field {field} expects true or false, got {value:?}")]
    InvalidFlag { field: String, value: String },

    /// The field is currently disabled (a colour paired with a rainbow pattern).
    #[error("field {0} is disabled by its pattern")]
    FieldDisabled(String),
}

// ── JSON → Configuration ──────────────────────────────────────────────────────

/// Builds a configuration from an untyped document, defaulting anything that
/// is missing or malformed.
///
/// | Field                      | Default                              |
/// |----------------------------|--------------------------------------|
/// | deviceName, timezone       | `""`                                 |
/// | alarmTime                  | `0`                                  |
/// | alarmActivation            | `""`                                 |
/// | isRadioInstalled           | `false`                              |
/// | radioFrequency             | `88.0` (only when radio installed)   |
/// | isUseRadio                 | `false` (only when radio installed)  |
/// | brightness                 | `15` (clamped to `1..=15`)           |
/// | is24Hour                   | `true`                               |
/// | latitude, longitude, offset| `0`                                  |
/// | *Pattern                   | `"SOLID_COLOUR"`                     |
/// | *Colour                    | `[255, 255, 255]`                    |
pub fn from_document(doc: &Map<String, Value>) -> Configuration {
    let is_radio_installed = flag(doc, KEY_IS_RADIO_INSTALLED).unwrap_or(false);

    let display = |slot: DisplaySlot| {
        let pattern = text(doc, slot.pattern_key())
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PATTERN)
            .to_string();
        let colour = doc
            .get(slot.colour_key())
            .and_then(Rgb::from_value)
            .unwrap_or(Rgb::WHITE);
        (pattern, colour)
    };
    let (day_pattern, day_colour) = display(DisplaySlot::Day);
    let (night_pattern, night_colour) = display(DisplaySlot::Night);
    let (alarm_pattern, alarm_colour) = display(DisplaySlot::Alarm);

    Configuration {
        device_name: text(doc, KEY_DEVICE_NAME).unwrap_or_default().to_string(),
        alarm_time: number(doc, KEY_ALARM_TIME)
            .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
            .unwrap_or(0),
        alarm_activation: text(doc, KEY_ALARM_ACTIVATION).unwrap_or_default().to_string(),
        is_radio_installed,
        radio_frequency: is_radio_installed
            .then(|| number(doc, KEY_RADIO_FREQUENCY).unwrap_or(DEFAULT_RADIO_FREQUENCY)),
        is_use_radio: is_radio_installed.then(|| flag(doc, KEY_IS_USE_RADIO).unwrap_or(false)),
        brightness: number(doc, KEY_BRIGHTNESS)
            .map(clamp_brightness)
            .unwrap_or(MAX_BRIGHTNESS),
        is_24_hour: flag(doc, KEY_IS_24_HOUR).unwrap_or(true),
        latitude: number(doc, KEY_LATITUDE).unwrap_or(0.0),
        longitude: number(doc, KEY_LONGITUDE).unwrap_or(0.0),
        timezone: text(doc, KEY_TIMEZONE).unwrap_or_default().to_string(),
        offset: number(doc, KEY_OFFSET).and_then(truncate_offset).unwrap_or(0),
        day_pattern,
        day_colour,
        night_pattern,
        night_colour,
        alarm_pattern,
        alarm_colour,
        version: text(doc, KEY_VERSION).map(str::to_string),
        is_alarm_disabled: flag(doc, KEY_IS_ALARM_DISABLED).unwrap_or(false),
    }
}

/// Like [`from_document`], for a value that must be a JSON object.
///
/// # Errors
///
/// Returns [`MappingError::NotAnObject`] for arrays, strings, numbers, etc.
pub fn from_value(value: &Value) -> Result<Configuration, MappingError> {
    value
        .as_object()
        .map(from_document)
        .ok_or(MappingError::NotAnObject)
}

/// Parses JSON text into a configuration with load defaults applied.
///
/// # Errors
///
/// Returns [`MappingError::Json`] if the text is not JSON, or
/// [`MappingError::NotAnObject`] if it is not a JSON object.
pub fn from_json(text: &str) -> Result<Configuration, MappingError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(&value)
}

// ── Configuration → JSON ──────────────────────────────────────────────────────

/// Serializes the full configuration (including `version`) with 2-space
/// indentation.
pub fn to_json(config: &Configuration) -> Result<String, MappingError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// The body sent to `POST /writeConfig`: every editable key, nothing the
/// device owns.
pub fn editable_document(config: &Configuration) -> Result<Map<String, Value>, MappingError> {
    match serde_json::to_value(config)? {
        Value::Object(mut map) => {
            map.retain(|key, _| is_editable_key(key));
            Ok(map)
        }
        _ => Err(MappingError::NotAnObject),
    }
}

/// The text a user copies out as a backup: the editable document,
/// pretty-printed with 2-space indentation.
pub fn to_backup_json(config: &Configuration) -> Result<String, MappingError> {
    Ok(serde_json::to_string_pretty(&editable_document(config)?)?)
}

// ── Configuration ⇄ FieldSet ──────────────────────────────────────────────────

/// Renders a configuration into form state.
///
/// The colour enabled flags are re-derived from the loaded patterns before
/// returning.
pub fn to_fields(config: &Configuration) -> FieldSet {
    let display = |slot: DisplaySlot| {
        let (pattern, colour) = config.display(slot);
        DisplayFields::new(pattern, colour.to_hex())
    };

    let mut fields = FieldSet {
        device_name: config.device_name.clone(),
        alarm_time: minutes_to_hhmm(config.alarm_time),
        alarm_activation: config.alarm_activation.clone(),
        alarm_section_visible: !config.is_alarm_disabled,
        radio_section_visible: config.is_radio_installed,
        radio_frequency: config
            .radio_frequency
            .unwrap_or(DEFAULT_RADIO_FREQUENCY)
            .to_string(),
        use_radio: config.is_use_radio.unwrap_or(false),
        brightness: config.brightness.to_string(),
        twenty_four_hour: config.is_24_hour,
        latitude: config.latitude.to_string(),
        longitude: config.longitude.to_string(),
        timezone: config.timezone.clone(),
        offset: config.offset.to_string(),
        day: display(DisplaySlot::Day),
        night: display(DisplaySlot::Night),
        alarm: display(DisplaySlot::Alarm),
        version: config.version.clone(),
    };
    fields.recheck_patterns();
    fields
}

/// Reads form state back into a configuration.
///
/// The radio values are only carried when the radio section is visible.
/// Number inputs that do not parse take their load defaults.
pub fn from_fields(fields: &FieldSet) -> Configuration {
    let is_radio_installed = fields.radio_section_visible;

    Configuration {
        device_name: fields.device_name.clone(),
        alarm_time: hhmm_to_minutes(&fields.alarm_time),
        alarm_activation: fields.alarm_activation.clone(),
        is_radio_installed,
        radio_frequency: is_radio_installed.then(|| {
            parse_input(&fields.radio_frequency).unwrap_or(DEFAULT_RADIO_FREQUENCY)
        }),
        is_use_radio: is_radio_installed.then_some(fields.use_radio),
        brightness: parse_number(&fields.brightness)
            .map(clamp_brightness)
            .unwrap_or(MAX_BRIGHTNESS),
        is_24_hour: fields.twenty_four_hour,
        latitude: parse_input(&fields.latitude).unwrap_or(0.0),
        longitude: parse_input(&fields.longitude).unwrap_or(0.0),
        timezone: fields.timezone.clone(),
        offset: parse_number(&fields.offset)
            .and_then(truncate_offset)
            .unwrap_or(0),
        day_pattern: fields.day.pattern().to_string(),
        day_colour: Rgb::from_hex(&fields.day.colour),
        night_pattern: fields.night.pattern().to_string(),
        night_colour: Rgb::from_hex(&fields.night.colour),
        alarm_pattern: fields.alarm.pattern().to_string(),
        alarm_colour: Rgb::from_hex(&fields.alarm.colour),
        version: fields.version.clone(),
        is_alarm_disabled: !fields.alarm_section_visible,
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn text<'a>(doc: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

fn flag(doc: &Map<String, Value>, key: &str) -> Option<bool> {
    doc.get(key).and_then(Value::as_bool)
}

/// A JSON number, or a string holding one.
fn number(doc: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match doc.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Brightness is kept in `1..=15` whatever the source says.
fn clamp_brightness(value: f64) -> u8 {
    value.clamp(f64::from(MIN_BRIGHTNESS), f64::from(MAX_BRIGHTNESS)) as u8
}

/// Whole hours toward zero; out-of-range values are dropped.
fn truncate_offset(value: f64) -> Option<i32> {
    (value.abs() <= f64::from(i32::MAX)).then(|| value.trunc() as i32)
}

fn parse_input<T: std::str::FromStr>(input: &str) -> Option<T> {
    input.trim().parse().ok()
}

/// A finite number typed into a form field.
fn parse_number(input: &str) -> Option<f64> {
    parse_input::<f64>(input).filter(|v| v.is_finite())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

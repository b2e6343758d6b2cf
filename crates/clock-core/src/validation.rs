//! Validation of pasted backup documents.
//!
//! A backup replaces the whole configuration on the clock, so it is checked
//! before it is allowed anywhere near the store.  Every rule is evaluated and
//! every failure is reported; the caller shows the full list and rejects the
//! import as a whole.
//!
//! # Type checking
//!
//! Checks are **strict**: a field that should be a boolean must be a JSON
//! boolean, and a numeric field must be a JSON number (`"15"` is not a valid
//! brightness).  Integer fields (`alarmTime`, `brightness`, `offset` and the
//! colour channels) additionally reject fractional values.  Earlier editors
//! accepted any value for the boolean and numeric fields and relied on range
//! comparisons alone; that permissive behaviour is deliberately not kept.
//!
//! # Rainbow exemption
//!
//! A display colour is only checked when its paired pattern does not contain
//! `RAINBOW`.  A pattern that is not a string at all is treated as
//! non-rainbow, so its colour is checked too.
//!
//! Passing validation does not authorise the write: the caller must still ask
//! the user to confirm that the device configuration will be replaced.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::configuration::{
    Configuration, DisplaySlot, DEVICE_NAME_MAX_LEN, KEY_ALARM_ACTIVATION, KEY_ALARM_TIME,
    KEY_BRIGHTNESS, KEY_DEVICE_NAME, KEY_IS_24_HOUR, KEY_IS_RADIO_INSTALLED, KEY_IS_USE_RADIO,
    KEY_LATITUDE, KEY_LONGITUDE, KEY_OFFSET, KEY_RADIO_FREQUENCY, KEY_TIMEZONE, MAX_BRIGHTNESS,
    MAX_OFFSET_HOURS, MAX_RADIO_FREQUENCY, MIN_BRIGHTNESS, MIN_OFFSET_HOURS, MIN_RADIO_FREQUENCY,
    TIMEZONE_MAX_LEN,
};
use crate::domain::alarm_time::MINUTES_PER_DAY;
use crate::domain::options::{is_rainbow, OptionSets};
use crate::mapping;

/// The full list of rules a rejected backup broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid backup data: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Checks `doc` against the configuration schema.
///
/// Returns one message per broken rule; an empty list means the document is
/// a valid backup.
pub fn validate(doc: &Value, options: &OptionSets) -> Vec<String> {
    let Some(obj) = doc.as_object() else {
        return vec!["Backup must be a JSON object".to_string()];
    };
    let field = |key: &str| obj.get(key).unwrap_or(&Value::Null);

    let mut errors = Vec::new();
    let mut check = |ok: bool, message: &str| {
        if !ok {
            errors.push(message.to_string());
        }
    };

    check(
        bounded_text(field(KEY_DEVICE_NAME), DEVICE_NAME_MAX_LEN),
        "Invalid deviceName",
    );
    check(
        integer(field(KEY_ALARM_TIME)).is_some_and(|v| (0..i64::from(MINUTES_PER_DAY)).contains(&v)),
        "Bad alarm time",
    );
    check(
        field(KEY_ALARM_ACTIVATION)
            .as_str()
            .is_some_and(|v| options.is_activation(v.trim())),
        "Missing alarm activation",
    );

    match field(KEY_IS_RADIO_INSTALLED).as_bool() {
        None => check(false, "Missing radio installed"),
        Some(true) => {
            check(
                field(KEY_RADIO_FREQUENCY)
                    .as_f64()
                    .is_some_and(|v| (MIN_RADIO_FREQUENCY..=MAX_RADIO_FREQUENCY).contains(&v)),
                "Invalid radio frequency",
            );
            check(field(KEY_IS_USE_RADIO).is_boolean(), "Invalid use radio flag");
        }
        Some(false) => {}
    }

    check(
        integer(field(KEY_BRIGHTNESS))
            .is_some_and(|v| (i64::from(MIN_BRIGHTNESS)..=i64::from(MAX_BRIGHTNESS)).contains(&v)),
        "Invalid brightness",
    );
    check(field(KEY_IS_24_HOUR).is_boolean(), "Invalid 24 hour flag");
    check(
        field(KEY_LATITUDE)
            .as_f64()
            .is_some_and(|v| (-90.0..=90.0).contains(&v)),
        "Invalid latitude",
    );
    check(
        field(KEY_LONGITUDE)
            .as_f64()
            .is_some_and(|v| (-180.0..=180.0).contains(&v)),
        "Invalid longitude",
    );
    check(
        bounded_text(field(KEY_TIMEZONE), TIMEZONE_MAX_LEN),
        "Invalid timezone",
    );
    check(
        integer(field(KEY_OFFSET)).is_some_and(|v| {
            (i64::from(MIN_OFFSET_HOURS)..=i64::from(MAX_OFFSET_HOURS)).contains(&v)
        }),
        "Invalid offset",
    );

    for slot in DisplaySlot::ALL {
        let pattern = field(slot.pattern_key()).as_str();
        check(
            pattern.is_some_and(|p| options.is_pattern(p.trim())),
            &format!("Invalid {} pattern", slot.prefix()),
        );
        if !pattern.is_some_and(is_rainbow) {
            check(
                is_colour_triple(field(slot.colour_key())),
                &format!("Invalid {} colour", slot.prefix()),
            );
        }
    }

    if !errors.is_empty() {
        debug!(count = errors.len(), "backup rejected");
    }
    errors
}

/// Validates `doc` and, when it passes, converts it into a [`Configuration`].
///
/// # Errors
///
/// Returns every broken rule as [`ValidationErrors`].
pub fn validate_backup(doc: &Value, options: &OptionSets) -> Result<Configuration, ValidationErrors> {
    let errors = validate(doc, options);
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    mapping::from_value(doc).map_err(|e| ValidationErrors(vec![e.to_string()]))
}

/// A string that is non-blank after trimming and at most `max_len` characters.
fn bounded_text(value: &Value, max_len: usize) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.trim().is_empty() && s.chars().count() <= max_len)
}

/// A JSON number without a fractional part.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && v.abs() < 9.0e15)
            .map(|v| v as i64)
    })
}

/// Exactly three integers, each in `0..=255`.
fn is_colour_triple(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items.len() == 3
            && items
                .iter()
                .all(|item| integer(item).is_some_and(|v| (0..=255).contains(&v)))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_backup() -> Value {
        json!({
            "deviceName": "Kitchen",
            "alarmTime": 420,
            "alarmActivation": "WEEKDAYS",
            "isRadioInstalled": true,
            "radioFrequency": 99.3,
            "isUseRadio": false,
            "brightness": 12,
            "is24Hour": true,
            "latitude": -31.9514,
            "longitude": 115.8617,
            "timezone": "AWST-8",
            "offset": 8,
            "dayPattern": "SOLID_COLOUR",
            "dayColour": [255, 255, 255],
            "nightPattern": "SOLID_COLOUR",
            "nightColour": [255, 0, 0],
            "alarmPattern": "RAINBOW_DIGITS",
            "alarmColour": [0, 0, 255]
        })
    }

    fn errors_for(doc: &Value) -> Vec<String> {
        validate(doc, &OptionSets::default())
    }

    fn with(key: &str, value: Value) -> Value {
        let mut doc = valid_backup();
        doc[key] = value;
        doc
    }

    fn without(key: &str) -> Value {
        let mut doc = valid_backup();
        doc.as_object_mut().unwrap().remove(key);
        doc
    }

    #[test]
    fn test_valid_backup_has_no_errors() {
        assert!(errors_for(&valid_backup()).is_empty());
    }

    #[test]
    fn test_missing_device_name() {
        assert_eq!(errors_for(&without("deviceName")), vec!["Invalid deviceName"]);
    }

    #[test]
    fn test_blank_and_long_device_names() {
        assert_eq!(errors_for(&with("deviceName", json!("   "))), vec!["Invalid deviceName"]);
        assert_eq!(
            errors_for(&with("deviceName", json!("a".repeat(21)))),
            vec!["Invalid deviceName"]
        );
        assert!(errors_for(&with("deviceName", json!("a".repeat(20)))).is_empty());
    }

    #[test]
    fn test_alarm_time_bounds() {
        assert!(errors_for(&with("alarmTime", json!(0))).is_empty());
        assert!(errors_for(&with("alarmTime", json!(1439))).is_empty());
        assert_eq!(errors_for(&with("alarmTime", json!(1440))), vec!["Bad alarm time"]);
        assert_eq!(errors_for(&with("alarmTime", json!(-1))), vec!["Bad alarm time"]);
    }

    #[test]
    fn test_numeric_string_is_rejected() {
        // Strict typing: "420" is a string, not a number.
        assert_eq!(errors_for(&with("alarmTime", json!("420"))), vec!["Bad alarm time"]);
        assert_eq!(errors_for(&with("brightness", json!("12"))), vec!["Invalid brightness"]);
    }

    #[test]
    fn test_whole_float_counts_as_integer() {
        assert!(errors_for(&with("brightness", json!(12.0))).is_empty());
        assert_eq!(errors_for(&with("brightness", json!(12.5))), vec!["Invalid brightness"]);
    }

    #[test]
    fn test_alarm_activation_is_trimmed_before_matching() {
        assert!(errors_for(&with("alarmActivation", json!("  ALL_DAYS "))).is_empty());
        assert_eq!(
            errors_for(&with("alarmActivation", json!("SOMETIMES"))),
            vec!["Missing alarm activation"]
        );
        assert_eq!(
            errors_for(&without("alarmActivation")),
            vec!["Missing alarm activation"]
        );
    }

    #[test]
    fn test_radio_installed_must_be_boolean() {
        assert_eq!(
            errors_for(&with("isRadioInstalled", json!("yes"))),
            vec!["Missing radio installed"]
        );
    }

    #[test]
    fn test_radio_fields_checked_only_when_installed() {
        // Arrange: radio values broken in both documents
        let mut installed = valid_backup();
        installed["radioFrequency"] = json!(120.0);
        installed["isUseRadio"] = json!("no");
        let mut not_installed = installed.clone();
        not_installed["isRadioInstalled"] = json!(false);

        // Act / Assert
        assert_eq!(
            errors_for(&installed),
            vec!["Invalid radio frequency", "Invalid use radio flag"]
        );
        assert!(errors_for(&not_installed).is_empty());
    }

    #[test]
    fn test_radio_frequency_bounds_are_inclusive() {
        assert!(errors_for(&with("radioFrequency", json!(88.0))).is_empty());
        assert!(errors_for(&with("radioFrequency", json!(107.9))).is_empty());
        assert_eq!(
            errors_for(&with("radioFrequency", json!(87.9))),
            vec!["Invalid radio frequency"]
        );
    }

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(errors_for(&with("brightness", json!(0))), vec!["Invalid brightness"]);
        assert_eq!(errors_for(&with("brightness", json!(16))), vec!["Invalid brightness"]);
        assert!(errors_for(&with("brightness", json!(1))).is_empty());
    }

    #[test]
    fn test_24_hour_flag_must_be_boolean() {
        assert_eq!(errors_for(&with("is24Hour", json!(1))), vec!["Invalid 24 hour flag"]);
    }

    #[test]
    fn test_coordinates_bounds() {
        assert_eq!(errors_for(&with("latitude", json!(90.5))), vec!["Invalid latitude"]);
        assert_eq!(errors_for(&with("longitude", json!(-180.1))), vec!["Invalid longitude"]);
        assert!(errors_for(&with("longitude", json!(-180))).is_empty());
    }

    #[test]
    fn test_timezone_required() {
        assert_eq!(errors_for(&without("timezone")), vec!["Invalid timezone"]);
        assert_eq!(errors_for(&with("timezone", json!(""))), vec!["Invalid timezone"]);
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(errors_for(&with("offset", json!(13))), vec!["Invalid offset"]);
        assert!(errors_for(&with("offset", json!(-12))).is_empty());
    }

    #[test]
    fn test_unknown_pattern_is_rejected() {
        assert_eq!(
            errors_for(&with("nightPattern", json!("STROBE"))),
            vec!["Invalid night pattern"]
        );
    }

    #[test]
    fn test_rainbow_pattern_exempts_colour() {
        // Arrange
        let mut doc = valid_backup();
        doc["dayPattern"] = json!("RAINBOW_DIGITS");
        doc["dayColour"] = json!("not-an-array");

        // Act / Assert
        assert!(errors_for(&doc).is_empty());
    }

    #[test]
    fn test_solid_pattern_requires_valid_colour() {
        let mut doc = valid_backup();
        doc["dayPattern"] = json!("SOLID_COLOUR");
        doc["dayColour"] = json!("not-an-array");

        assert_eq!(errors_for(&doc), vec!["Invalid day colour"]);
    }

    #[test]
    fn test_colour_shape_and_range() {
        for bad in [json!([1, 2]), json!([1, 2, 3, 4]), json!([0, 256, 0]), json!([0, -1, 0]), json!(["0", 0, 0])] {
            assert_eq!(
                errors_for(&with("nightColour", bad.clone())),
                vec!["Invalid night colour"],
                "colour {bad}"
            );
        }
    }

    #[test]
    fn test_non_string_pattern_checks_colour() {
        let mut doc = valid_backup();
        doc["alarmPattern"] = json!(3);
        doc["alarmColour"] = json!(null);

        assert_eq!(
            errors_for(&doc),
            vec!["Invalid alarm pattern", "Invalid alarm colour"]
        );
    }

    #[test]
    fn test_errors_accumulate_in_rule_order() {
        let doc = json!({ "isRadioInstalled": false, "is24Hour": true });

        let errors = errors_for(&doc);

        assert_eq!(
            errors,
            vec![
                "Invalid deviceName",
                "Bad alarm time",
                "Missing alarm activation",
                "Invalid brightness",
                "Invalid latitude",
                "Invalid longitude",
                "Invalid timezone",
                "Invalid offset",
                "Invalid day pattern",
                "Invalid day colour",
                "Invalid night pattern",
                "Invalid night colour",
                "Invalid alarm pattern",
                "Invalid alarm colour",
            ]
        );
    }

    #[test]
    fn test_non_object_backup() {
        assert_eq!(errors_for(&json!([1, 2, 3])), vec!["Backup must be a JSON object"]);
    }

    #[test]
    fn test_custom_option_sets() {
        let options = OptionSets {
            activations: vec!["WEEKDAYS".to_string()],
            patterns: vec!["SOLID_COLOUR".to_string()],
        };
        let errors = validate(&valid_backup(), &options);
        // RAINBOW_DIGITS is not offered by this option set.
        assert_eq!(errors, vec!["Invalid alarm pattern"]);
    }

    #[test]
    fn test_validate_backup_returns_typed_configuration() {
        let cfg = validate_backup(&valid_backup(), &OptionSets::default()).unwrap();
        assert_eq!(cfg.device_name, "Kitchen");
        assert_eq!(cfg.radio_frequency, Some(99.3));
    }

    #[test]
    fn test_validate_backup_collects_all_messages() {
        let err = validate_backup(&without("deviceName"), &OptionSets::default()).unwrap_err();
        assert_eq!(err.messages(), ["Invalid deviceName".to_string()]);
        assert_eq!(err.to_string(), "invalid backup data: Invalid deviceName");
    }
}

//! The form representation of a configuration.
//!
//! A [`FieldSet`] holds exactly what an editing form holds: text for text and
//! number inputs, booleans for checkboxes and radio buttons, and the
//! visibility of the collapsible sections.  Values are addressed by the form's
//! field ids (`"deviceName"`, `"alarmTime"`, `"dayColour"`, ...) through
//! [`FieldSet::get`] and [`FieldSet::set`], which is what the command-line
//! editor uses for `set KEY=VALUE`.
//!
//! # Pattern / colour dependency
//!
//! Rainbow patterns generate their own colours, so the paired colour input is
//! disabled while one is selected.  Every pattern change goes through
//! [`FieldSet::set_pattern`], which re-derives the enabled state with
//! [`derive_colour_enabled`].  [`crate::mapping::to_fields`] runs the same
//! recheck once after a full load.

use crate::domain::configuration::DisplaySlot;
use crate::domain::options::derive_colour_enabled;
use crate::mapping::MappingError;

// ── Field ids ─────────────────────────────────────────────────────────────────

pub const FIELD_DEVICE_NAME: &str = "deviceName";
pub const FIELD_ALARM_TIME: &str = "alarmTime";
pub const FIELD_ALARM_ACTIVATION: &str = "alarmActivation";
/// Visibility of the radio section; doubles as the "radio installed" flag.
pub const FIELD_RADIO_SETTINGS: &str = "radioSettings";
pub const FIELD_RADIO_FREQUENCY: &str = "radioFrequency";
/// Checked = wake to the radio, unchecked = wake to the buzzer.
pub const FIELD_USE_RADIO: &str = "useRadio";
pub const FIELD_BRIGHTNESS: &str = "brightness";
/// Checked = 24-hour display, unchecked = 12-hour display.
pub const FIELD_TWENTY_FOUR_HOUR: &str = "twentyFourHour";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";
pub const FIELD_TIMEZONE: &str = "timezone";
pub const FIELD_OFFSET: &str = "offset";

/// Every field id accepted by [`FieldSet::get`] and [`FieldSet::set`], in form
/// order.
pub const FIELD_IDS: [&str; 18] = [
    FIELD_DEVICE_NAME,
    FIELD_ALARM_TIME,
    FIELD_ALARM_ACTIVATION,
    FIELD_RADIO_SETTINGS,
    FIELD_RADIO_FREQUENCY,
    FIELD_USE_RADIO,
    FIELD_BRIGHTNESS,
    FIELD_TWENTY_FOUR_HOUR,
    FIELD_LATITUDE,
    FIELD_LONGITUDE,
    FIELD_TIMEZONE,
    FIELD_OFFSET,
    "dayPattern",
    "dayColour",
    "nightPattern",
    "nightColour",
    "alarmPattern",
    "alarmColour",
];

// ── Display fields ────────────────────────────────────────────────────────────

/// Pattern selector and colour picker for one display slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pattern: String,
    /// `#RRGGBB` value of the colour picker.
    pub colour: String,
    colour_enabled: bool,
}

impl DisplayFields {
    pub fn new(pattern: impl Into<String>, colour: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let colour_enabled = derive_colour_enabled(&pattern);
        Self {
            pattern,
            colour: colour.into(),
            colour_enabled,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the colour picker currently accepts input.
    pub fn colour_enabled(&self) -> bool {
        self.colour_enabled
    }

    fn recheck(&mut self) {
        self.colour_enabled = derive_colour_enabled(&self.pattern);
    }
}

// ── FieldSet ──────────────────────────────────────────────────────────────────

/// Form state for the whole configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub device_name: String,
    /// `HH:MM`.
    pub alarm_time: String,
    pub alarm_activation: String,
    /// Hidden when the device reports its alarm as disabled.  Hiding it also
    /// hides the radio section without changing that section's own state.
    pub alarm_section_visible: bool,
    /// The radio section's own visibility.  This is the "radio installed"
    /// flag when the form is converted back into a configuration.
    pub radio_section_visible: bool,
    pub radio_frequency: String,
    pub use_radio: bool,
    pub brightness: String,
    pub twenty_four_hour: bool,
    pub latitude: String,
    pub longitude: String,
    pub timezone: String,
    pub offset: String,
    pub day: DisplayFields,
    pub night: DisplayFields,
    pub alarm: DisplayFields,
    /// Firmware version as reported by the device, shown read-only.
    pub version: Option<String>,
}

impl FieldSet {
    pub fn display(&self, slot: DisplaySlot) -> &DisplayFields {
        match slot {
            DisplaySlot::Day => &self.day,
            DisplaySlot::Night => &self.night,
            DisplaySlot::Alarm => &self.alarm,
        }
    }

    fn display_mut(&mut self, slot: DisplaySlot) -> &mut DisplayFields {
        match slot {
            DisplaySlot::Day => &mut self.day,
            DisplaySlot::Night => &mut self.night,
            DisplaySlot::Alarm => &mut self.alarm,
        }
    }

    /// Changes the pattern of `slot` and re-derives whether its colour picker
    /// is enabled.
    pub fn set_pattern(&mut self, slot: DisplaySlot, pattern: impl Into<String>) {
        let display = self.display_mut(slot);
        display.pattern = pattern.into();
        display.recheck();
    }

    /// Re-derives the colour enabled state of all three slots.
    pub fn recheck_patterns(&mut self) {
        for slot in DisplaySlot::ALL {
            self.display_mut(slot).recheck();
        }
    }

    /// Whether the radio section is actually on screen.
    pub fn is_radio_shown(&self) -> bool {
        self.alarm_section_visible && self.radio_section_visible
    }

    /// The version text shown at the bottom of the form.
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }

    /// Reads a field by id.  Checkbox-style fields read as `"true"`/`"false"`.
    pub fn get(&self, field: &str) -> Option<String> {
        if let Some((slot, is_colour)) = display_field(field) {
            let display = self.display(slot);
            return Some(if is_colour {
                display.colour.clone()
            } else {
                display.pattern.clone()
            });
        }

        let value = match field {
            FIELD_DEVICE_NAME => self.device_name.clone(),
            FIELD_ALARM_TIME => self.alarm_time.clone(),
            FIELD_ALARM_ACTIVATION => self.alarm_activation.clone(),
            FIELD_RADIO_SETTINGS => self.radio_section_visible.to_string(),
            FIELD_RADIO_FREQUENCY => self.radio_frequency.clone(),
            FIELD_USE_RADIO => self.use_radio.to_string(),
            FIELD_BRIGHTNESS => self.brightness.clone(),
            FIELD_TWENTY_FOUR_HOUR => self.twenty_four_hour.to_string(),
            FIELD_LATITUDE => self.latitude.clone(),
            FIELD_LONGITUDE => self.longitude.clone(),
            FIELD_TIMEZONE => self.timezone.clone(),
            FIELD_OFFSET => self.offset.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Writes a field by id, as if the user had edited the input.
    ///
    /// # Errors
    ///
    /// - [`MappingError::UnknownField`] for an id not in [`FIELD_IDS`].
    /// - [`MappingError::InvalidFlag`] when a checkbox-style field is given
    ///   something other than `true` or `false`.
    /// - [`MappingError::FieldDisabled`] when writing a colour whose pattern
    ///   is a rainbow pattern.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), MappingError> {
        if let Some((slot, is_colour)) = display_field(field) {
            if !is_colour {
                self.set_pattern(slot, value);
                return Ok(());
            }
            let display = self.display_mut(slot);
            if !display.colour_enabled {
                return Err(MappingError::FieldDisabled(field.to_string()));
            }
            display.colour = value.to_string();
            return Ok(());
        }

        match field {
            FIELD_DEVICE_NAME => self.device_name = value.to_string(),
            FIELD_ALARM_TIME => self.alarm_time = value.to_string(),
            FIELD_ALARM_ACTIVATION => self.alarm_activation = value.to_string(),
            FIELD_RADIO_SETTINGS => self.radio_section_visible = parse_flag(field, value)?,
            FIELD_RADIO_FREQUENCY => self.radio_frequency = value.to_string(),
            FIELD_USE_RADIO => self.use_radio = parse_flag(field, value)?,
            FIELD_BRIGHTNESS => self.brightness = value.to_string(),
            FIELD_TWENTY_FOUR_HOUR => self.twenty_four_hour = parse_flag(field, value)?,
            FIELD_LATITUDE => self.latitude = value.to_string(),
            FIELD_LONGITUDE => self.longitude = value.to_string(),
            FIELD_TIMEZONE => self.timezone = value.to_string(),
            FIELD_OFFSET => self.offset = value.to_string(),
            _ => return Err(MappingError::UnknownField(field.to_string())),
        }
        Ok(())
    }
}

/// Maps `dayPattern` → `(Day, false)`, `nightColour` → `(Night, true)`, ...
fn display_field(field: &str) -> Option<(DisplaySlot, bool)> {
    DisplaySlot::ALL.into_iter().find_map(|slot| {
        if field == slot.pattern_key() {
            Some((slot, false))
        } else if field == slot.colour_key() {
            Some((slot, true))
        } else {
            None
        }
    })
}

fn parse_flag(field: &str, value: &str) -> Result<bool, MappingError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MappingError::InvalidFlag {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

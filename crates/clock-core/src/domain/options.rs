//! The enumerations a configuration value may be chosen from.
//!
//! The clock firmware understands four alarm activation modes and a handful of
//! display patterns.  These lists are what the editor offers in its drop-downs
//! and what the backup validator accepts.

/// Alarm activation modes understood by the clock.
pub const ACTIVATION_OPTIONS: [&str; 4] = ["ALARM_DISABLED", "ONE_TIME", "WEEKDAYS", "ALL_DAYS"];

/// Display patterns a user may select for the day, night and alarm displays.
pub const PATTERN_OPTIONS: [&str; 5] = [
    "SOLID_COLOUR",
    "RAINBOW_DIGITS",
    "RAINBOW_SEGMENTS",
    "FLASHING",
    "PULSING",
];

/// Patterns containing this marker generate their own colours.
pub const RAINBOW_MARKER: &str = "RAINBOW";

/// Returns `true` when `pattern` ignores the configured colour.
///
/// The check is a case-sensitive substring match, so both `RAINBOW_DIGITS`
/// and `RAINBOW_SEGMENTS` qualify while `rainbow_digits` does not.
pub fn is_rainbow(pattern: &str) -> bool {
    pattern.contains(RAINBOW_MARKER)
}

/// Whether the colour input paired with `pattern` should be editable.
///
/// Called by the form on every pattern change and once after each load.
pub fn derive_colour_enabled(pattern: &str) -> bool {
    !is_rainbow(pattern)
}

/// The option lists a configuration is validated against.
///
/// [`OptionSets::default`] returns the clock's built-in lists; callers that
/// render a different set of choices can supply their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSets {
    pub activations: Vec<String>,
    pub patterns: Vec<String>,
}

impl OptionSets {
    /// Returns `true` if `value` is exactly one of the activation options.
    pub fn is_activation(&self, value: &str) -> bool {
        self.activations.iter().any(|option| option == value)
    }

    /// Returns `true` if `value` is exactly one of the pattern options.
    pub fn is_pattern(&self, value: &str) -> bool {
        self.patterns.iter().any(|option| option == value)
    }
}

impl Default for OptionSets {
    fn default() -> Self {
        Self {
            activations: ACTIVATION_OPTIONS.iter().map(|s| s.to_string()).collect(),
            patterns: PATTERN_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

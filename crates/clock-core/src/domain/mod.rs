//! Domain entities for the clock configurator.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The **domain** layer is the innermost layer.  Domain code:
//!
//! - Contains the core rules of the application (what a valid colour is, how an
//!   alarm time is written, which display patterns exist).
//! - Has **no** imports from network libraries, file APIs, or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Code in outer layers (the HTTP server, the editor) depends on the domain,
//! but the domain never depends on them.

/// Alarm time codec: minutes-of-day ⇄ `HH:MM`.
pub mod alarm_time;

/// Colour codec: RGB triple ⇄ `#RRGGBB`.
pub mod colour;

/// The configuration document entity.
pub mod configuration;

/// Known alarm-activation and display-pattern options.
pub mod options;

//! Clock configuration editor: entry point.
//!
//! # Usage
//!
//! ```text
//! clock-editor [--server <URL>] <COMMAND>
//!
//! Commands:
//!   show                       Print the configuration as form fields
//!   set <KEY=VALUE>...         Change fields by id and save
//!   export [--output <FILE>]   Print (or write) a backup of the configuration
//!   import <FILE> [--yes]      Validate a backup and upload it
//! ```
//!
//! `--server` defaults to `http://127.0.0.1:8080` and can also be given as
//! `CLOCK_SERVER`.  Field ids are the ones the device page uses, e.g.
//! `deviceName`, `alarmTime` (`HH:MM`), `twentyFourHour`, `dayColour`
//! (`#RRGGBB`).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clock_core::mapping::{FieldSet, FIELD_IDS};
use clock_editor::application::{Confirm, EditorController, ImportOutcome};
use clock_editor::infrastructure::{AssumeYes, HttpConfigApi, TerminalConfirm};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line editor for the clock configuration.
#[derive(Debug, Parser)]
#[command(
    name = "clock-editor",
    about = "Reads, edits and backs up the clock configuration",
    version
)]
struct Cli {
    /// Base URL of the clock or clock-server.
    #[arg(long, default_value = DEFAULT_SERVER, env = "CLOCK_SERVER")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the configuration as form fields.
    Show,

    /// Change one or more fields and save, e.g. `set brightness=8 dayPattern=PULSING`.
    Set {
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },

    /// Print a backup of the configuration, or write it to a file.
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validate a backup file and upload it, replacing the device configuration.
    Import {
        file: PathBuf,

        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Splits `KEY=VALUE`; the value may itself contain `=`.
fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

/// Renders the form the way the device page lays it out.
///
/// Radio fields are left out while the radio section is hidden, and colours
/// paired with a rainbow pattern are marked as disabled.
fn render_form(fields: &FieldSet) -> String {
    let mut out = String::new();
    for id in FIELD_IDS {
        if !fields.is_radio_shown() && (id == "radioFrequency" || id == "useRadio") {
            continue;
        }
        let value = fields.get(id).unwrap_or_default();
        let disabled = [&fields.day, &fields.night, &fields.alarm]
            .into_iter()
            .zip(["dayColour", "nightColour", "alarmColour"])
            .any(|(display, colour_id)| colour_id == id && !display.colour_enabled());
        out.push_str(&format!("{id:<16} {value}"));
        if disabled {
            out.push_str("  (disabled)");
        }
        out.push('\n');
    }
    if !fields.alarm_section_visible {
        out.push_str("alarm            (disabled on device)\n");
    }
    out.push_str(&format!("{:<16} {}\n", "version", fields.version_label()));
    out
}

// ── Command execution ─────────────────────────────────────────────────────────

async fn run<C: Confirm>(
    controller: &mut EditorController<HttpConfigApi, C>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            controller.load().await?;
            print!("{}", render_form(controller.fields()));
        }
        Command::Set { assignments } => {
            controller.load().await?;
            for (key, value) in &assignments {
                controller
                    .fields_mut()
                    .set(key, value)
                    .with_context(|| format!("cannot set {key}"))?;
            }
            controller.save().await?;
        }
        Command::Export { output } => {
            let backup = controller.export_backup().await?;
            match output {
                Some(path) => std::fs::write(&path, backup)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{backup}"),
            }
        }
        Command::Import { file, .. } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            if controller.import_backup(&text).await? == ImportOutcome::Declined {
                println!("Import cancelled; the device configuration was not changed.");
            }
        }
    }
    Ok(())
}

/// Runs `command` and prints whatever notification it produced.
async fn execute<C: Confirm>(api: HttpConfigApi, confirm: C, command: Command) -> anyhow::Result<()> {
    let mut controller = EditorController::new(api, confirm);
    let result = run(&mut controller, command).await;
    if let Some(notification) = controller.presenter().last() {
        eprintln!("{notification}");
    }
    result
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = HttpConfigApi::new(&cli.server)
        .with_context(|| format!("cannot create client for {}", cli.server))?;

    match cli.command {
        command @ Command::Import { yes: true, .. } => execute(api, AssumeYes, command).await,
        command => execute(api, TerminalConfirm, command).await,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clock_core::mapping;
    use serde_json::json;

    #[test]
    fn test_cli_default_server() {
        let cli = Cli::parse_from(["clock-editor", "show"]);
        assert_eq!(cli.server, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_cli_set_parses_assignments() {
        // Arrange / Act
        let cli = Cli::parse_from(["clock-editor", "set", "brightness=8", "timezone=UTC0=x"]);

        // Assert
        match cli.command {
            Command::Set { assignments } => assert_eq!(
                assignments,
                vec![
                    ("brightness".to_string(), "8".to_string()),
                    ("timezone".to_string(), "UTC0=x".to_string()),
                ]
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_set_requires_an_assignment() {
        assert!(Cli::try_parse_from(["clock-editor", "set"]).is_err());
        assert!(Cli::try_parse_from(["clock-editor", "set", "brightness"]).is_err());
    }

    #[test]
    fn test_cli_import_flags() {
        let cli = Cli::parse_from(["clock-editor", "--server", "http://clock", "import", "b.json", "--yes"]);
        assert_eq!(cli.server, "http://clock");
        assert!(matches!(cli.command, Command::Import { yes: true, .. }));
    }

    #[test]
    fn test_parse_assignment_rejects_empty_key() {
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn test_render_form_hides_radio_when_not_installed() {
        let config = mapping::from_document(
            json!({ "deviceName": "Den", "isRadioInstalled": false })
                .as_object()
                .unwrap(),
        );
        let text = render_form(&mapping::to_fields(&config));

        assert!(text.contains("deviceName       Den\n"));
        assert!(!text.contains("radioFrequency"));
        assert!(text.contains("version          unknown\n"));
    }

    #[test]
    fn test_render_form_marks_rainbow_colours_disabled() {
        let config = mapping::from_document(
            json!({ "dayPattern": "RAINBOW_DIGITS", "nightPattern": "SOLID_COLOUR" })
                .as_object()
                .unwrap(),
        );
        let text = render_form(&mapping::to_fields(&config));

        assert!(text.contains("dayColour        #FFFFFF  (disabled)\n"));
        assert!(text.contains("nightColour      #FFFFFF\n"));
    }
}

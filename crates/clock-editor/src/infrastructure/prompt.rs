//! Terminal implementations of [`Confirm`].

use dialoguer::Confirm as ConfirmPrompt;
use tracing::warn;

use crate::application::Confirm;

/// Asks on the terminal; anything but an explicit "yes" declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match ConfirmPrompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("confirmation prompt failed: {e}");
                false
            }
        }
    }
}

/// Accepts without asking (`import --yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

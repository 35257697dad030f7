//! # pkgrs Prompts (`common::ui::prompts`)
//!
//! File: cli/src/common/ui/prompts.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! Interactive `[y/N]` questions. Prompts are written to stderr so they never
//! mix with command output, and default to "no".
//!
use crate::common::archive::ConfirmOverwrite;
use crate::core::error::Result;
use anyhow::Context;
use dialoguer::Confirm;
use std::path::Path;
use tracing::debug;

/// Asks `question` on the terminal. Fails when stdin is not a terminal.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .context("Failed to read confirmation from the terminal")?;
    debug!("Prompt '{}' answered {}", question, answer);
    Ok(answer)
}

/// Text shown before an existing directory is replaced.
pub fn overwrite_question(destination: &Path) -> String {
    format!(
        "{} already exists. Replace its contents?",
        destination.display()
    )
}

/// Asks the operator before an unpack replaces an existing directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl ConfirmOverwrite for TerminalConfirm {
    fn confirm_overwrite(&self, destination: &Path) -> Result<bool> {
        confirm(&overwrite_question(destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_question_names_destination() {
        let question = overwrite_question(Path::new("out/Sales"));
        assert!(question.starts_with("out/Sales already exists"));
        assert!(question.ends_with('?'));
    }
}

use crate::cli_utils::{CliError, CliResult};
use dialoguer::Input as DialoguerInput;

/// Input utilities
pub struct Input;

impl Input {
    /// Get a non-empty string from user input
    pub fn get_string(prompt: &str) -> CliResult<String> {
        let input: String = DialoguerInput::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| CliError::IoError(e.to_string()))?;

        if input.trim().is_empty() {
            return Err(CliError::ValidationError(format!("{} cannot be empty", prompt)));
        }

        Ok(input)
    }
}

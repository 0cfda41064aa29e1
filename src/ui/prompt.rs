//! Interactive prompts backed by dialoguer

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Password};

use crate::domain::ports::Prompter;
use crate::error::{WiseError, WiseResult};

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> WiseError {
    WiseError::Prompt {
        message: e.to_string(),
    }
}

impl Prompter for DialoguerPrompter {
    fn password(&self, prompt: &str) -> WiseResult<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> WiseResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}

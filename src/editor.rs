//! Add/edit form state for a single shortcut.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Fields cannot be empty.")]
    EmptyField,
}

/// Two-field form backing the add/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutForm {
    pub hotkey: String,
    pub command: String,
    /// Descriptor being edited, `None` when adding
    original: Option<String>,
}

impl ShortcutForm {
    pub fn new_shortcut() -> Self {
        Self::default()
    }

    pub fn edit(hotkey: &str, command: &str) -> Self {
        Self {
            hotkey: hotkey.to_string(),
            command: command.to_string(),
            original: Some(hotkey.to_string()),
        }
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn title(&self) -> &'static str {
        if self.original.is_some() {
            "Edit Shortcut"
        } else {
            "Add Shortcut"
        }
    }

    /// Trimmed `(hotkey, command)`, or an error if either is blank.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let hotkey = self.hotkey.trim();
        let command = self.command.trim();
        if hotkey.is_empty() || command.is_empty() {
            return Err(FormError::EmptyField);
        }
        Ok((hotkey.to_string(), command.to_string()))
    }
}

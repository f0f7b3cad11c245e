//! Caller-supplied argument text

use thiserror::Error;

/// Reasons an argument is rejected before any reasoning call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("No input provided")]
    Missing,

    #[error("Input too large: {len} characters (max {max})")]
    TooLarge { len: usize, max: usize },
}

/// Premises and conclusion in free-form text
///
/// Always non-empty. Surrounding whitespace is trimmed; the text itself is
/// otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument(String);

impl Argument {
    /// Check the precondition on raw caller input
    pub fn parse(input: Option<String>, max_chars: usize) -> Result<Self, InputError> {
        let text = input.as_deref().map(str::trim).unwrap_or_default();

        if text.is_empty() {
            return Err(InputError::Missing);
        }

        let len = text.chars().count();
        if len > max_chars {
            return Err(InputError::TooLarge {
                len,
                max: max_chars,
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

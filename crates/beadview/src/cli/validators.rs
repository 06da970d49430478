//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::config::MAX_LABEL_CHARS_LIMIT;

/// Maximum snapshot title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate a snapshot title: non-blank and at most [`MAX_TITLE_LENGTH`]
/// characters. Surrounding whitespace is trimmed.
pub fn validate_title(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters (got {len})"
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate a label length limit.
pub fn validate_label_limit(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: '{s}'"))?;

    if value == 0 || value > MAX_LABEL_CHARS_LIMIT {
        return Err(format!(
            "Label limit must be between 1 and {MAX_LABEL_CHARS_LIMIT}"
        ));
    }

    Ok(value)
}

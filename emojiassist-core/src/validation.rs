use thiserror::Error;

/// Upper bound on submitted text, in user-perceived characters.
pub const MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text.")]
    Empty,

    #[error("Text cannot exceed {max} characters.")]
    TooLong { max: usize },
}

/// Counts characters the way the input budget is measured (scalar values, not bytes).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Accepts `raw` unchanged when it holds between 1 and `MAX_CHARS` characters.
///
/// No trimming happens here: whatever passes is exactly what gets sent.
pub fn validate_text(raw: &str) -> Result<&str, ValidationError> {
    match char_count(raw) {
        0 => Err(ValidationError::Empty),
        n if n > MAX_CHARS => Err(ValidationError::TooLong { max: MAX_CHARS }),
        _ => Ok(raw),
    }
}

/// Counter shown under the text field, e.g. `12/500`.
pub fn char_count_label(text: &str) -> String {
    format!("{}/{}", char_count(text), MAX_CHARS)
}

pub fn is_over_limit(text: &str) -> bool {
    char_count(text) > MAX_CHARS
}

//! Entry form validation and labels.

pub const MIN_ENTRY_CHARS: usize = 10;
pub const MAX_ENTRY_CHARS: usize = 2000;

pub const SUBMIT_LABEL: &str = "Add Entry";
pub const SUBMITTING_LABEL: &str = "Adding to Blockchain...";
pub const INITIALIZE_LABEL: &str = "Initialize Diary";
pub const INITIALIZING_LABEL: &str = "Initializing...";

pub const ADDED_MESSAGE: &str = "Diary entry added to blockchain!";
pub const FAILED_MESSAGE: &str = "Failed to add diary entry. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please write something in your diary entry!")]
    Empty,
    #[error("Entry must be at least 10 characters long")]
    TooShort,
    #[error("Entry must be at most 2000 characters long")]
    TooLong,
}

/// Returns the trimmed entry text, or the reason it cannot be submitted.
/// Lengths are counted in characters, not bytes.
pub fn validate_entry(input: &str) -> Result<&str, ValidationError> {
    let content = input.trim();
    match content.chars().count() {
        0 => Err(ValidationError::Empty),
        n if n < MIN_ENTRY_CHARS => Err(ValidationError::TooShort),
        n if n > MAX_ENTRY_CHARS => Err(ValidationError::TooLong),
        _ => Ok(content),
    }
}

/// Live counter shown under the text area, e.g. `42 / 2000`.
pub fn char_counter(input: &str) -> String {
    format!("{} / {}", input.chars().count(), MAX_ENTRY_CHARS)
}

pub fn submit_label(busy: bool) -> &'static str {
    if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL }
}

pub fn initialize_label(busy: bool) -> &'static str {
    if busy {
        INITIALIZING_LABEL
    } else {
        INITIALIZE_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(validate_entry(""), Err(ValidationError::Empty));
        assert_eq!(validate_entry(" \n\t "), Err(ValidationError::Empty));
        assert_eq!(
            ValidationError::Empty.to_string(),
            "Please write something in your diary entry!"
        );
    }

    #[test]
    fn length_is_checked_after_trimming() {
        assert_eq!(validate_entry("   too short   "), Err(ValidationError::TooShort));
        assert_eq!(validate_entry("  ten chars!  "), Ok("ten chars!"));
        assert_eq!(
            ValidationError::TooShort.to_string(),
            "Entry must be at least 10 characters long"
        );
    }

    #[test]
    fn upper_bound_counts_characters() {
        let at_limit = "é".repeat(MAX_ENTRY_CHARS);
        assert_eq!(validate_entry(&at_limit), Ok(at_limit.as_str()));

        let over = "a".repeat(MAX_ENTRY_CHARS + 1);
        assert_eq!(validate_entry(&over), Err(ValidationError::TooLong));
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Entry must be at most 2000 characters long"
        );
    }

    #[test]
    fn counter_and_labels() {
        assert_eq!(char_counter(""), "0 / 2000");
        assert_eq!(char_counter("日記です"), "4 / 2000");
        assert_eq!(submit_label(true), "Adding to Blockchain...");
        assert_eq!(submit_label(false), "Add Entry");
        assert_eq!(initialize_label(true), "Initializing...");
    }
}

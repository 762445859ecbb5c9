// ⚠️ Grade Errors - every failure is a retry prompt, never a crash
//
// Display strings are shown verbatim on the error page, so they are
// written for the student, not for a log.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// Course form: credits not an integer or grade not a number
    #[error("Invalid input(s). Please try again.")]
    InvalidInput,

    /// Grade update form: new grade not a number
    #[error("Invalid grade input. Please try again.")]
    InvalidGrade,

    /// Test score form: score not a number
    #[error("Invalid test score input. Please try again.")]
    InvalidScore,

    /// Setup form: empty name or non-letter characters
    #[error("Please enter a valid name (letters and spaces only).")]
    InvalidName,

    /// Setup form: GPA not a number or outside 0.0..=4.0
    #[error("Please enter valid GPAs between 0.0 and 4.0.")]
    InvalidGpa,
}

pub type GradeResult<T> = std::result::Result<T, GradeError>;

// ============================================================================
// FIELD PARSING
// ============================================================================

/// Parse a form field as a number. Surrounding whitespace is ignored.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Parse a form field as a whole number. "3.0" is rejected.
pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            GradeError::InvalidInput.to_string(),
            "Invalid input(s). Please try again."
        );
        assert_eq!(
            GradeError::InvalidScore.to_string(),
            "Invalid test score input. Please try again."
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("92.5"), Some(92.5));
        assert_eq!(parse_number(" 70 "), Some(70.0));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("ninety"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_integer_rejects_decimals() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" 4 "), Some(4));
        assert_eq!(parse_integer("3.0"), None);
        assert_eq!(parse_integer("three"), None);
    }
}

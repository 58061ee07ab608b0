//! Result and error types for the harness.

use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// CDP page error (evaluation, page creation)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A referenced element did not resolve against the current document
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector description
        selector: String,
    },

    /// A wait expired before its condition held
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout budget in milliseconds
        ms: u64,
        /// What was being waited for
        waited_for: String,
    },

    /// An operation was invoked from the wrong screen
    #[error("Expected screen {expected} but session is on {actual}")]
    WrongScreen {
        /// Screen the operation is valid from
        expected: String,
        /// Screen the session is actually on
        actual: String,
    },

    /// An observed value did not match an expected invariant or literal
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// The application displayed a different error text than expected
    #[error("Validation mismatch: expected {expected:?}, application showed {actual:?}")]
    ValidationMismatch {
        /// Expected message
        expected: String,
        /// Displayed message (or none)
        actual: Option<String>,
    },

    /// A price string could not be parsed
    #[error("Malformed price text: {text:?}")]
    PriceFormat {
        /// The offending text
        text: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Shorthand for an assertion failure with a formatted message
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = HarnessError::Timeout {
            ms: 5000,
            waited_for: "visible .bm-menu".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("5000ms"));
        assert!(text.contains(".bm-menu"));
    }

    #[test]
    fn test_wrong_screen_display() {
        let err = HarnessError::WrongScreen {
            expected: "Inventory".to_string(),
            actual: "Cart".to_string(),
        };
        assert_eq!(err.to_string(), "Expected screen Inventory but session is on Cart");
    }

    #[test]
    fn test_validation_mismatch_with_absent_actual() {
        let err = HarnessError::ValidationMismatch {
            expected: "Error: First Name is required".to_string(),
            actual: None,
        };
        assert!(err.to_string().contains("None"));
    }

    #[test]
    fn test_assertion_shorthand() {
        let err = HarnessError::assertion("badge shows 2, cart holds 1");
        assert!(matches!(err, HarnessError::Assertion { .. }));
        assert!(err.to_string().contains("badge shows 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HarnessError = io.into();
        assert!(matches!(err, HarnessError::Io(_)));
    }
}

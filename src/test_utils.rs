//! Test utilities for Attrangi
//!
//! This module provides common test utilities including temporary directory
//! management, configuration fixtures, and assertion helpers.

use crate::config::Config;
use crate::error::Result;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration whose session store lives in `dir`
pub fn test_config(dir: &TempDir, base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.session.store_path = Some(dir.path().join("session.db"));
    config
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
api:
  base_url: http://localhost:9000
  timeout_seconds: 15
session:
  storage_key: test_session_id
chat:
  reset_greeting: "Fresh start. What's on your mind?"
  show_mood: false
logging:
  level: attrangi=debug
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttrangiError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(AttrangiError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> = Err(AttrangiError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_test_config() {
        let dir = temp_dir();
        let config = test_config(&dir, "http://127.0.0.1:1");
        assert_eq!(config.api.base_url, "http://127.0.0.1:1");
        assert!(config.validate().is_ok());
    }
}

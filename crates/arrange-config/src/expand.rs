//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ARRANGE_EXPAND_UNSET");
        }
        let value = expand_env("${ARRANGE_EXPAND_UNSET:-docs}", "docs.source_dir").unwrap();
        assert_eq!(value, "docs");
    }

    #[test]
    fn test_expand_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ARRANGE_EXPAND_MISSING");
        }
        let err = expand_env("${ARRANGE_EXPAND_MISSING}/docs", "docs.source_dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in docs.source_dir: ${ARRANGE_EXPAND_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("docs", "docs.source_dir").unwrap(), "docs");
    }
}

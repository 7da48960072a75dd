//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Bare `$VAR` is left alone; only the braced form is expanded. An unset
/// variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RADIO_UNSET_DIR");
        }
        let result = expand_env("${RADIO_UNSET_DIR:-dist}/assets", "radio.assets_dir").unwrap();
        assert_eq!(result, "dist/assets");
    }

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RADIO_OUT_DIR", "/srv/site");
        }
        let result = expand_env("${RADIO_OUT_DIR}/docs", "radio.output").unwrap();
        assert_eq!(result, "/srv/site/docs");
        unsafe {
            std::env::remove_var("RADIO_OUT_DIR");
        }
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RADIO_MISSING_VAR");
        }
        let err = expand_env("${RADIO_MISSING_VAR}", "radio.output").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("RADIO_MISSING_VAR"));
        assert!(err.to_string().contains("radio.output"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("build/$tmp", "radio.output").unwrap(), "build/$tmp");
    }
}

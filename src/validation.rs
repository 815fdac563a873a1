//! Input validation run before any remote call is made.

use crate::{CognitoSsmError, Result};

/// Maximum length of an SSM parameter name (without the ARN prefix).
const MAX_NAME_LENGTH: usize = 1011;

/// Prefixes reserved by AWS for its own parameters.
const RESERVED_PREFIXES: [&str; 2] = ["aws", "ssm"];

/// Validates an SSM parameter name.
///
/// Checks for:
/// - Empty names
/// - Excessive length (>1011 characters)
/// - Characters outside `a-zA-Z0-9_.-/`
/// - Hierarchical names that are not fully qualified (missing leading `/`)
/// - Names beginning with the reserved `aws` or `ssm` prefixes
///
/// # Errors
///
/// Returns [`CognitoSsmError::InvalidParameterName`] if validation fails.
///
/// # Example
///
/// ```
/// use cognito_ssm::validation::validate_parameter_name;
///
/// assert!(validate_parameter_name("app-credentials").is_ok());
/// assert!(validate_parameter_name("/myapp/dev/cognito").is_ok());
///
/// assert!(validate_parameter_name("").is_err());
/// assert!(validate_parameter_name("myapp/dev").is_err());
/// assert!(validate_parameter_name("/aws/reserved").is_err());
/// ```
pub fn validate_parameter_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CognitoSsmError::InvalidParameterName(
            "name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(CognitoSsmError::InvalidParameterName(format!(
            "name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/')))
    {
        return Err(CognitoSsmError::InvalidParameterName(format!(
            "name contains invalid character {:?} (allowed: a-zA-Z0-9_.-/)",
            c
        )));
    }

    if name.contains('/') && !name.starts_with('/') {
        return Err(CognitoSsmError::InvalidParameterName(
            "hierarchical names must begin with '/'".to_string(),
        ));
    }

    let bare = name.trim_start_matches('/').to_ascii_lowercase();
    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|p| bare.starts_with(*p)) {
        return Err(CognitoSsmError::InvalidParameterName(format!(
            "names beginning with '{}' are reserved",
            prefix
        )));
    }

    Ok(())
}

/// Fails with [`CognitoSsmError::MissingConfig`] if `value` is absent or empty.
pub fn require_value<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CognitoSsmError::MissingConfig(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_parameter_name("p").is_ok());
        assert!(validate_parameter_name("my_app.credentials-v2").is_ok());
        assert!(validate_parameter_name("/myapp/prod/cognito").is_ok());
        assert!(validate_parameter_name("awesome").is_ok());
    }

    #[test]
    fn test_empty_name() {
        let result = validate_parameter_name("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_too_long() {
        let long_name = "a".repeat(1012);
        let result = validate_parameter_name(&long_name);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("maximum length"));

        assert!(validate_parameter_name(&"a".repeat(1011)).is_ok());
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["name with space", "name;rm", "name$x", "name:colon", "námé"] {
            let result = validate_parameter_name(name);
            assert!(result.is_err(), "Expected '{}' to fail validation", name);
            assert!(result.unwrap_err().to_string().contains("invalid character"));
        }
    }

    #[test]
    fn test_hierarchy_requires_leading_slash() {
        let result = validate_parameter_name("myapp/dev");
        assert!(result.unwrap_err().to_string().contains("must begin with '/'"));
    }

    #[test]
    fn test_reserved_prefixes() {
        for name in ["aws-thing", "SSM.param", "/aws/service", "/Ssm/x"] {
            let result = validate_parameter_name(name);
            assert!(result.is_err(), "Expected '{}' to be reserved", name);
            assert!(result.unwrap_err().to_string().contains("reserved"));
        }
    }

    #[test]
    fn test_require_value() {
        assert_eq!(require_value("cognitoUserPoolId", Some("pool")).unwrap(), "pool");

        let err = require_value("cognitoUserPoolId", Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Missing cognitoUserPoolId");

        let err = require_value("cognitoUserPoolId", None).unwrap_err();
        assert!(matches!(err, CognitoSsmError::MissingConfig(field) if field == "cognitoUserPoolId"));
    }
}

//! Error types for cognito-ssm operations.

use thiserror::Error;

/// Result type alias using [`CognitoSsmError`].
pub type Result<T> = std::result::Result<T, CognitoSsmError>;

/// Errors that can occur while copying client credentials into SSM.
///
/// All errors implement `std::error::Error` and can be chained with `source()`.
#[derive(Debug, Error)]
pub enum CognitoSsmError {
    /// A required configuration value is missing or empty.
    #[error("Missing {0}")]
    MissingConfig(String),

    /// The configured SSM parameter name breaks the parameter store rules.
    #[error("invalid SSM parameter name: {0}")]
    InvalidParameterName(String),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// No CloudFormation stack matched the requested name.
    #[error("Couldn't find cloudFormation stack {0}")]
    StackNotFound(String),

    /// The stack has no output with the requested key.
    #[error("Couldn't find {0} output")]
    OutputNotFound(String),

    /// The stack output exists but its value is empty.
    #[error("The {0} output has no value")]
    OutputHasNoValue(String),

    /// The user pool client record lacks a client id or secret.
    #[error("getUserPoolClient: Missing client credentials")]
    MissingClientCredentials,

    /// The stored parameter value is not JSON text.
    #[error("Existing SSM parameter {0} is not a json string")]
    NotJson(String),

    /// The stored parameter value is JSON but not an object.
    #[error("Existing SSM parameter {0} is not a json object")]
    NotJsonObject(String),

    /// A remote call failed in the transport or the remote service.
    ///
    /// The message is kept verbatim so callers can match on it.
    #[error("{message}")]
    Remote {
        /// Service name (cloudformation, cognito-idp, ssm)
        service: String,
        /// Operation name (DescribeStacks, GetParameter, etc.)
        operation: String,
        /// Original failure text
        message: String,
    },

    /// An operation failed and was annotated with what was being done.
    ///
    /// `Display` prints the underlying message unchanged; the annotation
    /// lives in `context`.
    #[error("{source}")]
    Wrapped {
        /// Human-readable description of the failed step
        context: String,
        /// Underlying error
        source: Box<CognitoSsmError>,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error (catch-all).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CognitoSsmError {
    /// Creates a remote-call error for the given service and operation.
    pub fn remote(
        service: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            service: service.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Annotates this error with a description of the step that failed.
    ///
    /// The wrapped error's message is preserved verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use cognito_ssm::CognitoSsmError;
    ///
    /// let err = CognitoSsmError::remote("ssm", "GetParameter", "Connection Problem");
    /// let wrapped = err.wrap("Error when getting existing SSM parameter");
    ///
    /// assert_eq!(wrapped.to_string(), "Connection Problem");
    /// assert_eq!(wrapped.context(), Some("Error when getting existing SSM parameter"));
    /// ```
    pub fn wrap(self, context: impl Into<String>) -> Self {
        Self::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the step description if this error was wrapped.
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Wrapped { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Returns the innermost error, looking through any wrapping.
    pub fn root(&self) -> &CognitoSsmError {
        match self {
            Self::Wrapped { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Adds operation context to a failed [`Result`].
pub trait OperationContext<T> {
    /// Wraps the error (if any) with the given step description.
    fn context(self, context: &str) -> Result<T>;
}

impl<T> OperationContext<T> for Result<T> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|err| err.wrap(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = CognitoSsmError::OutputNotFound("ClientId".to_string());
        assert_eq!(err.to_string(), "Couldn't find ClientId output");

        let err = CognitoSsmError::OutputHasNoValue("ClientId".to_string());
        assert_eq!(err.to_string(), "The ClientId output has no value");
    }

    #[test]
    fn test_wrap_preserves_message_and_context() {
        let wrapped = CognitoSsmError::remote("cloudformation", "DescribeStacks", "X").wrap("Y");

        assert_eq!(wrapped.to_string(), "X");
        assert_eq!(wrapped.context(), Some("Y"));
    }

    #[test]
    fn test_wrap_with_empty_strings() {
        let wrapped = CognitoSsmError::remote("ssm", "PutParameter", "").wrap("");

        assert_eq!(wrapped.to_string(), "");
        assert_eq!(wrapped.context(), Some(""));
    }

    #[test]
    fn test_error_source_chain() {
        let inner = CognitoSsmError::StackNotFound("svc-dev".to_string());
        let outer = inner.wrap("Error when getting CloudFormation stack");

        let source = outer.source().expect("wrapped error has a source");
        assert_eq!(source.to_string(), "Couldn't find cloudFormation stack svc-dev");
        assert!(matches!(outer.root(), CognitoSsmError::StackNotFound(_)));
    }

    #[test]
    fn test_unwrapped_has_no_context() {
        let err = CognitoSsmError::MissingClientCredentials;
        assert_eq!(err.context(), None);
    }

    #[test]
    fn test_result_context_combinator() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.context("unused").unwrap(), 1);

        let failed: Result<u8> = Err(CognitoSsmError::NotJson("p".to_string()));
        let err = failed.context("Error when getting existing SSM parameter").unwrap_err();
        assert_eq!(err.to_string(), "Existing SSM parameter p is not a json string");
        assert_eq!(err.context(), Some("Error when getting existing SSM parameter"));
    }
}

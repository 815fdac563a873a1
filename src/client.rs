//! Remote operations used by the after-deploy hook.
//!
//! Each operation that talks to a service annotates any failure (including
//! data-shape failures it raises itself) with a description of the step, via
//! [`OperationContext`]. The original message stays intact.

use crate::error::OperationContext;
use crate::json::is_well_formed_json;
use crate::model::{PutParameterRequest, Stack, UserPoolClient};
use crate::{CloudProvider, CognitoSsmError, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DESCRIBE_STACK_CONTEXT: &str = "Error when getting CloudFormation stack";
pub const DESCRIBE_CLIENT_CONTEXT: &str = "Error when getting User Pool Client";
pub const GET_PARAMETER_CONTEXT: &str = "Error when getting existing SSM parameter";
pub const PUT_PARAMETER_CONTEXT: &str = "Error when putting SSM parameter";

/// Client for the stack, user pool client and parameter operations.
///
/// # Example
///
/// ```
/// use cognito_ssm::providers::mock::MockProvider;
/// use cognito_ssm::model::Stack;
/// use cognito_ssm::RemoteClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> cognito_ssm::Result<()> {
///     let provider = MockProvider::new();
///     provider.set_stack(Stack::new("svc-dev").with_output("k", "v")).await;
///
///     let client = RemoteClient::new(Arc::new(provider), "svc-dev");
///     assert_eq!(client.get_stack_output_value("k").await?, "v");
///     Ok(())
/// }
/// ```
pub struct RemoteClient {
    provider: Arc<dyn CloudProvider>,
    stack_name: String,
}

impl RemoteClient {
    /// Creates a client reading outputs from `stack_name`.
    pub fn new(provider: Arc<dyn CloudProvider>, stack_name: impl Into<String>) -> Self {
        Self {
            provider,
            stack_name: stack_name.into(),
        }
    }

    /// Name of the stack this client reads.
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Fetches the deployed stack.
    ///
    /// Only the first stack of the response is used.
    ///
    /// # Errors
    ///
    /// [`CognitoSsmError::StackNotFound`] if the response is empty, or the
    /// provider's error; both wrapped with [`DESCRIBE_STACK_CONTEXT`].
    #[instrument(skip(self), fields(stack = %self.stack_name))]
    pub async fn describe_stack(&self) -> Result<Stack> {
        async {
            let stacks = self.provider.describe_stacks(&self.stack_name).await?;
            stacks
                .into_iter()
                .next()
                .ok_or_else(|| CognitoSsmError::StackNotFound(self.stack_name.clone()))
        }
        .await
        .context(DESCRIBE_STACK_CONTEXT)
    }

    /// Returns the value of the stack output named `output_key`.
    ///
    /// # Errors
    ///
    /// - Errors from [`describe_stack`](Self::describe_stack), unchanged
    /// - [`CognitoSsmError::OutputNotFound`]: no output has that key
    /// - [`CognitoSsmError::OutputHasNoValue`]: the output's value is empty
    pub async fn get_stack_output_value(&self, output_key: &str) -> Result<String> {
        let stack = self.describe_stack().await?;
        let output = stack
            .output(output_key)
            .ok_or_else(|| CognitoSsmError::OutputNotFound(output_key.to_string()))?;

        match output.output_value.as_deref() {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(CognitoSsmError::OutputHasNoValue(output_key.to_string())),
        }
    }

    /// Fetches a user pool client record as returned by the service.
    #[instrument(skip(self))]
    pub async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient> {
        self.provider
            .describe_user_pool_client(user_pool_id, client_id)
            .await
            .context(DESCRIBE_CLIENT_CONTEXT)
    }

    /// Reads the parameter's current JSON object, if any.
    ///
    /// A missing parameter, an empty value, or a JSON `null` all yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`CognitoSsmError::NotJson`] / [`CognitoSsmError::NotJsonObject`] for
    /// unusable stored values, or the provider's error; all wrapped with
    /// [`GET_PARAMETER_CONTEXT`].
    #[instrument(skip(self))]
    pub async fn get_existing_parameter(&self, name: &str) -> Result<Option<Map<String, Value>>> {
        async {
            let parameter = self.provider.get_parameter(name, true).await?;
            let value = match parameter.and_then(|p| p.value) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    debug!("no existing value stored");
                    return Ok(None);
                }
            };

            if !is_well_formed_json(&value) {
                return Err(CognitoSsmError::NotJson(name.to_string()));
            }

            match serde_json::from_str::<Value>(&value)? {
                Value::Object(map) => Ok(Some(map)),
                Value::Null => Ok(None),
                _ => Err(CognitoSsmError::NotJsonObject(name.to_string())),
            }
        }
        .await
        .context(GET_PARAMETER_CONTEXT)
    }

    /// Stores `value` as JSON text in an encrypted parameter, replacing any
    /// existing value.
    #[instrument(skip(self, value))]
    pub async fn put_parameter(&self, name: &str, value: &Map<String, Value>) -> Result<()> {
        async {
            let text = serde_json::to_string(value)?;
            self.provider
                .put_parameter(PutParameterRequest::secure_string(name, text))
                .await
        }
        .await
        .context(PUT_PARAMETER_CONTEXT)
    }
}

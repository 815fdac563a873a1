//! Mock provider for testing.
//!
//! This provider keeps stacks, user pool clients and parameters in memory,
//! records every call it receives, and supports error injection for testing
//! failure paths of the hook.

use crate::model::{Parameter, PutParameterRequest, Stack, UserPoolClient};
use crate::provider::{service, CloudProvider};
use crate::{CognitoSsmError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A call received by [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    DescribeStacks {
        stack_name: String,
    },
    DescribeUserPoolClient {
        user_pool_id: String,
        client_id: String,
    },
    GetParameter {
        name: String,
        with_decryption: bool,
    },
    PutParameter(PutParameterRequest),
}

/// Mock provider for testing.
///
/// # Example
///
/// ```
/// use cognito_ssm::providers::mock::MockProvider;
/// use cognito_ssm::{CloudProvider, CognitoSsmError};
///
/// #[tokio::main]
/// async fn main() -> cognito_ssm::Result<()> {
///     let mut provider = MockProvider::new();
///     provider.set_parameter("p", r#"{"message":"x"}"#).await;
///
///     let parameter = provider.get_parameter("p", true).await?;
///     assert_eq!(parameter.and_then(|p| p.value).as_deref(), Some(r#"{"message":"x"}"#));
///
///     // Test error conditions
///     provider.get_parameter_error = Some(CognitoSsmError::Other(anyhow::anyhow!("throttled")));
///     assert!(provider.get_parameter("p", true).await.is_err());
///
///     Ok(())
/// }
/// ```
pub struct MockProvider {
    stacks: Arc<RwLock<HashMap<String, Vec<Stack>>>>,
    clients: Arc<RwLock<HashMap<(String, String), UserPoolClient>>>,
    parameters: Arc<RwLock<HashMap<String, Parameter>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,

    /// Error to return from `describe_stacks()`
    pub describe_stacks_error: Option<CognitoSsmError>,
    /// Error to return from `describe_user_pool_client()`
    pub describe_client_error: Option<CognitoSsmError>,
    /// Error to return from `get_parameter()`
    pub get_parameter_error: Option<CognitoSsmError>,
    /// Error to return from `put_parameter()`
    pub put_parameter_error: Option<CognitoSsmError>,
}

impl MockProvider {
    /// Creates a new mock provider with empty storage.
    pub fn new() -> Self {
        Self {
            stacks: Arc::new(RwLock::new(HashMap::new())),
            clients: Arc::new(RwLock::new(HashMap::new())),
            parameters: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            describe_stacks_error: None,
            describe_client_error: None,
            get_parameter_error: None,
            put_parameter_error: None,
        }
    }

    /// Pre-populates a stack, returned for lookups by its own name.
    pub async fn set_stack(&self, stack: Stack) {
        let mut stacks = self.stacks.write().await;
        stacks.insert(stack.stack_name.clone(), vec![stack]);
    }

    /// Sets the exact list returned for a stack-name lookup.
    pub async fn set_stacks(&self, stack_name: impl Into<String>, stacks: Vec<Stack>) {
        let mut all = self.stacks.write().await;
        all.insert(stack_name.into(), stacks);
    }

    /// Pre-populates a user pool client for a `(user_pool_id, client_id)` lookup.
    ///
    /// The lookup key is independent of the record's own fields, so tests can
    /// return records with missing ids or secrets.
    pub async fn set_client(
        &self,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
        client: UserPoolClient,
    ) {
        let mut clients = self.clients.write().await;
        clients.insert((user_pool_id.into(), client_id.into()), client);
    }

    /// Pre-populates a parameter value.
    pub async fn set_parameter(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let mut parameters = self.parameters.write().await;
        parameters.insert(
            name.clone(),
            Parameter {
                name,
                value: Some(value.into()),
                version: Some(1),
            },
        );
    }

    /// Returns the current stored value of a parameter.
    pub async fn parameter_value(&self, name: &str) -> Option<String> {
        let parameters = self.parameters.read().await;
        parameters.get(name).and_then(|p| p.value.clone())
    }

    /// Returns every call received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Returns the `PutParameter` requests received so far.
    pub async fn put_requests(&self) -> Vec<PutParameterRequest> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedCall::PutParameter(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(err: &CognitoSsmError, service: &str, operation: &str) -> CognitoSsmError {
    CognitoSsmError::remote(service, operation, err.to_string())
}

#[async_trait]
impl CloudProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn describe_stacks(&self, stack_name: &str) -> Result<Vec<Stack>> {
        self.record(RecordedCall::DescribeStacks {
            stack_name: stack_name.to_string(),
        })
        .await;

        if let Some(ref err) = self.describe_stacks_error {
            return Err(injected(err, service::CLOUDFORMATION, "DescribeStacks"));
        }

        let stacks = self.stacks.read().await;
        Ok(stacks.get(stack_name).cloned().unwrap_or_default())
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient> {
        self.record(RecordedCall::DescribeUserPoolClient {
            user_pool_id: user_pool_id.to_string(),
            client_id: client_id.to_string(),
        })
        .await;

        if let Some(ref err) = self.describe_client_error {
            return Err(injected(err, service::COGNITO_IDP, "DescribeUserPoolClient"));
        }

        let clients = self.clients.read().await;
        clients
            .get(&(user_pool_id.to_string(), client_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                CognitoSsmError::remote(
                    service::COGNITO_IDP,
                    "DescribeUserPoolClient",
                    format!("User pool client {} does not exist.", client_id),
                )
            })
    }

    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<Parameter>> {
        self.record(RecordedCall::GetParameter {
            name: name.to_string(),
            with_decryption,
        })
        .await;

        if let Some(ref err) = self.get_parameter_error {
            return Err(injected(err, service::SSM, "GetParameter"));
        }

        let parameters = self.parameters.read().await;
        Ok(parameters.get(name).cloned())
    }

    async fn put_parameter(&self, request: PutParameterRequest) -> Result<()> {
        self.record(RecordedCall::PutParameter(request.clone())).await;

        if let Some(ref err) = self.put_parameter_error {
            return Err(injected(err, service::SSM, "PutParameter"));
        }

        let mut parameters = self.parameters.write().await;
        let version = parameters
            .get(&request.name)
            .and_then(|p| p.version)
            .map_or(1, |v| v + 1);
        parameters.insert(
            request.name.clone(),
            Parameter {
                name: request.name,
                value: Some(request.value),
                version: Some(version),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_put_then_get() {
        let provider = MockProvider::new();

        provider
            .put_parameter(PutParameterRequest::secure_string("p", "{}"))
            .await
            .unwrap();
        provider
            .put_parameter(PutParameterRequest::secure_string("p", r#"{"a":1}"#))
            .await
            .unwrap();

        let parameter = provider.get_parameter("p", true).await.unwrap().unwrap();
        assert_eq!(parameter.value.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(parameter.version, Some(2));
    }

    #[tokio::test]
    async fn test_mock_missing_parameter_is_none() {
        let provider = MockProvider::new();
        assert!(provider.get_parameter("absent", true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_unknown_stack_is_empty_list() {
        let provider = MockProvider::new();
        provider.set_stack(Stack::new("svc-dev")).await;

        assert_eq!(provider.describe_stacks("svc-dev").await.unwrap().len(), 1);
        assert!(provider.describe_stacks("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let provider = MockProvider::new();
        let _ = provider.describe_stacks("svc-dev").await;
        let _ = provider.get_parameter("p", true).await;

        assert_eq!(
            provider.calls().await,
            vec![
                RecordedCall::DescribeStacks {
                    stack_name: "svc-dev".to_string()
                },
                RecordedCall::GetParameter {
                    name: "p".to_string(),
                    with_decryption: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut provider = MockProvider::new();
        provider.put_parameter_error =
            Some(CognitoSsmError::Other(anyhow::anyhow!("Connection Problem")));

        let err = provider
            .put_parameter(PutParameterRequest::secure_string("p", "{}"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Connection Problem");
        assert!(matches!(
            err,
            CognitoSsmError::Remote { ref service, ref operation, .. }
                if service == "ssm" && operation == "PutParameter"
        ));
        assert!(provider.parameter_value("p").await.is_none());
    }
}

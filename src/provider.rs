//! Cloud provider trait definition.
//!
//! This module defines the [`CloudProvider`] trait: the transport seam for
//! the four remote calls the hook issues. Signing, credential resolution and
//! transport-level retries belong to the implementation, not to this crate's
//! workflow.

use crate::model::{Parameter, PutParameterRequest, Stack, UserPoolClient};
use crate::Result;
use async_trait::async_trait;

/// Service names used in [`CognitoSsmError::Remote`](crate::CognitoSsmError::Remote).
pub mod service {
    pub const CLOUDFORMATION: &str = "cloudformation";
    pub const COGNITO_IDP: &str = "cognito-idp";
    pub const SSM: &str = "ssm";
}

/// CloudProvider issues requests against CloudFormation, Cognito and SSM.
///
/// All implementations must be `Send + Sync` to support use across async
/// tasks.
///
/// # Implementations
///
/// - **SDK-based**: [`AwsProvider`](crate::providers::aws::AwsProvider) (feature `aws`)
/// - **Testing**: [`MockProvider`](crate::providers::mock::MockProvider) with
///   call recording and error injection (feature `mock`)
///
/// # Errors
///
/// Transport and service failures are reported as
/// [`CognitoSsmError::Remote`](crate::CognitoSsmError::Remote) with the
/// original message intact.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws", "mock").
    fn name(&self) -> &str;

    /// Describes the stacks matching `stack_name`.
    ///
    /// The service returns at most one stack for a name filter, but the
    /// response is a list.
    async fn describe_stacks(&self, stack_name: &str) -> Result<Vec<Stack>>;

    /// Fetches a user pool client record.
    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient>;

    /// Fetches a parameter.
    ///
    /// Returns `Ok(None)` when the parameter does not exist.
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<Parameter>>;

    /// Stores a parameter.
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<()>;
}

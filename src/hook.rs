//! The after-deploy workflow.
//!
//! Runs once per deploy-completion event:
//!
//! 1. Validate configuration (no remote call is made if this fails)
//! 2. Read the user pool client id from the stack outputs
//! 3. Fetch the client's id and secret from Cognito
//! 4. Read the existing parameter value, if any
//! 5. Merge the credentials over it and store the result
//!
//! Any failure aborts the remaining steps. Nothing is retried.

use crate::config::PluginConfig;
use crate::json::shallow_merge;
use crate::validation::{require_value, validate_parameter_name};
use crate::{CognitoSsmError, RemoteClient, Result};
use tracing::{info, warn, Instrument};

/// Lifecycle event the hook is bound to.
pub const AFTER_DEPLOY_EVENT: &str = "after:deploy:deploy";

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    /// Parameter that was written
    pub parameter_name: String,
    /// Whether an existing value was merged into
    pub merged_existing: bool,
    /// Top-level keys of the stored document, in order
    pub keys: Vec<String>,
}

/// After-deploy hook copying user pool client credentials into SSM.
///
/// # Example
///
/// ```
/// use cognito_ssm::config::PluginConfig;
/// use cognito_ssm::model::{Stack, UserPoolClient};
/// use cognito_ssm::providers::mock::MockProvider;
/// use cognito_ssm::{AfterDeployHook, RemoteClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> cognito_ssm::Result<()> {
///     let provider = Arc::new(MockProvider::new());
///     provider.set_stack(Stack::new("svc-dev").with_output("k", "client1")).await;
///     provider.set_client("pool", "client1", UserPoolClient::new("client1", "secret1")).await;
///
///     let settings = PluginConfig::new("p", "k").with_user_pool_id("pool");
///     let hook = AfterDeployHook::new(settings, RemoteClient::new(provider.clone(), "svc-dev"));
///     hook.run().await?;
///
///     assert_eq!(
///         provider.parameter_value("p").await.as_deref(),
///         Some(r#"{"auth":{"cognito":{"clientId":"client1","clientSecret":"secret1"}}}"#)
///     );
///     Ok(())
/// }
/// ```
pub struct AfterDeployHook {
    settings: PluginConfig,
    client: RemoteClient,
}

impl AfterDeployHook {
    pub fn new(settings: PluginConfig, client: RemoteClient) -> Self {
        Self { settings, client }
    }

    /// Returns `true` if this hook should run for the given lifecycle event.
    pub fn handles(event: &str) -> bool {
        event == AFTER_DEPLOY_EVENT
    }

    /// Runs the workflow.
    ///
    /// # Errors
    ///
    /// - [`CognitoSsmError::MissingConfig`] / [`CognitoSsmError::InvalidParameterName`]:
    ///   configuration problems, raised before any remote call
    /// - [`CognitoSsmError::MissingClientCredentials`]: the client record has
    ///   no id or no secret
    /// - Any error from [`RemoteClient`], unchanged
    pub async fn run(&self) -> Result<HookOutcome> {
        let span = tracing::info_span!(
            "after_deploy",
            run_id = %uuid::Uuid::new_v4(),
            stack = %self.client.stack_name(),
            parameter = %self.settings.ssm_parameter_name,
        );
        self.run_steps().instrument(span).await
    }

    async fn run_steps(&self) -> Result<HookOutcome> {
        let (user_pool_id, client_id_output_key, parameter_name) = self.validate()?;

        let client_id = self.client.get_stack_output_value(client_id_output_key).await?;
        info!(output_key = %client_id_output_key, client_id = %client_id, "resolved user pool client id");

        let record = self
            .client
            .describe_user_pool_client(user_pool_id, &client_id)
            .await?;
        let credentials = record
            .credentials()
            .ok_or(CognitoSsmError::MissingClientCredentials)?;

        let existing = self.client.get_existing_parameter(parameter_name).await?;
        let merged_existing = existing.is_some();
        let document = match existing {
            Some(existing) => shallow_merge(&existing, &credentials.to_document()),
            None => credentials.to_document(),
        };

        self.client.put_parameter(parameter_name, &document).await?;

        let outcome = HookOutcome {
            parameter_name: parameter_name.to_string(),
            merged_existing,
            keys: document.keys().cloned().collect(),
        };
        info!(merged_existing, keys = ?outcome.keys, "stored client credentials");
        Ok(outcome)
    }

    fn validate(&self) -> Result<(&str, &str, &str)> {
        let user_pool_id = require_value(
            "cognitoUserPoolId",
            self.settings.cognito_user_pool_id.as_deref(),
        )?;
        let output_key = require_value(
            "cognitoUserPoolClientIdOutputKey",
            Some(self.settings.cognito_user_pool_client_id_output_key.as_str()),
        )?;
        let parameter_name = require_value(
            "ssmParameterName",
            Some(self.settings.ssm_parameter_name.as_str()),
        )?;
        validate_parameter_name(parameter_name)?;

        if let Some(ref key) = self.settings.cognito_user_pool_id_output_key {
            warn!(
                output_key = %key,
                "cognitoUserPoolIdOutputKey is not used; the pool id is taken from cognitoUserPoolId"
            );
        }

        Ok((user_pool_id, output_key, parameter_name))
    }
}

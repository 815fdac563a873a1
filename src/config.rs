//! Configuration types for the after-deploy hook.
//!
//! Settings are read from a Serverless-style YAML document: the stack
//! location comes from `service` and `provider`, the hook's own values from
//! `custom.cognitoClientCredentialsToSSM`.

use crate::{CognitoSsmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key of the hook's block under `custom` in the YAML document.
pub const CUSTOM_BLOCK: &str = "cognitoClientCredentialsToSSM";

const DEFAULT_STAGE: &str = "dev";
const DEFAULT_REGION: &str = "us-east-1";

/// The hook's own settings.
///
/// ```yaml
/// custom:
///   cognitoClientCredentialsToSSM:
///     ssmParameterName: /myapp/dev/credentials
///     cognitoUserPoolId: us-east-1_AbCdEf
///     cognitoUserPoolClientIdOutputKey: UserPoolClientId
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// SSM parameter that receives the credentials
    pub ssm_parameter_name: String,

    /// Cognito user pool that owns the client (required by the hook)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognito_user_pool_id: Option<String>,

    /// Stack output naming the user pool id.
    ///
    /// Accepted for compatibility but not read by the workflow; the pool id
    /// must be given directly in `cognito_user_pool_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognito_user_pool_id_output_key: Option<String>,

    /// Stack output holding the user pool client id
    pub cognito_user_pool_client_id_output_key: String,
}

impl PluginConfig {
    /// Creates settings with the two always-required values.
    pub fn new(
        ssm_parameter_name: impl Into<String>,
        cognito_user_pool_client_id_output_key: impl Into<String>,
    ) -> Self {
        Self {
            ssm_parameter_name: ssm_parameter_name.into(),
            cognito_user_pool_client_id_output_key: cognito_user_pool_client_id_output_key.into(),
            ..Default::default()
        }
    }

    /// Sets the user pool id.
    pub fn with_user_pool_id(mut self, user_pool_id: impl Into<String>) -> Self {
        self.cognito_user_pool_id = Some(user_pool_id.into());
        self
    }

    /// Sets the (inert) user pool id output key.
    pub fn with_user_pool_id_output_key(mut self, key: impl Into<String>) -> Self {
        self.cognito_user_pool_id_output_key = Some(key.into());
        self
    }
}

/// Full configuration: where the stack lives plus the hook settings.
///
/// ```
/// use cognito_ssm::config::{Config, PluginConfig};
///
/// let plugin = PluginConfig::new("p", "UserPoolClientId").with_user_pool_id("pool");
/// let config = Config::new("my-service", plugin)
///     .with_stage("prod")
///     .with_region("eu-west-1");
///
/// assert_eq!(config.stack_name(), "my-service-prod");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Service name; with the stage it forms the default stack name
    pub service: String,

    /// Deployment stage (default: "dev")
    pub stage: String,

    /// AWS region (default: "us-east-1")
    pub region: String,

    /// Explicit stack name, replacing `{service}-{stage}`
    pub stack_name: Option<String>,

    /// Custom endpoint URL (for LocalStack testing)
    pub endpoint: Option<String>,

    /// Hook settings
    pub plugin: PluginConfig,
}

impl Config {
    /// Creates a configuration with the default stage and region.
    pub fn new(service: impl Into<String>, plugin: PluginConfig) -> Self {
        Self {
            service: service.into(),
            stage: DEFAULT_STAGE.to_string(),
            region: DEFAULT_REGION.to_string(),
            stack_name: None,
            endpoint: None,
            plugin,
        }
    }

    /// Sets the deployment stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Sets the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Uses an explicit stack name instead of `{service}-{stage}`.
    pub fn with_stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = Some(stack_name.into());
        self
    }

    /// Sets a custom AWS endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Name of the CloudFormation stack the hook reads outputs from.
    pub fn stack_name(&self) -> String {
        match self.stack_name {
            Some(ref name) => name.clone(),
            None => format!("{}-{}", self.service, self.stage),
        }
    }

    /// Parses a Serverless-style YAML document.
    ///
    /// Variable references (`${...}`) are not resolved. Stage, region and
    /// stack name values containing one are ignored so defaults or explicit
    /// overrides apply instead.
    ///
    /// # Errors
    ///
    /// Returns [`CognitoSsmError::Config`] if the YAML is malformed or the
    /// `custom.cognitoClientCredentialsToSSM` block is missing.
    pub fn from_serverless_yaml(yaml: &str) -> Result<Self> {
        let file: ServerlessFile = serde_yaml::from_str(yaml)
            .map_err(|e| CognitoSsmError::Config(format!("invalid serverless YAML: {}", e)))?;

        let plugin = file.custom.plugin.ok_or_else(|| {
            CognitoSsmError::Config(format!("missing custom.{} block", CUSTOM_BLOCK))
        })?;

        let mut config = Config::new(file.service.into_name(), plugin);
        if let Some(stage) = literal(file.provider.stage) {
            config.stage = stage;
        }
        if let Some(region) = literal(file.provider.region) {
            config.region = region;
        }
        config.stack_name = literal(file.provider.stack_name);

        Ok(config)
    }

    /// Reads and parses a Serverless-style YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CognitoSsmError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_serverless_yaml(&yaml)
    }
}

fn literal(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !v.contains("${"))
}

#[derive(Deserialize)]
struct ServerlessFile {
    service: ServiceName,
    #[serde(default)]
    provider: ProviderSection,
    #[serde(default)]
    custom: CustomSection,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ServiceName {
    Name(String),
    Object { name: String },
}

impl ServiceName {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProviderSection {
    stage: Option<String>,
    region: Option<String>,
    stack_name: Option<String>,
}

#[derive(Deserialize, Default)]
struct CustomSection {
    #[serde(rename = "cognitoClientCredentialsToSSM")]
    plugin: Option<PluginConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SERVERLESS_YML: &str = r#"
service: my-service
provider:
  name: aws
  stage: prod
  region: eu-west-1
custom:
  cognitoClientCredentialsToSSM:
    ssmParameterName: /my-service/prod/credentials
    cognitoUserPoolId: eu-west-1_AbCdEf
    cognitoUserPoolClientIdOutputKey: UserPoolClientId
"#;

    #[test]
    fn test_config_builder() {
        let config = Config::new("svc", PluginConfig::new("p", "k"))
            .with_stage("qa")
            .with_region("us-west-2")
            .with_endpoint("http://localhost:4566");

        assert_eq!(config.stack_name(), "svc-qa");
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::new("svc", PluginConfig::new("p", "k"));
        assert_eq!(config.stage, "dev");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.stack_name(), "svc-dev");
        assert_eq!(config.plugin.cognito_user_pool_id, None);
    }

    #[test]
    fn test_explicit_stack_name_wins() {
        let config = Config::new("svc", PluginConfig::new("p", "k")).with_stack_name("custom-stack");
        assert_eq!(config.stack_name(), "custom-stack");
    }

    #[test]
    fn test_parse_serverless_yaml() {
        let config = Config::from_serverless_yaml(SERVERLESS_YML).unwrap();

        assert_eq!(config.service, "my-service");
        assert_eq!(config.stage, "prod");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.stack_name(), "my-service-prod");
        assert_eq!(config.plugin.ssm_parameter_name, "/my-service/prod/credentials");
        assert_eq!(config.plugin.cognito_user_pool_id.as_deref(), Some("eu-west-1_AbCdEf"));
        assert_eq!(config.plugin.cognito_user_pool_client_id_output_key, "UserPoolClientId");
        assert_eq!(config.plugin.cognito_user_pool_id_output_key, None);
    }

    #[test]
    fn test_parse_service_object_and_defaults() {
        let yaml = r#"
service:
  name: object-service
provider:
  name: aws
  stage: "${opt:stage, 'dev'}"
  stackName: explicit-stack
custom:
  cognitoClientCredentialsToSSM:
    ssmParameterName: p
    cognitoUserPoolClientIdOutputKey: k
    cognitoUserPoolIdOutputKey: UserPoolId
"#;
        let config = Config::from_serverless_yaml(yaml).unwrap();

        assert_eq!(config.service, "object-service");
        assert_eq!(config.stage, "dev");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.stack_name(), "explicit-stack");
        assert_eq!(config.plugin.cognito_user_pool_id_output_key.as_deref(), Some("UserPoolId"));
    }

    #[test]
    fn test_missing_custom_block() {
        let err = Config::from_serverless_yaml("service: svc\nprovider:\n  name: aws\n").unwrap_err();
        assert!(err.to_string().contains("missing custom.cognitoClientCredentialsToSSM block"));
    }

    #[test]
    fn test_missing_required_plugin_field() {
        let yaml = r#"
service: svc
custom:
  cognitoClientCredentialsToSSM:
    cognitoUserPoolId: pool
    cognitoUserPoolClientIdOutputKey: k
"#;
        let err = Config::from_serverless_yaml(yaml).unwrap_err();
        assert!(matches!(err, CognitoSsmError::Config(_)));
        assert!(err.to_string().contains("ssmParameterName"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SERVERLESS_YML.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.stack_name(), "my-service-prod");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/serverless.yml").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_plugin_config_wire_names() {
        let plugin = PluginConfig::new("p", "k").with_user_pool_id("pool");
        assert_eq!(
            serde_json::to_value(&plugin).unwrap(),
            serde_json::json!({
                "ssmParameterName": "p",
                "cognitoUserPoolId": "pool",
                "cognitoUserPoolClientIdOutputKey": "k"
            })
        );
    }
}

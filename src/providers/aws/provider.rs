//! AWS SDK provider implementation.

use crate::model::{Output, Parameter, ParameterType, PutParameterRequest, Stack, UserPoolClient};
use crate::provider::{service, CloudProvider};
use crate::{CognitoSsmError, Result};
use async_trait::async_trait;
use aws_sdk_cloudformation::Client as CloudFormationClient;
use aws_sdk_cognitoidentityprovider::types::UserPoolClientType;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client as SsmClient;
use serde_json::{Map, Value};

struct Clients {
    cloudformation: CloudFormationClient,
    cognito: CognitoClient,
    ssm: SsmClient,
}

/// AWS SDK provider.
///
/// Clients are created by [`AwsProvider::init`] from the default credential
/// chain; calls made before `init` fail with a configuration error.
pub struct AwsProvider {
    clients: Option<Clients>,
    region: String,
    endpoint: Option<String>,
}

impl AwsProvider {
    /// Creates a provider for `region`, optionally pointed at a custom
    /// endpoint (for LocalStack testing).
    pub fn new(region: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            clients: None,
            region: region.into(),
            endpoint,
        }
    }

    /// Loads the shared AWS configuration and builds the service clients.
    pub async fn init(&mut self) -> Result<()> {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(ref endpoint) = self.endpoint {
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let config = config_loader.load().await;
        self.clients = Some(Clients {
            cloudformation: CloudFormationClient::new(&config),
            cognito: CognitoClient::new(&config),
            ssm: SsmClient::new(&config),
        });

        tracing::debug!(region = %self.region, endpoint = ?self.endpoint, "AWS clients initialized");
        Ok(())
    }

    /// Region the clients were configured for.
    pub fn region(&self) -> &str {
        &self.region
    }

    fn clients(&self) -> Result<&Clients> {
        self.clients
            .as_ref()
            .ok_or_else(|| CognitoSsmError::Config("AWS provider used before init()".to_string()))
    }
}

fn remote_error(service: &str, operation: &str, err: impl std::error::Error) -> CognitoSsmError {
    CognitoSsmError::remote(service, operation, DisplayErrorContext(err).to_string())
}

fn convert_stack(stack: &aws_sdk_cloudformation::types::Stack) -> Stack {
    Stack {
        stack_name: stack.stack_name().unwrap_or_default().to_string(),
        stack_status: stack.stack_status().map(|s| s.as_str().to_string()),
        creation_time: stack
            .creation_time()
            .and_then(|d| chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())),
        outputs: stack
            .outputs()
            .iter()
            .filter_map(|output| {
                Some(Output {
                    output_key: output.output_key()?.to_string(),
                    output_value: output.output_value().map(str::to_string),
                    description: output.description().map(str::to_string),
                })
            })
            .collect(),
    }
}

fn convert_client(client: &UserPoolClientType) -> UserPoolClient {
    let mut extra = Map::new();
    if !client.callback_urls().is_empty() {
        extra.insert("CallbackURLs".to_string(), Value::from(client.callback_urls().to_vec()));
    }
    if !client.allowed_o_auth_scopes().is_empty() {
        extra.insert(
            "AllowedOAuthScopes".to_string(),
            Value::from(client.allowed_o_auth_scopes().to_vec()),
        );
    }

    UserPoolClient {
        client_id: client.client_id().map(str::to_string),
        client_secret: client.client_secret().map(str::to_string),
        client_name: client.client_name().map(str::to_string),
        user_pool_id: client.user_pool_id().map(str::to_string),
        extra,
    }
}

fn sdk_parameter_type(parameter_type: ParameterType) -> aws_sdk_ssm::types::ParameterType {
    match parameter_type {
        ParameterType::String => aws_sdk_ssm::types::ParameterType::String,
        ParameterType::StringList => aws_sdk_ssm::types::ParameterType::StringList,
        ParameterType::SecureString => aws_sdk_ssm::types::ParameterType::SecureString,
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    async fn describe_stacks(&self, stack_name: &str) -> Result<Vec<Stack>> {
        let response = self
            .clients()?
            .cloudformation
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| remote_error(service::CLOUDFORMATION, "DescribeStacks", e))?;

        Ok(response.stacks().iter().map(convert_stack).collect())
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient> {
        let response = self
            .clients()?
            .cognito
            .describe_user_pool_client()
            .user_pool_id(user_pool_id)
            .client_id(client_id)
            .send()
            .await
            .map_err(|e| remote_error(service::COGNITO_IDP, "DescribeUserPoolClient", e))?;

        Ok(response
            .user_pool_client()
            .map(convert_client)
            .unwrap_or_default())
    }

    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<Parameter>> {
        let result = self
            .clients()?
            .ssm
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await;

        match result {
            Ok(response) => Ok(response.parameter().map(|p| Parameter {
                name: p.name().unwrap_or(name).to_string(),
                value: p.value().map(str::to_string),
                version: Some(p.version()),
            })),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_parameter_not_found()) => {
                Ok(None)
            }
            Err(e) => Err(remote_error(service::SSM, "GetParameter", e)),
        }
    }

    async fn put_parameter(&self, request: PutParameterRequest) -> Result<()> {
        self.clients()?
            .ssm
            .put_parameter()
            .name(request.name)
            .value(request.value)
            .r#type(sdk_parameter_type(request.parameter_type))
            .overwrite(request.overwrite)
            .send()
            .await
            .map_err(|e| remote_error(service::SSM, "PutParameter", e))?;

        Ok(())
    }
}

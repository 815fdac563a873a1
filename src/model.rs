//! Records exchanged with CloudFormation, Cognito and SSM.
//!
//! Field names serialize to the AWS wire names so recorded requests can be
//! compared against what the services expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A deployed CloudFormation stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Stack {
    /// Stack name
    pub stack_name: String,

    /// Stack status (e.g. `UPDATE_COMPLETE`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_status: Option<String>,

    /// When the stack was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Stack outputs in declaration order
    #[serde(default)]
    pub outputs: Vec<Output>,
}

impl Stack {
    /// Creates a stack with no outputs.
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            ..Default::default()
        }
    }

    /// Adds an output.
    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push(Output {
            output_key: key.into(),
            output_value: Some(value.into()),
            description: None,
        });
        self
    }

    /// Finds the output with the given key.
    pub fn output(&self, key: &str) -> Option<&Output> {
        self.outputs.iter().find(|output| output.output_key == key)
    }
}

/// A single stack output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// Output key, unique within a stack
    pub output_key: String,

    /// Output value; may be absent or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Cognito user pool client as returned by `DescribeUserPoolClient`.
///
/// Only the id and secret are interpreted; everything else is passed through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pool_id: Option<String>,

    /// Provider-defined fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserPoolClient {
    /// Creates a client record holding only an id and a secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Default::default()
        }
    }

    /// Extracts the credential pair, requiring both halves to be non-empty.
    pub fn credentials(&self) -> Option<ClientCredentials> {
        let client_id = self.client_id.as_deref().filter(|id| !id.is_empty())?;
        let client_secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some(ClientCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }
}

/// An SSM parameter as returned by `GetParameter`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// SSM parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    /// Encrypted at rest with a KMS key
    SecureString,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::StringList => write!(f, "StringList"),
            Self::SecureString => write!(f, "SecureString"),
        }
    }
}

/// Request body for `PutParameter`.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PutParameterRequest {
    pub name: String,
    pub value: String,
    #[serde(rename = "Type")]
    pub parameter_type: ParameterType,
    pub overwrite: bool,
}

impl PutParameterRequest {
    /// Builds an overwriting `SecureString` put.
    pub fn secure_string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            parameter_type: ParameterType::SecureString,
            overwrite: true,
        }
    }
}

// Values are secrets; keep them out of logs.
impl std::fmt::Debug for PutParameterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PutParameterRequest")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("parameter_type", &self.parameter_type)
            .field("overwrite", &self.overwrite)
            .finish()
    }
}

/// A validated client id / client secret pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Builds the document fragment stored in the parameter:
    /// `{"auth":{"cognito":{"clientId":..,"clientSecret":..}}}`.
    pub fn to_document(&self) -> Map<String, Value> {
        let document = CredentialDocument {
            auth: AuthSection {
                cognito: CognitoSection {
                    client_id: self.client_id.clone(),
                    client_secret: self.client_secret.clone(),
                },
            },
        };
        match serde_json::to_value(document) {
            Ok(Value::Object(map)) => map,
            // A struct of strings always serializes to an object.
            _ => Map::new(),
        }
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Shape of the credential fragment written to SSM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialDocument {
    pub auth: AuthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSection {
    pub cognito: CognitoSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CognitoSection {
    pub client_id: String,
    pub client_secret: String,
}

//! AWS provider integration tests using LocalStack.
//!
//! These tests require LocalStack to be running on localhost:4566.
//!
//! Run with:
//!   docker run -d -p 4566:4566 localstack/localstack
//!   cargo test --test integration_aws --features aws -- --ignored
//!
//! Only SSM is exercised here; CloudFormation outputs and Cognito clients
//! are covered by the mock provider tests.

#![cfg(feature = "aws")]

use cognito_ssm::model::PutParameterRequest;
use cognito_ssm::providers::aws::AwsProvider;
use cognito_ssm::{CloudProvider, CognitoSsmError, RemoteClient};
use serde_json::json;
use std::sync::Arc;

async fn setup_provider() -> AwsProvider {
    let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4566".to_string());

    std::env::set_var("AWS_ACCESS_KEY_ID", "test");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "test");

    let mut provider = AwsProvider::new("us-east-1", Some(endpoint));
    provider.init().await.expect("Failed to initialize provider");
    provider
}

#[tokio::test]
#[ignore] // Run only when LocalStack is available
async fn test_aws_missing_parameter_is_none() {
    let provider = setup_provider().await;

    let parameter = provider
        .get_parameter("/cognito-ssm-test/does-not-exist", true)
        .await
        .expect("Failed to get parameter");

    assert!(parameter.is_none());
}

#[tokio::test]
#[ignore]
async fn test_aws_put_overwrites_and_round_trips() {
    let provider = setup_provider().await;
    let name = "/cognito-ssm-test/overwrite";

    provider
        .put_parameter(PutParameterRequest::secure_string(name, "{}"))
        .await
        .expect("Failed to put parameter");
    provider
        .put_parameter(PutParameterRequest::secure_string(name, r#"{"a":1}"#))
        .await
        .expect("Failed to overwrite parameter");

    let parameter = provider
        .get_parameter(name, true)
        .await
        .expect("Failed to get parameter")
        .expect("Parameter should exist");
    assert_eq!(parameter.value.as_deref(), Some(r#"{"a":1}"#));
}

#[tokio::test]
#[ignore]
async fn test_aws_client_merge_round_trip() {
    let client = RemoteClient::new(Arc::new(setup_provider().await), "unused-stack");
    let name = "/cognito-ssm-test/client";
    let value = json!({"other": "field"});

    client
        .put_parameter(name, value.as_object().unwrap())
        .await
        .expect("Failed to put parameter");

    let stored = client
        .get_existing_parameter(name)
        .await
        .expect("Failed to get parameter")
        .expect("Parameter should exist");
    assert_eq!(serde_json::Value::Object(stored), value);
}

#[tokio::test]
#[ignore]
async fn test_aws_missing_stack_is_remote_error() {
    let client = RemoteClient::new(
        Arc::new(setup_provider().await),
        "cognito-ssm-test-no-such-stack",
    );

    let err = client.describe_stack().await.expect_err("stack should not exist");
    assert!(matches!(
        err.root(),
        CognitoSsmError::Remote { .. } | CognitoSsmError::StackNotFound(_)
    ));
    assert!(err.context().is_some());
}

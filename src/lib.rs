//! cognito-ssm - Copy Cognito user pool client credentials into SSM after a deploy.
//!
//! After a CloudFormation stack deploy completes, this crate reads the user
//! pool client id from a stack output, fetches the client's id and secret
//! from Cognito, and stores them in an SSM `SecureString` parameter, merged
//! over whatever JSON object the parameter already holds.
//!
//! The stored document has this shape, plus any other top-level keys that
//! were already present:
//!
//! ```json
//! {"auth": {"cognito": {"clientId": "...", "clientSecret": "..."}}}
//! ```
//!
//! # Features
//!
//! - **Provider seam**: remote calls go through [`CloudProvider`], so the
//!   workflow runs unchanged against the AWS SDK or an in-memory mock
//! - **Error Context**: every remote step annotates failures with what it
//!   was doing while keeping the original message intact
//! - **Non-destructive**: existing top-level keys in the parameter survive
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "aws")]
//! # async fn run() -> cognito_ssm::Result<()> {
//! use cognito_ssm::providers::aws::AwsProvider;
//! use cognito_ssm::{AfterDeployHook, Config, RemoteClient};
//! use std::sync::Arc;
//!
//! let config = Config::load("serverless.yml")?;
//!
//! let mut provider = AwsProvider::new(config.region.clone(), config.endpoint.clone());
//! provider.init().await?;
//!
//! let client = RemoteClient::new(Arc::new(provider), config.stack_name());
//! let outcome = AfterDeployHook::new(config.plugin, client).run().await?;
//! println!("stored credentials in {}", outcome.parameter_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Providers
//!
//! | Provider | Feature Flag | Notes |
//! |----------|-------------|-------|
//! | Mock | `mock` (default) | In-memory, records calls, error injection |
//! | AWS | `aws` | CloudFormation, Cognito and SSM SDK clients |
//!
//! # Concurrency
//!
//! The parameter is written without any compare-and-swap: when two runs
//! target the same parameter the last writer wins.

pub mod client;
pub mod config;
pub mod error;
pub mod hook;
pub mod json;
pub mod model;
pub mod provider;
pub mod providers;
pub mod validation;

pub use client::RemoteClient;
pub use config::{Config, PluginConfig};
pub use error::{CognitoSsmError, OperationContext, Result};
pub use hook::{AfterDeployHook, HookOutcome, AFTER_DEPLOY_EVENT};
pub use provider::CloudProvider;

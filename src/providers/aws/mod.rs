//! AWS SDK provider.
//!
//! This provider talks to CloudFormation, Cognito user pools and SSM
//! Parameter Store using the official AWS SDK crates.
//!
//! # Requirements
//!
//! - AWS credentials configured via:
//!   - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//!   - Shared credentials file (`~/.aws/credentials`)
//!   - IAM instance role (for EC2/ECS/CodeBuild)
//! - Permissions: `cloudformation:DescribeStacks`,
//!   `cognito-idp:DescribeUserPoolClient`, `ssm:GetParameter`,
//!   `ssm:PutParameter`, and `kms:Decrypt`/`kms:Encrypt` on the key used for
//!   SecureString values.
//!
//! # Example
//!
//! ```no_run
//! use cognito_ssm::providers::aws::AwsProvider;
//! use cognito_ssm::CloudProvider;
//!
//! #[tokio::main]
//! async fn main() -> cognito_ssm::Result<()> {
//!     let mut provider = AwsProvider::new("us-west-2", None);
//!     provider.init().await?;
//!
//!     let stacks = provider.describe_stacks("my-service-dev").await?;
//!     println!("found {} stack(s)", stacks.len());
//!     Ok(())
//! }
//! ```

mod provider;

pub use provider::AwsProvider;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cognito_ssm::providers::aws::AwsProvider;
use cognito_ssm::{AfterDeployHook, Config, RemoteClient, AFTER_DEPLOY_EVENT};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Copy Cognito user pool client credentials into an SSM parameter.
#[derive(Debug, Parser)]
#[command(name = "cognito-ssm", version, about)]
struct Cli {
    /// Serverless-style YAML file holding the hook settings
    #[arg(long, short, global = true, default_value = "serverless.yml")]
    config: PathBuf,

    /// Deployment stage (overrides provider.stage)
    #[arg(long, global = true)]
    stage: Option<String>,

    /// AWS region (overrides provider.region)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Stack name (overrides the {service}-{stage} default)
    #[arg(long, global = true)]
    stack_name: Option<String>,

    /// Custom AWS endpoint URL, e.g. LocalStack
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the after:deploy:deploy hook
    AfterDeploy,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<cognito_ssm::CognitoSsmError>().and_then(|e| e.context()) {
            Some(context) => error!(context = %context, "{:#}", err),
            None => error!("{:#}", err),
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(stage) = cli.stage {
        config = config.with_stage(stage);
    }
    if let Some(region) = cli.region {
        config = config.with_region(region);
    }
    if let Some(stack_name) = cli.stack_name {
        config = config.with_stack_name(stack_name);
    }
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }

    match cli.command {
        Command::AfterDeploy => {
            info!(event = AFTER_DEPLOY_EVENT, stack = %config.stack_name(), region = %config.region, "running hook");

            let mut provider = AwsProvider::new(config.region.clone(), config.endpoint.clone());
            provider.init().await?;

            let client = RemoteClient::new(Arc::new(provider), config.stack_name());
            let outcome = AfterDeployHook::new(config.plugin, client).run().await?;

            info!(
                parameter = %outcome.parameter_name,
                merged_existing = outcome.merged_existing,
                "client credentials stored"
            );
        }
    }

    Ok(())
}

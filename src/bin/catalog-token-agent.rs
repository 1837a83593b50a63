use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_token_agent::catalog::CatalogClient;
use catalog_token_agent::config::proc_validator::validate_for_authentication;
use catalog_token_agent::utils::config_loader;
use catalog_token_agent::utils::constants::DEFAULT_PROBE_TIMEOUT_SECS;
use catalog_token_agent::utils::logging::{self, LogLevel};
use catalog_token_agent::{CredentialError, LifecycleManager};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Defaults to the per-user config directory
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum, ignore_case = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a new developer token and store it, replacing any previous one
    Auth,
    /// Show the stored credential status
    Info {
        /// Also call the catalog storefront endpoint with the stored token
        #[arg(long)]
        probe: bool,
        #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if err
                .downcast_ref::<CredentialError>()
                .is_some_and(CredentialError::requires_authentication)
            {
                eprintln!("Run `catalog-token-agent auth` to issue a new developer token.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let app_config = config_loader::run(args.config.as_deref())?;
    logging::run(&app_config, args.log_level);

    // -------------------------------
    // 2. Build the lifecycle manager
    // -------------------------------

    let manager = LifecycleManager::new(app_config.credential_settings());

    // -------------------------------
    // 3. Dispatch
    // -------------------------------

    match args.command {
        Command::Auth => {
            validate_for_authentication(&app_config).context("configuration validation failed")?;
            let record = manager.authenticate()?;
            println!("Authentication successful! Developer token generated and saved.");
            println!("Token expires at {}.", record.expires_at.to_rfc3339());
            println!("Note: only the developer token is issued, the user token flow is not implemented.");
        }
        Command::Info { probe, timeout_secs } => {
            let status = manager.describe_status()?;
            let mut output = serde_json::to_value(&status)?;

            if probe {
                let ctx = manager.authorized_context()?;
                let client = CatalogClient::new(&app_config.catalog.base_url)?;
                let probe = client
                    .storefront(&ctx, Duration::from_secs(timeout_secs))
                    .await
                    .context("failed to get storefront")?;
                if let (Some(out), serde_json::Value::Object(extra)) =
                    (output.as_object_mut(), serde_json::to_value(&probe)?)
                {
                    out.extend(extra);
                }
            }

            println!("Catalog Account Information:");
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

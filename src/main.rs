//! barrierctl CLI
//!
//! Bulk information-barrier policy automation for CollabHub tenants.
//!
//! # Usage
//!
//! ```bash
//! barrierctl run
//! barrierctl run --exclude "corporate*|corporate-sales" --log-dir /var/log/barriers
//! barrierctl run --connect false --disconnect false
//! barrierctl segments list
//! barrierctl policies list --format json
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use barrierctl::commands::policies::PolicyCommands;
use barrierctl::commands::run::RunArgs;
use barrierctl::commands::segments::SegmentCommands;
use barrierctl::commands;
use barrierctl::config::Config;
use barrierctl::output::OutputFormat;
use barrierctl::BarrierClient;

#[derive(Parser)]
#[command(name = "barrierctl")]
#[command(version = "0.1.0")]
#[command(about = "Bulk information-barrier policy automation", long_about = None)]
struct Cli {
    /// Management API endpoint URL
    #[arg(long, env = "BARRIERCTL_API_URL")]
    api_url: Option<String>,

    /// API key for authentication
    #[arg(long, env = "BARRIERCTL_API_KEY")]
    api_key: Option<String>,

    /// Tenant ID
    #[arg(long, env = "BARRIERCTL_TENANT_ID")]
    tenant_id: Option<String>,

    /// Output format for inspection commands
    #[arg(long, short, default_value = "table")]
    format: OutputFormat,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile one block policy per segment and trigger bulk application
    Run(RunArgs),
    /// Inspect segments
    Segments {
        #[command(subcommand)]
        action: SegmentCommands,
    },
    /// Inspect barrier policies
    Policies {
        #[command(subcommand)]
        action: PolicyCommands,
    },
}

const DEFAULT_API_URL: &str = "https://api.collabhub.io/v1";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.profile.as_deref()).unwrap_or_default();
    let api_url = cli
        .api_url
        .or(config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_key = cli.api_key.or(config.api_key);
    let tenant_id = cli.tenant_id.or(config.tenant_id);

    let mut client =
        match BarrierClient::new(&api_url, api_key.as_deref(), tenant_id.as_deref()) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

    let exit_code = match cli.command {
        Commands::Run(mut args) => {
            args.log_dir = args.log_dir.or(config.log_dir);
            match commands::run::handle(args, &mut client).await {
                Ok(summary) if summary.failures == 0 => {
                    tracing::info!(
                        attempted = summary.attempted,
                        log = %summary.log_path.display(),
                        "run complete"
                    );
                    0
                }
                Ok(summary) => {
                    eprintln!(
                        "{} of {} operations failed; see {}",
                        summary.failures,
                        summary.attempted,
                        summary.log_path.display()
                    );
                    1
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Commands::Segments { action } => {
            report(commands::segments::handle(action, &client, cli.format).await)
        }
        Commands::Policies { action } => {
            report(commands::policies::handle(action, &client, cli.format).await)
        }
    };

    std::process::exit(exit_code);
}

fn report(result: Result<(), barrierctl::Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

use std::path::PathBuf;

use clap::Parser;
use gantry::{GatewayConfig, bind_and_serve, bootstrap_from_env};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gantry",
    version,
    about = "Serve workspace operations and prompt documents over HTTP and JSON-RPC"
)]
struct Cli {
    /// Path to config file (default: ./config.yaml, then next to the binary)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(long)]
    bind: Option<String>,

    /// Directory of markdown prompts, overriding the config file
    #[arg(long)]
    prompts_dir: Option<PathBuf>,

    /// Enable verbose logging (set log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let loaded = match &cli.config {
        Some(path) => GatewayConfig::load(path),
        None => GatewayConfig::discover(GatewayConfig::default_candidates()),
    };
    let mut config = loaded.inspect_err(|err| tracing::error!(error = %err, "startup failed"))?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(prompts_dir) = cli.prompts_dir {
        config.prompts_dir = prompts_dir;
    }

    let bind = config.bind.clone();
    let gateway =
        bootstrap_from_env(config).inspect_err(|err| tracing::error!(error = %err, "startup failed"))?;
    bind_and_serve(gateway, &bind).await?;
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kube::Client;
use std::sync::Arc;
use tracing::{info, warn};

use pod_count_webhook::{ensure_pods_listable, load_config, serve, KubePodCounter, PodCounter};

#[derive(Parser)]
#[command(name = "pod-count-webhook")]
#[command(about = "Reports pod-count severity against warning/critical thresholds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Run => run().await,
    }
}

async fn run() -> Result<()> {
    let cfg = load_config()?;
    info!(
        "namespace = {}, label selector = {:?}",
        cfg.namespace.as_deref().unwrap_or("<all>"),
        cfg.label_selector
    );

    let client = Client::try_default()
        .await
        .context("failed to build Kubernetes client")?;
    let counter: Arc<dyn PodCounter> = Arc::new(KubePodCounter::from_config(client, &cfg));

    // Check pod listing early (fail fast if requested)
    if cfg.fail_if_pods_unlistable {
        let count = ensure_pods_listable(&*counter).await?;
        info!("Pod listing available, {} pods visible", count);
    } else {
        warn!("Skipping startup pod listing check");
    }

    serve(&cfg, counter).await
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

use anyhow::Result;
use api_wallet::{
    config::ClientConfig,
    render::{render_dashboard, render_pricing},
    services::{fetch_x402_metadata, Dashboard, HttpBackend, PaymentPoller},
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "api-wallet", version, about = "Pay-per-call API wallet console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the backend to pay the provider for a task
    Pay {
        #[arg(long, default_value = "Generate 3 images of Dhule skyline")]
        task: String,

        /// Budget in USD. Sent as-is.
        #[arg(long, default_value_t = 0.05)]
        max_usd: f64,
    },
    /// Poll the payment history and redraw until Ctrl-C
    Watch,
    /// Show the provider's advertised x402 pricing
    Provider {
        /// Budget to price against
        #[arg(long, default_value_t = 0.05)]
        max_usd: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    tracing::info!("API wallet console v{}", env!("CARGO_PKG_VERSION"));

    let backend = Arc::new(HttpBackend::new(config.backend_url.clone()));
    let dashboard = Dashboard::from_config(backend, &config);

    match cli.command {
        Command::Pay { task, max_usd } => pay(&dashboard, &config, &task, max_usd).await,
        Command::Watch => watch(dashboard, &config).await,
        Command::Provider { max_usd } => provider(&config, max_usd).await,
    }
}

async fn pay(dashboard: &Dashboard, config: &ClientConfig, task: &str, max_usd: f64) -> Result<()> {
    dashboard.refresh().await;

    println!("Paying for: {}", task);
    println!("Budget: ${} (provider {})", max_usd, config.provider_url);
    println!();

    let submission = dashboard.submit(task, max_usd).await?;
    if let Some(refresh) = submission.refresh {
        refresh.await?;
    }
    let result = submission.result;

    let state = dashboard.snapshot().await;
    print!("{}", render_dashboard(&state, dashboard.starting_balance_usd()));

    if !result.ok {
        anyhow::bail!(
            "{}",
            result.error.unwrap_or_else(|| "Payment failed".to_string())
        );
    }

    Ok(())
}

async fn watch(dashboard: Dashboard, config: &ClientConfig) -> Result<()> {
    let poller = PaymentPoller::spawn(dashboard.clone(), config.poll_interval);

    let mut updates = dashboard.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = dashboard.snapshot().await;
                print!("\x1B[2J\x1B[H");
                print!("{}", render_dashboard(&state, dashboard.starting_balance_usd()));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    poller.stop().await;
    Ok(())
}

async fn provider(config: &ClientConfig, max_usd: f64) -> Result<()> {
    let client = reqwest::Client::new();
    let metadata = fetch_x402_metadata(&client, &config.provider_url).await?;

    print!("{}", render_pricing(&metadata, max_usd));

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use daily_broadcast::app::App;
use daily_broadcast::config::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "daily-broadcast", version)]
#[command(about = "Compose today's themed message and broadcast it to the channel")]
struct CliArgs {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_broadcast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _args = CliArgs::parse();

    info!("Starting daily-broadcast");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match app.run().await {
        Ok(summary) => {
            info!(
                "Sent {} messages for {}{}",
                summary.messages.len(),
                summary.date,
                if summary.degraded { " (placeholder content)" } else { "" }
            );
            Ok(())
        }
        Err(e) => {
            error!("Run ended unsuccessfully: {}", e);
            std::process::exit(1);
        }
    }
}

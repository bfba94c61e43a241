use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steam_showcase::aggregate::build_showcase;
use steam_showcase::api::state::AppState;
use steam_showcase::api::{build_router, cors_layer};
use steam_showcase::config::{AppConfig, SteamCredentials};
use steam_showcase::fallback::FallbackDataset;
use steam_showcase::steam::SteamClient;

#[derive(Parser)]
#[command(name = "steam-showcase")]
#[command(about = "Personal Steam profile showcase page")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./showcase.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Build the showcase once and print it as JSON
    Snapshot {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting steam-showcase v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    let credentials = SteamCredentials::from_env();
    match &credentials {
        Some(creds) => tracing::info!("Live mode for Steam ID {}", creds.steam_id),
        None => tracing::info!("STEAM_API_KEY or STEAM_ID not set, using fallback dataset"),
    }

    let fallback = FallbackDataset::load(config.page.fallback_path.as_deref())
        .context("Failed to load fallback dataset")?;
    let client = SteamClient::new(&config.steam, credentials)?;
    let configured = client.is_configured();

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                gateway: Arc::new(client),
                fallback: Arc::new(fallback),
                page: Arc::new(config.page.clone()),
                configured,
            };
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Showcase: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Snapshot { pretty } => {
            let showcase = build_showcase(&client, &fallback, configured).await;
            let json = if pretty {
                serde_json::to_string_pretty(&showcase)?
            } else {
                serde_json::to_string(&showcase)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

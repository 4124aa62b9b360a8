mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coinview_api::state::AppState;
use coinview_exchange::ExchangeClient;
use coinview_store::AccountStore;
use config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "coinview")]
#[command(about = "Crypto price dashboard — serve live exchange prices and manage accounts")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Fetch the configured pairs once and print the quotes
    Prices {
        /// Trading pairs to fetch (overrides the config file)
        #[arg(short, long)]
        products: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config).await?;
        }
        Commands::Prices { products } => {
            if !products.is_empty() {
                config.products = products;
            }
            print_prices(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let store = AccountStore::connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
    store
        .run_migrations()
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!(database = %config.database_url, "Accounts store ready");

    let feed = ExchangeClient::new(&config.exchange_url)
        .map_err(|e| anyhow::anyhow!("Exchange client setup failed: {}", e))?;
    tracing::info!(
        exchange = %config.exchange_url,
        products = ?config.products,
        "Price feed configured"
    );

    let state = AppState::new(store, Arc::new(feed), config.products);
    coinview_api::start_server(state, &config.bind).await
}

async fn print_prices(config: Config) -> Result<()> {
    let feed = ExchangeClient::new(&config.exchange_url)
        .map_err(|e| anyhow::anyhow!("Exchange client setup failed: {}", e))?;

    let quotes = coinview_exchange::fetch_all_prices(&feed, &config.products).await;

    for quote in &quotes {
        match (&quote.price, &quote.volume, &quote.time) {
            (Some(price), Some(volume), Some(time)) => {
                println!(
                    "{:<12} {:>16}  vol {:>18}  {}",
                    quote.product_id,
                    price,
                    volume,
                    time.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            _ => {
                println!(
                    "{:<12} {}",
                    quote.product_id,
                    quote.error.as_deref().unwrap_or("unavailable")
                );
            }
        }
    }

    Ok(())
}

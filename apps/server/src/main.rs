//! Braitsure - USDT/BRL arbitrage quote server.
//!
//! Aggregates USDT/BRL buy prices across exchanges and serves arbitrage
//! simulations over a JSON API and a Telegram bot.

mod api;
mod state;

use braitsure_alerts::{BotConfig, BraitsureBot};
use braitsure_feeds::AggregatorConfig;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Braitsure CLI
#[derive(Parser, Debug)]
#[command(name = "braitsure")]
#[command(about = "USDT/BRL arbitrage quote aggregator and simulator", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Boot-time resale (Picnic) price in BRL per USDT
    #[arg(short, long, default_value_t = braitsure_engine::DEFAULT_RESALE_PRICE)]
    resale_price: f64,

    /// Per-request timeout in seconds for upstream price sources
    #[arg(long, default_value_t = braitsure_feeds::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Minimum converted USD volume for aggregator ticker records
    #[arg(long, default_value_t = 1000.0)]
    min_volume_usd: f64,

    /// Telegram channel that receives analysis copies, e.g. @upsurechanel
    #[arg(long)]
    channel: Option<String>,

    /// Disable the Telegram bot even when a token is configured
    #[arg(long, default_value_t = false)]
    no_bot: bool,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = AggregatorConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        min_converted_volume_usd: args.min_volume_usd,
        ..AggregatorConfig::default()
    };

    let service = match state::create_service(config, args.resale_price) {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "failed to initialise the simulation service");
            std::process::exit(1);
        }
    };

    spawn_bot(&args, service.clone());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = addr.as_str(), error = %e, "failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    info!(addr = addr.as_str(), "HTTP API listening");
    if let Err(e) = axum::serve(listener, api::router(service)).await {
        error!(error = %e, "HTTP server terminated");
        std::process::exit(1);
    }
}

/// Start the Telegram dispatcher when a token is configured.
/// The server runs fine without it; the JSON API stays up either way.
fn spawn_bot(args: &Args, service: state::SharedService) {
    if args.no_bot {
        info!("Telegram bot disabled by flag");
        return;
    }

    match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.is_empty() => {
            let mut config = BotConfig::default();
            if let Some(channel) = &args.channel {
                config = config.with_channel(channel.clone());
            }
            let bot = Arc::new(BraitsureBot::new(&token, service, config));
            tokio::spawn(bot.run());
            info!("Telegram bot started");
        }
        _ => info!("TELEGRAM_BOT_TOKEN not set; Telegram bot disabled"),
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gleura_core::{order::DEFAULT_TRACKING_LOOKUP_URL, StoreProfile, TrackingLinks};
use gleura_shopify::{
    coerce_order, normalize_order, track_order, AdminClient, CandidateOrder, DiagnosticsProbe,
    OrderQuery, TrackError,
};

#[derive(Debug, Parser)]
#[command(name = "gleura-cli")]
#[command(about = "Gleura order-tracking operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up an order the way the chat widget does
    Track {
        /// Order number, with or without `#`
        order_number: String,
        /// Phone number the shopper would enter
        phone: String,
    },
    /// Show which intent a chat message resolves to, and the reply
    Classify {
        message: String,
    },
    /// Check what the configured Admin API token can see
    Probe,
    /// Normalize a saved Admin API response body
    Normalize {
        /// JSON file (REST or GraphQL shape)
        file: PathBuf,
        /// Tracking lookup prefix used when an order has no tracking URL
        #[arg(long, default_value = DEFAULT_TRACKING_LOOKUP_URL)]
        lookup_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Track {
            order_number,
            phone,
        } => run_track(order_number, phone).await,
        Commands::Classify { message } => {
            run_classify(&message);
            Ok(())
        }
        Commands::Probe => run_probe().await,
        Commands::Normalize { file, lookup_url } => run_normalize(&file, lookup_url),
    }
}

async fn run_track(order_number: String, phone: String) -> anyhow::Result<()> {
    let config = gleura_core::load_app_config()?;
    let client = AdminClient::from_config(&config)?;
    let links = TrackingLinks::new(config.tracking_lookup_url.clone());
    let query = OrderQuery::new(order_number, phone);

    let order = track_order(&client, &query, &links, Some(&client))
        .await
        .map_err(|e| lookup_failure(&e))?;
    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}

/// `KIND: message`, plus the upstream status when the Admin API gave one.
fn lookup_failure(error: &TrackError) -> anyhow::Error {
    match error.upstream_status() {
        Some(status) => anyhow::anyhow!(
            "{}: {} (upstream status {status})",
            error.kind(),
            error.client_message()
        ),
        None => anyhow::anyhow!("{}: {}", error.kind(), error.client_message()),
    }
}

fn run_classify(message: &str) {
    // The scripted replies only need the store profile; fall back to defaults
    // when the Admin API settings are absent.
    let profile = match gleura_core::load_app_config() {
        Ok(config) => config.store,
        Err(e) => {
            tracing::debug!(error = %e, "config unavailable, using default store profile");
            StoreProfile::default()
        }
    };
    let reply = gleura_intent::respond(message, &profile);
    println!("intent:     {}", reply.intent);
    println!("confidence: {}", reply.confidence);
    println!("reply:      {}", reply.html);
}

async fn run_probe() -> anyhow::Result<()> {
    let config = gleura_core::load_app_config()?;
    let client = AdminClient::from_config(&config)?;
    let diagnostics = client.collect_diagnostics().await;

    println!("shop: {}", config.shop_domain);
    println!("{}", diagnostics.summary());
    if diagnostics.can_read_orders() == Some(false) {
        println!("warning: token lacks the read_orders scope");
    }
    Ok(())
}

fn run_normalize(file: &Path, lookup_url: String) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let order = coerce_order(&body)
        .with_context(|| format!("no order object found in {}", file.display()))?;

    let normalized = normalize_order(
        &CandidateOrder::new(order.clone()),
        &TrackingLinks::new(lookup_url),
    );
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

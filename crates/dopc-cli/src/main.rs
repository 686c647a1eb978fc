mod quote;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dopc-cli")]
#[command(about = "Delivery order price command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Quote an order against live venue data
    Quote {
        /// Venue identifier in the venue API
        #[arg(long)]
        venue_slug: String,
        /// Cart value in cents
        #[arg(long)]
        cart_value: i64,
        #[arg(long, allow_hyphen_values = true)]
        user_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        user_lon: f64,
    },
    /// Quote an order against a local YAML specs file
    QuoteFile {
        /// Path to the specs file
        #[arg(long)]
        specs: PathBuf,
        /// Cart value in cents
        #[arg(long)]
        cart_value: i64,
        #[arg(long, allow_hyphen_values = true)]
        user_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        user_lon: f64,
        /// Venue latitude, overriding the file's `venue` block
        #[arg(long, allow_hyphen_values = true, requires = "venue_lon")]
        venue_lat: Option<f64>,
        /// Venue longitude, overriding the file's `venue` block
        #[arg(long, allow_hyphen_values = true, requires = "venue_lat")]
        venue_lon: Option<f64>,
    },
    /// Validate a YAML specs file and print its distance ranges
    CheckSpecs {
        /// Path to the specs file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dopc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Quote {
            venue_slug,
            cart_value,
            user_lat,
            user_lon,
        } => quote::run_quote(&config, &venue_slug, cart_value, user_lat, user_lon).await,
        Commands::QuoteFile {
            specs,
            cart_value,
            user_lat,
            user_lon,
            venue_lat,
            venue_lon,
        } => {
            let venue_override = venue_lat.zip(venue_lon);
            quote::run_quote_file(
                &specs,
                cart_value,
                user_lat,
                user_lon,
                venue_override,
                config.max_cart_value,
            )
        }
        Commands::CheckSpecs { file } => quote::run_check_specs(&file),
    }
}

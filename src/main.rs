use anyhow::{Context, Result};
use base64::Engine as _;
use clap::{Parser, Subcommand};
use nutrilens::ai::mime;
use nutrilens::{Config, InferenceClient};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nutrilens")]
#[command(about = "Identify dishes in food photos and estimate their nutrition")]
struct CliArgs {
    /// Dish list file, one name per line. Overrides FOOD_TAXONOMY_PATH.
    #[arg(long, global = true, value_name = "PATH")]
    taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a JPEG photo and print the result as JSON.
    Classify {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
    /// Print a short healthy-eating tip.
    Tip,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrilens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(path) = args.taxonomy {
        config.taxonomy_path = Some(path);
    }

    let client = InferenceClient::from_config(&config).context("Failed to initialize client")?;

    match args.command {
        Command::Classify { image } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read {}", image.display()))?;
            info!("Classifying {} ({} bytes)", image.display(), bytes.len());
            mime::warn_if_not_jpeg(&bytes);

            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            match client.classify_food(&encoded).await {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Tip => {
            println!("{}", client.get_daily_tip().await);
            Ok(())
        }
    }
}

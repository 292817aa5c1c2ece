//! Fetches the acoustic model and external scorer into the local data
//! directory, so the plugin finds them at its default paths.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use stt_stream::models::{self, ModelFlavor};

#[derive(Parser, Debug)]
#[command(name = "fetch-models")]
#[command(version, about = "Download speech model artifacts", long_about = None)]
struct Args {
    /// Engine release version to fetch
    #[arg(long, default_value = models::DEFAULT_MODEL_VERSION)]
    version: String,

    /// Fetch the TFLite graph instead of the memory-mapped protobuf
    #[arg(long)]
    tflite: bool,

    /// Destination directory for the artifacts
    #[arg(long, short = 'd', env = "STT_MODEL_DIR", default_value_os_t = models::data_dir())]
    model_dir: PathBuf,

    /// A .tar.bz2 model bundle to fetch and unpack instead of the release artifacts
    #[arg(long)]
    bundle_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if args.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    if let Some(url) = args.bundle_url {
        if !models::is_bundle(&url) {
            warn!("{} does not look like a .tar.bz2 bundle, trying anyway", url);
        }
        models::fetch_bundle(&url, &args.model_dir)?;
        return Ok(());
    }

    let flavor = if args.tflite { ModelFlavor::TfLite } else { ModelFlavor::Pbmm };
    let (model, scorer) = models::ensure_models(&args.model_dir, &args.version, flavor)?;

    info!("model ready at {}", model.display());
    info!("scorer ready at {}", scorer.display());
    Ok(())
}

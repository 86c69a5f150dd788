use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, Level};

use gif_stitch::{config::Config, engine::StitchEngine, StitchError};

#[derive(Parser)]
#[command(
    name = "gif-stitch",
    version,
    about = "Concatenate animated GIFs, repeating each one a given number of times",
    long_about = "gif-stitch decodes each input GIF, appends its frames (and their delays) the requested number of times, and writes the combined animation as a single new GIF."
)]
struct Cli {
    /// A comma-separated list of GIFs to stitch, in order
    #[arg(long)]
    files: Option<String>,

    /// A comma-separated list of loop counts, one per file (default: 1 each)
    #[arg(long)]
    loops: Option<String>,

    /// Output file path, or - for stdout [default: merged.gif]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (optional); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout may carry the GIF itself
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<StitchError>() {
            Some(err) => error!("{}", err.user_message()),
            None => error!("{}", e),
        }
        debug!("Cause chain: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("Starting gif-stitch v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    // --files is required unless the config file lists inputs
    let files = match (cli.files.as_deref(), config.files.is_empty()) {
        (None, true) => Some(""),
        (files, _) => files,
    };

    let config = config.with_overrides(files, cli.loops.as_deref(), cli.output)?;
    info!("Files: {:?}", config.files);
    info!("Loops: {:?}", config.loops);
    info!("Output: {:?}", config.output);

    let encoded = StitchEngine::new(config).run()?;

    info!(
        "Done! {} frames ({:.2}s per loop, {} bytes) saved to: {:?}",
        encoded.frame_count,
        encoded.duration_centis as f64 / 100.0,
        encoded.file_size,
        encoded.path
    );
    Ok(())
}

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sukashi::{BatchConfig, batch};

#[derive(Parser, Debug)]
#[command(author, version, about = "Add watermarks and generate thumbnails for all images under a directory", long_about = None)]
struct Cli {
    /// Path to the logo image file
    #[arg(long)]
    logo: PathBuf,

    /// Width for thumbnails in pixels
    #[arg(long, default_value_t = 400)]
    thumbnail_width: u32,

    /// Root directory to process
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set up logging first
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BatchConfig::new(cli.root, cli.logo, cli.thumbnail_width);

    // Per-file failures are reported inline and do not change the exit
    // status; only the fatal logo errors do.
    if let Err(e) = batch::run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

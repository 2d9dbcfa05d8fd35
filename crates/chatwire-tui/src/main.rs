//! Chatwire TUI entry point.

use std::path::PathBuf;

use chatwire_tui::runtime::Runtime;
use clap::Parser;

/// Chatwire terminal chat client
#[derive(Parser, Debug)]
#[command(name = "chatwire-tui")]
#[command(about = "Terminal UI for the chatwire web chat")]
#[command(version)]
struct Args {
    /// Base URL of the chat server API
    #[arg(short, long, default_value = "http://localhost:8080/api")]
    api: String,

    /// Write tracing output to this file (the terminal stays clean)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }

    let runtime = Runtime::new(args.api)?;
    Ok(runtime.run().await?)
}

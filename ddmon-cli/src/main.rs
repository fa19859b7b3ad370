use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod commands;
mod duration;
mod settings;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "ddmon")]
#[command(about = "Manage monitors through the Monitor API")]
struct Args {
    /// Settings file (TOML). DDMON_* environment variables override it.
    #[arg(short, long, default_value = "ddmon.toml")]
    config: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level);

    let settings = settings::load_settings(&args.config)?;
    let client = settings.client()?;

    if let Some(output) = commands::run(&client, args.command).await? {
        println!("{}", output);
    }
    Ok(())
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

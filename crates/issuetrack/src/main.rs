use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::Commands;

#[derive(Parser)]
#[command(name = "issuetrack", version, about = "Project-scoped issue tracking over a JSON REST API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.command.run().await {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}

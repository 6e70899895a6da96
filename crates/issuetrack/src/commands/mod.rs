pub mod init;
pub mod issue;
pub mod serve;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a data directory with a default config
    Init(init::InitArgs),
    /// Run the HTTP API
    Serve(serve::ServeArgs),
    /// Create, list, update and delete issues directly
    Issue(issue::IssueArgs),
}

impl Commands {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Commands::Init(args) => init::run(args),
            Commands::Serve(args) => serve::run(args).await,
            Commands::Issue(args) => issue::run(args).await,
        }
    }
}

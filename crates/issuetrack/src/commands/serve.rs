use anyhow::Context;
use clap::Args;

use issuetrack_service::IssueService;
use issuetrack_store::config::read_config_or_default;
use issuetrack_store::{open_store, Backend};

use crate::config::DataDirArgs;

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    data: DataDirArgs,
    /// Listen address (overrides the config file)
    #[arg(short, long, env = "ISSUETRACK_BIND")]
    bind: Option<String>,
    /// Keep issues in memory only (overrides the config file)
    #[arg(long)]
    memory: bool,
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let layout = args.data.layout()?;
    let config = read_config_or_default(&layout)?;

    let bind = args.bind.unwrap_or(config.bind);
    let backend = if args.memory {
        Backend::Memory
    } else {
        config.backend
    };

    let store = open_store(&layout, backend)
        .with_context(|| format!("could not open issue store in {}", layout.root().display()))?;
    tracing::info!(?backend, dir = %layout.root().display(), "issue store ready");

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("could not bind {bind}"))?;
    issuetrack_http::serve(listener, IssueService::new(store)).await?;
    Ok(())
}

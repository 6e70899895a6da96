use clap::Args;

use issuetrack_store::config::write_config;
use issuetrack_store::Backend;

use crate::config::DataDirArgs;
use crate::output::kv;

#[derive(Args)]
pub struct InitArgs {
    #[command(flatten)]
    data: DataDirArgs,
    /// Address the server binds to
    #[arg(long)]
    bind: Option<String>,
    /// Keep issues in memory only
    #[arg(long)]
    memory: bool,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let layout = args.data.layout()?;
    let mut config = issuetrack_store::init(&layout)?;

    let mut changed = false;
    if let Some(bind) = args.bind {
        config.bind = bind;
        changed = true;
    }
    if args.memory {
        config.backend = Backend::Memory;
        changed = true;
    }
    if changed {
        write_config(&layout, &config)?;
    }

    println!("Initialized issuetrack data directory");
    println!("{}", kv("path", &layout.root().display().to_string()));
    println!("{}", kv("bind", &config.bind));
    println!("{}", kv("backend", &format!("{:?}", config.backend).to_lowercase()));
    Ok(())
}

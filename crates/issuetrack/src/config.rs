use std::path::{Path, PathBuf};

use clap::Args;

use issuetrack_store::DataLayout;

pub const LOCAL_DIR: &str = ".issuetrack";

#[derive(Args, Debug, Clone, Default)]
pub struct DataDirArgs {
    /// Data directory (defaults to the nearest .issuetrack, then the user data dir)
    #[arg(long, env = "ISSUETRACK_DIR")]
    pub dir: Option<PathBuf>,
}

impl DataDirArgs {
    pub fn layout(&self) -> anyhow::Result<DataLayout> {
        let root = match &self.dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        Ok(DataLayout::new(&root))
    }
}

/// Walk up from `start` looking for a `.issuetrack` directory.
pub fn find_local_dir(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(LOCAL_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    if let Some(local) = find_local_dir(&cwd) {
        return Ok(local);
    }
    dirs::data_local_dir()
        .map(|dir| dir.join("issuetrack"))
        .ok_or_else(|| anyhow::anyhow!("could not determine a data directory; pass --dir"))
}

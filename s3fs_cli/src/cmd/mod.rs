use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use s3fs_view::Filesystem;

use crate::config::S3fsConfig;

mod cat;
mod ls;
mod stat;
mod tree;
mod util;

pub use cat::run_cat;
pub use ls::run_ls;
pub use stat::run_stat;
pub use tree::run_tree;

pub async fn run_command(
    dirs: &ProjectDirs,
    config_file: PathBuf,
    bucket: Option<&str>,
    cmd: crate::Commands,
) -> Result<()> {
    let open_fs = || -> Result<Filesystem> { S3fsConfig::load(&config_file)?.filesystem(bucket) };

    match cmd {
        crate::Commands::Config { cmd } => cmd.run(config_file.clone(), dirs.data_dir()),
        crate::Commands::Ls { path, long } => run_ls(&open_fs()?, &path, long).await,
        crate::Commands::Cat { path } => run_cat(&open_fs()?, &path).await,
        crate::Commands::Stat { path } => run_stat(&open_fs()?, &path).await,
        crate::Commands::Tree { path } => run_tree(&open_fs()?, &path).await,
    }
}

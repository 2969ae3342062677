use anyhow::Result;
use s3fs_view::Filesystem;

use super::util::{format_mode, format_time};

pub async fn run_stat(fs: &Filesystem, path: &str) -> Result<()> {
    let info = fs.stat(path).await?;
    println!("  name: {}", info.name());
    println!("  type: {}", if info.is_dir() { "directory" } else { "file" });
    println!("  size: {}", info.size());
    println!("  mode: {}", format_mode(info.mode()));
    println!("modify: {}", format_time(info.mod_time()));
    Ok(())
}

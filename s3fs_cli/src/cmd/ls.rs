use anyhow::Result;
use s3fs_view::Filesystem;

use super::util::{display_name, format_mode, format_time};

pub async fn run_ls(fs: &Filesystem, path: &str, long: bool) -> Result<()> {
    let entries = fs.read_dir(path).await?;
    for entry in &entries {
        if long {
            println!(
                "{} {:>12} {} {}",
                format_mode(entry.mode()),
                entry.size(),
                format_time(entry.mod_time()),
                display_name(entry)
            );
        } else {
            println!("{}", display_name(entry));
        }
    }
    Ok(())
}

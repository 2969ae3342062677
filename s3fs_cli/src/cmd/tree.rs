use anyhow::Result;
use s3fs_view::Filesystem;

use super::util::display_name;

pub async fn run_tree(fs: &Filesystem, path: &str) -> Result<()> {
    let walked = fs.walk(path).await?;
    let Some((root, rest)) = walked.split_first() else {
        return Ok(());
    };
    let base_depth = depth(&root.path);
    println!("{}", root.path);
    for entry in rest {
        let indent = depth(&entry.path).saturating_sub(base_depth);
        println!("{}{}", "  ".repeat(indent), display_name(&entry.metadata));
    }
    Ok(())
}

/// Number of segments in a walk path, 0 for the root.
fn depth(path: &str) -> usize {
    if path == "." {
        0
    } else {
        path.split('/').count()
    }
}

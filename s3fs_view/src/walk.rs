use crate::{
    DirectoryReader, EntryMetadata, Filesystem, FsResult, Node,
    path::{self, NormalizedPath},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path from the filesystem root, `.` for the root itself.
    pub path: String,
    pub metadata: EntryMetadata,
}

impl Filesystem {
    /// Walks the tree below `root` depth-first, parents before children,
    /// siblings by name. The first entry is `root` itself.
    ///
    /// Directories discovered along the way are listed directly instead of
    /// being resolved again, so a child directory that shares its name with
    /// a sibling file is still descended into.
    pub async fn walk(&self, root: &str) -> FsResult<Vec<WalkEntry>> {
        let start = path::normalize(root)?;
        let mut node = self.open(root).await?;
        let mut out = vec![WalkEntry {
            path: start.to_string(),
            metadata: node.stat().clone(),
        }];

        let mut stack = match &mut node {
            Node::File(_) => Vec::new(),
            Node::Directory(dir) => child_frames(&start, dir)?,
        };
        node.close()?;

        while let Some((path, metadata)) = stack.pop() {
            let is_dir = metadata.is_dir();
            out.push(WalkEntry {
                path: path.to_string(),
                metadata,
            });
            if is_dir {
                let mut dir =
                    DirectoryReader::open(self.store_ref(), self.bucket(), path.clone()).await?;
                stack.extend(child_frames(&path, &mut dir)?);
                dir.close()?;
            }
        }

        Ok(out)
    }
}

/// Children of `dir`, ordered so that popping yields them by name.
fn child_frames(
    parent: &NormalizedPath,
    dir: &mut DirectoryReader,
) -> FsResult<Vec<(NormalizedPath, EntryMetadata)>> {
    let mut entries = dir.read_entries(0)?.entries;
    entries.sort_by(|a, b| b.name().cmp(a.name()).then(b.is_dir().cmp(&a.is_dir())));
    Ok(entries
        .into_iter()
        .map(|entry| (parent.child(entry.name()), entry))
        .collect())
}

//! The [`Filesystem`] façade applications use.

use std::sync::Arc;

use bytes::Bytes;
use s3fs_core::{ObjectStore, StoreError};
use tracing::debug;

use crate::{
    DirectoryReader, EntryMetadata, FileHandle, FsError, FsResult, NamespaceQuery, Node,
    NodeKind, path,
};

/// Read-only filesystem over one bucket of an [`ObjectStore`].
///
/// Cloning is cheap; clones share the store client. Nothing is cached, so
/// every call observes the bucket as it is at that moment.
#[derive(Debug, Clone)]
pub struct Filesystem {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl Filesystem {
    pub fn new<S>(store: S, bucket: impl Into<String>) -> Self
    where
        S: ObjectStore + 'static,
    {
        Self::from_arc(Arc::new(store), bucket)
    }

    pub fn from_arc(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub(crate) fn store_ref(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    fn query(&self) -> NamespaceQuery<'_> {
        NamespaceQuery::new(self.store.as_ref(), &self.bucket)
    }

    /// Opens a file or directory.
    ///
    /// The path is normalized first (see [`path`](crate::path)); malformed
    /// paths fail with [`FsError::InvalidName`] before any store call. The
    /// root is always a directory. Any other path is resolved with one
    /// delimited listing, then either its object is fetched or its children
    /// are listed in full.
    ///
    /// ```rust,no_run
    /// # use s3fs_view::{Filesystem, Node};
    /// # async fn demo(fs: Filesystem) -> s3fs_view::FsResult<()> {
    /// match fs.open("dir-a").await? {
    ///     Node::Directory(mut dir) => {
    ///         let batch = dir.read_entries(0)?;
    ///         for entry in batch.entries {
    ///             println!("{}", entry.name());
    ///         }
    ///     }
    ///     Node::File(mut file) => {
    ///         let bytes = file.read_to_end().await?;
    ///         println!("{} bytes", bytes.len());
    ///     }
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn open(&self, path: &str) -> FsResult<Node> {
        let path = path::normalize(path)?;
        match self.query().resolve(&path).await? {
            NodeKind::File => FileHandle::open(self.store.as_ref(), &self.bucket, path)
                .await
                .map(Node::File),
            NodeKind::Directory => DirectoryReader::open(self.store.as_ref(), &self.bucket, path)
                .await
                .map(Node::Directory),
        }
    }

    /// Metadata for `path` without opening it.
    ///
    /// Probes for an object first; only when there is none are the children
    /// under `path/` listed, with the same checks [`open`](Self::open)
    /// applies. An object that also has children is ambiguous.
    pub async fn stat(&self, path: &str) -> FsResult<EntryMetadata> {
        let path = path::normalize(path)?;
        if path.is_root() {
            return Ok(EntryMetadata::dir(path.base_name()));
        }

        let key = path.as_str();
        match self.store.head_object(&self.bucket, key).await {
            Ok(meta) => {
                if self.query().has_children(&path).await? {
                    return Err(FsError::AmbiguousPath(key.to_owned()));
                }
                Ok(EntryMetadata::file(
                    path.base_name(),
                    meta.size,
                    meta.last_modified,
                ))
            }
            Err(StoreError::NotFound) => {
                debug!("stat {key:?}: no object, listing children");
                let dir = DirectoryReader::open(self.store.as_ref(), &self.bucket, path).await?;
                Ok(dir.stat().clone())
            }
            Err(err) => Err(FsError::transport("head", key)(err)),
        }
    }

    /// All entries of a directory, sorted by name.
    pub async fn read_dir(&self, path: &str) -> FsResult<Vec<EntryMetadata>> {
        let mut dir = self.open(path).await?.into_directory()?;
        let mut entries = dir.read_entries(0)?.entries;
        dir.close()?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(entries)
    }

    /// Whole content of a file.
    pub async fn read_file(&self, path: &str) -> FsResult<Bytes> {
        let mut file = self.open(path).await?.into_file()?;
        let bytes = file.read_to_end().await?;
        file.close()?;
        Ok(bytes)
    }
}

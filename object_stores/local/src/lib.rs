use anyhow::anyhow;
use chrono::{DateTime, Utc};
use s3fs_core::{
    GetObjectOutput, ListObjectsRequest, ListPage, ObjectMeta, StoreError, StoreResult,
    listing::{self, DEFAULT_MAX_KEYS},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use walkdir::WalkDir;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalStoreConfig {
    pub base_path: String,
}

/// Serves every directory below `base_path` as a bucket and every regular
/// file inside it as an object keyed by its `/`-joined relative path.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        LocalStore {
            base_path: base_path.into(),
        }
    }

    pub fn create(config: LocalStoreConfig) -> Self {
        LocalStore {
            base_path: config.base_path.into(),
        }
    }

    fn bucket_path(&self, bucket: &str) -> StoreResult<PathBuf> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket == "." || bucket == ".." {
            return Err(anyhow!("Invalid bucket name: '{}'.", bucket).into());
        }
        Ok(self.base_path.join(bucket))
    }

    fn resolve_path(&self, bucket: &str, key: &str) -> StoreResult<PathBuf> {
        if key.split('/').any(|seg| seg == "..") || key.starts_with('/') {
            return Err(anyhow!(
                "Invalid key: '{}'. Must be a relative path without '..'.",
                key
            )
            .into());
        }
        Ok(self.bucket_path(bucket)?.join(key))
    }

    async fn file_meta(&self, bucket: &str, key: &str) -> StoreResult<(PathBuf, ObjectMeta)> {
        let full_path = self.resolve_path(bucket, key)?;
        let metadata = match tokio::fs::metadata(&full_path).await {
            Ok(metadata) => metadata,
            // some earlier segment of the key is a file
            Err(e) if e.kind() == ErrorKind::NotADirectory => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };
        // a directory is a prefix, never an object
        if !metadata.is_file() || key.ends_with('/') {
            return Err(StoreError::NotFound);
        }
        let meta = ObjectMeta {
            key: key.to_owned(),
            size: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        };
        Ok((full_path, meta))
    }
}

/// Turns a file below `bucket_root` into its object key.
fn key_for(bucket_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(bucket_root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

#[async_trait::async_trait]
impl s3fs_core::ObjectStore for LocalStore {
    async fn head_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectMeta> {
        let (_, meta) = self.file_meta(bucket, key).await?;
        Ok(meta)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<GetObjectOutput> {
        let (full_path, meta) = self.file_meta(bucket, key).await?;
        let file = File::open(&full_path).await?;
        Ok(GetObjectOutput {
            body: Box::new(ReaderStream::new(file)),
            size: meta.size,
            last_modified: meta.last_modified,
        })
    }

    /// Walks the deepest directory the prefix names and lists from there.
    async fn list_objects(&self, request: &ListObjectsRequest) -> StoreResult<ListPage> {
        let bucket_root = self.bucket_path(&request.bucket)?;
        if !tokio::fs::try_exists(&bucket_root).await? {
            return Err(anyhow!("no such bucket: {}", request.bucket).into());
        }

        let walk_root = match request.prefix.rsplit_once('/') {
            Some((dir, _)) => self.resolve_path(&request.bucket, dir)?,
            None => bucket_root.clone(),
        };
        match tokio::fs::try_exists(&walk_root).await {
            Ok(true) => {}
            Ok(false) => return Ok(ListPage::default()),
            Err(e) if e.kind() == ErrorKind::NotADirectory => return Ok(ListPage::default()),
            Err(e) => return Err(e.into()),
        }

        let mut objects = Vec::new();
        for entry in WalkDir::new(&walk_root) {
            let entry = entry.map_err(|e| StoreError::Other(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = key_for(&bucket_root, entry.path()) else {
                continue;
            };
            if !key.starts_with(&request.prefix) {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| StoreError::Other(e.into()))?;
            objects.push(ObjectMeta {
                key,
                size: metadata.len(),
                last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        tracing::trace!(
            "local store: {} candidate keys under {:?}",
            objects.len(),
            request.prefix
        );

        Ok(listing::list_page(objects, request, DEFAULT_MAX_KEYS))
    }
}

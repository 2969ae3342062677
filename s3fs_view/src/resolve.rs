use s3fs_core::{DELIMITER, ListObjectsRequest, ObjectStore};
use tracing::{debug, trace};

use crate::{FsError, FsResult, path::NormalizedPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// Answers "what is at this path" with delimited listings.
///
/// S3 happily stores `foo` next to `foo/bar`, so the same path can be an
/// object and a common prefix at once. That case is reported as
/// [`FsError::AmbiguousPath`] instead of picking a side.
pub struct NamespaceQuery<'a> {
    store: &'a dyn ObjectStore,
    bucket: &'a str,
}

impl<'a> NamespaceQuery<'a> {
    pub fn new(store: &'a dyn ObjectStore, bucket: &'a str) -> Self {
        Self { store, bucket }
    }

    /// Lists with the path itself as prefix and looks for an exact object
    /// key (`path`) and an exact common prefix (`path/`). The root is
    /// always a directory and costs no round-trip.
    pub async fn resolve(&self, path: &NormalizedPath) -> FsResult<NodeKind> {
        if path.is_root() {
            return Ok(NodeKind::Directory);
        }

        let key = path.as_str();
        let dir_prefix = path.dir_prefix();
        let mut request = ListObjectsRequest::new(self.bucket, key).with_delimiter(DELIMITER);
        let mut file_match = false;
        let mut dir_match = false;

        loop {
            let page = self
                .store
                .list_objects(&request)
                .await
                .map_err(FsError::transport("list", key))?;
            trace!(
                "resolve {key:?}: page with {} objects, {} prefixes",
                page.objects.len(),
                page.common_prefixes.len()
            );

            file_match |= page.objects.iter().any(|o| o.key == key);
            dir_match |= page.common_prefixes.iter().any(|cp| *cp == dir_prefix);

            match page.next_page_token {
                Some(token) if !(file_match && dir_match) => request.page_token = Some(token),
                _ => break,
            }
        }

        let kind = match (file_match, dir_match) {
            (true, true) => return Err(FsError::AmbiguousPath(key.to_owned())),
            (true, false) => NodeKind::File,
            (false, true) => NodeKind::Directory,
            (false, false) => return Err(FsError::NotFound(key.to_owned())),
        };
        debug!("resolve {key:?} -> {kind:?}");
        Ok(kind)
    }

    /// Whether anything at all is stored below `path/`.
    pub async fn has_children(&self, path: &NormalizedPath) -> FsResult<bool> {
        let prefix = path.dir_prefix();
        let mut request =
            ListObjectsRequest::new(self.bucket, prefix.as_str()).with_delimiter(DELIMITER);
        loop {
            let page = self
                .store
                .list_objects(&request)
                .await
                .map_err(FsError::transport("list", &prefix))?;
            if !page.is_empty() {
                return Ok(true);
            }
            match page.next_page_token {
                Some(token) => request.page_token = Some(token),
                None => return Ok(false),
            }
        }
    }
}

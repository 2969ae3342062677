use s3fs_core::{DELIMITER, ListObjectsRequest, ObjectStore};
use tracing::{debug, trace};

use crate::{
    EntryMetadata, FsError, FsResult,
    path::{NormalizedPath, is_valid_segment},
};

/// Result of one [`DirectoryReader::read_entries`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirBatch {
    pub entries: Vec<EntryMetadata>,
    /// Set on the call that hands out the last entries.
    pub end: bool,
}

/// An open directory: every child, listed up front, plus a read cursor.
///
/// Entries keep listing order (per page: objects, then common prefixes;
/// pages in fetch order). That is not alphabetical.
#[derive(Debug)]
pub struct DirectoryReader {
    path: NormalizedPath,
    info: EntryMetadata,
    entries: Vec<EntryMetadata>,
    cursor: usize,
    closed: bool,
}

impl DirectoryReader {
    /// Lists every page under `path/` and merges them into one entry set.
    ///
    /// A non-root directory without children does not exist. An object key
    /// or prefix with an empty last segment (e.g. a `dir/` marker object)
    /// cannot be named by any path and fails the whole listing.
    pub(crate) async fn open(
        store: &dyn ObjectStore,
        bucket: &str,
        path: NormalizedPath,
    ) -> FsResult<Self> {
        let prefix = path.dir_prefix();
        let mut request =
            ListObjectsRequest::new(bucket, prefix.as_str()).with_delimiter(DELIMITER);
        let mut entries = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = store
                .list_objects(&request)
                .await
                .map_err(FsError::transport("list", &prefix))?;
            pages += 1;
            trace!(
                "list {prefix:?} page {pages}: {} objects, {} prefixes",
                page.objects.len(),
                page.common_prefixes.len()
            );

            for object in &page.objects {
                let entry = EntryMetadata::from_object(object);
                if !is_valid_segment(entry.name()) {
                    return Err(FsError::InvalidName(object.key.clone()));
                }
                entries.push(entry);
            }
            for common_prefix in &page.common_prefixes {
                let entry = EntryMetadata::from_common_prefix(common_prefix);
                if !is_valid_segment(entry.name()) {
                    return Err(FsError::InvalidName(common_prefix.clone()));
                }
                entries.push(entry);
            }

            match page.next_page_token {
                Some(token) => request.page_token = Some(token),
                None => break,
            }
        }

        if entries.is_empty() && !path.is_root() {
            return Err(FsError::NotFound(path.to_string()));
        }
        debug!("opened dir {path}: {} entries in {pages} pages", entries.len());
        Ok(Self::from_entries(path, entries))
    }

    pub(crate) fn from_entries(path: NormalizedPath, entries: Vec<EntryMetadata>) -> Self {
        let info = EntryMetadata::dir(path.base_name());
        Self {
            path,
            info,
            entries,
            cursor: 0,
            closed: false,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Metadata of the directory itself. No I/O.
    pub fn stat(&self) -> &EntryMetadata {
        &self.info
    }

    /// Entries not handed out yet.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Reads entries from the cursor on.
    ///
    /// With `n <= 0` everything left is returned and `end` is set; once the
    /// directory is drained this keeps returning an empty batch. With
    /// `n > 0` at most `n` entries are returned and `end` is set on the call
    /// that drains the directory. A positive read that starts with the
    /// cursor already at the end fails with [`FsError::EndOfDirectory`];
    /// for an empty directory that is the very first positive read.
    pub fn read_entries(&mut self, n: isize) -> FsResult<DirBatch> {
        if self.closed {
            return Err(FsError::Closed(self.path.to_string()));
        }

        if n <= 0 {
            let entries = self.entries[self.cursor..].to_vec();
            self.cursor = self.entries.len();
            return Ok(DirBatch { entries, end: true });
        }

        if self.remaining() == 0 {
            return Err(FsError::EndOfDirectory);
        }

        let take = self.remaining().min(n.unsigned_abs());
        let entries = self.entries[self.cursor..self.cursor + take].to_vec();
        self.cursor += take;
        Ok(DirBatch {
            entries,
            end: self.remaining() == 0,
        })
    }

    /// Marks the reader closed. Closing twice is fine.
    pub fn close(&mut self) -> FsResult<()> {
        self.closed = true;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

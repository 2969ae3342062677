use chrono::{DateTime, Utc};
use s3fs_core::{DELIMITER, ObjectMeta};

/// Permission bits every node carries; the view is read-only.
pub const MODE_READ_ONLY: u32 = 0o400;
/// Type bit set on directories, same value as `S_IFDIR`.
pub const MODE_DIR: u32 = 0o040000;

/// Name, size, modification time and type of one file or directory.
///
/// `is_dir` is the only source of truth for the type. Directories always
/// report a size of 0 and no modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    name: String,
    size: u64,
    mod_time: Option<DateTime<Utc>>,
    is_dir: bool,
}

impl EntryMetadata {
    pub fn file(name: impl Into<String>, size: u64, mod_time: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            size,
            mod_time,
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mod_time: None,
            is_dir: true,
        }
    }

    /// Entry for an object returned by a listing.
    pub(crate) fn from_object(object: &ObjectMeta) -> Self {
        Self::file(last_segment(&object.key), object.size, object.last_modified)
    }

    /// Entry for a common prefix returned by a delimited listing.
    pub(crate) fn from_common_prefix(prefix: &str) -> Self {
        let trimmed = prefix.strip_suffix(DELIMITER).unwrap_or(prefix);
        Self::dir(last_segment(trimmed))
    }

    /// Last path segment only, never contains a separator.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mod_time(&self) -> Option<DateTime<Utc>> {
        self.mod_time
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn mode(&self) -> u32 {
        if self.is_dir {
            MODE_READ_ONLY | MODE_DIR
        } else {
            MODE_READ_ONLY
        }
    }
}

fn last_segment(key: &str) -> &str {
    key.rsplit(DELIMITER).next().unwrap_or(key)
}

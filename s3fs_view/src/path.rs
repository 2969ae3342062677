//! Turning user-supplied paths into store keys.
//!
//! A [`NormalizedPath`] uses `/` as its only separator and never starts with
//! `/` or `./` or ends with `/`. The empty path is the bucket root. Two paths
//! name the same node exactly when their normalized forms are byte-equal.
//!
//! Rules, applied in order:
//! 1. `.` is the root.
//! 2. `/` and `./.` are rejected.
//! 3. One leading `./` and one trailing `/` are stripped.
//! 4. Whatever remains must be empty (the root) or a sequence of non-empty
//!    segments none of which is `.` or `..`. Anything else is rejected, so
//!    `a//b`, `/a`, `a/..` and `dir//` all fail instead of being rewritten.

use std::fmt;

use s3fs_core::DELIMITER;

use crate::{FsError, FsResult};

/// How the root spells itself, both as input and as a name.
pub const ROOT: &str = ".";

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    /// The store key this path stands for; empty for the root.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Listing prefix for the children of this path.
    pub fn dir_prefix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}{}", self.0, DELIMITER)
        }
    }

    /// Last segment, or `.` for the root.
    pub fn base_name(&self) -> &str {
        if self.is_root() {
            ROOT
        } else {
            self.0.rsplit(DELIMITER).next().unwrap_or(&self.0)
        }
    }

    /// Appends a single segment. `name` must already be a valid segment.
    pub(crate) fn child(&self, name: &str) -> Self {
        if self.is_root() {
            Self(name.to_owned())
        } else {
            Self(format!("{}{}{}", self.0, DELIMITER, name))
        }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(ROOT)
        } else {
            f.write_str(&self.0)
        }
    }
}

pub fn normalize(raw: &str) -> FsResult<NormalizedPath> {
    if raw == ROOT {
        return Ok(NormalizedPath::root());
    }
    if raw == "/" || raw == "./." {
        return Err(FsError::InvalidName(raw.to_owned()));
    }

    let trimmed = raw.strip_prefix("./").unwrap_or(raw);
    let trimmed = trimmed.strip_suffix(DELIMITER).unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Ok(NormalizedPath::root());
    }

    if !trimmed.split(DELIMITER).all(is_valid_segment) {
        return Err(FsError::InvalidName(raw.to_owned()));
    }
    Ok(NormalizedPath(trimmed.to_owned()))
}

pub(crate) fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}

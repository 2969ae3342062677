use s3fs_core::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Malformed path, rejected before touching the store.
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("file does not exist: {0}")]
    NotFound(String),
    /// The path names an object and a common prefix at the same time.
    #[error("directory name matches file name: {0}")]
    AmbiguousPath(String),
    #[error("cannot read a directory: {0}")]
    IsADirectory(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("already closed: {0}")]
    Closed(String),
    /// A bounded directory read found nothing left to return.
    #[error("end of directory")]
    EndOfDirectory,
    #[error("object store {op} failed for {key:?}")]
    Transport {
        op: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },
}

impl FsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    pub fn is_end_of_directory(&self) -> bool {
        matches!(self, FsError::EndOfDirectory)
    }

    pub(crate) fn transport(op: &'static str, key: &str) -> impl FnOnce(StoreError) -> FsError {
        let key = key.to_owned();
        move |source| FsError::Transport { op, key, source }
    }
}

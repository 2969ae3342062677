use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Content of a single object, as handed out by [`ObjectStore::get_object`].
pub type ByteStream =
    Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + Unpin + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The exact key does not exist in the bucket.
    #[error("object not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound
        } else {
            StoreError::Other(err.into())
        }
    }
}

/// A flat, prefix-addressable key/value object store.
///
/// Implementations are expected to be safe to share between any number of
/// concurrently open files and directories.
#[async_trait]
pub trait ObjectStore: std::fmt::Debug + Send + Sync + 'static {
    /// Returns size and modification time of the object stored under `key`.
    async fn head_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectMeta>;

    /// Opens the content of the object stored under `key`.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<GetObjectOutput>;

    /// Returns one page of objects and common prefixes under `request.prefix`.
    ///
    /// Keys come back in ascending byte order. Passing the returned
    /// `next_page_token` in a follow-up request continues the listing.
    async fn list_objects(&self, request: &ListObjectsRequest) -> StoreResult<ListPage>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

pub struct GetObjectOutput {
    pub body: ByteStream,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for GetObjectOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetObjectOutput")
            .field("size", &self.size)
            .field("last_modified", &self.last_modified)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
    pub page_token: Option<String>,
}

impl ListObjectsRequest {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub objects: Vec<ObjectMeta>,
    pub common_prefixes: Vec<String>,
    pub next_page_token: Option<String>,
}

impl ListPage {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.common_prefixes.is_empty()
    }
}

use bytes::Bytes;
use s3fs_core::{ObjectStore, StoreError};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::StreamReader;
use tracing::{debug, trace};

use crate::{EntryMetadata, FsError, FsResult, path::NormalizedPath};

/// An open object: its byte stream plus the metadata seen at open time.
pub struct FileHandle {
    path: NormalizedPath,
    info: EntryMetadata,
    body: Option<Box<dyn AsyncRead + Send + Unpin>>,
}

impl FileHandle {
    /// Fetches the object. The key vanishing between resolution and this
    /// call is reported as `NotFound`.
    pub(crate) async fn open(
        store: &dyn ObjectStore,
        bucket: &str,
        path: NormalizedPath,
    ) -> FsResult<Self> {
        let key = path.as_str();
        let output = match store.get_object(bucket, key).await {
            Ok(output) => output,
            Err(StoreError::NotFound) => {
                debug!("get {key:?}: gone after resolution");
                return Err(FsError::NotFound(key.to_owned()));
            }
            Err(err) => return Err(FsError::transport("get", key)(err)),
        };

        let info = EntryMetadata::file(path.base_name(), output.size, output.last_modified);
        trace!("opened file {key:?} ({} bytes)", output.size);
        Ok(Self {
            path,
            info,
            body: Some(Box::new(StreamReader::new(output.body))),
        })
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Metadata captured at open time. No I/O.
    pub fn stat(&self) -> &EntryMetadata {
        &self.info
    }

    /// Reads the next chunk into `buf`. `Ok(0)` for a non-empty `buf` means
    /// the object has been read to its end.
    pub async fn read(&mut self, buf: &mut [u8]) -> FsResult<usize> {
        let body = self
            .body
            .as_mut()
            .ok_or_else(|| FsError::Closed(self.path.to_string()))?;
        body.read(buf)
            .await
            .map_err(|e| FsError::transport("read", self.path.as_str())(StoreError::from(e)))
    }

    /// Reads everything that is left.
    pub async fn read_to_end(&mut self) -> FsResult<Bytes> {
        let body = self
            .body
            .as_mut()
            .ok_or_else(|| FsError::Closed(self.path.to_string()))?;
        let mut out = Vec::with_capacity(usize::try_from(self.info.size()).unwrap_or(0));
        body.read_to_end(&mut out)
            .await
            .map_err(|e| FsError::transport("read", self.path.as_str())(StoreError::from(e)))?;
        Ok(Bytes::from(out))
    }

    /// Drops the underlying stream. Closing twice is fine.
    pub fn close(&mut self) -> FsResult<()> {
        if self.body.take().is_some() {
            trace!("closed file {:?}", self.path.as_str());
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.body.is_none()
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .field("info", &self.info)
            .field("closed", &self.is_closed())
            .finish()
    }
}

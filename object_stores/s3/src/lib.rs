use anyhow::anyhow;
use chrono::{DateTime, Utc};
use s3::{Bucket, Region, creds::Credentials, error::S3Error};
use s3fs_core::{
    GetObjectOutput, ListObjectsRequest, ListPage, ObjectMeta, StoreError, StoreResult,
};
use tokio_util::io::ReaderStream;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct S3StoreConfig {
    pub endpoint: String,
    #[serde(default)]
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default = "default_path_style")]
    pub path_style: bool,
}

fn default_path_style() -> bool {
    true
}

/// Talks to any S3-compatible endpoint. The bucket is chosen per call.
#[derive(Debug, Clone)]
pub struct S3Store {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3Store {
    pub fn create(config: S3StoreConfig) -> StoreResult<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StoreError::Other(e.into()))?;
        s3::set_retries(5);
        Ok(Self {
            region: Region::Custom {
                endpoint: config.endpoint,
                region: config.region,
            },
            credentials,
            path_style: config.path_style,
        })
    }

    fn bucket(&self, name: &str) -> StoreResult<Box<Bucket>> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(s3_error)?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

fn s3_error(err: S3Error) -> StoreError {
    match err {
        S3Error::HttpFailWithBody(404, _) => StoreError::NotFound,
        other => StoreError::Other(other.into()),
    }
}

fn check_status(code: u16) -> StoreResult<()> {
    match code {
        200..=299 => Ok(()),
        404 => Err(StoreError::NotFound),
        code => Err(anyhow!("unexpected http status code {code}").into()),
    }
}

/// `Last-Modified` header, e.g. `Wed, 12 Oct 2009 17:50:00 GMT`.
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc2822(value) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("s3 store: unparseable Last-Modified {value:?}: {e}");
            None
        }
    }
}

/// `LastModified` element of a listing, e.g. `2009-10-12T17:50:30.000Z`.
fn parse_listing_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("s3 store: unparseable LastModified {value:?}: {e}");
            None
        }
    }
}

#[async_trait::async_trait]
impl s3fs_core::ObjectStore for S3Store {
    async fn head_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectMeta> {
        let (head, code) = self.bucket(bucket)?.head_object(key).await.map_err(s3_error)?;
        check_status(code)?;
        let len = head
            .content_length
            .ok_or_else(|| anyhow!("missing content-length"))?;
        Ok(ObjectMeta {
            key: key.to_owned(),
            size: u64::try_from(len).map_err(|e| StoreError::Other(e.into()))?,
            last_modified: head.last_modified.as_deref().and_then(parse_http_date),
        })
    }

    /// Issues a HEAD for size and modification time, then streams the body.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<GetObjectOutput> {
        let meta = self.head_object(bucket, key).await?;
        let response = self
            .bucket(bucket)?
            .get_object_stream(key)
            .await
            .map_err(s3_error)?;
        check_status(response.status_code)?;

        Ok(GetObjectOutput {
            body: Box::new(ReaderStream::new(response)),
            size: meta.size,
            last_modified: meta.last_modified,
        })
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> StoreResult<ListPage> {
        let (result, code) = self
            .bucket(&request.bucket)?
            .list_page(
                request.prefix.clone(),
                request.delimiter.clone(),
                request.page_token.clone(),
                None,
                None,
            )
            .await
            .map_err(s3_error)?;
        check_status(code)?;

        let objects = result
            .contents
            .into_iter()
            .map(|obj| ObjectMeta {
                last_modified: parse_listing_date(&obj.last_modified),
                key: obj.key,
                size: obj.size,
            })
            .collect();
        let common_prefixes = result
            .common_prefixes
            .unwrap_or_default()
            .into_iter()
            .map(|cp| cp.prefix)
            .collect();

        Ok(ListPage {
            objects,
            common_prefixes,
            next_page_token: result.next_continuation_token.filter(|t| !t.is_empty()),
        })
    }
}

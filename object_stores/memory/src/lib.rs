use anyhow::anyhow;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::stream;
use s3fs_core::{
    GetObjectOutput, ListObjectsRequest, ListPage, ObjectMeta, StoreError, StoreResult,
    listing::{self, DEFAULT_MAX_KEYS},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<Utc>,
}

impl StoredObject {
    fn meta(&self, key: &str) -> ObjectMeta {
        ObjectMeta {
            key: key.to_owned(),
            size: self.data.len() as u64,
            last_modified: Some(self.last_modified),
        }
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    buckets: DashMap<String, BTreeMap<String, StoredObject>>,
    page_size: usize,
}

impl MemoryStore {
    /// Creates a new `MemoryStore` without any buckets.
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
            page_size: DEFAULT_MAX_KEYS,
        }
    }

    /// Limits how many objects and common prefixes a single listing page holds.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Creates an empty bucket. Existing buckets are left untouched.
    pub fn create_bucket(&self, bucket: &str) {
        self.buckets.entry(bucket.to_owned()).or_default();
    }

    /// Stores `data` under `key`, creating the bucket if needed.
    pub fn put_object(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        self.put_object_at(bucket, key, data, Utc::now());
    }

    /// Stores `data` under `key` with an explicit modification time.
    pub fn put_object_at(
        &self,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
        last_modified: DateTime<Utc>,
    ) {
        self.buckets.entry(bucket.to_owned()).or_default().insert(
            key.to_owned(),
            StoredObject {
                data: data.into(),
                last_modified,
            },
        );
    }

    fn object(&self, bucket: &str, key: &str) -> StoreResult<StoredObject> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| StoreError::Other(anyhow!("no such bucket: {bucket}")))?;
        objects.get(key).cloned().ok_or(StoreError::NotFound)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl s3fs_core::ObjectStore for MemoryStore {
    async fn head_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectMeta> {
        Ok(self.object(bucket, key)?.meta(key))
    }

    /// Returns the whole object as a single-chunk stream.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<GetObjectOutput> {
        let object = self.object(bucket, key)?;
        let size = object.data.len() as u64;
        let body = stream::once(futures::future::ready(Ok::<_, std::io::Error>(object.data)));
        Ok(GetObjectOutput {
            body: Box::new(body),
            size,
            last_modified: Some(object.last_modified),
        })
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> StoreResult<ListPage> {
        let objects = self
            .buckets
            .get(&request.bucket)
            .ok_or_else(|| StoreError::Other(anyhow!("no such bucket: {}", request.bucket)))?;
        let candidates = objects
            .range(request.prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&request.prefix))
            .map(|(key, object)| object.meta(key));
        Ok(listing::list_page(candidates, request, self.page_size))
    }
}

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use s3fs_core::{
    GetObjectOutput, ListObjectsRequest, ListPage, ObjectMeta, ObjectStore, StoreResult,
};
use s3fs_store_memory::MemoryStore;
use s3fs_view::{EntryMetadata, Filesystem};

pub const BUCKET: &str = "test-bucket";

/// A small bucket with files at several depths.
pub const FIXTURE: &[(&str, &str)] = &[
    ("top.json", r#"{"data":"top"}"#),
    ("deep/down/top.json", r#"{"data":"liar"}"#),
    ("dir-a/one.json", r#"{"data":"one"}"#),
    ("dir-a/two.json", r#"{"data":"two"}"#),
    ("dir-a/three.json", r#"{"data":"three"}"#),
    ("dir-b/foo.json", r#"{"data":"bar"}"#),
];

pub fn store_with(objects: &[(&str, &str)], page_size: usize) -> MemoryStore {
    let store = MemoryStore::new().with_page_size(page_size);
    store.create_bucket(BUCKET);
    for (key, body) in objects {
        store.put_object(BUCKET, key, body.as_bytes().to_vec());
    }
    store
}

pub fn fs_with(objects: &[(&str, &str)]) -> Filesystem {
    Filesystem::new(store_with(objects, 1000), BUCKET)
}

pub fn fs_paged(objects: &[(&str, &str)], page_size: usize) -> Filesystem {
    Filesystem::new(store_with(objects, page_size), BUCKET)
}

pub fn names(entries: &[EntryMetadata]) -> Vec<&str> {
    entries.iter().map(|e| e.name()).collect()
}

/// Passes every call through and counts it.
#[derive(Debug)]
pub struct CountingStore {
    inner: MemoryStore,
    pub heads: AtomicUsize,
    pub gets: AtomicUsize,
    pub lists: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            heads: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
        })
    }

    pub fn total(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
            + self.gets.load(Ordering::SeqCst)
            + self.lists.load(Ordering::SeqCst)
    }

    pub fn filesystem(self: &Arc<Self>) -> Filesystem {
        Filesystem::from_arc(self.clone(), BUCKET)
    }
}

#[async_trait::async_trait]
impl ObjectStore for CountingStore {
    async fn head_object(&self, bucket: &str, key: &str) -> StoreResult<ObjectMeta> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        self.inner.head_object(bucket, key).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<GetObjectOutput> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_object(bucket, key).await
    }

    async fn list_objects(&self, request: &ListObjectsRequest) -> StoreResult<ListPage> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_objects(request).await
    }
}

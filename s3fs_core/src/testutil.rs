//! Test utilities for `ObjectStore` implementations.
//!
//! The `ObjectStore` trait is read-only, so the suite cannot create its own
//! data. Seed the store under test with [`FIXTURE`] first, then run the
//! suite against the bucket you seeded.
//!
//! # Usage
//!
//! In your store crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! s3fs_core = { workspace = true, features = ["testutil"] }
//! ```
//!
//! In your test file:
//!
//! ```ignore
//! use s3fs_core::testutil::{FIXTURE, StoreTests};
//!
//! #[tokio::test]
//! async fn test_my_store() {
//!     let store = MyStore::new(...);
//!     for (key, body) in FIXTURE {
//!         store.put(bucket, key, body).await;
//!     }
//!     StoreTests::new(&store, bucket).run_all().await.unwrap();
//! }
//! ```

use crate::store::{ListObjectsRequest, ListPage, ObjectStore, StoreResult};
use bytes::BytesMut;
use futures::StreamExt;

/// Keys and bodies every store under test must be seeded with.
pub const FIXTURE: &[(&str, &[u8])] = &[
    ("top.json", br#"{"data":"top"}"#),
    ("deep/down/top.json", br#"{"data":"liar"}"#),
    ("dir-a/one.json", br#"{"data":"one"}"#),
    ("dir-a/two.json", br#"{"data":"two"}"#),
    ("dir-a/three.json", br#"{"data":"three"}"#),
    ("dir-b/foo.json", br#"{"data":"bar"}"#),
];

/// Test suite for `ObjectStore` implementations.
pub struct StoreTests<'a, S> {
    store: &'a S,
    bucket: String,
}

impl<'a, S: ObjectStore> StoreTests<'a, S> {
    /// Create a new test suite for a store seeded with [`FIXTURE`] in `bucket`.
    pub fn new(store: &'a S, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Run all tests.
    pub async fn run_all(&self) -> StoreResult<()> {
        self.test_head_object().await?;
        self.test_head_missing().await?;
        self.test_get_object().await?;
        self.test_get_missing().await?;
        self.test_list_root_delimited().await?;
        self.test_list_prefix_paginated().await?;
        self.test_list_undelimited().await?;
        Ok(())
    }

    /// Test that metadata matches the seeded body.
    pub async fn test_head_object(&self) -> StoreResult<()> {
        let meta = self.store.head_object(&self.bucket, "top.json").await?;
        assert_eq!(meta.key, "top.json");
        assert_eq!(meta.size, FIXTURE[0].1.len() as u64);
        Ok(())
    }

    /// Test that a missing key is reported as `NotFound`, including a key
    /// that only exists as a prefix and keys nested below an object.
    pub async fn test_head_missing(&self) -> StoreResult<()> {
        for key in ["missing.json", "dir-a", "dir-a/", "top.json/x", "dir-b/foo.json/y/z"] {
            let err = self
                .store
                .head_object(&self.bucket, key)
                .await
                .expect_err("missing key should not resolve");
            assert!(err.is_not_found(), "expected NotFound for {key}, got {err}");
        }
        Ok(())
    }

    /// Test that content round-trips and the reported size matches it.
    pub async fn test_get_object(&self) -> StoreResult<()> {
        let mut out = self.store.get_object(&self.bucket, "dir-a/two.json").await?;
        let mut body = BytesMut::new();
        while let Some(chunk) = out.body.next().await {
            body.extend_from_slice(&chunk?);
        }
        assert_eq!(&body[..], br#"{"data":"two"}"#);
        assert_eq!(out.size, body.len() as u64);
        Ok(())
    }

    /// Test that a missing key fails to open with `NotFound`.
    pub async fn test_get_missing(&self) -> StoreResult<()> {
        let err = self
            .store
            .get_object(&self.bucket, "dir-a/four.json")
            .await
            .expect_err("missing key should not open");
        assert!(err.is_not_found(), "expected NotFound, got {err}");
        Ok(())
    }

    /// Test that the bucket root groups nested keys into common prefixes.
    pub async fn test_list_root_delimited(&self) -> StoreResult<()> {
        let req = ListObjectsRequest::new(&self.bucket, "").with_delimiter("/");
        let (objects, mut prefixes) = self.list_all(req).await?;

        assert_eq!(objects, vec!["top.json".to_owned()]);
        prefixes.sort();
        assert_eq!(prefixes, vec!["deep/", "dir-a/", "dir-b/"]);
        Ok(())
    }

    /// Test that following page tokens yields every child exactly once.
    pub async fn test_list_prefix_paginated(&self) -> StoreResult<()> {
        let req = ListObjectsRequest::new(&self.bucket, "dir-a/").with_delimiter("/");
        let (mut objects, prefixes) = self.list_all(req).await?;

        objects.sort();
        assert_eq!(
            objects,
            vec!["dir-a/one.json", "dir-a/three.json", "dir-a/two.json"]
        );
        assert!(prefixes.is_empty());
        Ok(())
    }

    /// Test that no delimiter means no grouping.
    pub async fn test_list_undelimited(&self) -> StoreResult<()> {
        let req = ListObjectsRequest::new(&self.bucket, "deep/");
        let (objects, prefixes) = self.list_all(req).await?;

        assert_eq!(objects, vec!["deep/down/top.json".to_owned()]);
        assert!(prefixes.is_empty());
        Ok(())
    }

    async fn list_all(
        &self,
        mut req: ListObjectsRequest,
    ) -> StoreResult<(Vec<String>, Vec<String>)> {
        let mut objects = Vec::new();
        let mut prefixes = Vec::new();
        loop {
            let ListPage {
                objects: page_objects,
                common_prefixes,
                next_page_token,
            } = self.store.list_objects(&req).await?;
            objects.extend(page_objects.into_iter().map(|o| o.key));
            prefixes.extend(common_prefixes);
            match next_page_token {
                Some(token) => req.page_token = Some(token),
                None => break,
            }
        }
        Ok((objects, prefixes))
    }
}

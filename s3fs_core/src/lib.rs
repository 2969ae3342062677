//! Types and traits shared by all s3fs crates.
//!
//! The filesystem view in `s3fs_view` never talks to a backend directly.
//! Everything it needs from an object store goes through the [`ObjectStore`]
//! trait defined here, which is deliberately narrow:
//!
//! - fetch metadata for an exact key (`head_object`)
//! - fetch content for an exact key (`get_object`)
//! - list objects and common prefixes under a prefix, one page at a time
//!   (`list_objects`)
//!
//! In-process stores (memory, local directory) share the ListObjectsV2
//! emulation in [`listing`] so they page and group keys exactly like S3.

pub mod listing;
pub mod store;

// Test utilities (behind feature flag)
#[cfg(feature = "testutil")]
pub mod testutil;

pub use store::{
    ByteStream, GetObjectOutput, ListObjectsRequest, ListPage, ObjectMeta, ObjectStore,
    StoreError, StoreResult,
};

/// The only separator the view and the stores agree on.
pub const DELIMITER: &str = "/";

use std::{path::Path, sync::Arc};

use anyhow::Context;
use s3fs_core::ObjectStore;
use s3fs_store_local::{LocalStore, LocalStoreConfig};
use s3fs_store_s3::{S3Store, S3StoreConfig};
use s3fs_view::Filesystem;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct S3fsConfig {
    pub bucket: Option<String>,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum StoreConfig {
    Local(LocalStoreConfig),
    S3(S3StoreConfig),
}

impl S3fsConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let toml_content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {path:?}"))?;
        toml::from_str(&toml_content).with_context(|| format!("invalid config file {path:?}"))
    }

    /// Builds the filesystem view, preferring `bucket_override` over the
    /// configured bucket.
    pub fn filesystem(&self, bucket_override: Option<&str>) -> anyhow::Result<Filesystem> {
        let bucket = bucket_override
            .or(self.bucket.as_deref())
            .context("no bucket given, set `bucket` in the config or pass --bucket")?;

        let store: Arc<dyn ObjectStore> = match &self.store {
            StoreConfig::Local(config) => Arc::new(LocalStore::create(config.clone())),
            StoreConfig::S3(config) => Arc::new(
                S3Store::create(config.clone()).context("could not set up S3 store")?,
            ),
        };
        debug!("using bucket {bucket:?} on {:?} store", self.store.kind());
        Ok(Filesystem::from_arc(store, bucket))
    }
}

impl StoreConfig {
    fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Local(_) => "local",
            StoreConfig::S3(_) => "s3",
        }
    }
}

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Subcommand;
use toml_edit::{DocumentMut, Item, Table};
use tracing::info;

#[derive(Subcommand)]
pub enum CmdConfig {
    /// Creates the config file if it doesn't exist, pointing at a local store
    Init,
}

impl CmdConfig {
    pub fn run(self, config_file: PathBuf, local_data_dir: &Path) -> anyhow::Result<()> {
        let mut doc = if config_file.exists() {
            fs::read_to_string(&config_file)?
        } else {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            "".to_owned()
        }
        .parse::<DocumentMut>()
        .context("could not parse config file")?;

        match self {
            Self::Init => init_document(&mut doc, local_data_dir)?,
        }

        info!("writing to config file {config_file:?}");

        let tmp_path = config_file.with_extension("tmp");
        let mut tmp = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        tmp.write_all(doc.to_string().as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, config_file)?;
        Ok(())
    }
}

/// Fills in a bucket and a local store; anything already set is kept.
fn init_document(doc: &mut DocumentMut, local_data_dir: &Path) -> anyhow::Result<()> {
    if !doc.contains_key("bucket") {
        doc.insert("bucket", "default".into());
    }

    if doc.contains_key("store") {
        info!("config already has a store, leaving it as is");
        return Ok(());
    }

    let base_path = local_data_dir.join("buckets");
    let base_path = base_path
        .to_str()
        .with_context(|| format!("data directory {base_path:?} is not valid UTF-8"))?;
    let mut store_table = Table::new();
    store_table.insert("type", "local".into());
    store_table.insert("base_path", base_path.into());
    doc.insert("store", Item::Table(store_table));
    Ok(())
}

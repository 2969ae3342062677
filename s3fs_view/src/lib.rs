//! # s3fs view
//!
//! A read-only directory tree reconstructed from a flat object store.
//! The store only knows exact keys and prefix listings; directories here
//! are nothing more than common prefixes ending in `/`.
//!
//! ## Layers
//! 1. `path`    – normalisation of user paths into store keys, no I/O.
//! 2. `entry`   – immutable name/size/mtime/type records.
//! 3. `resolve` – one delimited listing decides file, directory, both or neither.
//! 4. `dir`, `file` – the two node kinds [`Filesystem::open`] hands out.
//! 5. `api`     – the [`Filesystem`] façade, plus `stat`, `read_dir`,
//!    `read_file` and `walk` built on top of `open`.
//!
//! Nothing is cached between calls: every `open` lists the store again.

mod api;
mod dir;
mod entry;
mod error;
mod file;
mod node;
pub mod path;
mod resolve;
mod walk;

pub use api::Filesystem;
pub use dir::{DirBatch, DirectoryReader};
pub use entry::{EntryMetadata, MODE_DIR, MODE_READ_ONLY};
pub use error::FsError;
pub use file::FileHandle;
pub use node::Node;
pub use path::{NormalizedPath, normalize};
pub use resolve::{NamespaceQuery, NodeKind};
pub use walk::WalkEntry;

/// Crate-wide result alias over [`FsError`].
pub type FsResult<T> = std::result::Result<T, FsError>;

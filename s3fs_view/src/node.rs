use crate::{
    DirBatch, DirectoryReader, EntryMetadata, FileHandle, FsError, FsResult, NodeKind,
};

/// What [`Filesystem::open`](crate::Filesystem::open) returns.
///
/// The shared operations work on both variants. The type-specific ones
/// fail with [`FsError::IsADirectory`] or [`FsError::NotADirectory`] when
/// called on the wrong variant.
#[derive(Debug)]
pub enum Node {
    File(FileHandle),
    Directory(DirectoryReader),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn stat(&self) -> &EntryMetadata {
        match self {
            Node::File(file) => file.stat(),
            Node::Directory(dir) => dir.stat(),
        }
    }

    pub async fn read(&mut self, buf: &mut [u8]) -> FsResult<usize> {
        match self {
            Node::File(file) => file.read(buf).await,
            Node::Directory(dir) => Err(FsError::IsADirectory(dir.path().to_string())),
        }
    }

    pub fn read_entries(&mut self, n: isize) -> FsResult<DirBatch> {
        match self {
            Node::File(file) => Err(FsError::NotADirectory(file.path().to_string())),
            Node::Directory(dir) => dir.read_entries(n),
        }
    }

    pub fn close(&mut self) -> FsResult<()> {
        match self {
            Node::File(file) => file.close(),
            Node::Directory(dir) => dir.close(),
        }
    }

    pub fn into_file(self) -> FsResult<FileHandle> {
        match self {
            Node::File(file) => Ok(file),
            Node::Directory(dir) => Err(FsError::IsADirectory(dir.path().to_string())),
        }
    }

    pub fn into_directory(self) -> FsResult<DirectoryReader> {
        match self {
            Node::File(file) => Err(FsError::NotADirectory(file.path().to_string())),
            Node::Directory(dir) => Ok(dir),
        }
    }
}

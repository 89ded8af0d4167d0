use bytes::Bytes;
use serde::Serialize;
use std::fmt;

/// Identity of a queued file, independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-selected file awaiting upload.
///
/// The content is reference-counted, so snapshots and uploads share the
/// audio bytes instead of copying them.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub id: FileId,
    pub name: String,
    pub content: Bytes,
}

impl PendingFile {
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// A file picked by the user that has not been queued yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct QueuedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
}

impl From<&PendingFile> for QueuedFile {
    fn from(file: &PendingFile) -> Self {
        QueuedFile {
            id: file.id,
            name: file.name.clone(),
            size: file.size(),
        }
    }
}

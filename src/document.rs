use std::fs;
use std::io;
use std::path::Path;

/// One file attached to a submission.
///
/// Lives only for the duration of that submission; nothing about it is
/// persisted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a document from disk, taking the filename from the final path
    /// component.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let bytes = fs::read(path)?;
        Ok(Self { filename, bytes })
    }
}

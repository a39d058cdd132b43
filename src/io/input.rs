use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// An uploaded file held in memory for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Name the file was uploaded under
    pub file_name: String,
    /// Raw bytes, decoded later by the pipeline
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Read an upload from disk
pub fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(Upload::new(file_name, bytes))
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Byte sources: where a submitted document's bytes come from.
//
// Reading is the only suspending step of intake analysis. In-memory sources
// resolve immediately, file sources are read with `tokio::fs`, and deferred
// sources wait for a picker that is still copying the file.

use std::path::{Path, PathBuf};

use druckkasse_core::error::{DruckkasseError, Result};
use druckkasse_core::types::MediaType;
use tokio::sync::oneshot;
use tracing::{debug, instrument};

/// Fallback MIME type for files whose extension we do not recognise. The
/// validator rejects it, which is the point.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Origin of a document's bytes.
#[derive(Debug)]
pub enum ByteSource {
    /// Bytes already in memory (e.g. handed over by a file picker).
    Memory(Vec<u8>),
    /// A file on the local filesystem, read when analysis starts.
    File(PathBuf),
    /// Bytes delivered later over a channel. A sender dropped without
    /// delivering is reported as an I/O error.
    Deferred(oneshot::Receiver<Vec<u8>>),
}

impl ByteSource {
    /// Read the whole source into memory.
    #[instrument(skip_all)]
    pub async fn read_all(self) -> Result<Vec<u8>> {
        match self {
            Self::Memory(bytes) => Ok(bytes),
            Self::File(path) => {
                let bytes = tokio::fs::read(&path).await?;
                debug!(path = %path.display(), bytes = bytes.len(), "read document from disk");
                Ok(bytes)
            }
            Self::Deferred(rx) => rx.await.map_err(|_| {
                DruckkasseError::from(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "byte source closed before delivering the document",
                ))
            }),
        }
    }
}

/// Everything the intake boundary receives about a candidate file.
#[derive(Debug)]
pub struct FileDescriptor {
    /// Display filename.
    pub name: String,
    /// Declared MIME type, as reported by the picker. Not trusted until validated.
    pub media_type: String,
    /// Declared size in bytes.
    pub size_bytes: u64,
    pub source: ByteSource,
}

impl FileDescriptor {
    /// Describe an in-memory document; the size is taken from the buffer.
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes: bytes.len() as u64,
            source: ByteSource::Memory(bytes),
        }
    }

    /// Describe a document whose bytes are still on their way. The returned
    /// sender delivers them.
    pub fn deferred(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
    ) -> (Self, oneshot::Sender<Vec<u8>>) {
        let (tx, rx) = oneshot::channel();
        let descriptor = Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            source: ByteSource::Deferred(rx),
        };
        (descriptor, tx)
    }

    /// Describe a file on disk without reading it.
    ///
    /// The declared type defaults to the one implied by the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>, declared_type: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let media_type = match declared_type {
            Some(declared) => declared.to_owned(),
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(MediaType::from_extension)
                .map(|t| t.mime_type().to_owned())
                .unwrap_or_else(|| UNKNOWN_MIME.to_owned()),
        };

        Ok(Self {
            name,
            media_type,
            size_bytes: metadata.len(),
            source: ByteSource::File(path.to_path_buf()),
        })
    }
}

//! Attachment admission and encoding.
//!
//! A [`CandidateFile`] is whatever the user picked. Only the gate can turn it
//! into an [`Attachment`], so every populated slot holds a declared PDF within
//! the size limit. Content is not read until submit time.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{error::AttachmentRejection, protocol::EncodedAttachment};
use tracing::debug;

use crate::error::SubmitError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;
const PDF_SIGNATURE: &[u8] = b"%PDF-";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl FileSource {
    fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
        match self {
            FileSource::Path(path) => {
                let mut prefix = Vec::with_capacity(len);
                File::open(path)?.take(len as u64).read_to_end(&mut prefix)?;
                Ok(prefix)
            }
            FileSource::Memory(bytes) => Ok(bytes[..len.min(bytes.len())].to_vec()),
        }
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        match self {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// A file the user selected but the gate has not yet admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    size_bytes: u64,
    content_type: String,
    source: FileSource,
}

impl CandidateFile {
    /// Declares the content type from the file extension, as a browser file
    /// input would.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentRejection> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|err| AttachmentRejection::Unreadable {
            reason: err.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(AttachmentRejection::Unreadable {
                reason: format!("'{}' is not a regular file", path.display()),
            });
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment.pdf")
            .to_string();
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            content_type,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn in_memory(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let bytes: Arc<[u8]> = Arc::from(bytes);
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            content_type: content_type.into(),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// An admitted file occupying a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    size_bytes: u64,
    content_type: String,
    source: FileSource,
}

impl Attachment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn human_size(&self) -> String {
        human_readable_bytes(self.size_bytes)
    }

    /// Reads the whole file and returns its base64 form, without any data-URI prefix.
    pub async fn encode(&self) -> Result<EncodedAttachment, SubmitError> {
        let bytes = self
            .source
            .read_all()
            .await
            .map_err(|source| SubmitError::Encode {
                name: self.name.clone(),
                source,
            })?;
        debug!(name = %self.name, bytes = bytes.len(), "encoded attachment");

        Ok(EncodedAttachment {
            name: self.name.clone(),
            content: STANDARD.encode(bytes),
            content_type: self.content_type.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentGate {
    verify_signature: bool,
}

impl Default for AttachmentGate {
    fn default() -> Self {
        Self {
            verify_signature: true,
        }
    }
}

impl AttachmentGate {
    pub fn new(verify_signature: bool) -> Self {
        Self { verify_signature }
    }

    pub fn verifies_signature(&self) -> bool {
        self.verify_signature
    }

    /// Checks declared type, then size, then (optionally) the PDF signature.
    /// Only the first failing check is reported.
    pub fn admit(&self, candidate: CandidateFile) -> Result<Attachment, AttachmentRejection> {
        if candidate.content_type != PDF_CONTENT_TYPE {
            return Err(AttachmentRejection::NotPdf {
                declared: candidate.content_type,
            });
        }

        if candidate.size_bytes > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentRejection::TooLarge {
                size_bytes: candidate.size_bytes,
                limit_bytes: MAX_ATTACHMENT_BYTES,
            });
        }

        if self.verify_signature {
            let prefix = candidate
                .source
                .read_prefix(PDF_SIGNATURE.len())
                .map_err(|err| AttachmentRejection::Unreadable {
                    reason: err.to_string(),
                })?;
            if prefix != PDF_SIGNATURE {
                return Err(AttachmentRejection::SignatureMismatch);
            }
        }

        Ok(Attachment {
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            content_type: candidate.content_type,
            source: candidate.source,
        })
    }
}

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
#[path = "tests/attachment_tests.rs"]
mod tests;

//! Byte sources: the two ways post media reaches the builder.
//!
//! A source is either a named file (the name is used only to derive the
//! mention's extension suffix) or an anonymous raw buffer. Both arms feed
//! the same hashing path, so equal bytes always produce the same hash
//! component regardless of entry point.

use bytes::Bytes;
use std::io;
use std::path::Path;

/// Bytes attached to a post, with or without a file name.
#[derive(Debug, Clone)]
pub enum ByteSource {
    /// A named file. Only the name participates beyond the bytes, and only
    /// to derive an extension.
    File { name: String, bytes: Bytes },
    /// A raw buffer with no name.
    Raw { bytes: Bytes },
}

impl ByteSource {
    /// Wrap a named file's bytes.
    pub fn file(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::File {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Wrap an anonymous buffer.
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self::Raw {
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, taking the name from its final path segment.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = std::fs::read(path)?;
        Ok(Self::File {
            name,
            bytes: bytes.into(),
        })
    }

    /// The underlying bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::File { bytes, .. } | Self::Raw { bytes } => bytes,
        }
    }

    /// The file extension, if this source is a file whose name has one.
    ///
    /// A file named without a dot (or ending in one) yields None; the
    /// mention then carries no suffix. That is an accepted edge case of
    /// the format, not an error.
    pub fn extension(&self) -> Option<&str> {
        match self {
            Self::File { name, .. } => name
                .rsplit_once('.')
                .map(|(_, ext)| ext)
                .filter(|ext| !ext.is_empty()),
            Self::Raw { .. } => None,
        }
    }
}

//! Abstractions over the transport layer's request body and uploaded files.
//!
//! The engine borrows files; it never owns or persists them. Any transport
//! that can decode a body and look up a file by form key can drive
//! validation by implementing [`RequestSource`].

use std::io::{self, BufRead, Cursor, Seek};

use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// A readable, seekable byte stream (what image header decoding needs).
pub trait ReadSeek: BufRead + Seek {}

impl<T: BufRead + Seek> ReadSeek for T {}

/// One submitted file.
pub trait UploadedFile {
    /// Client-supplied file name, including any extension.
    fn filename(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// Open a fresh stream positioned at the start of the content.
    ///
    /// The stream is released when the returned box is dropped.
    fn open(&self) -> io::Result<Box<dyn ReadSeek + '_>>;
}

/// An incoming request as seen by the orchestrator.
pub trait RequestSource {
    type File: UploadedFile;

    /// Decode the body into `T`. Structural failures map to
    /// [`CoreError::MalformedBody`].
    fn decode<T: DeserializeOwned>(&self) -> Result<T, CoreError>;

    /// Look up the uploaded file submitted under `field`.
    ///
    /// `Ok(None)` means no file was submitted. `Err` is reserved for a file
    /// that exists but cannot be retrieved.
    fn file(&self, field: &str) -> Result<Option<&Self::File>, CoreError>;
}

/// An uploaded file held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl MemoryFile {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl UploadedFile for MemoryFile {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn open(&self) -> io::Result<Box<dyn ReadSeek + '_>> {
        Ok(Box::new(Cursor::new(self.data.as_slice())))
    }
}

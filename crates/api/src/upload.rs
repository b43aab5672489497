//! Request body adapter for the validation engine.
//!
//! [`UploadForm`] collects a JSON, url-encoded, or multipart body into memory
//! and implements [`RequestSource`] so `reqcheck_core` can decode and inspect
//! it without knowing about axum.

use axum::extract::Multipart;
use reqcheck_core::error::CoreError;
use reqcheck_core::upload::{MemoryFile, RequestSource};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
enum FormBody {
    Json(Vec<u8>),
    Fields(Vec<(String, String)>),
}

/// A fully buffered request body plus its uploaded files.
#[derive(Debug, Clone)]
pub struct UploadForm {
    body: FormBody,
    files: Vec<(String, MemoryFile)>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            body: FormBody::Fields(Vec::new()),
            files: Vec::new(),
        }
    }
}

impl UploadForm {
    /// A JSON body. Decoding happens later, in [`RequestSource::decode`].
    pub fn from_json(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            body: FormBody::Json(bytes.into()),
            files: Vec::new(),
        }
    }

    /// An `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(bytes: &[u8]) -> Result<Self, CoreError> {
        let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
            .map_err(|e| CoreError::MalformedBody(e.to_string()))?;
        Ok(Self {
            body: FormBody::Fields(fields),
            files: Vec::new(),
        })
    }

    /// Drain a `multipart/form-data` stream.
    ///
    /// Parts with a file name become files; everything else is a text field.
    /// Unnamed parts are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, CoreError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| CoreError::MalformedBody(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(|e| CoreError::FileRetrieval {
                        field: name.clone(),
                        reason: e.to_string(),
                    })?;
                    let mut file = MemoryFile::new(filename, data.to_vec());
                    if let Some(content_type) = content_type {
                        file = file.with_content_type(content_type);
                    }
                    form = form.with_file(name, file);
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| CoreError::MalformedBody(e.to_string()))?;
                    form = form.with_field(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Append a text field. Ignored for JSON bodies.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let FormBody::Fields(fields) = &mut self.body {
            fields.push((name.into(), value.into()));
        }
        self
    }

    /// Append a file. When a field name repeats, lookups return the first.
    pub fn with_file(mut self, name: impl Into<String>, file: MemoryFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// First file submitted under `name`.
    pub fn get_file(&self, name: &str) -> Option<&MemoryFile> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, file)| file)
    }

    /// Remove and return the first file submitted under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<MemoryFile> {
        let idx = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.remove(idx).1)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl RequestSource for UploadForm {
    type File = MemoryFile;

    fn decode<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        match &self.body {
            FormBody::Json(bytes) => {
                serde_json::from_slice(bytes).map_err(|e| CoreError::MalformedBody(e.to_string()))
            }
            FormBody::Fields(fields) => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| CoreError::MalformedBody(e.to_string()))?;
                serde_urlencoded::from_str(&encoded)
                    .map_err(|e| CoreError::MalformedBody(e.to_string()))
            }
        }
    }

    fn file(&self, field: &str) -> Result<Option<&MemoryFile>, CoreError> {
        Ok(self.get_file(field))
    }
}

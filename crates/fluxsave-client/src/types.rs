//! Common types for the client SDK

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel `folderId` meaning "files not assigned to any folder".
///
/// Passing this to [`list_files`](crate::FluxsaveClient::list_files) is a
/// distinct request from omitting the filter entirely.
pub const ROOT_FOLDER: &str = "root";

/// Envelope around every successful response payload
#[derive(Clone, Debug, Deserialize)]
pub struct ApiResult<T> {
    /// The response payload, passed through unchanged
    pub data: T,
}

/// Compression level applied to stored files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored file, as returned by the server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Delivery URL
    pub url: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// MIME type
    pub mime_type: String,
    /// Compression level applied on upload
    #[serde(default)]
    pub compression: Compression,
    /// Containing folder, `None` for unfiled files
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// A folder. Folders form a tree keyed by `parent_id`; `None` denotes the root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// Folder identifier
    pub id: String,
    /// Folder name
    pub name: String,
    /// Parent folder, `None` at the root
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Account-level usage metrics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    /// Number of stored files
    pub total_files: u64,
    /// Number of folders
    pub total_folders: u64,
    /// Bytes of storage in use
    pub storage_used_bytes: u64,
    /// Plan storage ceiling, if the plan has one
    #[serde(default)]
    pub storage_limit_bytes: Option<u64>,
}

/// Optional scalar fields shared by all files in an upload request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadOptions {
    /// Display name; absent leaves the original file name
    pub name: Option<String>,
    /// Compression level; absent leaves the server default
    pub compression: Option<Compression>,
    /// Target folder; absent means unfiled
    pub folder_id: Option<String>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    /// Scalar form fields for upload requests
    pub(crate) fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = self.content_fields();
        if let Some(folder_id) = &self.folder_id {
            fields.push(("folderId".to_string(), folder_id.clone()));
        }
        fields
    }

    /// Fields valid on a content replacement; the replace call does not move
    /// the file between folders.
    pub(crate) fn content_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name".to_string(), name.clone()));
        }
        if let Some(compression) = self.compression {
            fields.push(("compression".to_string(), compression.as_str().to_string()));
        }
        fields
    }
}

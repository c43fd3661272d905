//! # Fluxsave Client SDK
//!
//! A client SDK for the Fluxsave file storage API.
//!
//! ## Features
//!
//! - **File operations**: upload (single or batched), list, metadata,
//!   content replacement, delete
//! - **Folder operations**: list, create, rename, delete
//! - **Transform URLs**: build delivery URLs with resize/format/quality
//!   parameters, no request required
//! - **Typed errors**: every API failure is decoded into one
//!   [`ApiError`] with a machine-readable [`ErrorCode`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use fluxsave_client::{Config, FluxsaveClient, UploadOptions, Compression};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FluxsaveClient::new(Config::new(
//!         "https://api.fluxsave.com",
//!         "your-api-key",
//!         "your-api-secret",
//!     ))?;
//!
//!     // Upload a file
//!     let uploaded = client
//!         .upload_file(
//!             Path::new("photo.png"),
//!             &UploadOptions::new()
//!                 .with_name("hero")
//!                 .with_compression(Compression::Low),
//!         )
//!         .await?;
//!     println!("Uploaded: {}", uploaded.data.url);
//!
//!     // List unfiled files
//!     let files = client.list_files(Some(fluxsave_client::ROOT_FOLDER)).await?;
//!     println!("{} unfiled files", files.data.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod multipart;
mod transform;
mod types;

pub use auth::{signed_headers, API_KEY_HEADER, API_SECRET_HEADER};
pub use client::FluxsaveClient;
pub use config::{Config, Secret};
pub use error::{ApiError, ClientError, ErrorCode, Result};
pub use multipart::{FilePart, MultipartBody};
pub use transform::{file_url, TransformOptions, TransformValue};
pub use types::{
    ApiResult, Compression, FileRecord, FolderRecord, MetricsRecord, UploadOptions, ROOT_FOLDER,
};

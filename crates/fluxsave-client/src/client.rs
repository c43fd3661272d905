//! Main client implementation

use std::path::Path;

use bytes::Bytes;
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::auth;
use crate::multipart::{FilePart, MultipartBody};
use crate::transform::{self, TransformOptions};
use crate::types::{
    ApiResult, FileRecord, FolderRecord, MetricsRecord, UploadOptions,
};
use crate::{ApiError, ClientError, Config, Result};

/// Fluxsave storage client
///
/// Holds no state beyond its immutable [`Config`]; every operation is a
/// single request/response exchange and `&self` methods are safe to call
/// concurrently.
pub struct FluxsaveClient {
    config: Config,
    http: Client,
}

enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

impl FluxsaveClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails fast with [`ClientError::Config`] on empty credentials, a
    /// malformed endpoint URL, or a zero timeout.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ClientError::Config("invalid user agent".to_string()))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { config, http })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== File Operations ====================

    /// Upload a single file
    #[instrument(skip(self))]
    pub async fn upload_file(
        &self,
        path: &Path,
        options: &UploadOptions,
    ) -> Result<ApiResult<FileRecord>> {
        let part = self.read_file_part("file", path).await?;
        let body = MultipartBody::encode(&[part], &options.to_fields())?;
        self.request(Method::POST, "/api/v1/files/upload", &[], RequestBody::Multipart(body))
            .await
    }

    /// Upload several files in one request.
    ///
    /// All files share the same scalar fields; partial-failure semantics are
    /// whatever the server envelope reports.
    #[instrument(skip(self))]
    pub async fn upload_files(
        &self,
        paths: &[&Path],
        options: &UploadOptions,
    ) -> Result<ApiResult<Vec<FileRecord>>> {
        let mut parts = Vec::with_capacity(paths.len());
        for path in paths {
            parts.push(self.read_file_part("files", path).await?);
        }
        let body = MultipartBody::encode(&parts, &options.to_fields())?;
        self.request(Method::POST, "/api/v1/files/upload", &[], RequestBody::Multipart(body))
            .await
    }

    /// List files, optionally filtered by folder.
    ///
    /// [`ROOT_FOLDER`](crate::ROOT_FOLDER) selects unfiled files; `None`
    /// applies no filter at all. The two are distinct requests.
    #[instrument(skip(self))]
    pub async fn list_files(
        &self,
        folder_id: Option<&str>,
    ) -> Result<ApiResult<Vec<FileRecord>>> {
        let query: Vec<(&str, String)> = match folder_id {
            Some(id) => vec![("folderId", id.to_string())],
            None => Vec::new(),
        };
        self.request(Method::GET, "/api/v1/files", &query, RequestBody::Empty)
            .await
    }

    /// Fetch metadata for a file
    #[instrument(skip(self))]
    pub async fn get_file_metadata(&self, file_id: &str) -> Result<ApiResult<FileRecord>> {
        require_non_empty(file_id, "file id")?;
        let path = format!("/api/v1/files/metadata/{}", file_id);
        self.request(Method::GET, &path, &[], RequestBody::Empty).await
    }

    /// Replace a file's content; the id stays the same.
    #[instrument(skip(self))]
    pub async fn update_file(
        &self,
        file_id: &str,
        path: &Path,
        options: &UploadOptions,
    ) -> Result<ApiResult<FileRecord>> {
        require_non_empty(file_id, "file id")?;
        let part = self.read_file_part("file", path).await?;
        let body = MultipartBody::encode(&[part], &options.content_fields())?;
        let url_path = format!("/api/v1/files/{}", file_id);
        self.request(Method::PUT, &url_path, &[], RequestBody::Multipart(body))
            .await
    }

    /// Delete a file
    #[instrument(skip(self))]
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        require_non_empty(file_id, "file id")?;
        let path = format!("/api/v1/files/{}", file_id);
        self.execute(Method::DELETE, &path, &[], RequestBody::Empty).await?;
        Ok(())
    }

    /// Build a delivery URL with transform options. Local only, no request.
    pub fn file_url(&self, file_id: &str, options: &TransformOptions) -> String {
        transform::file_url(&self.config.endpoint, file_id, options)
    }

    // ==================== Folder Operations ====================

    /// List all folders
    #[instrument(skip(self))]
    pub async fn list_folders(&self) -> Result<ApiResult<Vec<FolderRecord>>> {
        self.request(Method::GET, "/api/v1/folders", &[], RequestBody::Empty)
            .await
    }

    /// Create a folder, at the root unless `parent_id` is given
    #[instrument(skip(self))]
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<ApiResult<FolderRecord>> {
        require_non_empty(name, "folder name")?;
        let mut payload = serde_json::json!({ "name": name });
        if let Some(parent) = parent_id {
            payload["parentId"] = serde_json::Value::String(parent.to_string());
        }
        self.request(Method::POST, "/api/v1/folders", &[], RequestBody::Json(payload))
            .await
    }

    /// Rename a folder
    #[instrument(skip(self))]
    pub async fn rename_folder(
        &self,
        folder_id: &str,
        name: &str,
    ) -> Result<ApiResult<FolderRecord>> {
        require_non_empty(folder_id, "folder id")?;
        require_non_empty(name, "folder name")?;
        let path = format!("/api/v1/folders/{}", folder_id);
        let payload = serde_json::json!({ "name": name });
        self.request(Method::PATCH, &path, &[], RequestBody::Json(payload))
            .await
    }

    /// Delete a folder. The server reparents its files to the root; the
    /// client issues no follow-up calls.
    #[instrument(skip(self))]
    pub async fn delete_folder(&self, folder_id: &str) -> Result<()> {
        require_non_empty(folder_id, "folder id")?;
        let path = format!("/api/v1/folders/{}", folder_id);
        self.execute(Method::DELETE, &path, &[], RequestBody::Empty).await?;
        Ok(())
    }

    // ==================== Metrics ====================

    /// Fetch account usage metrics
    #[instrument(skip(self))]
    pub async fn get_metrics(&self) -> Result<ApiResult<MetricsRecord>> {
        self.request(Method::GET, "/api/v1/metrics", &[], RequestBody::Empty)
            .await
    }

    // ==================== Helper Methods ====================

    async fn read_file_part(&self, field_name: &str, path: &Path) -> Result<FilePart> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            ClientError::Encoding(format!("failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(FilePart::new(field_name, file_name, mime_type, content))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<ApiResult<T>> {
        let bytes = self.execute(method, path, query, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to decode response envelope: {}", e))
        })
    }

    /// Single funnel for every operation: sign, send, then either decode or
    /// map the error payload.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<Bytes> {
        let url = format!("{}{}", self.config.endpoint, path);
        let headers = auth::signed_headers(
            &self.config.api_key,
            &self.config.api_secret,
            &header::HeaderMap::new(),
        )?;

        let mut req = self.http.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            req = req.query(query);
        }
        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(&value),
            RequestBody::Multipart(form) => req
                .header(header::CONTENT_TYPE, form.content_type.as_str())
                .body(form.body),
        };

        debug!("sending {} request to {}", method, url);
        let response = req.send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Api(ApiError::from_response(
                status.as_u16(),
                &bytes,
            )));
        }

        Ok(bytes)
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Config(format!("{} must not be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformOptions;

    fn client() -> FluxsaveClient {
        FluxsaveClient::new(Config::new("https://api.fluxsave.test", "k", "s")).unwrap()
    }

    #[test]
    fn test_empty_ids_rejected_locally() {
        let client = client();

        let err = tokio_test::block_on(client.get_file_metadata("")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = tokio_test::block_on(client.delete_folder("  ")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = tokio_test::block_on(client.create_folder("", None)).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_file_url_uses_configured_endpoint() {
        let client = client();
        let url = client.file_url("f1", &TransformOptions::new().set("width", 320));
        assert_eq!(url, "https://api.fluxsave.test/api/v1/files/f1?width=320");
    }

    #[test]
    fn test_missing_upload_path_is_encoding_error() {
        let client = client();
        let err = tokio_test::block_on(client.upload_file(
            Path::new("/definitely/not/here.png"),
            &UploadOptions::new(),
        ))
        .unwrap_err();
        assert!(matches!(err, ClientError::Encoding(_)));
    }
}

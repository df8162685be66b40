//! Client for the File Search service
//!
//! A separate document store exposed as a single JSON endpoint. Every request
//! is a `POST` to the base URL whose body names the `operation`. Replies carry
//! `success: false` and an `error` string on failure.

pub mod models;

pub use models::{DeleteReceipt, DocumentInfo, DocumentList, SearchResult, UploadReceipt};

use crate::agent::TransportError;
use crate::agent::client::{ClientConfig, build_http_client, error_message_from_body};
use crate::config::FileSearchConfig;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use models::Operation;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileSearchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered but reported `success: false`
    #[error("File Search error: {0}")]
    Api(String),
}

/// MIME type sent when the caller does not provide one
pub fn mime_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "text/xml",
        "html" => "text/html",
        _ => "text/plain",
    }
}

#[derive(Clone)]
pub struct FileSearchClient {
    base_url: String,
    http: ReqwestClient,
    timeout: Duration,
}

impl FileSearchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FileSearchError> {
        let config = ClientConfig::default().with_request_timeout(timeout);
        Ok(Self {
            base_url: base_url.into(),
            http: build_http_client(&config)?,
            timeout,
        })
    }

    pub fn from_config(config: &FileSearchConfig) -> Result<Self, FileSearchError> {
        Self::new(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload raw file bytes; `mime_type` defaults from the file extension
    pub async fn upload_file(
        &self,
        filename: &str,
        bytes: &[u8],
        mime_type: Option<&str>,
    ) -> Result<UploadReceipt, FileSearchError> {
        let mime_type = mime_type
            .filter(|mime| !mime.is_empty() && *mime != "application/octet-stream")
            .unwrap_or_else(|| mime_type_for(filename));
        info!(%filename, %mime_type, size = bytes.len(), "uploading to File Search");

        self.call(Operation::Upload {
            file_data: BASE64.encode(bytes),
            filename,
            mime_type,
            display_name: filename,
        })
        .await
    }

    pub async fn search(&self, query: &str) -> Result<SearchResult, FileSearchError> {
        self.call(Operation::Search { query }).await
    }

    pub async fn list_documents(&self) -> Result<DocumentList, FileSearchError> {
        self.call(Operation::List).await
    }

    /// Delete by resource name (`DocumentInfo::name`)
    pub async fn delete_document(&self, document_name: &str) -> Result<DeleteReceipt, FileSearchError> {
        self.call(Operation::Delete { document_name }).await
    }

    async fn call<R: DeserializeOwned>(&self, operation: Operation<'_>) -> Result<R, FileSearchError> {
        let name = operation.name();
        debug!(operation = name, url = %self.base_url, "File Search request");

        let response = self
            .http
            .post(&self.base_url)
            .json(&operation)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            let message = service_error(&body)
                .or_else(|| error_message_from_body(&body))
                .unwrap_or_else(|| status.to_string());
            warn!(operation = name, status = status.as_u16(), %message, "File Search request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = service_error(&body).unwrap_or_else(|| format!("{name} failed"));
            warn!(operation = name, %message, "File Search reported failure");
            return Err(FileSearchError::Api(message));
        }

        serde_json::from_value(value)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()).into())
    }
}

/// The service's own `error` field
fn service_error(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

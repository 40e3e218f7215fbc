//! HTTP client for the JamAI table service.
//!
//! Binds to one fixed, versioned REST surface: `POST /api/v1/files/upload`
//! for attachments and `POST /api/v1/gen_tables/action/rows/add` for row
//! insertion. SDK drift is a compile-time concern here, not something to
//! probe for at runtime.

use std::path::Path;

use serde_json::{Value, json};
use tracing::{info, warn};

use aern_core::{InputRecord, resolve_upload_uri};

use crate::config::Credentials;
use crate::error::ClientError;
use crate::stage::stage_attachment;

/// Client for the JamAI file-upload and row-insertion operations.
///
/// Created once at startup and shared read-only for the rest of the
/// process; every method is a single blocking-from-the-user's-view call
/// with no retry.
pub struct JamClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl JamClient {
    /// Create a client for the given API base URL (no trailing slash).
    pub fn new(credentials: Credentials, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Upload a staged file and return the raw, shape-unknown response.
    pub async fn upload_file(&self, path: &Path) -> Result<Value, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/api/v1/files/upload", self.base_url);
        info!(url = %url, "uploading attachment");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.credentials.pat_key)
            .header("X-PROJECT-ID", &self.credentials.project_id)
            .multipart(form)
            .send()
            .await?;

        self.read_json(resp).await
    }

    /// Stage an in-memory blob, upload it, and resolve the content URI.
    ///
    /// The temporary file is removed when this returns, success or not.
    /// A missing URI in an otherwise-successful response is reported as
    /// [`ClientError::MissingUri`], distinct from transport failures.
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, ClientError> {
        let staged = stage_attachment(file_name, bytes)?;
        let response = self.upload_file(staged.path()).await;
        drop(staged);

        let response = response?;
        match resolve_upload_uri(Some(&response)) {
            Some(uri) => Ok(uri),
            None => {
                warn!(file_name = %file_name, "upload response carried no URI");
                Err(ClientError::MissingUri)
            }
        }
    }

    /// Insert one record into a table and return the raw response
    /// envelope. Normalization belongs to the caller (`aern-core`).
    pub async fn add_row(&self, table_id: &str, record: &InputRecord) -> Result<Value, ClientError> {
        let url = format!("{}/api/v1/gen_tables/action/rows/add", self.base_url);
        let body = add_row_body(table_id, record);

        info!(url = %url, table_id = %table_id, modalities = record.len(), "inserting row");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.credentials.pat_key)
            .header("X-PROJECT-ID", &self.credentials.project_id)
            .json(&body)
            .send()
            .await?;

        self.read_json(resp).await
    }

    async fn read_json(&self, resp: reqwest::Response) -> Result<Value, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Body of the row-insertion call: the record travels as a one-element
/// sequence, non-streaming.
fn add_row_body(table_id: &str, record: &InputRecord) -> Value {
    json!({
        "table_id": table_id,
        "data": [record.to_json()],
        "stream": false,
    })
}

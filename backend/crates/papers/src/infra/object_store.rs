//! Object Store Gateway
//!
//! HTTP client for the external file store. Uploads land as raw resources
//! under a fixed folder; the store answers with a public URL and a storage
//! identifier used for later bookkeeping.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::repository::{ObjectStore, StoredObject};
use crate::error::ObjectStoreError;

const UPLOAD_FOLDER: &str = "campuspapers";
const RESOURCE_TYPE: &str = "raw";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings. `None` endpoint means the store is unconfigured and
/// every upload fails at request time.
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreConfig {
    pub upload_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

/// HTTP object store client
#[derive(Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    config: ObjectStoreConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    public_id: String,
}

impl HttpObjectStore {
    pub fn new(config: ObjectStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl ObjectStore for HttpObjectStore {
    async fn store(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<StoredObject, ObjectStoreError> {
        let upload_url = self
            .config
            .upload_url
            .as_deref()
            .ok_or(ObjectStoreError::Unconfigured)?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ObjectStoreError::Unconfigured)?;

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("folder", UPLOAD_FOLDER)
            .text("resource_type", RESOURCE_TYPE);

        let response = self
            .client
            .post(upload_url)
            .bearer_auth(api_key)
            .multipart(form)
            .timeout(self.config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ObjectStoreError::Timeout
                } else {
                    ObjectStoreError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ObjectStoreError::UpstreamStatus(status));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ObjectStoreError::MalformedResponse(e.to_string()))?;

        let url = body
            .secure_url
            .or(body.url)
            .ok_or_else(|| ObjectStoreError::MalformedResponse("no url in response".to_string()))?;

        Ok(StoredObject {
            url,
            storage_id: body.public_id,
        })
    }
}

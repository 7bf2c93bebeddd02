//! Image upload and deletion.

use crate::error::{ClientError, Result};
use crate::types::UploadResponse;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};

/// Image storage client.
pub struct ImagesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> ImagesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Upload image bytes to be stored under `path`.
    ///
    /// The server may normalize the path; the returned value is authoritative.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResponse> {
        let size = bytes.len();
        debug!(path = %path, size, "Uploading image");

        let file_part = Part::bytes(bytes)
            .file_name(path.to_string())
            .mime_str(content_type)?;

        let form = Form::new()
            .text("path", path.to_string())
            .part("file", file_part);

        let url = format!("{}/api/images", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let upload: UploadResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse upload response: {}", e))
            })?;

            info!(path = %upload.path, size, "Image uploaded");
            Ok(upload)
        } else if status.as_u16() == 413 {
            Err(ClientError::ServerError {
                status: 413,
                message: "File too large".to_string(),
            })
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Delete the image stored under `path`.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}/api/images/{}", self.base_url, path);
        debug!(url = %url, "Deleting image");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }
}

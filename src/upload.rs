use crate::error::{ChatError, ChatResult};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

/// Extensions the file picker offers.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.jpg,.jpeg,.png";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadReply {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl UploadReply {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Clone, Debug, Default)]
pub struct UploadClient {
    client: reqwest::Client,
}

impl UploadClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// POST one file as multipart field `file`.
    pub async fn upload_salary_slip(
        &self,
        endpoint: &Url,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ChatResult<UploadReply> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part("file", part);

        tracing::info!(%endpoint, file_name, "uploading salary slip");
        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::UploadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: UploadReply = serde_json::from_str(&body)?;
        if reply.is_error() {
            tracing::warn!(message = %reply.message, "assistant reported upload error");
        }
        Ok(reply)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

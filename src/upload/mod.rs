//! Media uploads
//!
//! Files go straight to the third-party media host as an unsigned
//! multipart upload (`file` plus `upload_preset`). The host answers with
//! the public URL that is then stored on the record (`imageUrl`,
//! `fileUrl`, ...).

use futures_util::future::try_join_all;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::MediaConfig;

/// Errors raised while uploading
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Cannot read {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("No upload preset configured")]
    MissingPreset,

    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The media host refused the file
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid upload response: {0}")]
    Decode(String),
}

/// What the media host returns for a stored file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedMedia {
    pub secure_url: String,
    pub public_id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Deserialize)]
struct HostError {
    error: HostErrorBody,
}

#[derive(Deserialize)]
struct HostErrorBody {
    message: String,
}

/// Uploads files to the media host
#[derive(Clone)]
pub struct MediaUploader {
    http: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl MediaUploader {
    pub fn new(config: &MediaConfig) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            upload_url: config.upload_url.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    /// Upload one file from disk
    pub async fn upload(&self, path: &Path) -> Result<UploadedMedia, UploadError> {
        let data = tokio::fs::read(path).await.map_err(|error| UploadError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        self.upload_bytes(&file_name, data).await
    }

    /// Upload an in-memory file
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<UploadedMedia, UploadError> {
        if self.upload_preset.trim().is_empty() {
            return Err(UploadError::MissingPreset);
        }

        let size = data.len();
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        tracing::debug!(file = file_name, bytes = size, "Uploading media");

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<HostError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            tracing::warn!(file = file_name, status = status.as_u16(), message = %message, "Upload rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let media: UploadedMedia =
            serde_json::from_slice(&body).map_err(|e| UploadError::Decode(e.to_string()))?;
        tracing::info!(file = file_name, url = %media.secure_url, "Uploaded media");
        Ok(media)
    }

    /// Upload several files concurrently; fails as a whole on the first error
    pub async fn upload_many(&self, paths: &[PathBuf]) -> Result<Vec<UploadedMedia>, UploadError> {
        try_join_all(paths.iter().map(|path| self.upload(path))).await
    }

    /// Upload into a widget slot, rolling it back on failure
    pub async fn fill(&self, slot: &mut UploadSlot, path: &Path) -> Result<UploadedMedia, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        slot.begin(file_name);
        let result = self.upload(path).await;
        slot.finish(result)
    }
}

/// Content type by file extension
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// State of one upload widget
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UploadSlot {
    #[default]
    Empty,
    Uploading {
        file_name: String,
    },
    Ready(UploadedMedia),
}

impl UploadSlot {
    pub fn begin(&mut self, file_name: impl Into<String>) {
        *self = UploadSlot::Uploading {
            file_name: file_name.into(),
        };
    }

    /// Settle the slot: `Ready` on success, back to `Empty` on failure
    pub fn finish(
        &mut self,
        result: Result<UploadedMedia, UploadError>,
    ) -> Result<UploadedMedia, UploadError> {
        match result {
            Ok(media) => {
                *self = UploadSlot::Ready(media.clone());
                Ok(media)
            }
            Err(e) => {
                *self = UploadSlot::Empty;
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        *self = UploadSlot::Empty;
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadSlot::Uploading { .. })
    }

    /// Public URL once uploaded
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadSlot::Ready(media) => Some(&media.secure_url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use tempfile::tempdir;

    fn uploader(mock: &MockApi, preset: &str) -> MediaUploader {
        MediaUploader::new(&MediaConfig {
            upload_url: mock.url("/media/upload"),
            upload_preset: preset.to_string(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("avatar.PNG"), "image/png");
        assert_eq!(mime_for("cv.pdf"), "application/pdf");
        assert_eq!(mime_for("README"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_upload_file() {
        let mock = MockApi::start().await;
        let dir = tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::write(&path, b"\x89PNG fake").unwrap();

        let media = uploader(&mock, "folio").upload(&path).await.unwrap();
        assert!(media.secure_url.ends_with("avatar.png"));
        assert!(!media.public_id.is_empty());
    }

    #[tokio::test]
    async fn test_missing_preset_not_sent() {
        let mock = MockApi::start().await;
        let err = uploader(&mock, "")
            .upload_bytes("a.png", vec![1, 2, 3])
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::MissingPreset));
        assert!(mock.last_request().is_none());
    }

    #[tokio::test]
    async fn test_rejected_upload_message() {
        let mock = MockApi::start().await;
        let err = uploader(&mock, "unknown-preset")
            .upload_bytes("a.png", vec![1, 2, 3])
            .await
            .unwrap_err();

        match err {
            UploadError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Upload preset not found");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_many_fails_as_whole() {
        let mock = MockApi::start().await;
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        let uploader = uploader(&mock, "folio");
        let media = uploader.upload_many(&[a.clone(), b.clone()]).await.unwrap();
        assert_eq!(media.len(), 2);

        let missing = dir.path().join("missing.jpg");
        let err = uploader.upload_many(&[a, missing, b]).await.unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_slot_rolls_back_on_failure() {
        let mock = MockApi::start().await;
        let dir = tempdir().unwrap();
        let uploader = uploader(&mock, "folio");
        let mut slot = UploadSlot::default();

        let err = uploader
            .fill(&mut slot, &dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
        assert_eq!(slot, UploadSlot::Empty);

        let path = dir.path().join("logo.svg");
        std::fs::write(&path, "<svg/>").unwrap();
        uploader.fill(&mut slot, &path).await.unwrap();
        assert!(slot.url().unwrap().ends_with("logo.svg"));
        assert!(!slot.is_uploading());
    }

    #[test]
    fn test_slot_states() {
        let mut slot = UploadSlot::default();
        slot.begin("cv.pdf");
        assert!(slot.is_uploading());
        assert!(slot.url().is_none());

        slot.clear();
        assert_eq!(slot, UploadSlot::Empty);
    }
}

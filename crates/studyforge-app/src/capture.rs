use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, Result};

pub const CAMERA_DENIED: &str = "Could not access camera. Please check permissions.";
pub const MICROPHONE_DENIED: &str = "Could not access microphone. Please check permissions.";

/// Captured media, ready to send to the assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Camera,
    Microphone,
}

impl CaptureKind {
    fn denied_message(&self) -> &'static str {
        match self {
            Self::Camera => CAMERA_DENIED,
            Self::Microphone => MICROPHONE_DENIED,
        }
    }
}

/// Scoped capture hardware.
///
/// Acquired for a single attachment and released afterwards, whether or not
/// the capture succeeded. Failure to acquire is [`AppError::CaptureDenied`].
#[async_trait]
pub trait CaptureDevice: Send {
    fn kind(&self) -> CaptureKind;

    async fn acquire(&mut self) -> Result<()>;

    async fn capture(&mut self) -> Result<MediaBlob>;

    fn release(&mut self);
}

/// Runs acquire, capture and release on `device`
pub async fn capture_once(device: &mut dyn CaptureDevice) -> Result<MediaBlob> {
    device.acquire().await?;
    let blob = device.capture().await;
    device.release();
    blob
}

/// Device backed by a media file: a photo for the camera, a recording for
/// the microphone
#[derive(Debug)]
pub struct FileCapture {
    kind: CaptureKind,
    path: PathBuf,
    acquired: bool,
}

impl FileCapture {
    pub fn camera(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: CaptureKind::Camera,
            path: path.into(),
            acquired: false,
        }
    }

    pub fn microphone(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: CaptureKind::Microphone,
            path: path.into(),
            acquired: false,
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    fn mime_type(&self) -> &'static str {
        match self.kind {
            CaptureKind::Camera => "image/jpeg",
            CaptureKind::Microphone => audio_mime_type(&self.path),
        }
    }
}

pub(crate) fn audio_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "audio/webm",
    }
}

#[async_trait]
impl CaptureDevice for FileCapture {
    fn kind(&self) -> CaptureKind {
        self.kind
    }

    async fn acquire(&mut self) -> Result<()> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => {
                self.acquired = true;
                Ok(())
            }
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), kind = ?self.kind, "Capture source unavailable");
                Err(AppError::CaptureDenied(self.kind.denied_message().to_string()))
            }
        }
    }

    async fn capture(&mut self) -> Result<MediaBlob> {
        if !self.acquired {
            return Err(AppError::CaptureDenied(self.kind.denied_message().to_string()));
        }
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|_| AppError::CaptureDenied(self.kind.denied_message().to_string()))?;
        Ok(MediaBlob {
            bytes,
            mime_type: self.mime_type().to_string(),
        })
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_denied() {
        let mut device = FileCapture::camera("/definitely/not/here.jpg");
        let err = capture_once(&mut device).await.unwrap_err();
        assert_eq!(err.to_string(), CAMERA_DENIED);
        assert!(!device.is_acquired());
    }

    #[tokio::test]
    async fn test_capture_releases_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let mut device = FileCapture::microphone(&path);
        let blob = capture_once(&mut device).await.unwrap();
        assert_eq!(blob.mime_type, "audio/mpeg");
        assert_eq!(blob.bytes, b"ID3");
        assert!(!device.is_acquired());
    }
}

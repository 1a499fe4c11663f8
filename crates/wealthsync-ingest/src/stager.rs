//! Temporary staging of evidence destined for remote file ingestion.
//!
//! Each item is written to a uniquely-named scoped temp file, handed to the
//! provider's file API, and removed again on every exit path. The temp file
//! lives exactly as long as this function's scope; there is no detached
//! cleanup task to miss.

use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use wealthsync_core::{Error, FileIngestor, RemoteFileHandle, Result};

/// Stages evidence payloads and hands them to a [`FileIngestor`].
pub struct EvidenceStager {
    ingestor: Arc<dyn FileIngestor>,
}

impl EvidenceStager {
    pub fn new(ingestor: Arc<dyn FileIngestor>) -> Self {
        Self { ingestor }
    }

    /// Stage one payload and upload it.
    ///
    /// The temporary artifact is deleted whether the upload succeeds or
    /// fails; the returned handle is the only thing that survives this call.
    /// All failures are [`Error::Staging`].
    pub async fn stage(
        &self,
        bytes: &[u8],
        suffix: &str,
        display_name: &str,
    ) -> Result<RemoteFileHandle> {
        let mut tmp = tempfile::Builder::new()
            .prefix("wealthsync-evidence-")
            .suffix(suffix)
            .tempfile()
            .map_err(|e| Error::Staging(format!("failed to create temp file: {}", e)))?;

        tmp.write_all(bytes)
            .and_then(|_| tmp.flush())
            .map_err(|e| Error::Staging(format!("failed to write temp file: {}", e)))?;

        debug!(
            subsystem = "ingest",
            component = "stager",
            op = "stage",
            filename = display_name,
            bytes = bytes.len(),
            "Staged evidence to temporary file"
        );

        // `tmp` is dropped at every return below, removing the artifact.
        self.ingestor
            .upload(tmp.path(), &media_type_for_suffix(suffix), display_name)
            .await
            .map_err(|e| match e {
                Error::Staging(msg) => Error::Staging(msg),
                other => Error::Staging(other.to_string()),
            })
    }
}

/// Upload media type for a staging suffix.
fn media_type_for_suffix(suffix: &str) -> String {
    let mime = match suffix.to_ascii_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".m4a" => "audio/mp4",
        ".aac" => "audio/aac",
        ".mp4" => "video/mp4",
        ".mov" => "video/quicktime",
        ".ogg" => "audio/ogg",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Ingestor stub that records the staged path and can be told to fail.
    struct RecordingIngestor {
        seen_path: Mutex<Option<PathBuf>>,
        seen_media_type: Mutex<Option<String>>,
        path_existed_during_upload: Mutex<Option<bool>>,
        fail: bool,
    }

    impl RecordingIngestor {
        fn new(fail: bool) -> Self {
            Self {
                seen_path: Mutex::new(None),
                seen_media_type: Mutex::new(None),
                path_existed_during_upload: Mutex::new(None),
                fail,
            }
        }
    }

    #[async_trait]
    impl FileIngestor for RecordingIngestor {
        async fn upload(
            &self,
            path: &Path,
            media_type: &str,
            display_name: &str,
        ) -> Result<RemoteFileHandle> {
            *self.seen_path.lock().unwrap() = Some(path.to_path_buf());
            *self.seen_media_type.lock().unwrap() = Some(media_type.to_string());
            *self.path_existed_during_upload.lock().unwrap() = Some(path.exists());

            if self.fail {
                return Err(Error::provider("stub", "upload rejected"));
            }
            Ok(RemoteFileHandle {
                uri: "files/stub-123".to_string(),
                media_type: media_type.to_string(),
                display_name: display_name.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn stage_success_removes_temp_file() {
        let ingestor = Arc::new(RecordingIngestor::new(false));
        let stager = EvidenceStager::new(ingestor.clone());

        let handle = stager
            .stage(b"%PDF-1.4 fake", ".pdf", "statement.pdf")
            .await
            .expect("stage should succeed");

        assert_eq!(handle.uri, "files/stub-123");
        assert_eq!(handle.display_name, "statement.pdf");

        let path = ingestor.seen_path.lock().unwrap().clone().unwrap();
        assert!(
            ingestor.path_existed_during_upload.lock().unwrap().unwrap(),
            "temp file must exist while the upload runs"
        );
        assert!(!path.exists(), "temp file must be removed after stage()");
    }

    #[tokio::test]
    async fn stage_failure_still_removes_temp_file() {
        let ingestor = Arc::new(RecordingIngestor::new(true));
        let stager = EvidenceStager::new(ingestor.clone());

        let err = stager
            .stage(b"audio-bytes", ".mp3", "meeting.mp3")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Staging(_)), "got: {:?}", err);

        let path = ingestor.seen_path.lock().unwrap().clone().unwrap();
        assert!(!path.exists(), "temp file must be removed on upload failure");
    }

    #[tokio::test]
    async fn staged_paths_are_unique_per_item() {
        let ingestor = Arc::new(RecordingIngestor::new(false));
        let stager = EvidenceStager::new(ingestor.clone());

        stager.stage(b"one", ".pdf", "a.pdf").await.unwrap();
        let first = ingestor.seen_path.lock().unwrap().clone().unwrap();
        stager.stage(b"two", ".pdf", "b.pdf").await.unwrap();
        let second = ingestor.seen_path.lock().unwrap().clone().unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn staged_suffix_drives_upload_media_type() {
        let ingestor = Arc::new(RecordingIngestor::new(false));
        let stager = EvidenceStager::new(ingestor.clone());

        stager.stage(b"bytes", ".wav", "note.wav").await.unwrap();
        assert_eq!(
            ingestor.seen_media_type.lock().unwrap().as_deref(),
            Some("audio/wav")
        );
    }

    #[test]
    fn unknown_suffix_falls_back_to_octet_stream() {
        assert_eq!(media_type_for_suffix(".bin"), "application/octet-stream");
        assert_eq!(media_type_for_suffix(".PDF"), "application/pdf");
    }
}

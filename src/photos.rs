//! Procedure photo editing.
//!
//! `PhotoDraft` is the dialog's working copy of a procedure's photos; it
//! only reaches the store when saved, as a `PhotoUpdate`. Uploads are
//! simulated: a background task waits out the configured latency and
//! yields a placeholder image URI. Each upload can be cancelled while in
//! flight. Dropping the handle cancels it too.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::models::{AfterImage, PhotoUpdate, ProcedureRecord, ProcedureType};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    Before,
    After,
}

impl PhotoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload cancelled")]
    Cancelled,
    #[error("Upload task failed: {0}")]
    Failed(String),
}

// ═══════════════════════════════════════════════════════════
// Draft
// ═══════════════════════════════════════════════════════════

/// Editable copy of one procedure's photos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoDraft {
    pub before_image: Option<String>,
    pub after_images: Vec<AfterImage>,
}

impl PhotoDraft {
    pub fn from_record(record: &ProcedureRecord) -> Self {
        Self {
            before_image: record.before_image.clone(),
            after_images: record.after_images.clone(),
        }
    }

    pub fn set_before(&mut self, uri: impl Into<String>) {
        self.before_image = Some(uri.into());
    }

    pub fn clear_before(&mut self) {
        self.before_image = None;
    }

    pub fn add_after(&mut self, uri: impl Into<String>, taken_at: NaiveDate) {
        self.after_images.push(AfterImage {
            uri: uri.into(),
            taken_at,
        });
    }

    /// Out-of-range indices are ignored.
    pub fn remove_after(&mut self, index: usize) -> Option<AfterImage> {
        (index < self.after_images.len()).then(|| self.after_images.remove(index))
    }

    /// Saving replaces both sides with the draft's contents.
    pub fn into_update(self) -> PhotoUpdate {
        PhotoUpdate {
            before_image: Some(self.before_image),
            after_images: Some(self.after_images),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Simulated upload
// ═══════════════════════════════════════════════════════════

/// Placeholder URI for a freshly "uploaded" photo.
pub fn mock_image_uri(kind: PhotoKind, procedure_type: ProcedureType, seed: u32) -> String {
    format!(
        "https://img.usecurling.com/p/800/600?q={}%20{}&seed={seed}",
        procedure_type.display_name().replace(' ', "%20"),
        kind.as_str()
    )
}

#[derive(Debug, Clone)]
pub struct PhotoUploader {
    latency: Duration,
}

impl PhotoUploader {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Spawns on the current tokio runtime; fails without one.
    pub fn start(
        &self,
        kind: PhotoKind,
        procedure_type: ProcedureType,
        seed: u32,
    ) -> Result<UploadHandle, UploadError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| UploadError::Failed(e.to_string()))?;
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let latency = self.latency;
        let uri = mock_image_uri(kind, procedure_type, seed);

        tracing::debug!(kind = kind.as_str(), procedure_type = %procedure_type, seed, "Upload started");

        let task = runtime.spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(latency) => {
                    tracing::debug!(uri = %uri, "Upload finished");
                    Ok(uri)
                }
                // A dropped sender resolves this arm too.
                _ = cancel_rx => {
                    tracing::info!("Upload cancelled");
                    Err(UploadError::Cancelled)
                }
            }
        });

        Ok(UploadHandle {
            cancel_tx: Some(cancel_tx),
            task,
        })
    }
}

/// An upload in flight.
pub struct UploadHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<String, UploadError>>,
}

impl UploadHandle {
    /// Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the upload's URI.
    pub async fn wait(self) -> Result<String, UploadError> {
        let UploadHandle { cancel_tx, task } = self;
        let result = task.await;
        drop(cancel_tx);
        result.map_err(|e| UploadError::Failed(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> ProcedureRecord {
        let mut record = ProcedureRecord::new(date(2026, 3, 1), ProcedureType::Botox);
        record.before_image = Some("before.jpg".into());
        record.after_images = vec![
            AfterImage { uri: "a1.jpg".into(), taken_at: date(2026, 3, 16) },
            AfterImage { uri: "a2.jpg".into(), taken_at: date(2026, 3, 31) },
        ];
        record
    }

    // ── Draft Tests ────────────────────────────────────────

    #[test]
    fn draft_edits_apply_to_record() {
        let mut target = record();
        let mut draft = PhotoDraft::from_record(&target);
        draft.clear_before();
        assert_eq!(draft.remove_after(0).unwrap().uri, "a1.jpg");
        draft.add_after("a3.jpg", date(2026, 4, 15));

        target.apply_photos(draft.into_update());
        assert!(target.before_image.is_none());
        let uris: Vec<&str> = target.after_images.iter().map(|i| i.uri.as_str()).collect();
        assert_eq!(uris, vec!["a2.jpg", "a3.jpg"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut draft = PhotoDraft::from_record(&record());
        assert!(draft.remove_after(5).is_none());
        assert_eq!(draft.after_images.len(), 2);
    }

    #[test]
    fn set_before_replaces() {
        let mut draft = PhotoDraft::default();
        draft.set_before("new.jpg");
        assert_eq!(draft.before_image.as_deref(), Some("new.jpg"));
    }

    #[test]
    fn mock_uri_encodes_name() {
        assert_eq!(
            mock_image_uri(PhotoKind::After, ProcedureType::LiftingFacial, 7),
            "https://img.usecurling.com/p/800/600?q=Lifting%20Facial%20after&seed=7"
        );
    }

    // ── Upload Tests ───────────────────────────────────────

    #[tokio::test]
    async fn upload_yields_uri_after_latency() {
        let uploader = PhotoUploader::new(Duration::from_millis(10));
        let handle = uploader.start(PhotoKind::Before, ProcedureType::Botox, 3).unwrap();
        let uri = handle.wait().await.unwrap();
        assert_eq!(uri, "https://img.usecurling.com/p/800/600?q=Botox%20before&seed=3");
    }

    #[tokio::test]
    async fn cancelled_upload_reports_cancelled() {
        let uploader = PhotoUploader::new(Duration::from_secs(60));
        let mut handle = uploader.start(PhotoKind::After, ProcedureType::Preenchimento, 1).unwrap();
        handle.cancel();
        handle.cancel();
        assert!(matches!(handle.wait().await, Err(UploadError::Cancelled)));
    }

    #[tokio::test]
    async fn dropping_handle_cancels_task() {
        let uploader = PhotoUploader::new(Duration::from_secs(60));
        let handle = uploader.start(PhotoKind::After, ProcedureType::Botox, 1).unwrap();

        // Dropping a handle drops its cancel sender; keep the task to observe it.
        let UploadHandle { cancel_tx, task } = handle;
        drop(cancel_tx);

        let outcome = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("task should end well before the upload latency")
            .unwrap();
        assert!(matches!(outcome, Err(UploadError::Cancelled)));
    }

    #[test]
    fn start_outside_runtime_fails() {
        let uploader = PhotoUploader::new(Duration::from_millis(10));
        let result = uploader.start(PhotoKind::Before, ProcedureType::Botox, 1);
        assert!(matches!(result, Err(UploadError::Failed(_))));
    }
}

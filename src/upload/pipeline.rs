use super::validator::{validate_selection, SelectionNotice};
use super::UploadFile;
use crate::api::{PhotoApiError, PhotoClient};
use crate::models::{AlbumId, ValidationError};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload photos. Please try again.";

/// Summary shown after a batch: `total` is the number of files sent, the
/// other two counts come from the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pub uploaded: usize,
    pub total: usize,
    pub failed: usize,
}

impl UploadProgress {
    pub fn message(&self) -> String {
        let mut message = format!("Uploaded {} of {} photos", self.uploaded, self.total);
        if self.failed > 0 {
            message.push_str(&format!(" ({} failed)", self.failed));
        }
        message
    }
}

/// Where the current upload gesture is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Validating,
    /// Nothing in the selection was an accepted image; no request was made
    RejectedAll,
    Submitting,
    Completed(UploadProgress),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    pub phase: UploadPhase,
    pub progress: Option<UploadProgress>,
    /// Client-side filtering notice for the current gesture
    pub notice: Option<SelectionNotice>,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Validating | UploadPhase::Submitting)
    }
}

#[derive(Debug)]
pub enum UploadOutcome {
    Rejected(ValidationError),
    Completed(UploadProgress),
    Failed(PhotoApiError),
}

/// Runs upload gestures for one screen: validate, send the accepted files as
/// one batch, record the server's counts, reload, then clear the summary
/// after the display delay.
#[derive(Clone)]
pub struct UploadPipeline {
    inner: Arc<PipelineInner>,
}

struct PipelineInner {
    client: PhotoClient,
    state: watch::Sender<UploadState>,
    /// Bumped per gesture so an older reset timer leaves a newer summary alone
    generation: AtomicU64,
    display_delay: Duration,
}

impl UploadPipeline {
    pub fn new(client: PhotoClient, display_delay: Duration) -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                client,
                state: watch::Sender::new(UploadState::default()),
                generation: AtomicU64::new(0),
                display_delay,
            }),
        }
    }

    pub fn state(&self) -> UploadState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.inner.state.subscribe()
    }

    pub fn is_uploading(&self) -> bool {
        self.inner.state.borrow().is_uploading()
    }

    /// Run one gesture against `album_id`. `reload` is awaited after a
    /// successful request and before the pipeline leaves `Submitting`.
    ///
    /// Does not check whether another gesture is in flight; see `try_run`.
    pub async fn run<F, Fut>(
        &self,
        album_id: AlbumId,
        selection: Vec<UploadFile>,
        reload: F,
    ) -> UploadOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.inner.state.send_modify(Self::begin);
        self.drive(album_id, selection, reload).await
    }

    /// Like `run`, but returns `None` without doing anything while another
    /// gesture is validating or submitting.
    pub async fn try_run<F, Fut>(
        &self,
        album_id: AlbumId,
        selection: Vec<UploadFile>,
        reload: F,
    ) -> Option<UploadOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let started = self.inner.state.send_if_modified(|s| {
            if s.is_uploading() {
                return false;
            }
            Self::begin(s);
            true
        });
        if !started {
            debug!("Upload to album {} ignored: batch already in flight", album_id);
            return None;
        }
        Some(self.drive(album_id, selection, reload).await)
    }

    fn begin(state: &mut UploadState) {
        state.phase = UploadPhase::Validating;
        state.progress = None;
        state.notice = None;
    }

    async fn drive<F, Fut>(
        &self,
        album_id: AlbumId,
        selection: Vec<UploadFile>,
        reload: F,
    ) -> UploadOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let report = validate_selection(selection);
        let notice = report.notice();

        let accepted = match report.require_accepted() {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!("Upload to album {} rejected: {}", album_id, e);
                self.inner.state.send_modify(|s| {
                    s.phase = UploadPhase::RejectedAll;
                    s.notice = notice;
                });
                self.schedule_reset(generation);
                return UploadOutcome::Rejected(e);
            }
        };

        let total = accepted.len();
        info!(
            "Uploading {} files to album {} ({} rejected locally)",
            total, album_id, report.rejected_count
        );
        self.inner.state.send_modify(|s| {
            s.phase = UploadPhase::Submitting;
            s.notice = notice;
            s.progress = Some(UploadProgress {
                uploaded: 0,
                total,
                failed: 0,
            });
        });

        let outcome = match self.inner.client.upload_photos(album_id, accepted).await {
            Ok(counts) => {
                let progress = UploadProgress {
                    uploaded: counts.uploaded,
                    total,
                    failed: counts.failed,
                };
                info!("Album {}: {}", album_id, progress.message());
                self.inner.state.send_modify(|s| s.progress = Some(progress));

                reload().await;

                self.inner
                    .state
                    .send_modify(|s| s.phase = UploadPhase::Completed(progress));
                UploadOutcome::Completed(progress)
            }
            Err(e) => {
                warn!("Upload to album {} failed: {}", album_id, e);
                let message = e.user_message(UPLOAD_FAILED_MESSAGE);
                self.inner.state.send_modify(|s| {
                    s.phase = UploadPhase::Failed(message);
                    s.progress = None;
                });
                UploadOutcome::Failed(e)
            }
        };

        self.schedule_reset(generation);
        outcome
    }

    /// Return to `Idle` after the display delay unless another gesture started
    fn schedule_reset(&self, generation: u64) {
        let inner: Weak<PipelineInner> = Arc::downgrade(&self.inner);
        let delay = self.inner.display_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.state.send_replace(UploadState::default());
            }
        });
    }
}

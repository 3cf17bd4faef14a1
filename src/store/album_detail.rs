use super::reconcile::{reload_target, Mutation, ReloadTarget, Screen};
use super::{
    FormSubmission, PendingDelete, DELETE_PHOTO_FAILED, LOAD_ALBUM_FAILED, UPDATE_ALBUM_FAILED,
};
use crate::api::PhotoClient;
use crate::models::{AlbumDetail, AlbumFields, AlbumId, Photo, PhotoId};
use crate::upload::{
    UploadFile, UploadOutcome, UploadPipeline, UploadState, UPLOAD_FAILED_MESSAGE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumDetailState {
    pub album_id: AlbumId,
    pub album: Option<AlbumDetail>,
    pub loading: bool,
    /// The server answered 404 for this album
    pub not_found: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub editing: bool,
    pub pending_delete: Option<PendingDelete<PhotoId>>,
}

/// What the album detail screen renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlbumView<'a> {
    Loading,
    NotFound,
    /// Loading failed and there is nothing previously loaded to show
    Unavailable,
    Ready(&'a AlbumDetail),
}

impl AlbumDetailState {
    fn new(album_id: AlbumId) -> Self {
        Self {
            album_id,
            album: None,
            loading: true,
            not_found: false,
            submitting: false,
            error: None,
            editing: false,
            pending_delete: None,
        }
    }

    pub fn view(&self) -> AlbumView<'_> {
        if self.not_found {
            return AlbumView::NotFound;
        }
        match &self.album {
            Some(album) => AlbumView::Ready(album),
            None if self.loading => AlbumView::Loading,
            None => AlbumView::Unavailable,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        self.album.as_ref().map(|a| a.photos.as_slice()).unwrap_or(&[])
    }
}

/// Store for one album's detail screen, including its upload pipeline
#[derive(Clone)]
pub struct AlbumDetailStore {
    inner: Arc<DetailInner>,
}

struct DetailInner {
    client: PhotoClient,
    album_id: AlbumId,
    state: watch::Sender<AlbumDetailState>,
    uploads: UploadPipeline,
}

impl PartialEq for AlbumDetailStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AlbumDetailStore {
    pub fn new(client: PhotoClient, album_id: AlbumId, upload_notice_delay: Duration) -> Self {
        let uploads = UploadPipeline::new(client.clone(), upload_notice_delay);
        Self {
            inner: Arc::new(DetailInner {
                client,
                album_id,
                state: watch::Sender::new(AlbumDetailState::new(album_id)),
                uploads,
            }),
        }
    }

    pub fn album_id(&self) -> AlbumId {
        self.inner.album_id
    }

    pub fn snapshot(&self) -> AlbumDetailState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlbumDetailState> {
        self.inner.state.subscribe()
    }

    pub fn upload_state(&self) -> UploadState {
        self.inner.uploads.state()
    }

    pub fn subscribe_uploads(&self) -> watch::Receiver<UploadState> {
        self.inner.uploads.subscribe()
    }

    pub fn is_uploading(&self) -> bool {
        self.inner.uploads.is_uploading()
    }

    pub fn client(&self) -> &PhotoClient {
        &self.inner.client
    }

    fn update_state(&self, f: impl FnOnce(&mut AlbumDetailState)) {
        self.inner.state.send_modify(f);
    }

    /// Fetch the album with its photos. A 404 switches the screen to the
    /// not-found view; other failures keep whatever was shown before.
    pub async fn load(&self) {
        let album_id = self.inner.album_id;
        self.update_state(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.inner.client.get_album(album_id).await {
            Ok(album) => {
                debug!("Loaded album {} with {} photos", album_id, album.photos.len());
                self.update_state(|s| {
                    s.album = Some(album);
                    s.not_found = false;
                    s.loading = false;
                });
            }
            Err(e) if e.is_not_found() => {
                info!("Album {} not found", album_id);
                self.update_state(|s| {
                    s.album = None;
                    s.not_found = true;
                    s.loading = false;
                });
            }
            Err(e) => {
                error!("Error loading album {}: {}", album_id, e);
                self.update_state(|s| {
                    s.error = Some(LOAD_ALBUM_FAILED.to_string());
                    s.loading = false;
                });
            }
        }
    }

    async fn reconcile(&self, mutation: Mutation) {
        if let Some(ReloadTarget::AlbumWithPhotos) = reload_target(mutation, Screen::AlbumDetail) {
            debug!("Reloading album {} after {}", self.inner.album_id, mutation);
            self.load().await;
        }
    }

    pub fn open_edit(&self) {
        self.update_state(|s| s.editing = true);
    }

    pub fn close_modal(&self) -> bool {
        self.inner.state.send_if_modified(|s| {
            if s.submitting {
                return false;
            }
            s.editing = false;
            s.error = None;
            true
        })
    }

    /// Update the album's name and description
    pub async fn update(&self, fields: AlbumFields) -> bool {
        self.update_state(|s| {
            s.submitting = true;
            s.error = None;
        });
        self.run_update(fields).await
    }

    /// Submit the edit form, honoring the in-flight flag
    pub async fn submit_form(&self, fields: AlbumFields) -> FormSubmission {
        let fields = match fields.validate() {
            Ok(fields) => fields,
            Err(e) => return FormSubmission::Invalid(e),
        };

        let acquired = self.inner.state.send_if_modified(|s| {
            if s.submitting {
                return false;
            }
            s.submitting = true;
            s.error = None;
            true
        });
        if !acquired {
            debug!("Album edit ignored: already submitting");
            return FormSubmission::Busy;
        }

        self.run_update(fields).await;
        FormSubmission::Submitted
    }

    async fn run_update(&self, fields: AlbumFields) -> bool {
        let album_id = self.inner.album_id;
        let fields = match fields.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.update_state(|s| {
                    s.error = Some(e.to_string());
                    s.submitting = false;
                });
                return false;
            }
        };

        match self.inner.client.update_album(album_id, &fields).await {
            Ok(()) => {
                info!("Updated album {}", album_id);
                self.reconcile(Mutation::UpdateAlbum).await;
                self.update_state(|s| {
                    s.editing = false;
                    s.submitting = false;
                });
                true
            }
            Err(e) => {
                error!("Error updating album {}: {}", album_id, e);
                self.update_state(|s| {
                    s.error = Some(e.user_message(UPDATE_ALBUM_FAILED));
                    s.submitting = false;
                });
                false
            }
        }
    }

    pub async fn delete_photo(&self, id: PhotoId) -> bool {
        self.update_state(|s| s.error = None);

        match self.inner.client.delete_photo(id).await {
            Ok(()) => {
                info!("Deleted photo {} from album {}", id, self.inner.album_id);
                self.reconcile(Mutation::DeletePhoto).await;
                true
            }
            Err(e) => {
                error!("Error deleting photo {}: {}", id, e);
                self.update_state(|s| s.error = Some(e.user_message(DELETE_PHOTO_FAILED)));
                false
            }
        }
    }

    pub fn request_photo_delete(&self, photo: &Photo) {
        let pending = PendingDelete {
            id: photo.id,
            prompt: format!("Delete \"{}\"?", photo.original_filename),
        };
        self.update_state(|s| s.pending_delete = Some(pending));
    }

    pub fn cancel_delete(&self) {
        self.update_state(|s| s.pending_delete = None);
    }

    pub async fn confirm_delete(&self) -> bool {
        let mut pending = None;
        self.update_state(|s| pending = s.pending_delete.take());

        match pending {
            Some(pending) => self.delete_photo(pending.id).await,
            None => false,
        }
    }

    /// Upload a selection into this album. Does not check for a batch already
    /// in flight; UI code goes through `select_files`.
    pub async fn upload(&self, selection: Vec<UploadFile>) -> UploadOutcome {
        let outcome = self
            .inner
            .uploads
            .run(self.inner.album_id, selection, || {
                self.reconcile(Mutation::UploadPhotos)
            })
            .await;
        self.record_upload_outcome(&outcome);
        outcome
    }

    /// Entry for drag-and-drop and the file picker. Returns `None` when a
    /// batch is already uploading.
    pub async fn select_files(&self, selection: Vec<UploadFile>) -> Option<UploadOutcome> {
        let outcome = self
            .inner
            .uploads
            .try_run(self.inner.album_id, selection, || {
                self.reconcile(Mutation::UploadPhotos)
            })
            .await?;
        self.record_upload_outcome(&outcome);
        Some(outcome)
    }

    fn record_upload_outcome(&self, outcome: &UploadOutcome) {
        if let UploadOutcome::Failed(e) = outcome {
            let message = e.user_message(UPLOAD_FAILED_MESSAGE);
            self.update_state(|s| s.error = Some(message));
        }
    }
}

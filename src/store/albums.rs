use super::reconcile::{reload_target, Mutation, ReloadTarget, Screen};
use super::{
    FormSubmission, PendingDelete, DELETE_ALBUM_FAILED, LOAD_ALBUMS_FAILED, SAVE_ALBUM_FAILED,
};
use crate::api::{PhotoApiError, PhotoClient};
use crate::models::{Album, AlbumFields, AlbumId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Which form the albums screen's modal shows
#[derive(Debug, Clone, PartialEq)]
pub enum AlbumModal {
    Create,
    Edit(Album),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumsState {
    pub albums: Vec<Album>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub modal: Option<AlbumModal>,
    pub pending_delete: Option<PendingDelete<AlbumId>>,
}

impl Default for AlbumsState {
    fn default() -> Self {
        Self {
            albums: Vec::new(),
            loading: true,
            submitting: false,
            error: None,
            modal: None,
            pending_delete: None,
        }
    }
}

/// Store for the albums screen
#[derive(Clone)]
pub struct AlbumsStore {
    inner: Arc<AlbumsInner>,
}

struct AlbumsInner {
    client: PhotoClient,
    state: watch::Sender<AlbumsState>,
}

impl PartialEq for AlbumsStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AlbumsStore {
    pub fn new(client: PhotoClient) -> Self {
        Self {
            inner: Arc::new(AlbumsInner {
                client,
                state: watch::Sender::new(AlbumsState::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> AlbumsState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlbumsState> {
        self.inner.state.subscribe()
    }

    pub fn client(&self) -> &PhotoClient {
        &self.inner.client
    }

    fn update_state(&self, f: impl FnOnce(&mut AlbumsState)) {
        self.inner.state.send_modify(f);
    }

    /// Fetch the album list. On failure the previous list stays in place.
    pub async fn load(&self) {
        self.update_state(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.inner.client.list_albums().await {
            Ok(albums) => {
                debug!("Loaded {} albums", albums.len());
                self.update_state(|s| {
                    s.albums = albums;
                    s.loading = false;
                });
            }
            Err(e) => {
                error!("Error loading albums: {}", e);
                self.update_state(|s| {
                    s.error = Some(LOAD_ALBUMS_FAILED.to_string());
                    s.loading = false;
                });
            }
        }
    }

    async fn reconcile(&self, mutation: Mutation) {
        if let Some(ReloadTarget::AlbumList) = reload_target(mutation, Screen::Albums) {
            debug!("Reloading album list after {}", mutation);
            self.load().await;
        }
    }

    pub fn open_create(&self) {
        self.update_state(|s| s.modal = Some(AlbumModal::Create));
    }

    pub fn open_edit(&self, album: Album) {
        self.update_state(|s| s.modal = Some(AlbumModal::Edit(album)));
    }

    /// Close the modal and clear the error. Refused while a submission is in
    /// flight.
    pub fn close_modal(&self) -> bool {
        self.inner.state.send_if_modified(|s| {
            if s.submitting {
                return false;
            }
            s.modal = None;
            s.error = None;
            true
        })
    }

    pub async fn create(&self, fields: AlbumFields) -> bool {
        self.begin_submit();
        self.run_create(fields).await
    }

    pub async fn update(&self, id: AlbumId, fields: AlbumFields) -> bool {
        self.begin_submit();
        self.run_update(id, fields).await
    }

    /// Submit the open modal's form. Nothing is sent while another submission
    /// is in flight or when the fields do not validate.
    pub async fn submit_form(&self, fields: AlbumFields) -> FormSubmission {
        let fields = match fields.validate() {
            Ok(fields) => fields,
            Err(e) => return FormSubmission::Invalid(e),
        };

        let mut editing = None;
        let acquired = self.inner.state.send_if_modified(|s| {
            if s.submitting {
                return false;
            }
            s.submitting = true;
            s.error = None;
            if let Some(AlbumModal::Edit(album)) = &s.modal {
                editing = Some(album.id);
            }
            true
        });
        if !acquired {
            debug!("Album form submission ignored: already submitting");
            return FormSubmission::Busy;
        }

        match editing {
            Some(id) => self.run_update(id, fields).await,
            None => self.run_create(fields).await,
        };
        FormSubmission::Submitted
    }

    fn begin_submit(&self) {
        self.update_state(|s| {
            s.submitting = true;
            s.error = None;
        });
    }

    async fn run_create(&self, fields: AlbumFields) -> bool {
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

        match self.inner.client.create_album(&fields).await {
            Ok(album) => {
                info!("Created album {} ({})", album.id, album.name);
                self.finish_submit(Mutation::CreateAlbum).await;
                true
            }
            Err(e) => {
                self.fail_submit(Mutation::CreateAlbum, e);
                false
            }
        }
    }

    async fn run_update(&self, id: AlbumId, fields: AlbumFields) -> bool {
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

        match self.inner.client.update_album(id, &fields).await {
            Ok(()) => {
                info!("Updated album {}", id);
                self.finish_submit(Mutation::UpdateAlbum).await;
                true
            }
            Err(e) => {
                self.fail_submit(Mutation::UpdateAlbum, e);
                false
            }
        }
    }

    async fn finish_submit(&self, mutation: Mutation) {
        self.reconcile(mutation).await;
        self.update_state(|s| {
            s.modal = None;
            s.submitting = false;
        });
    }

    /// Keep the list and the modal, surface the message
    fn fail_submit(&self, mutation: Mutation, e: PhotoApiError) {
        error!("Error saving album ({}): {}", mutation, e);
        self.update_state(|s| {
            s.error = Some(e.user_message(SAVE_ALBUM_FAILED));
            s.submitting = false;
        });
    }

    pub async fn delete(&self, id: AlbumId) -> bool {
        self.update_state(|s| s.error = None);

        match self.inner.client.delete_album(id).await {
            Ok(()) => {
                info!("Deleted album {}", id);
                self.reconcile(Mutation::DeleteAlbum).await;
                true
            }
            Err(e) => {
                error!("Error deleting album {}: {}", id, e);
                self.update_state(|s| s.error = Some(e.user_message(DELETE_ALBUM_FAILED)));
                false
            }
        }
    }

    /// Ask for confirmation before deleting `album`
    pub fn request_delete(&self, album: &Album) {
        let pending = PendingDelete {
            id: album.id,
            prompt: format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                album.name
            ),
        };
        self.update_state(|s| s.pending_delete = Some(pending));
    }

    pub fn cancel_delete(&self) {
        self.update_state(|s| s.pending_delete = None);
    }

    /// Delete the album awaiting confirmation, if any
    pub async fn confirm_delete(&self) -> bool {
        let mut pending = None;
        self.update_state(|s| pending = s.pending_delete.take());

        match pending {
            Some(pending) => self.delete(pending.id).await,
            None => false,
        }
    }
}

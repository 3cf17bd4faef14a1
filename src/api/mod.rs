//! Typed access to the photo organizer REST service.

mod client;
mod error;

pub use client::HttpPhotoApi;
pub use error::{PhotoApiError, RemoteError, RemoteErrorKind};

use crate::models::{
    Album, AlbumDetail, AlbumFields, AlbumId, Photo, PhotoContent, PhotoId, UploadCounts,
};
use crate::upload::UploadFile;
use std::sync::Arc;

/// One operation per remote action (allows mocking for tests).
///
/// Implementations perform a single round trip per call: no retries and no
/// caching.
#[async_trait::async_trait]
pub trait PhotoApi: Send + Sync {
    async fn list_albums(&self) -> Result<Vec<Album>, PhotoApiError>;
    async fn get_album(&self, id: AlbumId) -> Result<AlbumDetail, PhotoApiError>;
    async fn create_album(&self, fields: &AlbumFields) -> Result<Album, PhotoApiError>;
    async fn update_album(&self, id: AlbumId, fields: &AlbumFields) -> Result<(), PhotoApiError>;
    async fn delete_album(&self, id: AlbumId) -> Result<(), PhotoApiError>;
    async fn list_photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, PhotoApiError>;
    async fn upload_photos(
        &self,
        album_id: AlbumId,
        files: &[UploadFile],
    ) -> Result<UploadCounts, PhotoApiError>;
    async fn delete_photo(&self, id: PhotoId) -> Result<(), PhotoApiError>;
    async fn view_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError>;
    async fn download_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError>;
    async fn health(&self) -> Result<(), PhotoApiError>;

    /// Address of the compressed rendition, usable directly as an image source
    fn view_url(&self, id: PhotoId) -> String;
}

/// Stateless client value injected into each screen's store
#[derive(Clone)]
pub struct PhotoClient {
    api: Arc<dyn PhotoApi>,
}

impl PhotoClient {
    /// Client talking HTTP to the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_api(Arc::new(HttpPhotoApi::new(base_url)))
    }

    pub fn from_api(api: Arc<dyn PhotoApi>) -> Self {
        Self { api }
    }
}

impl std::ops::Deref for PhotoClient {
    type Target = dyn PhotoApi;

    fn deref(&self) -> &Self::Target {
        self.api.as_ref()
    }
}

impl PartialEq for PhotoClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.api, &other.api)
    }
}

use super::{PhotoApi, PhotoApiError, RemoteError};
use crate::models::{
    Album, AlbumDetail, AlbumFields, AlbumId, Photo, PhotoContent, PhotoId, UploadCounts,
};
use crate::upload::UploadFile;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Multipart field the service reads uploaded files from
const UPLOAD_FIELD: &str = "files";

/// `PhotoApi` over HTTP
#[derive(Clone)]
pub struct HttpPhotoApi {
    client: Client,
    base_url: String,
}

impl HttpPhotoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into `PhotoApiError::Remote`
    async fn check(response: Response) -> Result<Response, PhotoApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = RemoteError::from_body(status.as_u16(), &body);
        warn!("{} {}", response_label(status.as_u16()), err);
        Err(PhotoApiError::Remote(err))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, PhotoApiError> {
        let response = Self::check(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn content(response: Response) -> Result<PhotoContent, PhotoApiError> {
        let response = Self::check(response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename);
        let bytes = response.bytes().await?.to_vec();

        Ok(PhotoContent {
            bytes,
            content_type,
            filename,
        })
    }
}

fn response_label(status: u16) -> &'static str {
    if status >= 500 {
        "Server error:"
    } else {
        "Request rejected:"
    }
}

/// Extract `filename` from a `Content-Disposition` header value
fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[async_trait::async_trait]
impl PhotoApi for HttpPhotoApi {
    async fn list_albums(&self) -> Result<Vec<Album>, PhotoApiError> {
        debug!("GET /albums");
        let response = self.client.get(self.url("/albums")).send().await?;
        Self::json(response).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<AlbumDetail, PhotoApiError> {
        debug!("GET /albums/{}", id);
        let response = self
            .client
            .get(self.url(&format!("/albums/{}", id)))
            .send()
            .await?;
        Self::json(response).await
    }

    async fn create_album(&self, fields: &AlbumFields) -> Result<Album, PhotoApiError> {
        debug!("POST /albums name={:?}", fields.name);
        let response = self
            .client
            .post(self.url("/albums"))
            .json(fields)
            .send()
            .await?;
        Self::json(response).await
    }

    async fn update_album(&self, id: AlbumId, fields: &AlbumFields) -> Result<(), PhotoApiError> {
        debug!("PUT /albums/{} name={:?}", id, fields.name);
        let response = self
            .client
            .put(self.url(&format!("/albums/{}", id)))
            .json(fields)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_album(&self, id: AlbumId) -> Result<(), PhotoApiError> {
        debug!("DELETE /albums/{}", id);
        let response = self
            .client
            .delete(self.url(&format!("/albums/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, PhotoApiError> {
        debug!("GET /albums/{}/photos", album_id);
        let response = self
            .client
            .get(self.url(&format!("/albums/{}/photos", album_id)))
            .send()
            .await?;
        Self::json(response).await
    }

    async fn upload_photos(
        &self,
        album_id: AlbumId,
        files: &[UploadFile],
    ) -> Result<UploadCounts, PhotoApiError> {
        debug!("POST /albums/{}/photos with {} files", album_id, files.len());

        // Whole batch in a single multipart request
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.data.clone())
                .file_name(file.name.clone())
                .mime_str(&file.media_type)?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self
            .client
            .post(self.url(&format!("/albums/{}/photos", album_id)))
            .multipart(form)
            .send()
            .await?;
        Self::json(response).await
    }

    async fn delete_photo(&self, id: PhotoId) -> Result<(), PhotoApiError> {
        debug!("DELETE /photos/{}", id);
        let response = self
            .client
            .delete(self.url(&format!("/photos/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn view_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError> {
        let response = self.client.get(self.view_url(id)).send().await?;
        Self::content(response).await
    }

    async fn download_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError> {
        debug!("GET /photos/{}/download", id);
        let response = self
            .client
            .get(self.url(&format!("/photos/{}/download", id)))
            .send()
            .await?;
        Self::content(response).await
    }

    async fn health(&self) -> Result<(), PhotoApiError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    fn view_url(&self, id: PhotoId) -> String {
        self.url(&format!("/photos/{}/view", id))
    }
}

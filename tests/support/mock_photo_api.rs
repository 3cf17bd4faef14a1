use photo_organizer::api::{PhotoApi, PhotoApiError, RemoteError};
use photo_organizer::models::{
    Album, AlbumDetail, AlbumFields, AlbumId, Photo, PhotoContent, PhotoId, UploadCounts,
};
use photo_organizer::upload::UploadFile;
use photo_organizer::PhotoClient;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

/// In-memory photo service
///
/// Keeps albums and photos the way the real service does (server-computed
/// photo count and cover photo, cascade on album delete) so stores can be
/// tested without a network. Supports one-shot failure injection and gates
/// that hold an operation until the test releases it.
#[derive(Default)]
pub struct MockPhotoApi {
    data: Mutex<MockData>,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, RemoteError>>,
    gates: Mutex<HashMap<&'static str, Arc<Gate>>>,
}

#[derive(Default)]
struct MockData {
    next_album_id: i64,
    next_photo_id: i64,
    albums: BTreeMap<AlbumId, (String, Option<String>)>,
    photos: BTreeMap<PhotoId, (AlbumId, Photo)>,
}

/// Holds an operation after it has been entered
pub struct Gate {
    entered: Notify,
    release: Semaphore,
}

impl Gate {
    /// Wait until the gated operation has been called
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one gated call continue
    pub fn release(&self) {
        self.release.add_permits(1);
    }
}

impl MockPhotoApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> PhotoClient {
        PhotoClient::from_api(self.clone())
    }

    /// Seed an album directly, bypassing call counting
    pub fn seed_album(&self, name: &str, description: Option<&str>) -> AlbumId {
        let mut data = self.data.lock().unwrap();
        data.next_album_id += 1;
        let id = AlbumId(data.next_album_id);
        data.albums
            .insert(id, (name.to_string(), description.map(str::to_string)));
        id
    }

    pub fn seed_photo(&self, album_id: AlbumId, original_filename: &str) -> PhotoId {
        let mut data = self.data.lock().unwrap();
        data.insert_photo(album_id, original_filename)
    }

    /// Make the next call of `op` fail with `status`
    pub fn fail_next(&self, op: &'static str, status: u16, message: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, RemoteError::new(status, message.map(str::to_string)));
    }

    /// Hold every call of `op` until released through the returned gate
    pub fn gate(&self, op: &'static str) -> Arc<Gate> {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Semaphore::new(0),
        });
        self.gates.lock().unwrap().insert(op, gate.clone());
        gate
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn photo_count(&self, album_id: AlbumId) -> usize {
        let data = self.data.lock().unwrap();
        data.photos.values().filter(|(a, _)| *a == album_id).count()
    }

    async fn enter(&self, op: &'static str) -> Result<(), PhotoApiError> {
        self.calls.lock().unwrap().push(op);

        let gate = self.gates.lock().unwrap().get(op).cloned();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            if let Ok(permit) = gate.release.acquire().await {
                permit.forget();
            }
        }

        match self.failures.lock().unwrap().remove(op) {
            Some(err) => Err(PhotoApiError::Remote(err)),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> PhotoApiError {
    PhotoApiError::Remote(RemoteError::new(404, Some(format!("{what} not found"))))
}

impl MockData {
    fn insert_photo(&mut self, album_id: AlbumId, original_filename: &str) -> PhotoId {
        self.next_photo_id += 1;
        let id = PhotoId(self.next_photo_id);
        let photo = Photo {
            id,
            original_filename: original_filename.to_string(),
            filename: Some(format!("{}.jpg", id)),
            file_format: Some("JPEG".to_string()),
            original_size: None,
            compressed_size: None,
            width: None,
            height: None,
            compression_ratio: None,
            created_at: None,
        };
        self.photos.insert(id, (album_id, photo));
        id
    }

    fn photos_of(&self, album_id: AlbumId) -> Vec<Photo> {
        self.photos
            .values()
            .filter(|(a, _)| *a == album_id)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn album(&self, id: AlbumId) -> Option<Album> {
        let (name, description) = self.albums.get(&id)?;
        let photos = self.photos_of(id);
        Some(Album {
            id,
            name: name.clone(),
            description: description.clone(),
            cover_photo: photos.first().map(|p| p.id),
            photo_count: photos.len() as u32,
            created_at: None,
            updated_at: None,
        })
    }

    fn name_taken(&self, name: &str, except: Option<AlbumId>) -> bool {
        self.albums
            .iter()
            .any(|(id, (n, _))| n == name && Some(*id) != except)
    }
}

fn stored_description(description: &str) -> Option<String> {
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_string())
}

#[async_trait::async_trait]
impl PhotoApi for MockPhotoApi {
    async fn list_albums(&self) -> Result<Vec<Album>, PhotoApiError> {
        self.enter("list_albums").await?;
        let data = self.data.lock().unwrap();
        Ok(data.albums.keys().filter_map(|id| data.album(*id)).collect())
    }

    async fn get_album(&self, id: AlbumId) -> Result<AlbumDetail, PhotoApiError> {
        self.enter("get_album").await?;
        let data = self.data.lock().unwrap();
        let album = data.album(id).ok_or_else(|| not_found("Album"))?;
        Ok(AlbumDetail {
            album,
            photos: data.photos_of(id),
        })
    }

    async fn create_album(&self, fields: &AlbumFields) -> Result<Album, PhotoApiError> {
        self.enter("create_album").await?;
        let mut data = self.data.lock().unwrap();
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(PhotoApiError::remote(400, "Album name cannot be empty"));
        }
        if data.name_taken(name, None) {
            return Err(PhotoApiError::remote(409, "Album name already exists"));
        }
        data.next_album_id += 1;
        let id = AlbumId(data.next_album_id);
        data.albums
            .insert(id, (name.to_string(), stored_description(&fields.description)));
        data.album(id).ok_or_else(|| not_found("Album"))
    }

    async fn update_album(&self, id: AlbumId, fields: &AlbumFields) -> Result<(), PhotoApiError> {
        self.enter("update_album").await?;
        let mut data = self.data.lock().unwrap();
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(PhotoApiError::remote(400, "Album name cannot be empty"));
        }
        if data.name_taken(name, Some(id)) {
            return Err(PhotoApiError::remote(409, "Album name already exists"));
        }
        let entry = data.albums.get_mut(&id).ok_or_else(|| not_found("Album"))?;
        *entry = (name.to_string(), stored_description(&fields.description));
        Ok(())
    }

    async fn delete_album(&self, id: AlbumId) -> Result<(), PhotoApiError> {
        self.enter("delete_album").await?;
        let mut data = self.data.lock().unwrap();
        data.albums.remove(&id).ok_or_else(|| not_found("Album"))?;
        data.photos.retain(|_, (album_id, _)| *album_id != id);
        Ok(())
    }

    async fn list_photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, PhotoApiError> {
        self.enter("list_photos").await?;
        Ok(self.data.lock().unwrap().photos_of(album_id))
    }

    async fn upload_photos(
        &self,
        album_id: AlbumId,
        files: &[UploadFile],
    ) -> Result<UploadCounts, PhotoApiError> {
        self.enter("upload_photos").await?;
        let mut data = self.data.lock().unwrap();
        if !data.albums.contains_key(&album_id) {
            return Err(not_found("Album"));
        }
        if files.is_empty() {
            return Err(PhotoApiError::remote(400, "No files provided"));
        }

        let mut counts = UploadCounts::default();
        for file in files {
            if file.data.starts_with(b"corrupt") {
                counts.failed += 1;
            } else {
                data.insert_photo(album_id, &file.name);
                counts.uploaded += 1;
            }
        }
        Ok(counts)
    }

    async fn delete_photo(&self, id: PhotoId) -> Result<(), PhotoApiError> {
        self.enter("delete_photo").await?;
        let mut data = self.data.lock().unwrap();
        data.photos.remove(&id).ok_or_else(|| not_found("Photo"))?;
        Ok(())
    }

    async fn view_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError> {
        self.enter("view_photo").await?;
        let data = self.data.lock().unwrap();
        data.photos.get(&id).ok_or_else(|| not_found("Photo"))?;
        Ok(PhotoContent {
            bytes: vec![0xff, 0xd8],
            content_type: Some("image/jpeg".to_string()),
            filename: None,
        })
    }

    async fn download_photo(&self, id: PhotoId) -> Result<PhotoContent, PhotoApiError> {
        self.enter("download_photo").await?;
        let data = self.data.lock().unwrap();
        let (_, photo) = data.photos.get(&id).ok_or_else(|| not_found("Photo"))?;
        Ok(PhotoContent {
            bytes: vec![0xff, 0xd8],
            content_type: Some("image/jpeg".to_string()),
            filename: Some(photo.original_filename.clone()),
        })
    }

    async fn health(&self) -> Result<(), PhotoApiError> {
        self.enter("health").await
    }

    fn view_url(&self, id: PhotoId) -> String {
        format!("mock://photos/{}/view", id)
    }
}

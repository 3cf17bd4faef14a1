use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One multipart part as the server received it
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct ServerState {
    next_id: i64,
    albums: BTreeMap<i64, (String, Option<String>)>,
    photos: BTreeMap<i64, (i64, String)>,
    pub upload_requests: usize,
    pub received_parts: Vec<ReceivedPart>,
    /// Answer `GET /albums` with an HTML 500 page
    pub fail_listing: bool,
}

impl ServerState {
    fn album_json(&self, id: i64) -> Option<Value> {
        let (name, description) = self.albums.get(&id)?;
        let photo_ids: Vec<i64> = self
            .photos
            .iter()
            .filter(|(_, (album_id, _))| *album_id == id)
            .map(|(photo_id, _)| *photo_id)
            .collect();
        Some(json!({
            "id": id,
            "name": name,
            "description": description,
            "photo_count": photo_ids.len(),
            "cover_photo": photo_ids.first(),
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-01 10:00:00",
        }))
    }

    fn photos_json(&self, album_id: i64) -> Vec<Value> {
        self.photos
            .iter()
            .filter(|(_, (a, _))| *a == album_id)
            .map(|(id, (_, name))| {
                json!({
                    "id": id,
                    "filename": format!("{id}.jpg"),
                    "original_filename": name,
                    "file_format": "JPEG",
                    "width": 640,
                    "height": 480,
                })
            })
            .collect()
    }
}

type Shared = Arc<Mutex<ServerState>>;

/// HTTP stand-in for the photo service on a local port, speaking the same
/// routes and error bodies.
pub struct FakeServer {
    pub base_url: String,
    pub state: Shared,
}

impl FakeServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/albums", get(list_albums).post(create_album))
            .route(
                "/api/albums/:id",
                get(get_album).put(update_album).delete(delete_album),
            )
            .route(
                "/api/albums/:id/photos",
                get(list_photos).post(upload_photos),
            )
            .route("/api/photos/:id", delete(delete_photo))
            .route("/api/photos/:id/view", get(view_photo))
            .route("/api/photos/:id/download", get(download_photo))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn seed_album(&self, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.albums.insert(id, (name.to_string(), None));
        id
    }

    pub fn seed_photo(&self, album_id: i64, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.photos.insert(id, (album_id, name.to_string()));
        id
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_albums(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.fail_listing {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>",
        )
            .into_response();
    }
    let albums: Vec<Value> = state
        .albums
        .keys()
        .filter_map(|id| state.album_json(*id))
        .collect();
    Json(albums).into_response()
}

async fn get_album(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.album_json(id) {
        Some(mut album) => {
            album["photos"] = Value::Array(state.photos_json(id));
            Json(album).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Album not found"),
    }
}

async fn create_album(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Album name cannot be empty");
    }
    if state.albums.values().any(|(n, _)| *n == name) {
        return error(StatusCode::CONFLICT, "Album name already exists");
    }
    let description = body["description"]
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    state.next_id += 1;
    let id = state.next_id;
    state.albums.insert(id, (name.clone(), description.clone()));
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": name,
            "description": description,
            "photo_count": 0,
            "message": "Album created successfully",
        })),
    )
        .into_response()
}

async fn update_album(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Album name cannot be empty");
    }
    let description = body["description"]
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    match state.albums.get_mut(&id) {
        Some(entry) => {
            *entry = (name, description);
            Json(json!({ "message": "Album updated successfully" })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Album not found"),
    }
}

async fn delete_album(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if state.albums.remove(&id).is_none() {
        return error(StatusCode::NOT_FOUND, "Album not found");
    }
    state.photos.retain(|_, (album_id, _)| *album_id != id);
    Json(json!({ "message": "Album deleted successfully" })).into_response()
}

async fn list_photos(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().photos_json(id))
}

async fn upload_photos(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let received = ReceivedPart {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
        };
        let data = field.bytes().await.unwrap_or_default();
        parts.push((received, data));
    }

    let mut state = state.lock().unwrap();
    state.upload_requests += 1;
    if !state.albums.contains_key(&id) {
        return error(StatusCode::NOT_FOUND, "Album not found");
    }
    let files: Vec<_> = parts.iter().filter(|(p, _)| p.field == "files").collect();
    if files.is_empty() {
        return error(StatusCode::BAD_REQUEST, "No files provided");
    }

    let mut uploaded = 0;
    let mut failed = 0;
    for (part, data) in &files {
        if data.starts_with(b"corrupt") {
            failed += 1;
        } else {
            state.next_id += 1;
            let photo_id = state.next_id;
            let name = part.file_name.clone().unwrap_or_default();
            state.photos.insert(photo_id, (id, name));
            uploaded += 1;
        }
    }
    state
        .received_parts
        .extend(parts.into_iter().map(|(p, _)| p));

    let status = if failed > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::CREATED
    };
    (
        status,
        Json(json!({
            "uploaded": uploaded,
            "failed": failed,
            "photos": [],
            "message": format!("Uploaded {uploaded} photos, {failed} failed"),
        })),
    )
        .into_response()
}

async fn delete_photo(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    match state.photos.remove(&id) {
        Some(_) => Json(json!({ "message": "Photo deleted successfully" })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Photo not found"),
    }
}

async fn view_photo(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    if !state.photos.contains_key(&id) {
        return error(StatusCode::NOT_FOUND, "Photo not found");
    }
    ([(header::CONTENT_TYPE, "image/jpeg")], vec![0xffu8, 0xd8, 0xff]).into_response()
}

async fn download_photo(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    let Some((_, name)) = state.photos.get(&id) else {
        return error(StatusCode::NOT_FOUND, "Photo not found");
    };
    let disposition = format!("attachment; filename=\"{}\"", name);
    (
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        vec![0xffu8, 0xd8, 0xff, 0xd9],
    )
        .into_response()
}

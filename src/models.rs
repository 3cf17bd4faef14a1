use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Server-assigned album identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub i64);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned photo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub i64);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Album as listed by `GET /albums`
///
/// `photo_count` and `cover_photo` are computed by the server and are only
/// ever refreshed by fetching the album again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_photo: Option<PhotoId>,
    #[serde(default)]
    pub photo_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A stored photo. Image bytes are only reachable through the view and
/// download endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub original_filename: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub original_size: Option<u64>,
    #[serde(default)]
    pub compressed_size: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub compression_ratio: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Album with its photos embedded, as returned by `GET /albums/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Client-side validation failures. These block submission before any
/// network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Album name cannot be empty")]
    EmptyName,
    #[error("Please select valid image files (JPEG, PNG, HEIC)")]
    NoValidImages { selected: usize },
}

/// Editable album fields sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFields {
    pub name: String,
    pub description: String,
}

impl AlbumFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Prefill the edit form from an existing album
    pub fn from_album(album: &Album) -> Self {
        Self {
            name: album.name.clone(),
            description: album.description.clone().unwrap_or_default(),
        }
    }

    /// Returns the trimmed fields, or `EmptyName` when the name is blank.
    pub fn validate(&self) -> Result<AlbumFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(AlbumFields {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Server-side outcome of one upload batch. Files that failed decoding or
/// storage are counted in `failed`; this is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCounts {
    pub uploaded: usize,
    pub failed: usize,
}

/// Photo bytes fetched from the view or download endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

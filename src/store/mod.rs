//! Per-screen resource stores.
//!
//! Each screen owns one store for as long as it is mounted. A store holds the
//! screen's view of server state and exposes the mutation entry points; after
//! every successful mutation it refetches from the server (see `reconcile`).
//! `submitting` and uploading flags are advisory: the `submit_form` and
//! `select_files` entries honor them, the plain mutation entries do not.

mod album_detail;
mod albums;
pub mod reconcile;

pub use album_detail::{AlbumDetailState, AlbumDetailStore, AlbumView};
pub use albums::{AlbumModal, AlbumsState, AlbumsStore};

use crate::models::ValidationError;

pub const LOAD_ALBUMS_FAILED: &str = "Failed to load albums. Please try again.";
pub const LOAD_ALBUM_FAILED: &str = "Failed to load album. Please try again.";
pub const SAVE_ALBUM_FAILED: &str = "Failed to save album. Please try again.";
pub const UPDATE_ALBUM_FAILED: &str = "Failed to update album. Please try again.";
pub const DELETE_ALBUM_FAILED: &str = "Failed to delete album. Please try again.";
pub const DELETE_PHOTO_FAILED: &str = "Failed to delete photo. Please try again.";

/// Result of submitting a modal form through the UI entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// The request was sent; see the store state for its outcome
    Submitted,
    /// A submission was already in flight; nothing was sent
    Busy,
    /// Client-side validation failed; nothing was sent
    Invalid(ValidationError),
}

/// A destructive delete waiting for the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete<Id> {
    pub id: Id,
    pub prompt: String,
}

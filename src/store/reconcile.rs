//! What to reload after a successful mutation.
//!
//! Stores never patch their previous state: every successful mutation is
//! followed by a fresh fetch of the affected collection, so server-computed
//! fields (photo count, cover photo) are always the server's.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Albums,
    AlbumDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateAlbum,
    UpdateAlbum,
    DeleteAlbum,
    UploadPhotos,
    DeletePhoto,
}

impl Mutation {
    pub fn is_photo_level(&self) -> bool {
        matches!(self, Mutation::UploadPhotos | Mutation::DeletePhoto)
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mutation::CreateAlbum => "create album",
            Mutation::UpdateAlbum => "update album",
            Mutation::DeleteAlbum => "delete album",
            Mutation::UploadPhotos => "upload photos",
            Mutation::DeletePhoto => "delete photo",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTarget {
    AlbumList,
    AlbumWithPhotos,
}

/// Collection a screen must refetch after `mutation` succeeds.
///
/// Photo-level mutations never touch the album list; the list's photo counts
/// stay as they were until the albums screen loads again.
pub fn reload_target(mutation: Mutation, screen: Screen) -> Option<ReloadTarget> {
    match (screen, mutation.is_photo_level()) {
        (Screen::Albums, false) => Some(ReloadTarget::AlbumList),
        (Screen::Albums, true) => None,
        (Screen::AlbumDetail, _) => Some(ReloadTarget::AlbumWithPhotos),
    }
}

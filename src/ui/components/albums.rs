use crate::models::{Album, AlbumFields};
use crate::store::{AlbumModal, FormSubmission};
use crate::ui::hooks::use_albums_store;
use crate::ui::Route;
use dioxus::prelude::*;
use tracing::debug;

use super::{AlbumCard, AlbumForm, ConfirmDialog, ErrorBanner};

/// Albums screen
#[component]
pub fn Albums() -> Element {
    let (store, state) = use_albums_store();
    let snapshot = state();

    let on_create = {
        let store = store.clone();
        move |_| store.open_create()
    };
    let on_edit = {
        let store = store.clone();
        move |album: Album| store.open_edit(album)
    };
    let on_delete = {
        let store = store.clone();
        move |album: Album| store.request_delete(&album)
    };
    let on_view = move |album: Album| {
        navigator().push(Route::AlbumDetail {
            album_id: album.id.0,
        });
    };
    let on_submit = {
        let store = store.clone();
        move |fields: AlbumFields| {
            let store = store.clone();
            spawn(async move {
                if let FormSubmission::Invalid(e) = store.submit_form(fields).await {
                    debug!("Album form not submitted: {}", e);
                }
            });
        }
    };
    let on_close = {
        let store = store.clone();
        move |_| {
            store.close_modal();
        }
    };
    let on_confirm_delete = {
        let store = store.clone();
        move |_| {
            let store = store.clone();
            spawn(async move {
                store.confirm_delete().await;
            });
        }
    };
    let on_cancel_delete = {
        let store = store.clone();
        move |_| store.cancel_delete()
    };

    rsx! {
        div { class: "container",
            header { class: "header",
                h1 { "Albums" }
                button { class: "btn btn-primary", onclick: on_create, "+ New Album" }
            }

            ErrorBanner { message: snapshot.error.clone() }

            if snapshot.loading && snapshot.albums.is_empty() {
                div { class: "loading",
                    div { class: "spinner" }
                    "Loading albums..."
                }
            } else if snapshot.albums.is_empty() {
                div { class: "empty-state",
                    h3 { class: "empty-state-title", "No albums yet" }
                    p { class: "empty-state-text", "Create your first album to get started" }
                }
            } else {
                div { class: "album-grid",
                    for album in snapshot.albums.iter().cloned() {
                        AlbumCard {
                            key: "{album.id}",
                            album,
                            on_view,
                            on_edit: on_edit.clone(),
                            on_delete: on_delete.clone(),
                        }
                    }
                }
            }

            if let Some(modal) = snapshot.modal.clone() {
                AlbumForm {
                    title: match &modal {
                        AlbumModal::Create => "Create New Album".to_string(),
                        AlbumModal::Edit(_) => "Edit Album".to_string(),
                    },
                    initial: match &modal {
                        AlbumModal::Create => AlbumFields::default(),
                        AlbumModal::Edit(album) => AlbumFields::from_album(album),
                    },
                    is_edit: matches!(modal, AlbumModal::Edit(_)),
                    submitting: snapshot.submitting,
                    error: snapshot.error.clone(),
                    on_submit,
                    on_cancel: on_close,
                }
            }

            if let Some(pending) = snapshot.pending_delete.clone() {
                ConfirmDialog {
                    title: "Delete Album?".to_string(),
                    message: pending.prompt,
                    on_confirm: on_confirm_delete,
                    on_cancel: on_cancel_delete,
                }
            }
        }
    }
}
